//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading late fee
//! settings from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::LateFeeSettings;

use super::types::RawLateFeeSettings;

/// Loads a late fee settings record from YAML.
///
/// The file holds a single record. Missing fields fall back to the
/// defaults, and the shift start may be written as `"HH:MM"`,
/// `"HH:MM:SS"`, or as seconds since midnight:
///
/// ```text
/// shift_start: "08:00:00"
/// grace_period_minutes: 10
/// fee_type: fixed
/// fixed_fee_amount: "50.00"
/// per_minute_fee: "5.00"
/// ```
///
/// # Example
///
/// ```no_run
/// use late_fee_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/late_fee/settings.yaml").unwrap();
/// println!("Shift starts at {}", loader.settings().shift_start);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: LateFeeSettings,
}

impl SettingsLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `SettingsLoader` on success, or an error if:
    /// - The file is missing ([`EngineError::ConfigNotFound`])
    /// - The file is not valid YAML ([`EngineError::ConfigParseError`])
    /// - A value cannot be normalised ([`EngineError::InvalidSettings`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let raw: RawLateFeeSettings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        let settings = raw.normalize()?;
        debug!(path = %path_str, shift_start = %settings.shift_start, fee_type = %settings.fee_type, "Loaded late fee settings");

        Ok(Self { settings })
    }

    /// Loads settings from a YAML string.
    ///
    /// # Example
    ///
    /// ```
    /// use late_fee_engine::config::SettingsLoader;
    /// use late_fee_engine::models::FeeType;
    ///
    /// let loader = SettingsLoader::from_yaml_str("shift_start: 28800\nfee_type: tiered\n")?;
    /// assert_eq!(loader.settings().shift_start.to_string(), "08:00");
    /// assert_eq!(loader.settings().fee_type, FeeType::Tiered);
    /// # Ok::<(), late_fee_engine::error::EngineError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let raw: RawLateFeeSettings =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            settings: raw.normalize()?,
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &LateFeeSettings {
        &self.settings
    }

    /// Consumes the loader and returns the settings.
    pub fn into_settings(self) -> LateFeeSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeeType, ShiftStart};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn settings_path() -> &'static str {
        "./config/late_fee/settings.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_settings_file() {
        let result = SettingsLoader::load(settings_path());
        assert!(result.is_ok(), "Failed to load settings: {:?}", result.err());

        let settings = result.unwrap().into_settings();
        assert_eq!(settings.shift_start, ShiftStart::new(8, 0).unwrap());
        assert_eq!(settings.grace_period_minutes, 10);
        assert_eq!(settings.fee_type, FeeType::Fixed);
        assert_eq!(settings.fixed_fee_amount, dec("50.00"));
        assert_eq!(settings.per_minute_fee, dec("5.00"));
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = SettingsLoader::load("/nonexistent/settings.yaml");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let result = SettingsLoader::from_yaml_str("grace_period_minutes: [not, a, number]");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let loader = SettingsLoader::from_yaml_str("{}").unwrap();
        assert_eq!(loader.settings(), &LateFeeSettings::default());
    }

    #[test]
    fn test_legacy_column_name_is_accepted() {
        let loader =
            SettingsLoader::from_yaml_str("standard_shift_start: \"09:00:00\"\n").unwrap();
        assert_eq!(loader.settings().shift_start.to_string(), "09:00");
    }

    #[test]
    fn test_unknown_fee_type_is_rejected() {
        let result = SettingsLoader::from_yaml_str("fee_type: hourly\n");
        assert!(matches!(
            result,
            Err(EngineError::InvalidSettings { ref field, .. }) if field == "fee_type"
        ));
    }

    #[test]
    fn test_out_of_range_shift_start_is_rejected() {
        let result = SettingsLoader::from_yaml_str("shift_start: 90000\n");
        assert!(matches!(
            result,
            Err(EngineError::InvalidSettings { ref field, .. }) if field == "shift_start"
        ));
    }
}
