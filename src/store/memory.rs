//! In-memory settings store.

use std::sync::{PoisonError, RwLock};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::EngineResult;
use crate::models::LateFeeSettings;

use super::{SettingsStore, SettingsVersion};

/// A thread-safe [`SettingsStore`] that keeps every saved record.
///
/// # Example
///
/// ```
/// use late_fee_engine::models::LateFeeSettings;
/// use late_fee_engine::store::{InMemorySettingsStore, SettingsStore};
///
/// let store = InMemorySettingsStore::new();
/// assert!(store.get_active().is_none());
///
/// store.ensure_default();
/// assert_eq!(store.get_active(), Some(LateFeeSettings::default()));
/// ```
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    versions: RwLock<Vec<SettingsVersion>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store with no active settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose active record is `settings`.
    pub fn with_settings(settings: LateFeeSettings) -> EngineResult<Self> {
        let store = Self::new();
        store.replace_active(settings)?;
        Ok(store)
    }

    /// Saves the default settings if no record is active.
    ///
    /// Returns true if defaults were inserted.
    pub fn ensure_default(&self) -> bool {
        let mut versions = self.versions.write().unwrap_or_else(PoisonError::into_inner);
        if versions.iter().any(|v| v.is_active) {
            return false;
        }
        push_active(&mut versions, LateFeeSettings::default(), now());
        info!("Default late fee settings created");
        true
    }

    /// Replaces the active record with the default settings.
    pub fn reset_to_default(&self) -> SettingsVersion {
        let mut versions = self.versions.write().unwrap_or_else(PoisonError::into_inner);
        let version = push_active(&mut versions, LateFeeSettings::default(), now());
        info!(version = version.id, "Late fee settings reset to defaults");
        version
    }

    /// Returns every saved record, oldest first.
    pub fn history(&self) -> Vec<SettingsVersion> {
        self.versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Makes `settings` active with an explicit save time.
    pub fn replace_active_at(
        &self,
        settings: LateFeeSettings,
        created_at: NaiveDateTime,
    ) -> EngineResult<SettingsVersion> {
        settings.validate()?;

        let mut versions = self.versions.write().unwrap_or_else(PoisonError::into_inner);
        let version = push_active(&mut versions, settings, created_at);
        info!(
            version = version.id,
            shift_start = %version.settings.shift_start,
            grace_period_minutes = version.settings.grace_period_minutes,
            fee_type = %version.settings.fee_type,
            "Late fee settings replaced"
        );
        Ok(version)
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get_active(&self) -> Option<LateFeeSettings> {
        // Newest active record wins, matching "ORDER BY id DESC LIMIT 1".
        self.versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|v| v.is_active)
            .map(|v| v.settings.clone())
    }

    fn replace_active(&self, settings: LateFeeSettings) -> EngineResult<SettingsVersion> {
        self.replace_active_at(settings, now())
    }
}

fn push_active(
    versions: &mut Vec<SettingsVersion>,
    settings: LateFeeSettings,
    created_at: NaiveDateTime,
) -> SettingsVersion {
    for version in versions.iter_mut() {
        version.is_active = false;
    }
    let id = versions.last().map_or(1, |v| v.id + 1);
    let version = SettingsVersion {
        id,
        settings,
        is_active: true,
        created_at,
    };
    versions.push(version.clone());
    version
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
