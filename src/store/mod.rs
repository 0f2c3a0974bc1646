//! Active settings storage.
//!
//! The engine never queries storage itself. Callers fetch a snapshot from a
//! [`SettingsStore`] and pass it in, so an update racing with a clock-in can
//! never be observed half-applied.

mod memory;

pub use memory::InMemorySettingsStore;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::LateFeeSettings;

/// One stored settings record.
///
/// Records are versioned by replacement: saving new settings deactivates
/// the previous record and appends a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsVersion {
    /// Monotonically increasing record id.
    pub id: u64,
    /// The settings held by this record.
    pub settings: LateFeeSettings,
    /// Whether this is the record callers evaluate against.
    pub is_active: bool,
    /// When the record was saved.
    pub created_at: NaiveDateTime,
}

/// Supplies the single active settings record.
pub trait SettingsStore: Send + Sync {
    /// Returns a snapshot of the active settings, or `None` if none exist.
    fn get_active(&self) -> Option<LateFeeSettings>;

    /// Makes `settings` the active record and returns the stored version.
    ///
    /// Settings that fail [`LateFeeSettings::validate`] are rejected and the
    /// current active record is left in place.
    fn replace_active(&self, settings: LateFeeSettings) -> EngineResult<SettingsVersion>;
}
