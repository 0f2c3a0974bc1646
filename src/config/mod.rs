//! Settings loading and normalisation for the Late Fee Engine.
//!
//! Settings arrive from storage in several shapes. This module is the only
//! place those shapes are understood; everything past it works with a
//! normalised [`LateFeeSettings`](crate::models::LateFeeSettings).
//!
//! # Example
//!
//! ```no_run
//! use late_fee_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/late_fee/settings.yaml").unwrap();
//! println!("Fee type: {}", loader.settings().fee_type);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{RawLateFeeSettings, StoredShiftStart};
