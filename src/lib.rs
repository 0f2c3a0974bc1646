//! Late Fee Engine for employee attendance
//!
//! This crate computes whether a clock-in is late, by how many minutes after
//! the grace period, and what late fee applies under fixed, per-minute, or
//! tiered pricing. Settings are supplied as immutable snapshots by a
//! [`store::SettingsStore`]; the [`attendance`] module records clock-ins and
//! tracks payment of the resulting fees.

#![warn(missing_docs)]

pub mod attendance;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
