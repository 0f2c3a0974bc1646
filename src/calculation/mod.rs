//! Calculation logic for the Late Fee Engine.
//!
//! This module contains the pure functions that turn a clock-in instant and
//! a settings snapshot into minutes late and a late fee. None of them hold
//! state or perform I/O.

mod evaluate;
mod fee;
mod minutes_late;

pub use evaluate::{assess, evaluate};
pub use fee::{LATE_FEE_TIERS, TIERED_MAX_FEE, compute_fee, tiered_fee};
pub use minutes_late::compute_minutes_late;
