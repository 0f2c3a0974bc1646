//! Attendance recording built on the late fee engine.
//!
//! The recorder is the engine's downstream collaborator: it fetches a
//! settings snapshot, evaluates each clock-in, stores the result on its own
//! attendance records, and later tracks payment of the fees.

mod clock;
mod recorder;

pub use clock::{Clock, FixedClock, SystemClock};
pub use recorder::{AttendanceRecorder, ClockInOutcome, SETTINGS_NOT_CONFIGURED};
