//! Background tasks module
//!
//! This module contains the cancellable timers that back alarm auto-stop
//! and vibration loops.

pub mod scheduled_task;

// Re-export main types
pub use scheduled_task::ScheduledTask;
