//! State management module
//!
//! This module contains the state shared by the HTTP layer.

pub mod app_state;

// Re-export main types
pub use app_state::AppState;
