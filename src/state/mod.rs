//! State Management
//!
//! Global application state: session, active section and shared records.

pub mod global;

pub use global::{provide_app_state, AppState, Section, Session, User};
