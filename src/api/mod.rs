//! API Client
//!
//! HTTP communication with the Gradeflow REST backend.

pub mod client;

pub use client::*;
