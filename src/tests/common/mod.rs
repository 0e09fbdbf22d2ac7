//! Common Test Utilities
//!
//! Shared fixtures and proptest strategies for threat records.

pub mod fixtures;

pub use fixtures::*;
