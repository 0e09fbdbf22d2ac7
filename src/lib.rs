//! Threatwatch - Threat Detection Center (TUI Edition)
//!
//! Core library providing the threat record model, feed loading, severity
//! tallies, and the ratatui dashboard that renders them.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
