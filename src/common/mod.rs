//! Common utilities and shared functionality
//!
//! Currency amounts and configuration loading used across the checker.

pub mod amount;
pub mod config;
