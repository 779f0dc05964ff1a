//! Foundation module - Core utilities and types
//!
//! Shared building blocks used by every other module:
//! - Math types and helpers
//! - Logging setup and log targets

pub mod math;
pub mod logging;
