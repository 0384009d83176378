//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the symbology library:
//! - Unit-bearing quantities (distances, angles)
//! - Deferred numeric expressions
//! - Logging utilities

pub mod expression;
pub mod logging;
pub mod units;
