//! CLI utilities for GreenByte tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Distance and count formatting
//! - Month-grid rendering for crop calendars

#![warn(missing_docs)]

pub mod grid;
pub mod output;
