//! Core utilities for GreenByte tools
//!
//! This crate provides shared functionality used by the geo and calendar
//! front ends:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: fluent checks for configuration values and form input
//!
//! # Example
//!
//! ```rust,no_run
//! use greenbyte_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("matching within {} km", config.schema.matcher.max_distance_km);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, ErrorReport, Result};
