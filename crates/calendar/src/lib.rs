//! Crop calendars for GreenByte.
//!
//! This crate provides:
//! - `Month` and `MonthPhase` types
//! - `CropSeason`: sowing and harvest windows over a 12-month cycle
//! - A classifier that handles windows wrapping the year boundary
//! - `SeasonalCalendar`: the built-in Indian crop table plus file loading
//!
//! # Example
//!
//! ```
//! use greenbyte_calendar::{Month, MonthPhase, SeasonalCalendar};
//!
//! let calendar = SeasonalCalendar::builtin();
//! let cotton = calendar.by_name("Cotton").unwrap();
//!
//! assert_eq!(cotton.phase(Month::August), MonthPhase::Growing);
//! assert_eq!(cotton.month_grid().len(), 12);
//! ```

mod calendar;
pub mod classifier;
mod error;
mod month;
mod season;

pub use calendar::SeasonalCalendar;
pub use classifier::{build_month_grid, classify, classify_index};
pub use error::{CalendarError, CalendarErrorCode, Result};
pub use month::Month;
pub use season::{CropSeason, MonthPhase};
