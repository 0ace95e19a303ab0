//! Crop season definitions and month phases.

use crate::classifier::{build_month_grid, classify, in_range};
use crate::{CalendarError, Month, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a crop is doing in a given month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthPhase {
    /// Inside the sowing window
    Sowing,
    /// Between the end of sowing and the start of harvest
    Growing,
    /// Inside the harvest window
    Harvest,
    /// No phase
    None,
}

impl MonthPhase {
    /// Lowercase label, as used in serialized grids.
    pub fn as_str(self) -> &'static str {
        match self {
            MonthPhase::Sowing => "sowing",
            MonthPhase::Growing => "growing",
            MonthPhase::Harvest => "harvest",
            MonthPhase::None => "none",
        }
    }

    /// True for every phase except `None`.
    pub fn is_active(self) -> bool {
        self != MonthPhase::None
    }
}

impl fmt::Display for MonthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sowing and harvest windows of one crop over a 12-month cycle.
///
/// Windows are closed intervals of months; a window whose start comes after
/// its end wraps across the year boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSeason {
    /// Crop display name
    pub crop_name: String,
    /// First sowing month
    pub sow_start: Month,
    /// Last sowing month
    pub sow_end: Month,
    /// First harvest month
    pub harvest_start: Month,
    /// Last harvest month
    pub harvest_end: Month,
    /// Season label such as Kharif, Rabi or Annual
    pub season_label: String,
}

impl CropSeason {
    /// Creates a season from months.
    pub fn new(
        crop_name: impl Into<String>,
        sow: (Month, Month),
        harvest: (Month, Month),
        season_label: impl Into<String>,
    ) -> Self {
        Self {
            crop_name: crop_name.into(),
            sow_start: sow.0,
            sow_end: sow.1,
            harvest_start: harvest.0,
            harvest_end: harvest.1,
            season_label: season_label.into(),
        }
    }

    /// Creates a season from zero-based month indices, rejecting any index
    /// outside 0..=11.
    ///
    /// ```
    /// use greenbyte_calendar::{CropSeason, Month};
    ///
    /// let wheat = CropSeason::from_indices("Wheat", 10, 11, 2, 3, "Rabi").unwrap();
    /// assert_eq!(wheat.sow_start, Month::November);
    ///
    /// assert!(CropSeason::from_indices("Wheat", 10, 12, 2, 3, "Rabi").is_err());
    /// ```
    pub fn from_indices(
        crop_name: impl Into<String>,
        sow_start: u8,
        sow_end: u8,
        harvest_start: u8,
        harvest_end: u8,
        season_label: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(
            crop_name,
            (Month::from_index(sow_start)?, Month::from_index(sow_end)?),
            (Month::from_index(harvest_start)?, Month::from_index(harvest_end)?),
            season_label,
        ))
    }

    /// Checks the fields a month index cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.crop_name.trim().is_empty() {
            return Err(CalendarError::InvalidSeason("crop name must not be empty".into()));
        }
        Ok(())
    }

    /// Phase of this crop in `month`.
    #[inline]
    pub fn phase(&self, month: Month) -> MonthPhase {
        classify(self, month)
    }

    /// Phases for January through December.
    #[inline]
    pub fn month_grid(&self) -> [MonthPhase; 12] {
        build_month_grid(self)
    }

    /// True if the sowing window crosses the year boundary.
    pub fn sowing_wraps(&self) -> bool {
        self.sow_start > self.sow_end
    }

    /// True if the harvest window crosses the year boundary.
    pub fn harvest_wraps(&self) -> bool {
        self.harvest_start > self.harvest_end
    }

    /// True if `month` falls in the sowing window.
    pub fn is_sowing_month(&self, month: Month) -> bool {
        in_range(month, self.sow_start, self.sow_end)
    }

    /// Months suitable for planting, in calendar order.
    pub fn suitable_months(&self) -> Vec<Month> {
        Month::ALL
            .into_iter()
            .filter(|m| self.phase(*m) == MonthPhase::Sowing)
            .collect()
    }
}
