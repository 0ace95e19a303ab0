//! Month-by-month phase classification.
//!
//! Checks run in a fixed order: sowing, then harvest, then growing. Growing is
//! only reported when sowing ends before harvest starts within the same
//! calendar year; otherwise a month outside both windows has no phase.

use crate::{CropSeason, Month, MonthPhase, Result};

/// True if `month` lies in the closed window `start..=end`, which wraps
/// across December/January when `start > end`.
///
/// ```
/// use greenbyte_calendar::{classifier::in_range, Month};
///
/// assert!(in_range(Month::December, Month::November, Month::February));
/// assert!(in_range(Month::January, Month::November, Month::February));
/// assert!(!in_range(Month::March, Month::November, Month::February));
/// ```
#[inline]
pub fn in_range(month: Month, start: Month, end: Month) -> bool {
    if start <= end {
        start <= month && month <= end
    } else {
        month >= start || month <= end
    }
}

/// Phase of `season` in `month`.
///
/// ```
/// use greenbyte_calendar::{classify, CropSeason, Month, MonthPhase};
///
/// let wheat = CropSeason::from_indices("Wheat", 10, 11, 2, 3, "Rabi").unwrap();
/// assert_eq!(classify(&wheat, Month::December), MonthPhase::Sowing);
/// assert_eq!(classify(&wheat, Month::January), MonthPhase::None);
/// assert_eq!(classify(&wheat, Month::March), MonthPhase::Harvest);
/// ```
pub fn classify(season: &CropSeason, month: Month) -> MonthPhase {
    if in_range(month, season.sow_start, season.sow_end) {
        return MonthPhase::Sowing;
    }

    if in_range(month, season.harvest_start, season.harvest_end) {
        return MonthPhase::Harvest;
    }

    if season.sow_end < season.harvest_start
        && season.sow_end < month
        && month < season.harvest_start
    {
        return MonthPhase::Growing;
    }

    MonthPhase::None
}

/// [`classify`] for a raw zero-based month index.
pub fn classify_index(season: &CropSeason, month_index: u8) -> Result<MonthPhase> {
    Ok(classify(season, Month::from_index(month_index)?))
}

/// Phases for January through December.
pub fn build_month_grid(season: &CropSeason) -> [MonthPhase; 12] {
    Month::ALL.map(|month| classify(season, month))
}
