//! Months of the year as zero-based indices (0 = January).

use crate::{CalendarError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month.
///
/// Serialized as its zero-based index; deserialized from either the index
/// or a short/full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthRepr", into = "u8")]
#[repr(u8)]
pub enum Month {
    January = 0,
    February = 1,
    March = 2,
    April = 3,
    May = 4,
    June = 5,
    July = 6,
    August = 7,
    September = 8,
    October = 9,
    November = 10,
    December = 11,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    const SHORT_NAMES: [&'static str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    const FULL_NAMES: [&'static str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Month for a zero-based index.
    ///
    /// ```
    /// use greenbyte_calendar::Month;
    ///
    /// assert_eq!(Month::from_index(10).unwrap(), Month::November);
    /// assert!(Month::from_index(12).is_err());
    /// ```
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(CalendarError::InvalidMonth(index))
    }

    /// Zero-based index (0 = January).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Three-letter English name, e.g. `Jan`.
    pub fn short_name(self) -> &'static str {
        Self::SHORT_NAMES[usize::from(self.index())]
    }

    /// Full English name, e.g. `January`.
    pub fn full_name(self) -> &'static str {
        Self::FULL_NAMES[usize::from(self.index())]
    }

    /// The following month, wrapping December to January.
    pub fn next(self) -> Self {
        Self::ALL[usize::from((self.index() + 1) % 12)]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

impl FromStr for Month {
    type Err = CalendarError;

    /// Accepts short or full names in any case, or a bare index such as `10`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|m| m.short_name().eq_ignore_ascii_case(s) || m.full_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalendarError::InvalidMonthName(s.to_string()))
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(index: u8) -> Result<Self> {
        Self::from_index(index)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.index()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MonthRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<MonthRepr> for Month {
    type Error = CalendarError;

    fn try_from(repr: MonthRepr) -> Result<Self> {
        match repr {
            MonthRepr::Index(index) => Self::from_index(index),
            MonthRepr::Name(name) => name.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_for_all_months() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(usize::from(month.index()), i);
            assert_eq!(Month::from_index(month.index()).unwrap(), *month);
        }
    }

    #[test]
    fn test_out_of_range_index() {
        assert!(matches!(Month::from_index(12), Err(CalendarError::InvalidMonth(12))));
        assert!(Month::try_from(255u8).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(Month::January.short_name(), "Jan");
        assert_eq!(Month::September.full_name(), "September");
        assert_eq!(Month::December.to_string(), "December");
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Month::December.next(), Month::January);
        assert_eq!(Month::March.next(), Month::April);
    }

    #[test]
    fn test_parse() {
        assert_eq!("nov".parse::<Month>().unwrap(), Month::November);
        assert_eq!("JULY".parse::<Month>().unwrap(), Month::July);
        assert_eq!(" 0 ".parse::<Month>().unwrap(), Month::January);
        assert!(matches!("Sept".parse::<Month>(), Err(CalendarError::InvalidMonthName(_))));
        assert!(matches!("13".parse::<Month>(), Err(CalendarError::InvalidMonth(13))));
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Month::March).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Month>("2").unwrap(), Month::March);
        assert_eq!(serde_json::from_str::<Month>("\"Mar\"").unwrap(), Month::March);
        assert!(serde_json::from_str::<Month>("12").is_err());
    }
}
