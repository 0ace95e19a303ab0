//! The read-only table of crop seasons.

use crate::{CalendarError, CropSeason, Month, MonthPhase, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Reference crop calendar for Indian field crops.
///
/// Month numbers are zero-based: (name, sow start, sow end, harvest start,
/// harvest end, season).
const BUILTIN_SEASONS: &[(&str, u8, u8, u8, u8, &str)] = &[
    ("Rice (Paddy)", 5, 6, 10, 11, "Kharif"),
    ("Wheat", 10, 11, 2, 3, "Rabi"),
    ("Maize", 5, 6, 8, 9, "Kharif"),
    ("Cotton", 4, 5, 10, 11, "Kharif"),
    ("Groundnut", 5, 6, 9, 10, "Kharif"),
    ("Soybean", 5, 6, 9, 10, "Kharif"),
    ("Mustard", 9, 10, 1, 2, "Rabi"),
    ("Sugarcane", 1, 2, 11, 0, "Annual"),
];

static BUILTIN: Lazy<SeasonalCalendar> = Lazy::new(|| SeasonalCalendar {
    seasons: BUILTIN_SEASONS
        .iter()
        .map(|&(name, sow_start, sow_end, harvest_start, harvest_end, label)| {
            let month = |i: u8| Month::ALL[usize::from(i)];
            CropSeason::new(
                name,
                (month(sow_start), month(sow_end)),
                (month(harvest_start), month(harvest_end)),
                label,
            )
        })
        .collect(),
});

#[derive(Debug, Deserialize)]
struct SeasonFile {
    #[serde(default)]
    crops: Vec<CropSeason>,
}

/// An ordered, immutable set of [`CropSeason`]s.
///
/// There is no mutation API; a different table means building a new
/// calendar. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct SeasonalCalendar {
    seasons: Arc<[CropSeason]>,
}

impl SeasonalCalendar {
    /// Builds a calendar, rejecting empty and duplicate crop names
    /// (compared case-insensitively).
    pub fn new(seasons: Vec<CropSeason>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(seasons.len());
        for season in &seasons {
            season.validate()?;
            if !seen.insert(season.crop_name.to_lowercase()) {
                return Err(CalendarError::DuplicateCrop(season.crop_name.clone()));
            }
        }

        Ok(Self {
            seasons: seasons.into(),
        })
    }

    /// The built-in Indian crop calendar.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parses a season table from JSON (`{"crops": [...]}`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SeasonFile = serde_json::from_str(json)?;
        Self::new(file.crops)
    }

    /// Parses a season table from TOML (`[[crops]]` tables).
    pub fn from_toml_str(toml_text: &str) -> Result<Self> {
        let file: SeasonFile = toml::from_str(toml_text)?;
        Self::new(file.crops)
    }

    /// Loads a season table; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let calendar = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(path = %path.display(), crops = calendar.len(), "Loaded season table");
        Ok(calendar)
    }

    /// Seasons in table order.
    pub fn seasons(&self) -> &[CropSeason] {
        &self.seasons
    }

    /// Iterates over the seasons in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, CropSeason> {
        self.seasons.iter()
    }

    /// Calls `f` for every season in table order.
    pub fn for_each_crop<F>(&self, f: F)
    where
        F: FnMut(&CropSeason),
    {
        self.seasons.iter().for_each(f);
    }

    /// Looks a crop up by name, ignoring case.
    pub fn by_name(&self, crop_name: &str) -> Option<&CropSeason> {
        let crop_name = crop_name.trim();
        self.seasons
            .iter()
            .find(|s| s.crop_name.eq_ignore_ascii_case(crop_name))
    }

    /// Crops carrying `label` (Kharif, Rabi, ...), ignoring case.
    pub fn by_season<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a CropSeason> + 'a {
        self.seasons
            .iter()
            .filter(move |s| s.season_label.eq_ignore_ascii_case(label.trim()))
    }

    /// Crops whose sowing window includes `month`.
    pub fn sowing_in(&self, month: Month) -> impl Iterator<Item = &CropSeason> + '_ {
        self.seasons.iter().filter(move |s| s.is_sowing_month(month))
    }

    /// Distinct season labels in first-seen order.
    pub fn season_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for season in self.seasons.iter() {
            if !labels.contains(&season.season_label.as_str()) {
                labels.push(&season.season_label);
            }
        }
        labels
    }

    /// A 12-month phase grid per crop, in table order.
    pub fn grids(&self) -> Vec<(&CropSeason, [MonthPhase; 12])> {
        self.seasons.iter().map(|s| (s, s.month_grid())).collect()
    }

    /// Number of crops.
    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    /// True if the calendar has no crops.
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

impl<'a> IntoIterator for &'a SeasonalCalendar {
    type Item = &'a CropSeason;
    type IntoIter = std::slice::Iter<'a, CropSeason>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let calendar = SeasonalCalendar::builtin();
        assert_eq!(calendar.len(), 8);
        assert!(SeasonalCalendar::new(calendar.seasons().to_vec()).is_ok());

        let wheat = calendar.by_name("wheat").unwrap();
        assert_eq!(wheat.sow_start, Month::November);
        assert_eq!(wheat.harvest_end, Month::April);
        assert_eq!(wheat.season_label, "Rabi");
    }

    #[test]
    fn test_by_name_missing() {
        assert!(SeasonalCalendar::builtin().by_name("Quinoa").is_none());
    }

    #[test]
    fn test_by_season() {
        let calendar = SeasonalCalendar::builtin();
        let rabi: Vec<&str> = calendar.by_season("rabi").map(|s| s.crop_name.as_str()).collect();
        assert_eq!(rabi, vec!["Wheat", "Mustard"]);
        assert_eq!(calendar.by_season("Kharif").count(), 5);
        assert_eq!(calendar.by_season("Zaid").count(), 0);
    }

    #[test]
    fn test_season_labels() {
        assert_eq!(SeasonalCalendar::builtin().season_labels(), vec!["Kharif", "Rabi", "Annual"]);
    }

    #[test]
    fn test_sowing_in() {
        let calendar = SeasonalCalendar::builtin();
        let june: Vec<&str> = calendar.sowing_in(Month::June).map(|s| s.crop_name.as_str()).collect();
        assert_eq!(june, vec!["Rice (Paddy)", "Maize", "Cotton", "Groundnut", "Soybean"]);

        let november: Vec<&str> = calendar.sowing_in(Month::November).map(|s| s.crop_name.as_str()).collect();
        assert_eq!(november, vec!["Wheat", "Mustard"]);
    }

    #[test]
    fn test_for_each_crop_visits_in_order() {
        let mut names = Vec::new();
        SeasonalCalendar::builtin().for_each_crop(|s| names.push(s.crop_name.clone()));
        assert_eq!(names.first().map(String::as_str), Some("Rice (Paddy)"));
        assert_eq!(names.last().map(String::as_str), Some("Sugarcane"));
    }

    #[test]
    fn test_grids_have_twelve_columns() {
        for (season, grid) in SeasonalCalendar::builtin().grids() {
            assert_eq!(grid.len(), 12, "{}", season.crop_name);
            assert!(grid.iter().any(|p| *p == MonthPhase::Sowing));
        }
    }

    #[test]
    fn test_duplicate_crop_rejected() {
        let a = CropSeason::from_indices("Maize", 5, 6, 8, 9, "Kharif").unwrap();
        let b = CropSeason::from_indices("MAIZE", 0, 1, 4, 5, "Zaid").unwrap();
        assert!(matches!(
            SeasonalCalendar::new(vec![a, b]),
            Err(CalendarError::DuplicateCrop(_))
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let toml_text = r#"
            [[crops]]
            crop_name = "Ragi"
            sow_start = "Jun"
            sow_end = "Jul"
            harvest_start = 9
            harvest_end = 10
            season_label = "Kharif"
        "#;

        let calendar = SeasonalCalendar::from_toml_str(toml_text).unwrap();
        let ragi = calendar.by_name("Ragi").unwrap();
        assert_eq!(ragi.phase(Month::August), MonthPhase::Growing);
    }

    #[test]
    fn test_from_json_rejects_bad_month() {
        let json = r#"{"crops": [{"crop_name": "Bad", "sow_start": 14, "sow_end": 1,
                       "harvest_start": 2, "harvest_end": 3, "season_label": "Rabi"}]}"#;
        let err = SeasonalCalendar::from_json_str(json).unwrap_err();
        assert!(matches!(err, CalendarError::JsonError(_)));
        assert!(err.to_string().contains("14"));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seasons.json");
        std::fs::write(
            &path,
            r#"{"crops": [{"crop_name": "Jowar", "sow_start": 5, "sow_end": 6,
                "harvest_start": 9, "harvest_end": 10, "season_label": "Kharif"}]}"#,
        )
        .unwrap();

        let calendar = SeasonalCalendar::load(&path).unwrap();
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SeasonalCalendar::load("/no/such/seasons.toml"),
            Err(CalendarError::Io { .. })
        ));
    }
}
