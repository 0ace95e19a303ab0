//! Month-grid rendering
//!
//! Draws one row per crop with a cell per month:
//!
//! ```text
//! Crop       Jan Feb Mar ...
//! Wheat      ·   ·   H   H   ...
//! ```

use greenbyte_calendar::{CropSeason, Month, MonthPhase};
use owo_colors::OwoColorize;

const CELL_WIDTH: usize = 4;
const NAME_HEADER: &str = "Crop";

/// Single-character marker for a phase
pub fn phase_symbol(phase: MonthPhase) -> char {
    match phase {
        MonthPhase::Sowing => 'S',
        MonthPhase::Growing => 'G',
        MonthPhase::Harvest => 'H',
        MonthPhase::None => '·',
    }
}

fn paint(phase: MonthPhase, color: bool) -> String {
    let symbol = phase_symbol(phase);
    if !color {
        return symbol.to_string();
    }
    match phase {
        MonthPhase::Sowing => symbol.green().bold().to_string(),
        MonthPhase::Growing => symbol.yellow().to_string(),
        MonthPhase::Harvest => symbol.red().bold().to_string(),
        MonthPhase::None => symbol.dimmed().to_string(),
    }
}

/// Header row with month abbreviations
pub fn grid_header(name_width: usize) -> String {
    let mut line = format!("{NAME_HEADER:<name_width$} ");
    for month in Month::ALL {
        line.push_str(&format!("{:<width$}", month.short_name(), width = CELL_WIDTH));
    }
    line.trim_end().to_string()
}

/// One crop's row
pub fn render_row(name: &str, grid: &[MonthPhase; 12], name_width: usize, color: bool) -> String {
    let mut line = format!("{name:<name_width$} ");
    for (i, phase) in grid.iter().enumerate() {
        line.push_str(&paint(*phase, color));
        if i + 1 < grid.len() {
            line.push_str(&" ".repeat(CELL_WIDTH - 1));
        }
    }
    line
}

/// Full table: header, one row per season, then a legend
pub fn render_calendar(seasons: &[&CropSeason], color: bool) -> String {
    let name_width = seasons
        .iter()
        .map(|s| s.crop_name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());

    let mut out = String::new();
    let header = grid_header(name_width);
    if color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    for season in seasons {
        out.push_str(&render_row(&season.crop_name, &season.month_grid(), name_width, color));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&legend(color));
    out
}

/// Explains the phase markers
pub fn legend(color: bool) -> String {
    [MonthPhase::Sowing, MonthPhase::Growing, MonthPhase::Harvest]
        .into_iter()
        .map(|phase| format!("{} {}", paint(phase, color), phase))
        .collect::<Vec<_>>()
        .join("  ")
}
