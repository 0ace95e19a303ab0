//! greenbyte - farm location matching and crop calendars
//!
//! Resolves a coordinate to the nearest known agro-climatic reference point
//! and prints sowing/growing/harvest grids for the crop table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use greenbyte_calendar::{CalendarError, CalendarErrorCode, CropSeason, Month, SeasonalCalendar};
use greenbyte_cli::grid::render_calendar;
use greenbyte_cli::output::{format_coordinate, format_count, format_distance, Status};
use greenbyte_core::config::Config;
use greenbyte_core::error::exit_codes;
use greenbyte_core::validation::validate_coordinate;
use greenbyte_core::ErrorCode;
use greenbyte_geo::{
    parse_coordinate_str, rank_by_distance, within_radius, Coordinate, GeoError, GeoErrorCode,
    LocationCatalog, LocationMatcher, NearestLocation,
};
use greenbyte_telemetry::{timed_span, TelemetryConfig, Timer};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "greenbyte")]
#[command(about = "Farm location matching and crop calendars")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./greenbyte.toml when present)
    #[arg(short, long, global = true, env = "GREENBYTE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON, including error reports
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the nearest known location to a coordinate
    Locate {
        /// Coordinate as `LAT LNG`, "LAT, LNG" or "POINT(LNG LAT)"
        #[arg(required = true, num_args = 1..=2, allow_negative_numbers = true)]
        coordinate: Vec<String>,

        /// Largest accepted distance in kilometers (overrides the config file)
        #[arg(long, allow_negative_numbers = true)]
        max_km: Option<f64>,
    },

    /// List known locations by distance from a coordinate
    Rank {
        /// Coordinate as `LAT LNG`, "LAT, LNG" or "POINT(LNG LAT)"
        #[arg(required = true, num_args = 1..=2, allow_negative_numbers = true)]
        coordinate: Vec<String>,

        /// Maximum number of locations to show
        #[arg(short, long, default_value = "5")]
        limit: usize,

        /// Only show locations within this distance in kilometers
        #[arg(long, allow_negative_numbers = true)]
        radius_km: Option<f64>,
    },

    /// Show the crop calendar as a month grid
    Calendar {
        /// Only this crop
        #[arg(long)]
        crop: Option<String>,

        /// Only crops with this season label (Kharif, Rabi, Annual)
        #[arg(long)]
        season: Option<String>,

        /// Only crops sown in this month (name or 0-based index)
        #[arg(long)]
        sowing: Option<String>,
    },

    /// List crops with their sowing and harvest windows
    Crops,
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => std::process::exit(report_failure(&anyhow::Error::from(e), json)),
    };

    init_logging(&config, cli.verbose);

    let result = match cli.command {
        Commands::Locate { coordinate, max_km } => run_locate(&config, &coordinate, max_km, json),
        Commands::Rank {
            coordinate,
            limit,
            radius_km,
        } => run_rank(&config, &coordinate, limit, radius_km, json),
        Commands::Calendar {
            crop,
            season,
            sowing,
        } => run_calendar(&config, crop.as_deref(), season.as_deref(), sowing.as_deref(), json),
        Commands::Crops => run_crops(&config, json),
    };

    let code = result.unwrap_or_else(|e| report_failure(&e, json));
    std::process::exit(code);
}

fn init_logging(config: &Config, verbose: bool) {
    let logging = &config.schema.logging;
    let telemetry = if verbose {
        TelemetryConfig::new("debug", logging.json).verbose()
    } else {
        TelemetryConfig::new(logging.level.clone(), logging.json)
    };

    if let Err(e) = greenbyte_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }
}

/// Prints a failure (as an error report under `--json`) and returns the exit code.
fn report_failure(err: &anyhow::Error, json: bool) -> i32 {
    let code = exit_code_for(err);

    if json {
        let body = match err.downcast_ref::<greenbyte_core::Error>() {
            Some(e) => serde_json::json!({ "error": e.to_report() }),
            None => serde_json::json!({ "error": { "message": format!("{err:#}") } }),
        };
        if print_json(&body).is_ok() {
            return code;
        }
    }

    Status::error(&format!("{err:#}"));
    code
}

/// Maps a failure to the process exit code.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<greenbyte_core::Error>() {
            return e.code.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<GeoError>() {
            return match e.code() {
                GeoErrorCode::InvalidCoordinate
                | GeoErrorCode::InvalidFormat
                | GeoErrorCode::InvalidThreshold => exit_codes::VALIDATION_ERROR,
                _ => exit_codes::CONFIG_ERROR,
            };
        }
        if let Some(e) = cause.downcast_ref::<CalendarError>() {
            return match e.code() {
                CalendarErrorCode::InvalidMonth | CalendarErrorCode::InvalidMonthName => {
                    exit_codes::VALIDATION_ERROR
                }
                _ => exit_codes::CONFIG_ERROR,
            };
        }
    }
    exit_codes::FAILURE
}

fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Reads the query coordinate from one or two positional arguments.
///
/// Two plain numbers go through field-level validation so both can be
/// reported; anything else is handed to the coordinate parser.
fn parse_query(args: &[String]) -> Result<Coordinate> {
    if let [lat, lng] = args {
        let lat = lat.trim_end_matches(',').trim().parse::<f64>();
        let lng = lng.trim().parse::<f64>();
        if let (Ok(lat), Ok(lng)) = (lat, lng) {
            let report = validate_coordinate(lat, lng);
            for warning in report.warnings() {
                Status::warning(&warning.message);
            }
            report.to_result()?;
            return Ok(Coordinate::new(lat, lng));
        }
    }

    Ok(parse_coordinate_str(&args.join(" "))?)
}

fn load_catalog(config: &Config) -> Result<LocationCatalog> {
    let Some(path) = config.catalog_path() else {
        return Ok(LocationCatalog::builtin());
    };

    let timer = Timer::start("catalog_load");
    let catalog = LocationCatalog::load(&path)
        .with_context(|| format!("Failed to load location catalog {}", path.display()))?;
    timer.stop();

    tracing::info!(path = %path.display(), locations = catalog.len(), "Location catalog loaded");
    Ok(catalog)
}

fn load_calendar(config: &Config) -> Result<SeasonalCalendar> {
    let Some(path) = config.seasons_path() else {
        return Ok(SeasonalCalendar::builtin());
    };

    let calendar = SeasonalCalendar::load(&path)
        .with_context(|| format!("Failed to load season table {}", path.display()))?;

    tracing::info!(path = %path.display(), crops = calendar.len(), "Season table loaded");
    Ok(calendar)
}

fn run_locate(config: &Config, coordinate: &[String], max_km: Option<f64>, json: bool) -> Result<i32> {
    let query = parse_query(coordinate)?;
    timed_span!("locate", query = %query);

    let catalog = load_catalog(config)?;
    let max_distance_km = max_km.unwrap_or(config.schema.matcher.max_distance_km);
    let matcher = LocationMatcher::new(catalog, max_distance_km)?;
    let result = matcher.locate(&query)?;
    let code = if result.is_match() {
        exit_codes::SUCCESS
    } else {
        exit_codes::NO_MATCH
    };

    if json {
        print_json(&serde_json::json!({
            "query": query,
            "max_distance_km": matcher.max_distance_km(),
            "result": result,
        }))?;
        return Ok(code);
    }

    match result {
        NearestLocation::Matched(hit) => {
            Status::success(&format!(
                "{} ({}), {} away",
                hit.record.name,
                hit.record.zone,
                format_distance(hit.distance_km)
            ));
            if !hit.record.crops.is_empty() {
                println!("  Crops: {}", hit.record.crops.join(", "));
            }
        }
        NearestLocation::NoMatch => {
            Status::warning(&format!(
                "No known location within {} of {}",
                format_distance(matcher.max_distance_km()),
                format_coordinate(query.latitude, query.longitude)
            ));
        }
    }

    Ok(code)
}

fn run_rank(
    config: &Config,
    coordinate: &[String],
    limit: usize,
    radius_km: Option<f64>,
    json: bool,
) -> Result<i32> {
    let query = parse_query(coordinate)?;
    if let Some(radius) = radius_km.filter(|r| r.is_nan() || *r < 0.0) {
        return Err(GeoError::InvalidThreshold(radius).into());
    }

    let catalog = load_catalog(config)?;
    let ranked = match radius_km {
        Some(radius) => {
            let mut within = within_radius(&query, catalog.records(), radius);
            within.truncate(limit);
            within
        }
        None => rank_by_distance(&query, catalog.records(), Some(limit)),
    };

    if json {
        print_json(&serde_json::json!(ranked))?;
        return Ok(exit_codes::SUCCESS);
    }

    if ranked.is_empty() {
        Status::warning("No known locations in range");
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format!(
        "Nearest {} to {}",
        format_count(ranked.len(), "location", "locations"),
        format_coordinate(query.latitude, query.longitude)
    ));
    let name_width = ranked
        .iter()
        .map(|r| r.record.name.chars().count())
        .max()
        .unwrap_or(0);
    for (i, entry) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {:<name_width$}  {:>9}  {}",
            i + 1,
            entry.record.name,
            format_distance(entry.distance_km),
            entry.record.zone
        );
    }

    Ok(exit_codes::SUCCESS)
}

/// Narrows the table by crop, season label and sowing month; filters combine.
fn select_crops<'a>(
    calendar: &'a SeasonalCalendar,
    crop: Option<&str>,
    season: Option<&'a str>,
    sowing: Option<Month>,
) -> Result<Vec<&'a CropSeason>> {
    let mut selected: Vec<&CropSeason> = match season {
        Some(label) => calendar.by_season(label).collect(),
        None => calendar.iter().collect(),
    };

    if let Some(name) = crop {
        let Some(found) = calendar.by_name(name) else {
            let known: Vec<&str> = calendar.iter().map(|s| s.crop_name.as_str()).collect();
            return Err(greenbyte_core::Error::new(
                ErrorCode::ValidationError,
                format!("Unknown crop '{name}'"),
            )
            .with_suggestion(format!("Known crops: {}", known.join(", ")))
            .into());
        };
        selected.retain(|s| std::ptr::eq(*s, found));
    }

    if let Some(month) = sowing {
        let sown: Vec<&CropSeason> = calendar.sowing_in(month).collect();
        selected.retain(|s| sown.iter().any(|x| std::ptr::eq(*x, *s)));
    }

    Ok(selected)
}

fn run_calendar(
    config: &Config,
    crop: Option<&str>,
    season: Option<&str>,
    sowing: Option<&str>,
    json: bool,
) -> Result<i32> {
    let calendar = load_calendar(config)?;
    let sowing_month = sowing.map(str::parse::<Month>).transpose()?;
    let selected = select_crops(&calendar, crop, season, sowing_month)?;

    tracing::debug!(selected = selected.len(), total = calendar.len(), "Calendar filtered");

    if json {
        let rows: Vec<serde_json::Value> = selected
            .iter()
            .map(|s| {
                serde_json::json!({
                    "crop_name": s.crop_name,
                    "season_label": s.season_label,
                    "grid": s.month_grid(),
                })
            })
            .collect();
        print_json(&serde_json::Value::Array(rows))?;
        return Ok(exit_codes::SUCCESS);
    }

    if selected.is_empty() {
        Status::warning("No crops match the given filters");
        return Ok(exit_codes::SUCCESS);
    }

    print!("{}", render_calendar(&selected, use_color()));
    println!();
    Ok(exit_codes::SUCCESS)
}

fn run_crops(config: &Config, json: bool) -> Result<i32> {
    let calendar = load_calendar(config)?;

    if json {
        print_json(&serde_json::json!(calendar.seasons()))?;
        return Ok(exit_codes::SUCCESS);
    }

    Status::header(&format_count(calendar.len(), "crop", "crops"));
    let name_width = calendar
        .iter()
        .map(|s| s.crop_name.chars().count())
        .max()
        .unwrap_or(0);
    calendar.for_each_crop(|s| {
        println!(
            "{:<name_width$}  {:<7} sow {}-{}  harvest {}-{}",
            s.crop_name,
            s.season_label,
            s.sow_start.short_name(),
            s.sow_end.short_name(),
            s.harvest_start.short_name(),
            s.harvest_end.short_name()
        );
    });

    Ok(exit_codes::SUCCESS)
}
