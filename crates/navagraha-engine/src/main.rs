//! Command-line front end for the Navagraha energy engine.
//!
//! Scores the nine planetary energies for one birth profile over a day,
//! week, month, or quarter and prints the forecast as pretty JSON on
//! stdout. Logs go to stderr.
//!
//! # Run Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `navagraha-config.yaml` (defaults if absent)
//! 3. Initialize structured logging (tracing)
//! 4. Validate the birth date, target date, mode, and daylight times
//! 5. Run the forecast and print it

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use clap::Parser;
use navagraha_core::astro::{AstroSource, NoAstroSource, SolarWindowSource};
use navagraha_core::config::{ConfigStore, EngineConfig, LoggingConfig};
use navagraha_core::forecast::{
    CancelToken, forecast_day, forecast_period, forecast_period_concurrent,
};
use navagraha_core::input::{
    build_profile, parse_birth_date, parse_clock_time, parse_mode, parse_target_date,
};
use navagraha_core::windows::DaylightWindows;
use navagraha_types::PeriodMode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

#[derive(Debug, Parser)]
#[command(name = "navagraha-engine")]
#[command(about = "Planetary energy forecasts for a birth date over a day, week, month, or quarter")]
struct Args {
    /// Birth date in DD-MM-YYYY format
    #[arg(short, long)]
    birth: String,

    /// Full name; enables the name-number factors
    #[arg(short, long)]
    name: Option<String>,

    /// First target date in YYYY-MM-DD format (today in UTC if omitted)
    #[arg(short, long)]
    date: Option<String>,

    /// Period length: day, week, month, or quarter
    #[arg(short, long, default_value = "day")]
    mode: String,

    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "navagraha-config.yaml")]
    config: PathBuf,

    /// Local sunrise (HH:MM); enables the daylight window factors
    #[arg(long, requires = "sunset")]
    sunrise: Option<String>,

    /// Local sunset (HH:MM)
    #[arg(long, requires = "sunrise")]
    sunset: Option<String>,

    /// Moment of the day checked against the daylight windows (HH:MM)
    #[arg(long, default_value = "12:00")]
    at: String,

    /// Compute period days on the blocking thread pool
    #[arg(long)]
    concurrent: bool,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, validation, or the forecast fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (store, from_file) = load_config(&args.config)?;
    let config = store.snapshot();
    init_logging(&config.logging);

    info!("navagraha-engine starting");
    if from_file {
        info!(path = %args.config.display(), "Configuration loaded");
    } else {
        info!(path = %args.config.display(), "Config file not found, using defaults");
    }

    let output = run(&args, config).await?;
    println!("{output}");
    Ok(())
}

/// Load the config file if it exists, otherwise fall back to defaults.
///
/// The flag in the result says whether the file was read.
fn load_config(path: &Path) -> Result<(ConfigStore, bool), EngineError> {
    if path.exists() {
        Ok((ConfigStore::load(path.to_path_buf())?, true))
    } else {
        Ok((ConfigStore::from_config(EngineConfig::default()), false))
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Sunrise and sunset switch on the window source; otherwise no
/// astronomical facts are supplied.
fn astro_source(args: &Args, start: NaiveDate) -> Result<Arc<dyn AstroSource>, EngineError> {
    let (Some(sunrise), Some(sunset)) = (args.sunrise.as_deref(), args.sunset.as_deref()) else {
        return Ok(Arc::new(NoAstroSource::new()));
    };
    let sunrise = parse_clock_time(sunrise)?;
    let sunset = parse_clock_time(sunset)?;
    let moment = parse_clock_time(&args.at)?;
    DaylightWindows::compute(start.weekday(), sunrise, sunset)?;
    Ok(Arc::new(SolarWindowSource::new(sunrise, sunset, moment)))
}

async fn run(args: &Args, config: Arc<EngineConfig>) -> Result<String, EngineError> {
    let birth = parse_birth_date(&args.birth)?;
    let profile = build_profile(birth, args.name.as_deref());
    let start = match args.date.as_deref() {
        Some(date) => parse_target_date(date)?,
        None => Utc::now().date_naive(),
    };
    let mode = parse_mode(&args.mode)?;
    let astro = astro_source(args, start)?;

    info!(
        %start,
        mode = ?mode,
        named = profile.name.is_some(),
        windows = args.sunrise.is_some(),
        concurrent = args.concurrent,
        "Forecast requested"
    );

    if matches!(mode, PeriodMode::Day) {
        let forecast = forecast_day(&profile, start, &config, astro.as_ref());
        return Ok(serde_json::to_string_pretty(&forecast)?);
    }

    let cancel = CancelToken::new();
    let forecast = if args.concurrent {
        let watcher = cancel.clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling forecast");
                watcher.cancel();
            }
        });
        let result =
            forecast_period_concurrent(Arc::new(profile), start, mode, config, astro, cancel)
                .await;
        interrupt.abort();
        result?
    } else {
        forecast_period(&profile, start, mode, &config, astro.as_ref(), &cancel)?
    };

    info!(
        days = forecast.series.len(),
        average_score = forecast.summary.average_score,
        "Forecast complete"
    );
    Ok(serde_json::to_string_pretty(&forecast)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use navagraha_types::{DayForecast, PeriodForecast};

    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["navagraha-engine", "--birth", "15-03-1990"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_apply() {
        let args = args(&[]);
        assert_eq!(args.mode, "day");
        assert_eq!(args.config, PathBuf::from("navagraha-config.yaml"));
        assert_eq!(args.at, "12:00");
        assert!(!args.concurrent);
        assert!(args.date.is_none());
    }

    #[test]
    fn sunrise_requires_sunset() {
        let parsed =
            Args::try_parse_from(["navagraha-engine", "--birth", "15-03-1990", "--sunrise", "06:00"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let (store, from_file) =
            load_config(Path::new("/nonexistent/navagraha-config.yaml")).unwrap();
        assert!(!from_file);
        assert_eq!(*store.snapshot(), EngineConfig::default());
    }

    #[test]
    fn inverted_daylight_is_rejected() {
        let args = args(&["--sunrise", "19:00", "--sunset", "07:00"]);
        let start = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert!(matches!(
            astro_source(&args, start),
            Err(EngineError::Window { .. })
        ));
    }

    #[tokio::test]
    async fn day_run_prints_a_day_forecast() {
        let args = args(&["--date", "2024-05-20", "--name", "Anna"]);
        let output = run(&args, Arc::new(EngineConfig::default())).await.unwrap();
        let forecast: DayForecast = serde_json::from_str(&output).unwrap();
        assert_eq!(
            forecast.vector.date,
            NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
        );
        assert_eq!(forecast.vector.values.len(), 9);
    }

    #[tokio::test]
    async fn concurrent_week_matches_sequential() {
        let base = ["--date", "2024-05-20", "--mode", "week", "--sunrise", "06:00", "--sunset", "18:30"];
        let config = Arc::new(EngineConfig::default());

        let sequential = run(&args(&base), Arc::clone(&config)).await.unwrap();
        let mut concurrent_argv = base.to_vec();
        concurrent_argv.push("--concurrent");
        let concurrent = run(&args(&concurrent_argv), config).await.unwrap();

        assert_eq!(sequential, concurrent);
        let forecast: PeriodForecast = serde_json::from_str(&sequential).unwrap();
        assert_eq!(forecast.series.len(), 7);
    }

    #[tokio::test]
    async fn bad_mode_is_an_input_error() {
        let args = args(&["--mode", "fortnight"]);
        let err = run(&args, Arc::new(EngineConfig::default())).await.unwrap_err();
        assert!(matches!(err, EngineError::Input { .. }));
    }
}
