//! Orchestration of the scoring pipeline for one day or one period.
//!
//! For every date: personal numbers, ruling planet, and the accumulated
//! raw energy. Those per-day steps are independent. The anti-cyclicity
//! corrector is the barrier: it runs once every day of the period is
//! done, followed by normalization, classification, and the rollup.
//!
//! [`forecast_period`] walks the dates on the caller's thread, checking a
//! [`CancelToken`] between days. [`forecast_period_concurrent`] spreads
//! the days over tokio blocking tasks and reorders the results by date
//! before the barrier.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use navagraha_types::{
    BirthProfile, CoreNumbers, DayForecast, PeriodForecast, PeriodMode, PersonalNumberSet, Planet,
    RawEnergy,
};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::aggregate::summarize;
use crate::anticyclic::correct;
use crate::astro::AstroSource;
use crate::classify::classify_day;
use crate::config::EngineConfig;
use crate::factors::{accumulate, DayContext};
use crate::normalize::{normalize, normalize_series};
use crate::numerology::{core_numbers, personal_numbers};
use crate::relationships::ruling_planet;

/// Errors from a forecast run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ForecastError {
    /// The run was cancelled before every day was computed.
    #[error("forecast cancelled after {completed} of {total} days")]
    Cancelled {
        /// Days finished before cancellation was observed.
        completed: u32,
        /// Days requested.
        total: u32,
    },

    /// The requested period runs past the last representable date.
    #[error("period of {days} days starting {start} overflows the calendar")]
    DateOverflow {
        /// First requested date.
        start: NaiveDate,
        /// Requested length.
        days: u32,
    },

    /// A blocking task failed to complete.
    #[error("forecast task failed: {message}")]
    Task {
        /// Description of the failure.
        message: String,
    },
}

/// Cooperative cancellation flag shared between a caller and a running
/// forecast. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Per-day output before the barrier.
#[derive(Debug, Clone)]
struct DayWork {
    numbers: PersonalNumberSet,
    ruling_planet: Planet,
    raw: RawEnergy,
}

fn compute_day(
    profile: &BirthProfile,
    core: &CoreNumbers,
    date: NaiveDate,
    config: &EngineConfig,
    astro: &dyn AstroSource,
) -> DayWork {
    let facts = astro.facts(date);
    let ruling_planet = ruling_planet(date, facts.as_ref());
    let numbers = personal_numbers(core, &profile.birth, date);
    let day = DayContext {
        date,
        ruling_planet,
        facts,
    };
    let raw = accumulate(profile, &numbers, &config.modifiers, &day);
    DayWork {
        numbers,
        ruling_planet,
        raw,
    }
}

/// The contiguous dates covered by `mode` starting at `start`.
///
/// # Errors
///
/// Returns [`ForecastError::DateOverflow`] if the period leaves the
/// representable calendar.
pub fn period_dates(start: NaiveDate, mode: PeriodMode) -> Result<Vec<NaiveDate>, ForecastError> {
    let days = mode.day_count();
    (0..days)
        .map(|offset| {
            start
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or(ForecastError::DateOverflow { start, days })
        })
        .collect()
}

/// Forecast a single date. A lone day is never corrected.
pub fn forecast_day(
    profile: &BirthProfile,
    date: NaiveDate,
    config: &EngineConfig,
    astro: &dyn AstroSource,
) -> DayForecast {
    let core = core_numbers(&profile.birth);
    let work = compute_day(profile, &core, date, config, astro);
    let vector = normalize(&work.raw);
    let classification =
        classify_day(&work.numbers, work.ruling_planet, &vector, &config.classifier);
    debug!(%date, score = classification.score, label = ?classification.label, "Day forecast computed");
    DayForecast {
        numbers: work.numbers,
        vector,
        classification,
    }
}

/// Forecast every date of `mode` starting at `start`, sequentially.
///
/// # Errors
///
/// Returns [`ForecastError::Cancelled`] if `cancel` fires between days and
/// [`ForecastError::DateOverflow`] if the period leaves the calendar.
pub fn forecast_period(
    profile: &BirthProfile,
    start: NaiveDate,
    mode: PeriodMode,
    config: &EngineConfig,
    astro: &dyn AstroSource,
    cancel: &CancelToken,
) -> Result<PeriodForecast, ForecastError> {
    let dates = period_dates(start, mode)?;
    let total = mode.day_count();
    let core = core_numbers(&profile.birth);

    let mut days = Vec::with_capacity(dates.len());
    for date in dates {
        if cancel.is_cancelled() {
            let completed = u32::try_from(days.len()).unwrap_or(u32::MAX);
            info!(%start, completed, total, "Forecast cancelled");
            return Err(ForecastError::Cancelled { completed, total });
        }
        days.push(compute_day(profile, &core, date, config, astro));
    }

    finish(mode, days, config)
}

/// Forecast every date of `mode` starting at `start`, one blocking task
/// per day.
///
/// # Errors
///
/// Returns [`ForecastError::Cancelled`] if `cancel` fires before every day
/// is computed, [`ForecastError::DateOverflow`] if the period leaves the
/// calendar, and [`ForecastError::Task`] if a task panics or is aborted.
pub async fn forecast_period_concurrent(
    profile: Arc<BirthProfile>,
    start: NaiveDate,
    mode: PeriodMode,
    config: Arc<EngineConfig>,
    astro: Arc<dyn AstroSource>,
    cancel: CancelToken,
) -> Result<PeriodForecast, ForecastError> {
    let dates = period_dates(start, mode)?;
    let total = mode.day_count();
    let core = core_numbers(&profile.birth);

    let mut tasks = JoinSet::new();
    for date in dates {
        let profile = Arc::clone(&profile);
        let config = Arc::clone(&config);
        let astro = Arc::clone(&astro);
        let cancel = cancel.clone();
        tasks.spawn_blocking(move || {
            if cancel.is_cancelled() {
                return None;
            }
            Some(compute_day(&profile, &core, date, &config, astro.as_ref()))
        });
    }

    let mut days = Vec::with_capacity(tasks.len());
    let mut skipped = false;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(work)) => days.push(work),
            Ok(None) => skipped = true,
            Err(e) => {
                tasks.abort_all();
                return Err(ForecastError::Task {
                    message: e.to_string(),
                });
            }
        }
    }

    if skipped || cancel.is_cancelled() {
        let completed = u32::try_from(days.len()).unwrap_or(u32::MAX);
        info!(%start, completed, total, "Forecast cancelled");
        return Err(ForecastError::Cancelled { completed, total });
    }

    days.sort_by_key(|work| work.raw.date);
    finish(mode, days, &config)
}

/// Barrier: correct, normalize, classify, and summarize.
fn finish(
    mode: PeriodMode,
    days: Vec<DayWork>,
    config: &EngineConfig,
) -> Result<PeriodForecast, ForecastError> {
    let mut raws: Vec<RawEnergy> = days.iter().map(|work| work.raw.clone()).collect();
    let stats = correct(&mut raws, &config.corrector);
    let series = normalize_series(&raws);

    let classifications: Vec<_> = days
        .iter()
        .zip(&series)
        .map(|(work, vector)| {
            classify_day(&work.numbers, work.ruling_planet, vector, &config.classifier)
        })
        .collect();

    let summary = summarize(&series, &classifications, &config.aggregate).ok_or_else(|| {
        ForecastError::Task {
            message: "empty period".to_owned(),
        }
    })?;

    debug!(
        ?mode,
        start = %summary.start,
        days = summary.day_count,
        rounds = stats.rounds,
        spread_adjustments = stats.spread_adjustments,
        nudges = stats.nudges,
        "Period forecast computed"
    );

    Ok(PeriodForecast {
        mode,
        series,
        classifications,
        summary,
    })
}
