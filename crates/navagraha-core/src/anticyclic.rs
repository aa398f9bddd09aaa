//! Anti-cyclicity corrector.
//!
//! Runs over the whole date-ordered series after every day has been
//! accumulated. Two passes per planet:
//!
//! 1. **Spread**: if the planet's population standard deviation is at or
//!    below `min_std_dev`, add a deterministic offset built from the
//!    eight-entry [`PATTERN`] (cycled by planet index plus day position)
//!    and a small day-of-month term. Weights double on each attempt until
//!    the spread clears the threshold.
//! 2. **Adjacent**: for neighboring days closer than `min_adjacent_delta`,
//!    nudge the later day by the pattern at `nudge_weight`.
//!
//! The passes repeat until a round changes nothing. A series that already
//! meets both thresholds is returned untouched.

use chrono::Datelike;
use navagraha_types::{Planet, RawEnergy};

use crate::config::CorrectorConfig;

/// Sign and magnitude pattern for injected variation.
pub const PATTERN: [f64; 8] = [8.0, -6.0, 10.0, -4.0, 7.0, -9.0, 5.0, -7.0];

/// What a [`correct`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrectionStats {
    /// Rounds executed (zero for series shorter than two days).
    pub rounds: u32,
    /// Planet spreads that received variation.
    pub spread_adjustments: u32,
    /// Individual day values moved by the adjacent pass.
    pub nudges: u32,
}

impl CorrectionStats {
    /// Whether any value moved.
    pub const fn changed(&self) -> bool {
        self.spread_adjustments > 0 || self.nudges > 0
    }
}

/// Pattern entry for planet index `planet` at day position `position`.
fn pattern(planet: usize, position: usize) -> f64 {
    PATTERN
        .get(planet.wrapping_add(position) % PATTERN.len())
        .copied()
        .unwrap_or(0.0)
}

fn len_f64(len: usize) -> f64 {
    f64::from(u32::try_from(len).unwrap_or(u32::MAX))
}

/// Population standard deviation; zero for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = len_f64(values.len());
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Apply both passes until stable. Empty and single-day series are left
/// alone.
pub fn correct(series: &mut [RawEnergy], config: &CorrectorConfig) -> CorrectionStats {
    let mut stats = CorrectionStats::default();
    if series.len() < 2 {
        return stats;
    }

    for _ in 0..config.max_rounds.max(1) {
        let mut changed = false;
        for planet in Planet::ALL {
            if spread_pass(series, planet, config) {
                stats.spread_adjustments = stats.spread_adjustments.saturating_add(1);
                changed = true;
            }
            let nudges = adjacent_pass(series, planet, config);
            if nudges > 0 {
                stats.nudges = stats.nudges.saturating_add(nudges);
                changed = true;
            }
        }
        stats.rounds = stats.rounds.saturating_add(1);
        if !changed {
            break;
        }
    }
    stats
}

/// Returns `true` if any value changed.
fn spread_pass(series: &mut [RawEnergy], planet: Planet, config: &CorrectorConfig) -> bool {
    let original: Vec<f64> = series.iter().map(|raw| raw.value(planet)).collect();
    if std_dev(&original) > config.min_std_dev {
        return false;
    }

    let p = planet.index();
    let offsets: Vec<f64> = series
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let day = usize::try_from(raw.date.day()).unwrap_or(0);
            let calendar = f64::from(u8::try_from(day.wrapping_add(p) % 5).unwrap_or(2)) - 2.0;
            config.variation_weight * pattern(p, i) + config.calendar_weight * calendar
        })
        .collect();

    let mut scale = 1.0;
    let mut candidate = original.clone();
    for _ in 0..config.max_attempts.max(1) {
        candidate = original
            .iter()
            .zip(&offsets)
            .map(|(value, offset)| value + scale * offset)
            .collect();
        if std_dev(&candidate) > config.min_std_dev {
            break;
        }
        scale *= 2.0;
    }

    let mut changed = false;
    for (raw, value) in series.iter_mut().zip(candidate) {
        if raw.value(planet).to_bits() != value.to_bits() {
            raw.set(planet, value);
            changed = true;
        }
    }
    changed
}

/// Returns the number of values moved.
fn adjacent_pass(series: &mut [RawEnergy], planet: Planet, config: &CorrectorConfig) -> u32 {
    let delta = config.min_adjacent_delta;
    if delta <= 0.0 {
        return 0;
    }

    let p = planet.index();
    let mut moved = 0u32;
    let mut previous: Option<f64> = None;
    for (i, raw) in series.iter_mut().enumerate() {
        let current = raw.value(planet);
        let Some(before) = previous else {
            previous = Some(current);
            continue;
        };
        if (current - before).abs() >= delta {
            previous = Some(current);
            continue;
        }

        let direction = pattern(p, i);
        let step = config.nudge_weight * direction;
        let up = current + step;
        let down = current - step;
        let next = if (up - before).abs() >= delta {
            up
        } else if (down - before).abs() >= delta {
            down
        } else {
            before + delta.copysign(direction)
        };

        if next.to_bits() != current.to_bits() {
            raw.set(planet, next);
            moved = moved.saturating_add(1);
        }
        previous = Some(next);
    }
    moved
}
