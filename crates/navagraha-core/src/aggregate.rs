//! Temporal aggregation of a classified series into a [`PeriodSummary`].
//!
//! Ties always resolve toward the earliest date (for days) and the lower
//! planet number (for planets), so summaries are stable across runs.

use std::collections::BTreeMap;

use navagraha_types::{
    DayClassification, DayLabel, DayScore, EnergyVector, PeriodSummary, Planet, Trend,
};

use crate::config::AggregateConfig;

/// Days per week-level sub-summary.
pub const WEEK_LEN: usize = 7;

fn len_f64(len: usize) -> f64 {
    f64::from(u32::try_from(len).unwrap_or(u32::MAX))
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| {
        (sum + v, count.saturating_add(1))
    });
    if count == 0 { 0.0 } else { sum / len_f64(count) }
}

/// Summarize `series` with its per-day `classifications`.
///
/// Both slices are paired by position. Returns `None` for an empty series.
/// Series longer than a week also get week-level sub-summaries.
pub fn summarize(
    series: &[EnergyVector],
    classifications: &[DayClassification],
    config: &AggregateConfig,
) -> Option<PeriodSummary> {
    let mut summary = summarize_span(series, classifications, config)?;
    if series.len() > WEEK_LEN {
        summary.weeks = series
            .chunks(WEEK_LEN)
            .zip(classifications.chunks(WEEK_LEN))
            .filter_map(|(days, labels)| summarize_span(days, labels, config))
            .collect();
    }
    Some(summary)
}

fn summarize_span(
    series: &[EnergyVector],
    classifications: &[DayClassification],
    config: &AggregateConfig,
) -> Option<PeriodSummary> {
    let first = classifications.first()?;
    let last = classifications.last()?;
    let scores: Vec<DayScore> = classifications
        .iter()
        .map(|c| DayScore { date: c.date, score: c.score })
        .collect();

    let best_day = extreme(&scores, |candidate, current| candidate > current)?;
    let worst_day = extreme(&scores, |candidate, current| candidate < current)?;

    let mut ranked = scores.clone();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.date.cmp(&b.date)));
    let best_days: Vec<DayScore> = ranked.iter().take(config.top_n).copied().collect();
    ranked.sort_by(|a, b| a.score.cmp(&b.score).then(a.date.cmp(&b.date)));
    let worst_days: Vec<DayScore> = ranked.iter().take(config.top_n).copied().collect();

    let planet_averages: BTreeMap<Planet, f64> = Planet::ALL
        .into_iter()
        .map(|planet| {
            let average = mean(series.iter().map(|v| f64::from(v.value(planet))));
            (planet, average)
        })
        .collect();
    let dominant_planet = pick_planet(&planet_averages, |candidate, current| candidate > current);
    let weakest_planet = pick_planet(&planet_averages, |candidate, current| candidate < current);

    let favorable = classifications
        .iter()
        .filter(|c| c.label == DayLabel::Favorable)
        .count();
    let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);

    Some(PeriodSummary {
        start: first.date,
        end: last.date,
        day_count: count(classifications.len()),
        best_day,
        worst_day,
        best_days,
        worst_days,
        planet_averages,
        dominant_planet,
        weakest_planet,
        trend: trend(series, config.trend_threshold),
        average_score: mean(classifications.iter().map(|c| f64::from(c.score))),
        favorable_days: count(favorable),
        challenging_days: count(classifications.len().saturating_sub(favorable)),
        weeks: Vec::new(),
    })
}

/// First day (in order) whose score beats every earlier one under `beats`.
fn extreme(scores: &[DayScore], beats: impl Fn(i32, i32) -> bool) -> Option<DayScore> {
    scores.iter().copied().fold(None, |found, day| match found {
        Some(current) if !beats(day.score, current.score) => Some(current),
        _ => Some(day),
    })
}

/// Planet chosen by `beats`, scanning in number order so ties keep the
/// lower number.
fn pick_planet(averages: &BTreeMap<Planet, f64>, beats: impl Fn(f64, f64) -> bool) -> Planet {
    let mut chosen = Planet::Sun;
    let mut best: Option<f64> = None;
    for planet in Planet::ALL {
        let value = averages.get(&planet).copied().unwrap_or(0.0);
        if best.is_none_or(|current| beats(value, current)) {
            chosen = planet;
            best = Some(value);
        }
    }
    chosen
}

/// Mean daily energy over the first `len / 2` days vs. the rest.
pub fn trend(series: &[EnergyVector], threshold: f64) -> Trend {
    if series.len() < 2 {
        return Trend::Stable;
    }
    let half = series.len() / 2;
    let first = mean(series.iter().take(half).map(EnergyVector::average));
    let second = mean(series.iter().skip(half).map(EnergyVector::average));
    let delta = second - first;
    if delta > threshold {
        Trend::Rising
    } else if delta < -threshold {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn days(n: usize) -> Vec<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().iter_days().take(n).collect()
    }

    fn flat(date: NaiveDate, value: u8) -> EnergyVector {
        EnergyVector {
            date,
            values: Planet::ALL.into_iter().map(|p| (p, value)).collect(),
        }
    }

    fn classified(date: NaiveDate, score: i32) -> DayClassification {
        DayClassification {
            date,
            ruling_planet: Planet::Sun,
            score,
            label: if score >= 50 { DayLabel::Favorable } else { DayLabel::Challenging },
        }
    }

    fn build(scores: &[i32], energies: &[u8]) -> (Vec<EnergyVector>, Vec<DayClassification>) {
        let dates = days(scores.len());
        let series = dates.iter().zip(energies).map(|(d, e)| flat(*d, *e)).collect();
        let labels = dates.iter().zip(scores).map(|(d, s)| classified(*d, *s)).collect();
        (series, labels)
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert_eq!(summarize(&[], &[], &AggregateConfig::default()), None);
    }

    #[test]
    fn week_ties_go_to_earliest_date() {
        let (series, labels) = build(&[5, 9, 3, 9, 1, 1, 7], &[50; 7]);
        let summary = summarize(&series, &labels, &AggregateConfig::default()).unwrap();
        let dates = days(7);

        assert_eq!(summary.best_day, DayScore { date: dates[1], score: 9 });
        assert_eq!(summary.worst_day, DayScore { date: dates[4], score: 1 });
        assert_eq!(
            summary.best_days.iter().map(|d| d.date).collect::<Vec<_>>(),
            vec![dates[1], dates[3], dates[6]]
        );
        assert_eq!(
            summary.worst_days.iter().map(|d| d.date).collect::<Vec<_>>(),
            vec![dates[4], dates[5], dates[2]]
        );
        assert_eq!(summary.day_count, 7);
        assert!(summary.weeks.is_empty());
    }

    #[test]
    fn counts_and_average_score() {
        let (series, labels) = build(&[40, 50, 60, 70], &[50; 4]);
        let summary = summarize(&series, &labels, &AggregateConfig::default()).unwrap();
        assert_eq!(summary.favorable_days, 3);
        assert_eq!(summary.challenging_days, 1);
        assert!((summary.average_score - 55.0).abs() < 1e-9);
    }

    #[test]
    fn dominant_and_weakest_planets() {
        let dates = days(2);
        let mut a = flat(dates[0], 50);
        a.values.insert(Planet::Venus, 90);
        a.values.insert(Planet::Rahu, 10);
        let b = flat(dates[1], 50);
        let labels: Vec<_> = dates.iter().map(|d| classified(*d, 50)).collect();
        let summary = summarize(&[a, b], &labels, &AggregateConfig::default()).unwrap();
        assert_eq!(summary.dominant_planet, Planet::Venus);
        assert_eq!(summary.weakest_planet, Planet::Rahu);
        assert!((summary.planet_averages[&Planet::Venus] - 70.0).abs() < 1e-9);
    }

    #[test]
    fn planet_ties_go_to_lower_number() {
        let (series, labels) = build(&[50, 50], &[40, 40]);
        let summary = summarize(&series, &labels, &AggregateConfig::default()).unwrap();
        assert_eq!(summary.dominant_planet, Planet::Sun);
        assert_eq!(summary.weakest_planet, Planet::Sun);
    }

    #[test]
    fn trend_compares_halves() {
        let series = |energies: &[u8]| -> Vec<EnergyVector> {
            days(energies.len()).into_iter().zip(energies).map(|(d, e)| flat(d, *e)).collect()
        };
        let rising = series(&[10, 20, 60, 70]);
        assert_eq!(trend(&rising, 3.0), Trend::Rising);
        assert_eq!(trend(&series(&[80, 80, 40, 40, 40]), 3.0), Trend::Declining);
        assert_eq!(trend(&series(&[50, 52, 51, 53]), 3.0), Trend::Stable);

        assert_eq!(trend(&rising[..1], 3.0), Trend::Stable);
    }

    #[test]
    fn month_splits_into_weeks() {
        let scores: Vec<i32> = (0..30).collect();
        let (series, labels) = build(&scores, &[50; 30]);
        let summary = summarize(&series, &labels, &AggregateConfig::default()).unwrap();
        assert_eq!(summary.weeks.len(), 5);
        assert_eq!(summary.weeks.iter().map(|w| w.day_count).sum::<u32>(), 30);
        assert_eq!(summary.weeks.last().map(|w| w.day_count), Some(2));
        assert!(summary.weeks.iter().all(|w| w.weeks.is_empty()));
        assert_eq!(summary.best_day.score, 29);
        assert_eq!(summary.weeks[0].best_day.score, 6);
    }

    #[test]
    fn top_n_is_configurable() {
        let (series, labels) = build(&[1, 2, 3, 4, 5], &[50; 5]);
        let config = AggregateConfig { top_n: 1, ..AggregateConfig::default() };
        let summary = summarize(&series, &labels, &config).unwrap();
        assert_eq!(summary.best_days.len(), 1);
        assert_eq!(summary.worst_days.len(), 1);
    }
}
