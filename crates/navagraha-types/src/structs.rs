//! Core data structs for the Navagraha energy engine.
//!
//! Everything here is plain data: created per computation, serialized
//! straight to callers, never persisted by the engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DayLabel, PeriodMode, Planet, Trend};

// ---------------------------------------------------------------------------
// Birth inputs
// ---------------------------------------------------------------------------

/// A validated birth date (day 1-31, month 1-12, four-digit year).
///
/// Construction goes through the input parser in `navagraha-core`, which
/// rejects malformed strings before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BirthDate {
    /// Day of month (1-31).
    pub day: u32,
    /// Month (1-12).
    pub month: u32,
    /// Four-digit year.
    pub year: u32,
}

/// One row, column, or diagonal of the 3x3 digit grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridLine {
    /// The three digits on this line.
    pub digits: Vec<u32>,
    /// Sum of the digit counts along the line.
    pub sum: u32,
    /// Whether every digit on the line occurs at least once.
    pub complete: bool,
}

impl GridLine {
    /// Whether `digit` sits on this line.
    pub fn contains(&self, digit: u32) -> bool {
        self.digits.contains(&digit)
    }
}

/// Structural 3x3 digit grid: per-digit counts and line sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DigitGrid {
    /// Occurrences of digits 1-9 (index 0 holds the count of digit 1).
    pub counts: Vec<u32>,
    /// The eight lines: three rows, three columns, two diagonals.
    pub lines: Vec<GridLine>,
}

impl DigitGrid {
    /// Occurrences of `digit`; zero for digits outside 1..=9.
    pub fn count(&self, digit: u32) -> u32 {
        digit
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Lines passing through the cell of `digit`.
    pub fn lines_through(&self, digit: u32) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(move |line| line.contains(digit))
    }
}

/// Everything known about the person for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BirthProfile {
    /// Parsed birth date.
    pub birth: BirthDate,
    /// Optional free-text name (only letters are considered).
    pub name: Option<String>,
    /// Optional structural grid supplied by the grid builder.
    pub grid: Option<DigitGrid>,
}

// ---------------------------------------------------------------------------
// Derived numbers
// ---------------------------------------------------------------------------

/// Birth-derived numbers that do not depend on the target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CoreNumbers {
    /// reduce(day).
    pub soul: u32,
    /// reduce(month).
    pub mind: u32,
    /// reduce(day + month + year), always a single digit.
    pub destiny: u32,
    /// reduce(day + month).
    pub wisdom: u32,
    /// Master-preserving reduction of day + month + year (1-9, 11, 22, 33).
    pub ruling: u32,
}

/// Personal numbers for one target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PersonalNumberSet {
    /// Birth-derived numbers.
    pub core: CoreNumbers,
    /// Date these cascade numbers belong to.
    pub target: NaiveDate,
    /// reduce(birth day + birth month + target year).
    pub individual_year: u32,
    /// reduce(individual year + target month).
    pub individual_month: u32,
    /// reduce(individual month + target day).
    pub individual_day: u32,
    /// Reduced non-zero differences between cascade values and their
    /// calendar components (zero to three entries).
    pub problem_numbers: Vec<u32>,
}

/// Numbers derived from a name through three independent letter tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NameNumbers {
    /// Chaldean letter values.
    pub chaldean: Option<u32>,
    /// Pythagorean values over every letter.
    pub expression: Option<u32>,
    /// Pythagorean values over vowels only.
    pub soul_urge: Option<u32>,
}

impl NameNumbers {
    /// The numbers that are present, in source order.
    pub fn present(&self) -> impl Iterator<Item = u32> {
        [self.chaldean, self.expression, self.soul_urge]
            .into_iter()
            .flatten()
    }
}

// ---------------------------------------------------------------------------
// Astronomical facts (supplied by an external collaborator)
// ---------------------------------------------------------------------------

/// Per-date facts from the astronomical collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AstroFacts {
    /// Ruling planet override; the weekday rotation applies when absent.
    pub ruling_planet: Option<Planet>,
    /// The moment of interest falls inside the auspicious window.
    pub auspicious_active: bool,
    /// The moment of interest falls inside an inauspicious window.
    pub inauspicious_active: bool,
}

// ---------------------------------------------------------------------------
// Energy
// ---------------------------------------------------------------------------

/// Unbounded per-planet values for one date, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RawEnergy {
    /// Date the values belong to.
    pub date: NaiveDate,
    /// Value per planet.
    pub values: BTreeMap<Planet, f64>,
}

impl RawEnergy {
    /// All nine planets at zero.
    pub fn zeroed(date: NaiveDate) -> Self {
        Self {
            date,
            values: Planet::ALL.into_iter().map(|p| (p, 0.0)).collect(),
        }
    }

    /// Current value for `planet`.
    pub fn value(&self, planet: Planet) -> f64 {
        self.values.get(&planet).copied().unwrap_or(0.0)
    }

    /// Add `delta` to `planet`.
    pub fn add(&mut self, planet: Planet, delta: f64) {
        let entry = self.values.entry(planet).or_insert(0.0);
        *entry += delta;
    }

    /// Overwrite the value for `planet`.
    pub fn set(&mut self, planet: Planet, value: f64) {
        self.values.insert(planet, value);
    }
}

/// Bounded per-planet energy (0-100) for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnergyVector {
    /// Date the values belong to.
    pub date: NaiveDate,
    /// Energy per planet, each in [0, 100].
    pub values: BTreeMap<Planet, u8>,
}

impl EnergyVector {
    /// Energy for `planet`.
    pub fn value(&self, planet: Planet) -> u8 {
        self.values.get(&planet).copied().unwrap_or(0)
    }

    /// Mean energy across all planets in the vector.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let total: u32 = self.values.values().map(|v| u32::from(*v)).sum();
        f64::from(total) / f64::from(u32::try_from(self.values.len()).unwrap_or(u32::MAX))
    }
}

/// Date-ordered, contiguous sequence of energy vectors.
pub type EnergySeries = Vec<EnergyVector>;

// ---------------------------------------------------------------------------
// Classification and summaries
// ---------------------------------------------------------------------------

/// Classification of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayClassification {
    /// The classified date.
    pub date: NaiveDate,
    /// Planet ruling the date.
    pub ruling_planet: Planet,
    /// Unbounded composite score.
    pub score: i32,
    /// Label after thresholding.
    pub label: DayLabel,
}

/// A date and its composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayScore {
    /// The date.
    pub date: NaiveDate,
    /// Composite score for the date.
    pub score: i32,
}

/// Rollup of a classified series (week, month, or quarter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PeriodSummary {
    /// First date covered.
    pub start: NaiveDate,
    /// Last date covered.
    pub end: NaiveDate,
    /// Number of days covered.
    pub day_count: u32,
    /// Strictly highest score, ties to the earliest date.
    pub best_day: DayScore,
    /// Strictly lowest score, ties to the earliest date.
    pub worst_day: DayScore,
    /// Highest-scoring days, best first.
    pub best_days: Vec<DayScore>,
    /// Lowest-scoring days, worst first.
    pub worst_days: Vec<DayScore>,
    /// Mean energy per planet across the period.
    pub planet_averages: BTreeMap<Planet, f64>,
    /// Planet with the highest average.
    pub dominant_planet: Planet,
    /// Planet with the lowest average.
    pub weakest_planet: Planet,
    /// First-half vs. second-half direction.
    pub trend: Trend,
    /// Mean composite score.
    pub average_score: f64,
    /// Days labelled favorable.
    pub favorable_days: u32,
    /// Days labelled challenging.
    pub challenging_days: u32,
    /// Seven-day sub-summaries (empty for periods of a week or less).
    pub weeks: Vec<PeriodSummary>,
}

// ---------------------------------------------------------------------------
// Forecast outputs
// ---------------------------------------------------------------------------

/// Single-day output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayForecast {
    /// Personal numbers for the date.
    pub numbers: PersonalNumberSet,
    /// Bounded energy.
    pub vector: EnergyVector,
    /// Classification of the date.
    pub classification: DayClassification,
}

/// Multi-day output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PeriodForecast {
    /// Requested mode.
    pub mode: PeriodMode,
    /// Corrected, normalized series.
    pub series: EnergySeries,
    /// One classification per series entry.
    pub classifications: Vec<DayClassification>,
    /// Rollup of the whole period.
    pub summary: PeriodSummary,
}
