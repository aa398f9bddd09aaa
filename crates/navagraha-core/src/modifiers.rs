//! Factor kinds and their weights.
//!
//! [`FactorKind`] is the closed set of adjustments the accumulator knows
//! how to apply. [`ModifierConfig`] maps every kind to a weight; kinds
//! not mentioned in a config file keep their documented default, and
//! names that match no kind are logged and ignored.
//!
//! A weight of zero disables a factor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One independently weighted adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FactorKind {
    // --- Ruling planet of the day ---
    /// The planet rules the day.
    RulingSelf,
    /// The ruling planet lists the planet as a friend.
    RulingFriend,
    /// The ruling planet lists the planet as an enemy.
    RulingEnemy,

    // --- Digit fractal (percent of destiny * 10) ---
    /// The planet's digit appears in the birth-date fractal.
    FractalPresent,
    /// The planet's digit is missing from the birth-date fractal.
    FractalAbsent,

    // --- Problem numbers ---
    /// The planet equals a problem number.
    ProblemExact,
    /// The planet is one away from a problem number.
    ProblemNear,

    // --- Individual cascade ---
    /// The planet equals the individual day number.
    IndividualDay,
    /// The planet equals the individual month number.
    IndividualMonth,
    /// The planet equals the individual year number.
    IndividualYear,

    // --- Core numbers ---
    /// The planet equals the soul number.
    SoulMatch,
    /// The planet equals the destiny number.
    DestinyMatch,

    // --- Calendar coincidences ---
    /// The planet equals the reduced target day.
    CalendarDay,
    /// The planet equals the reduced target month.
    CalendarMonth,
    /// Target day and month equal the birth day and month.
    BirthAnniversary,

    // --- Structural grid ---
    /// Per occurrence of the planet's digit (capped at three).
    GridDigit,
    /// The planet's digit never occurs.
    GridMissing,
    /// Per complete line through the planet's cell.
    GridCompleteLine,
    /// Multiplier on the summed line sums through the planet's cell.
    GridLineSum,

    // --- Name numbers ---
    /// A name number equals the ruling planet of the day.
    NameRuling,
    /// A name number equals the individual day number.
    NameIndividualDay,
    /// A name number equals the individual month number.
    NameIndividualMonth,

    // --- Time windows ---
    /// Friends of the ruler while an auspicious window is active.
    AuspiciousWindow,
    /// Enemies of the ruler while an inauspicious window is active.
    InauspiciousWindow,

    // --- Weekday ---
    /// Percent scaling of the ruling planet's accumulated value.
    WeekdayEnergy,
}

impl FactorKind {
    /// Every factor kind in accumulation order.
    pub const ALL: [Self; 25] = [
        Self::RulingSelf,
        Self::RulingFriend,
        Self::RulingEnemy,
        Self::FractalPresent,
        Self::FractalAbsent,
        Self::ProblemExact,
        Self::ProblemNear,
        Self::IndividualDay,
        Self::IndividualMonth,
        Self::IndividualYear,
        Self::SoulMatch,
        Self::DestinyMatch,
        Self::CalendarDay,
        Self::CalendarMonth,
        Self::BirthAnniversary,
        Self::GridDigit,
        Self::GridMissing,
        Self::GridCompleteLine,
        Self::GridLineSum,
        Self::NameRuling,
        Self::NameIndividualDay,
        Self::NameIndividualMonth,
        Self::AuspiciousWindow,
        Self::InauspiciousWindow,
        Self::WeekdayEnergy,
    ];

    /// Config-file name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RulingSelf => "ruling_self",
            Self::RulingFriend => "ruling_friend",
            Self::RulingEnemy => "ruling_enemy",
            Self::FractalPresent => "fractal_present",
            Self::FractalAbsent => "fractal_absent",
            Self::ProblemExact => "problem_exact",
            Self::ProblemNear => "problem_near",
            Self::IndividualDay => "individual_day",
            Self::IndividualMonth => "individual_month",
            Self::IndividualYear => "individual_year",
            Self::SoulMatch => "soul_match",
            Self::DestinyMatch => "destiny_match",
            Self::CalendarDay => "calendar_day",
            Self::CalendarMonth => "calendar_month",
            Self::BirthAnniversary => "birth_anniversary",
            Self::GridDigit => "grid_digit",
            Self::GridMissing => "grid_missing",
            Self::GridCompleteLine => "grid_complete_line",
            Self::GridLineSum => "grid_line_sum",
            Self::NameRuling => "name_ruling",
            Self::NameIndividualDay => "name_individual_day",
            Self::NameIndividualMonth => "name_individual_month",
            Self::AuspiciousWindow => "auspicious_window",
            Self::InauspiciousWindow => "inauspicious_window",
            Self::WeekdayEnergy => "weekday_energy",
        }
    }

    /// Documented default weight.
    pub const fn default_weight(self) -> f64 {
        match self {
            Self::RulingSelf | Self::NameRuling => 8.0,
            Self::RulingFriend => 12.0,
            Self::RulingEnemy => -12.0,
            Self::FractalPresent | Self::IndividualDay => 15.0,
            Self::IndividualMonth | Self::BirthAnniversary | Self::WeekdayEnergy => 10.0,
            Self::FractalAbsent => -10.0,
            Self::ProblemExact => -15.0,
            Self::ProblemNear | Self::GridMissing => -5.0,
            Self::IndividualYear | Self::NameIndividualDay => 6.0,
            Self::SoulMatch | Self::CalendarDay => 5.0,
            Self::DestinyMatch | Self::AuspiciousWindow => 7.0,
            Self::CalendarMonth | Self::GridDigit => 3.0,
            Self::GridCompleteLine | Self::NameIndividualMonth => 4.0,
            Self::GridLineSum => 0.5,
            Self::InauspiciousWindow => -7.0,
        }
    }

    /// Look up a kind by config-file name (case-insensitive, `-` or `_`).
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|kind| kind.name() == normalized)
    }
}

impl core::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable weight snapshot used for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ModifierConfig {
    weights: BTreeMap<FactorKind, f64>,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            weights: FactorKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.default_weight()))
                .collect(),
        }
    }
}

impl ModifierConfig {
    /// Defaults with named overrides applied.
    ///
    /// Unknown names and non-finite weights are logged and ignored, so the
    /// affected factor keeps its default.
    pub fn from_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut config = Self::default();
        for (name, weight) in overrides {
            let Some(kind) = FactorKind::from_name(name) else {
                warn!(name, "unknown modifier name, keeping defaults");
                continue;
            };
            if !weight.is_finite() {
                warn!(name, weight, "non-finite modifier weight, keeping default");
                continue;
            }
            config.set(kind, weight);
        }
        config
    }

    /// Weight for `kind` (zero means disabled).
    pub fn weight(&self, kind: FactorKind) -> f64 {
        self.weights
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_weight())
    }

    /// Whether `kind` contributes anything.
    pub fn is_enabled(&self, kind: FactorKind) -> bool {
        self.weight(kind).abs() > f64::EPSILON
    }

    /// Replace the weight for `kind`.
    pub fn set(&mut self, kind: FactorKind, weight: f64) {
        self.weights.insert(kind, weight);
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with_weight(mut self, kind: FactorKind, weight: f64) -> Self {
        self.set(kind, weight);
        self
    }

    /// Turn `kind` off.
    pub fn disable(&mut self, kind: FactorKind) {
        self.set(kind, 0.0);
    }
}

impl From<BTreeMap<String, f64>> for ModifierConfig {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        Self::from_overrides(raw.iter().map(|(name, weight)| (name.as_str(), *weight)))
    }
}

impl From<ModifierConfig> for BTreeMap<String, f64> {
    fn from(config: ModifierConfig) -> Self {
        config
            .weights
            .into_iter()
            .map(|(kind, weight)| (kind.name().to_owned(), weight))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_by_name() {
        for kind in FactorKind::ALL {
            assert_eq!(FactorKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(FactorKind::from_name("Ruling-Friend"), Some(FactorKind::RulingFriend));
        assert_eq!(FactorKind::from_name("ruling_frend"), None);
    }

    #[test]
    fn documented_defaults() {
        let config = ModifierConfig::default();
        assert!((config.weight(FactorKind::RulingFriend) - 12.0).abs() < f64::EPSILON);
        assert!((config.weight(FactorKind::RulingEnemy) + 12.0).abs() < f64::EPSILON);
        assert!(
            config.weight(FactorKind::IndividualDay) > config.weight(FactorKind::IndividualMonth)
        );
        assert!(
            config.weight(FactorKind::IndividualMonth) > config.weight(FactorKind::IndividualYear)
        );
    }

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        let config = ModifierConfig::from_overrides([("no_such_factor", 99.0), ("soul_match", 1.5)]);
        assert!((config.weight(FactorKind::SoulMatch) - 1.5).abs() < f64::EPSILON);
        let defaults = ModifierConfig::default();
        for kind in FactorKind::ALL {
            if kind != FactorKind::SoulMatch {
                assert!((config.weight(kind) - defaults.weight(kind)).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn non_finite_weights_are_ignored() {
        let config = ModifierConfig::from_overrides([("ruling_self", f64::NAN)]);
        assert!((config.weight(FactorKind::RulingSelf) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_weight_disables() {
        let mut config = ModifierConfig::default();
        assert!(config.is_enabled(FactorKind::GridDigit));
        config.disable(FactorKind::GridDigit);
        assert!(!config.is_enabled(FactorKind::GridDigit));
    }

    #[test]
    fn serializes_by_name() {
        let config = ModifierConfig::default().with_weight(FactorKind::CalendarDay, 2.0);
        let json = serde_json::to_value(&config).unwrap_or_default();
        assert_eq!(json.get("calendar_day").and_then(serde_json::Value::as_f64), Some(2.0));
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(FactorKind::ALL.len()));
    }
}
