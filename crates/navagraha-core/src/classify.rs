//! Day classification.
//!
//! A day's composite score starts at the configured baseline and adds
//! twelve three-tier comparisons between personal numbers, the ruling
//! planet of the day, and that planet's energy. The label is a plain
//! threshold on the score, so raising the score can never turn a
//! favorable day into a challenging one.

use navagraha_types::{DayClassification, DayLabel, EnergyVector, PersonalNumberSet, Planet};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::numerology::reduce;

/// Smallest difference that counts as a large mismatch.
pub const FAR_DIFF: u32 = 5;

/// Score contributions for an exact match, a near miss (difference of
/// one), and a large mismatch (difference of [`FAR_DIFF`] or more).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierWeights {
    /// Added when the difference is zero.
    pub exact: i32,
    /// Added when the difference is one.
    pub near: i32,
    /// Added when the difference is at least [`FAR_DIFF`].
    pub far: i32,
}

impl TierWeights {
    /// Build a tier triple.
    pub const fn new(exact: i32, near: i32, far: i32) -> Self {
        Self { exact, near, far }
    }

    /// Contribution for comparing `a` with `b`.
    pub const fn score(self, a: u32, b: u32) -> i32 {
        match a.abs_diff(b) {
            0 => self.exact,
            1 => self.near,
            diff if diff >= FAR_DIFF => self.far,
            _ => 0,
        }
    }
}

/// One of the twelve comparisons that make up the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Comparison {
    /// Individual day vs. destiny.
    IndividualDayDestiny,
    /// Individual day vs. mind.
    IndividualDayMind,
    /// Individual day vs. ruling number.
    IndividualDayRuling,
    /// Individual month vs. destiny.
    IndividualMonthDestiny,
    /// Individual month vs. mind.
    IndividualMonthMind,
    /// Individual month vs. ruling number.
    IndividualMonthRuling,
    /// Individual year vs. destiny.
    IndividualYearDestiny,
    /// Individual year vs. mind.
    IndividualYearMind,
    /// Individual year vs. ruling number.
    IndividualYearRuling,
    /// Number of the day's ruling planet vs. destiny.
    DayRulerDestiny,
    /// Number of the day's ruling planet vs. individual day.
    DayRulerIndividualDay,
    /// Energy of the day's ruling planet against the high/low tiers.
    RulingPlanetEnergy,
}

impl Comparison {
    /// Every comparison in scoring order.
    pub const ALL: [Self; 12] = [
        Self::IndividualDayDestiny,
        Self::IndividualDayMind,
        Self::IndividualDayRuling,
        Self::IndividualMonthDestiny,
        Self::IndividualMonthMind,
        Self::IndividualMonthRuling,
        Self::IndividualYearDestiny,
        Self::IndividualYearMind,
        Self::IndividualYearRuling,
        Self::DayRulerDestiny,
        Self::DayRulerIndividualDay,
        Self::RulingPlanetEnergy,
    ];

    /// Config-file name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::IndividualDayDestiny => "individual_day_destiny",
            Self::IndividualDayMind => "individual_day_mind",
            Self::IndividualDayRuling => "individual_day_ruling",
            Self::IndividualMonthDestiny => "individual_month_destiny",
            Self::IndividualMonthMind => "individual_month_mind",
            Self::IndividualMonthRuling => "individual_month_ruling",
            Self::IndividualYearDestiny => "individual_year_destiny",
            Self::IndividualYearMind => "individual_year_mind",
            Self::IndividualYearRuling => "individual_year_ruling",
            Self::DayRulerDestiny => "day_ruler_destiny",
            Self::DayRulerIndividualDay => "day_ruler_individual_day",
            Self::RulingPlanetEnergy => "ruling_planet_energy",
        }
    }

    /// Look up a comparison by config-file name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Built-in tier weights.
    pub const fn default_tiers(self) -> TierWeights {
        match self {
            Self::IndividualDayDestiny => TierWeights::new(8, 3, -6),
            Self::IndividualDayMind | Self::IndividualDayRuling => TierWeights::new(6, 2, -4),
            Self::IndividualMonthDestiny => TierWeights::new(5, 2, -4),
            Self::IndividualMonthMind | Self::IndividualMonthRuling => TierWeights::new(4, 1, -3),
            Self::IndividualYearDestiny => TierWeights::new(3, 1, -2),
            Self::IndividualYearMind | Self::IndividualYearRuling => TierWeights::new(2, 1, -2),
            Self::DayRulerDestiny => TierWeights::new(6, 2, -3),
            Self::DayRulerIndividualDay => TierWeights::new(5, 2, -3),
            Self::RulingPlanetEnergy => TierWeights::new(10, 3, -8),
        }
    }
}

impl core::fmt::Display for Comparison {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Label for `score` under `threshold`.
pub const fn label_for(score: i32, threshold: i32) -> DayLabel {
    if score >= threshold {
        DayLabel::Favorable
    } else {
        DayLabel::Challenging
    }
}

/// Contribution of a single comparison for the day.
pub fn comparison_score(
    comparison: Comparison,
    numbers: &PersonalNumberSet,
    ruling_planet: Planet,
    vector: &EnergyVector,
    config: &ClassifierConfig,
) -> i32 {
    let tiers = config.tiers(comparison);
    let core = &numbers.core;
    let ruling = reduce(core.ruling);
    let ruler = ruling_planet.number();

    let (a, b) = match comparison {
        Comparison::IndividualDayDestiny => (numbers.individual_day, core.destiny),
        Comparison::IndividualDayMind => (numbers.individual_day, core.mind),
        Comparison::IndividualDayRuling => (numbers.individual_day, ruling),
        Comparison::IndividualMonthDestiny => (numbers.individual_month, core.destiny),
        Comparison::IndividualMonthMind => (numbers.individual_month, core.mind),
        Comparison::IndividualMonthRuling => (numbers.individual_month, ruling),
        Comparison::IndividualYearDestiny => (numbers.individual_year, core.destiny),
        Comparison::IndividualYearMind => (numbers.individual_year, core.mind),
        Comparison::IndividualYearRuling => (numbers.individual_year, ruling),
        Comparison::DayRulerDestiny => (ruler, core.destiny),
        Comparison::DayRulerIndividualDay => (ruler, numbers.individual_day),
        Comparison::RulingPlanetEnergy => {
            let energy = vector.value(ruling_planet);
            return if energy >= config.energy_high {
                tiers.exact
            } else if energy >= config.energy_low {
                tiers.near
            } else {
                tiers.far
            };
        }
    };
    tiers.score(a, b)
}

/// Score and label one day.
pub fn classify_day(
    numbers: &PersonalNumberSet,
    ruling_planet: Planet,
    vector: &EnergyVector,
    config: &ClassifierConfig,
) -> DayClassification {
    let score = Comparison::ALL.into_iter().fold(config.baseline, |acc, comparison| {
        acc.saturating_add(comparison_score(comparison, numbers, ruling_planet, vector, config))
    });

    DayClassification {
        date: vector.date,
        ruling_planet,
        score,
        label: label_for(score, config.threshold),
    }
}
