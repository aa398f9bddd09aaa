//! Weighted factor accumulator.
//!
//! Starts from the base energy of the target date and applies every
//! [`FactorKind`] in a fixed order. Each condition is evaluated on its own
//! and its weighted contribution is summed onto the raw value; nothing
//! short-circuits. A zero weight contributes nothing.
//!
//! The result is unbounded. Bounding happens after the anti-cyclicity pass.

use chrono::{Datelike, NaiveDate};
use navagraha_types::{AstroFacts, BirthProfile, PersonalNumberSet, Planet, RawEnergy};

use crate::base::base_energy;
use crate::modifiers::{FactorKind, ModifierConfig};
use crate::numerology::{digit_fractal, name_numbers, reduce};
use crate::relationships::{enemies, friends, relationship, Relationship};

/// Occurrences of a digit beyond this count earn nothing extra.
pub const GRID_DIGIT_CAP: u32 = 3;

/// Per-day inputs that do not come from the birth profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayContext {
    /// Target date.
    pub date: NaiveDate,
    /// Planet ruling the date (weekday rotation or collaborator override).
    pub ruling_planet: Planet,
    /// Facts from the astronomical collaborator, if any.
    pub facts: Option<AstroFacts>,
}

/// Raw values plus the weights used to credit them.
struct Accumulator<'a> {
    raw: RawEnergy,
    modifiers: &'a ModifierConfig,
}

impl Accumulator<'_> {
    /// Add `times` x the weight of `kind` to `planet`.
    fn credit(&mut self, planet: Planet, kind: FactorKind, times: f64) {
        if self.modifiers.is_enabled(kind) {
            self.raw.add(planet, self.modifiers.weight(kind) * times);
        }
    }

    /// Credit the planet whose number is `number`, if there is one.
    fn credit_number(&mut self, number: u32, kind: FactorKind) {
        if let Some(planet) = Planet::from_number(number) {
            self.credit(planet, kind, 1.0);
        }
    }
}

/// Compute the unbounded per-planet energy for one day.
pub fn accumulate(
    profile: &BirthProfile,
    numbers: &PersonalNumberSet,
    modifiers: &ModifierConfig,
    day: &DayContext,
) -> RawEnergy {
    let mut acc = Accumulator {
        raw: base_energy(numbers.core.destiny, day.date),
        modifiers,
    };

    apply_ruling(&mut acc, day.ruling_planet);
    apply_fractal(&mut acc, profile, numbers);
    apply_problem_numbers(&mut acc, numbers);
    apply_cascade(&mut acc, numbers);
    apply_calendar(&mut acc, profile, numbers, day.date);
    apply_grid(&mut acc, profile);
    apply_name(&mut acc, profile, numbers, day.ruling_planet);
    if let Some(facts) = day.facts {
        apply_windows(&mut acc, facts, day.ruling_planet);
    }
    apply_weekday(&mut acc, day.ruling_planet);

    acc.raw
}

fn apply_ruling(acc: &mut Accumulator<'_>, ruler: Planet) {
    for planet in Planet::ALL {
        match relationship(ruler, planet) {
            Relationship::Itself => acc.credit(planet, FactorKind::RulingSelf, 1.0),
            Relationship::Friend => acc.credit(planet, FactorKind::RulingFriend, 1.0),
            Relationship::Enemy => acc.credit(planet, FactorKind::RulingEnemy, 1.0),
            Relationship::Neutral => {}
        }
    }
}

/// Fractal weights are percentages of `destiny * 10`.
fn apply_fractal(acc: &mut Accumulator<'_>, profile: &BirthProfile, numbers: &PersonalNumberSet) {
    let fractal = digit_fractal(&profile.birth);
    let scale = f64::from(numbers.core.destiny.saturating_mul(10)) / 100.0;
    for planet in Planet::ALL {
        let kind = if fractal.contains(&planet.number()) {
            FactorKind::FractalPresent
        } else {
            FactorKind::FractalAbsent
        };
        acc.credit(planet, kind, scale);
    }
}

fn apply_problem_numbers(acc: &mut Accumulator<'_>, numbers: &PersonalNumberSet) {
    for problem in &numbers.problem_numbers {
        for planet in Planet::ALL {
            match planet.number().abs_diff(*problem) {
                0 => acc.credit(planet, FactorKind::ProblemExact, 1.0),
                1 => acc.credit(planet, FactorKind::ProblemNear, 1.0),
                _ => {}
            }
        }
    }
}

fn apply_cascade(acc: &mut Accumulator<'_>, numbers: &PersonalNumberSet) {
    acc.credit_number(numbers.individual_day, FactorKind::IndividualDay);
    acc.credit_number(numbers.individual_month, FactorKind::IndividualMonth);
    acc.credit_number(numbers.individual_year, FactorKind::IndividualYear);
    acc.credit_number(numbers.core.soul, FactorKind::SoulMatch);
    acc.credit_number(numbers.core.destiny, FactorKind::DestinyMatch);
}

fn apply_calendar(
    acc: &mut Accumulator<'_>,
    profile: &BirthProfile,
    numbers: &PersonalNumberSet,
    date: NaiveDate,
) {
    acc.credit_number(reduce(date.day()), FactorKind::CalendarDay);
    acc.credit_number(reduce(date.month()), FactorKind::CalendarMonth);

    if date.day() == profile.birth.day && date.month() == profile.birth.month {
        let soul = numbers.core.soul;
        let destiny = numbers.core.destiny;
        acc.credit_number(soul, FactorKind::BirthAnniversary);
        if destiny != soul {
            acc.credit_number(destiny, FactorKind::BirthAnniversary);
        }
    }
}

fn apply_grid(acc: &mut Accumulator<'_>, profile: &BirthProfile) {
    let Some(grid) = &profile.grid else {
        return;
    };
    for planet in Planet::ALL {
        let digit = planet.number();
        let count = grid.count(digit);
        if count == 0 {
            acc.credit(planet, FactorKind::GridMissing, 1.0);
        } else {
            acc.credit(planet, FactorKind::GridDigit, f64::from(count.min(GRID_DIGIT_CAP)));
        }

        let (complete, sums) = grid
            .lines_through(digit)
            .fold((0u32, 0u32), |(complete, sums), line| {
                (
                    complete.saturating_add(u32::from(line.complete)),
                    sums.saturating_add(line.sum),
                )
            });
        acc.credit(planet, FactorKind::GridCompleteLine, f64::from(complete));
        acc.credit(planet, FactorKind::GridLineSum, f64::from(sums));
    }
}

fn apply_name(
    acc: &mut Accumulator<'_>,
    profile: &BirthProfile,
    numbers: &PersonalNumberSet,
    ruler: Planet,
) {
    let Some(name) = profile.name.as_deref() else {
        return;
    };
    for value in name_numbers(name).present() {
        if value == ruler.number() {
            acc.credit_number(value, FactorKind::NameRuling);
        }
        if value == numbers.individual_day {
            acc.credit_number(value, FactorKind::NameIndividualDay);
        }
        if value == numbers.individual_month {
            acc.credit_number(value, FactorKind::NameIndividualMonth);
        }
    }
}

fn apply_windows(acc: &mut Accumulator<'_>, facts: AstroFacts, ruler: Planet) {
    if facts.auspicious_active {
        for planet in friends(ruler) {
            acc.credit(*planet, FactorKind::AuspiciousWindow, 1.0);
        }
    }
    if facts.inauspicious_active {
        for planet in enemies(ruler) {
            acc.credit(*planet, FactorKind::InauspiciousWindow, 1.0);
        }
    }
}

/// Scales the ruler's accumulated value by `weight` percent.
fn apply_weekday(acc: &mut Accumulator<'_>, ruler: Planet) {
    let current = acc.raw.value(ruler);
    acc.credit(ruler, FactorKind::WeekdayEnergy, current / 100.0);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use navagraha_types::BirthDate;

    use super::*;
    use crate::grid::build_grid;
    use crate::numerology::{core_numbers, personal_numbers};
    use crate::relationships::ruling_planet;

    const EPS: f64 = 1e-9;

    fn setup(name: Option<&str>, with_grid: bool) -> (BirthProfile, PersonalNumberSet, DayContext) {
        let birth = BirthDate { day: 15, month: 3, year: 1990 };
        let core = core_numbers(&birth);
        let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let profile = BirthProfile {
            birth,
            name: name.map(str::to_owned),
            grid: with_grid.then(|| build_grid(&birth, &core)),
        };
        let numbers = personal_numbers(&core, &birth, date);
        let day = DayContext {
            date,
            ruling_planet: ruling_planet(date, None),
            facts: None,
        };
        (profile, numbers, day)
    }

    fn all_disabled() -> ModifierConfig {
        let mut config = ModifierConfig::default();
        for kind in FactorKind::ALL {
            config.disable(kind);
        }
        config
    }

    #[test]
    fn disabled_factors_leave_base_energy() {
        let (profile, numbers, day) = setup(Some("Anna"), true);
        let raw = accumulate(&profile, &numbers, &all_disabled(), &day);
        assert_eq!(raw, base_energy(numbers.core.destiny, day.date));
    }

    #[test]
    fn ruling_relationship_only() {
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled()
            .with_weight(FactorKind::RulingSelf, 8.0)
            .with_weight(FactorKind::RulingFriend, 12.0)
            .with_weight(FactorKind::RulingEnemy, -12.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);

        // Monday: Moon rules, lists Sun and Mercury as friends, Rahu and Ketu as enemies.
        let delta = |p: Planet| raw.value(p) - base.value(p);
        assert!((delta(Planet::Moon) - 8.0).abs() < EPS);
        assert!((delta(Planet::Sun) - 12.0).abs() < EPS);
        assert!((delta(Planet::Mercury) - 12.0).abs() < EPS);
        assert!((delta(Planet::Rahu) + 12.0).abs() < EPS);
        assert!((delta(Planet::Ketu) + 12.0).abs() < EPS);
        assert!(delta(Planet::Jupiter).abs() < EPS);
    }

    #[test]
    fn fractal_scales_with_destiny() {
        // Destiny 1 -> base of 10; fractal {6, 3, 1, 1}.
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled()
            .with_weight(FactorKind::FractalPresent, 15.0)
            .with_weight(FactorKind::FractalAbsent, -10.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert!((raw.value(Planet::Venus) - base.value(Planet::Venus) - 1.5).abs() < EPS);
        assert!((raw.value(Planet::Sun) - base.value(Planet::Sun) - 1.5).abs() < EPS);
        assert!((raw.value(Planet::Mars) - base.value(Planet::Mars) + 1.0).abs() < EPS);
    }

    #[test]
    fn problem_numbers_penalize_exact_and_near() {
        // Problem numbers are [1, 4].
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled()
            .with_weight(FactorKind::ProblemExact, -15.0)
            .with_weight(FactorKind::ProblemNear, -5.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        let delta = |p: Planet| raw.value(p) - base.value(p);
        // Sun (1): exact 1. Moon (2): near 1.
        assert!((delta(Planet::Sun) + 15.0).abs() < EPS);
        assert!((delta(Planet::Moon) + 5.0).abs() < EPS);
        // Jupiter (3): near 4. Rahu (4): exact 4. Mercury (5): near 4.
        assert!((delta(Planet::Jupiter) + 5.0).abs() < EPS);
        assert!((delta(Planet::Rahu) + 15.0).abs() < EPS);
        assert!((delta(Planet::Mercury) + 5.0).abs() < EPS);
        assert!(delta(Planet::Mars).abs() < EPS);
    }

    #[test]
    fn cascade_favors_individual_day() {
        // Individual day 6 (Venus), month 4 (Rahu), year 8 (Saturn).
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled()
            .with_weight(FactorKind::IndividualDay, 15.0)
            .with_weight(FactorKind::IndividualMonth, 10.0)
            .with_weight(FactorKind::IndividualYear, 6.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        let delta = |p: Planet| raw.value(p) - base.value(p);
        assert!((delta(Planet::Venus) - 15.0).abs() < EPS);
        assert!((delta(Planet::Rahu) - 10.0).abs() < EPS);
        assert!((delta(Planet::Saturn) - 6.0).abs() < EPS);
    }

    /// Every planet moves by its listed delta and the rest stay on base.
    fn assert_deltas(raw: &RawEnergy, base: &RawEnergy, expected: &[(Planet, f64)]) {
        for planet in Planet::ALL {
            let want = expected
                .iter()
                .find(|(p, _)| *p == planet)
                .map_or(0.0, |(_, delta)| *delta);
            let got = raw.value(planet) - base.value(planet);
            assert!((got - want).abs() < EPS, "{planet}: got {got}, want {want}");
        }
    }

    #[test]
    fn soul_match_credits_soul_planet() {
        // Soul 6 (Venus).
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled().with_weight(FactorKind::SoulMatch, 5.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Venus, 5.0)]);
    }

    #[test]
    fn destiny_match_credits_destiny_planet() {
        // Destiny 1 (Sun).
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled().with_weight(FactorKind::DestinyMatch, 7.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Sun, 7.0)]);
    }

    #[test]
    fn calendar_day_credits_reduced_day_of_month() {
        // 20 reduces to 2 (Moon).
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled().with_weight(FactorKind::CalendarDay, 5.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Moon, 5.0)]);
    }

    #[test]
    fn calendar_month_credits_reduced_month() {
        // May is 5 (Mercury).
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled().with_weight(FactorKind::CalendarMonth, 3.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Mercury, 3.0)]);
    }

    #[test]
    fn name_matching_individual_day_credits_its_planet() {
        // "Kim": Chaldean 7, expression 6, soul urge 9. Individual day is 6.
        let (profile, numbers, day) = setup(Some("Kim"), false);
        let config = all_disabled().with_weight(FactorKind::NameIndividualDay, 6.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Venus, 6.0)]);

        // "Ada": Chaldean 6 and expression 6 each count.
        let (profile, _, _) = setup(Some("Ada"), false);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Venus, 12.0)]);
    }

    #[test]
    fn name_matching_individual_month_credits_its_planet() {
        // "Raj": Chaldean 4, expression 2, soul urge 1. Individual month is 4.
        let (profile, numbers, day) = setup(Some("Raj"), false);
        let config = all_disabled().with_weight(FactorKind::NameIndividualMonth, 4.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert_deltas(&raw, &base, &[(Planet::Rahu, 4.0)]);

        let (unnamed, _, _) = setup(None, false);
        assert_eq!(accumulate(&unnamed, &numbers, &config, &day), base);
    }

    #[test]
    fn anniversary_credits_soul_and_destiny() {
        let (profile, numbers, _) = setup(None, false);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let numbers = personal_numbers(&numbers.core, &profile.birth, date);
        let day = DayContext {
            date,
            ruling_planet: ruling_planet(date, None),
            facts: None,
        };
        let config = all_disabled().with_weight(FactorKind::BirthAnniversary, 10.0);
        let base = base_energy(numbers.core.destiny, date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        // Soul 6 (Venus), destiny 1 (Sun).
        assert!((raw.value(Planet::Venus) - base.value(Planet::Venus) - 10.0).abs() < EPS);
        assert!((raw.value(Planet::Sun) - base.value(Planet::Sun) - 10.0).abs() < EPS);
        assert!((raw.value(Planet::Moon) - base.value(Planet::Moon)).abs() < EPS);
    }

    #[test]
    fn grid_factors_need_a_grid() {
        let config = all_disabled()
            .with_weight(FactorKind::GridDigit, 3.0)
            .with_weight(FactorKind::GridMissing, -5.0);
        let (without, numbers, day) = setup(None, false);
        let (with, _, _) = setup(None, true);
        let base = base_energy(numbers.core.destiny, day.date);

        assert_eq!(accumulate(&without, &numbers, &config, &day), base);

        let raw = accumulate(&with, &numbers, &config, &day);
        // Digit 1 occurs three times, digit 2 never.
        assert!((raw.value(Planet::Sun) - base.value(Planet::Sun) - 9.0).abs() < EPS);
        assert!((raw.value(Planet::Moon) - base.value(Planet::Moon) + 5.0).abs() < EPS);
    }

    #[test]
    fn grid_lines_through_cell() {
        // Mars (9) sits on the top row 4-9-2 (sum 2) and middle column
        // 9-5-1 (sum 6, complete).
        let (profile, numbers, day) = setup(None, true);
        let config = all_disabled()
            .with_weight(FactorKind::GridCompleteLine, 4.0)
            .with_weight(FactorKind::GridLineSum, 0.5);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert!((raw.value(Planet::Mars) - base.value(Planet::Mars) - 8.0).abs() < EPS);
    }

    #[test]
    fn name_numbers_credit_matching_planet() {
        // "Anna": Chaldean 3, expression 3, soul urge 2. Monday ruler is Moon (2).
        let (profile, numbers, day) = setup(Some("Anna"), false);
        let config = all_disabled().with_weight(FactorKind::NameRuling, 8.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        assert!((raw.value(Planet::Moon) - base.value(Planet::Moon) - 8.0).abs() < EPS);
        assert!((raw.value(Planet::Jupiter) - base.value(Planet::Jupiter)).abs() < EPS);
    }

    #[test]
    fn windows_follow_ruler_relationships() {
        let (profile, numbers, mut day) = setup(None, false);
        day.facts = Some(AstroFacts {
            ruling_planet: None,
            auspicious_active: true,
            inauspicious_active: true,
        });
        let config = all_disabled()
            .with_weight(FactorKind::AuspiciousWindow, 7.0)
            .with_weight(FactorKind::InauspiciousWindow, -7.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        let delta = |p: Planet| raw.value(p) - base.value(p);
        assert!((delta(Planet::Mercury) - 7.0).abs() < EPS);
        assert!((delta(Planet::Ketu) + 7.0).abs() < EPS);
        assert!(delta(Planet::Moon).abs() < EPS);

        day.facts = None;
        assert_eq!(accumulate(&profile, &numbers, &config, &day), base);
    }

    #[test]
    fn weekday_energy_scales_ruler() {
        let (profile, numbers, day) = setup(None, false);
        let config = all_disabled().with_weight(FactorKind::WeekdayEnergy, 10.0);
        let base = base_energy(numbers.core.destiny, day.date);
        let raw = accumulate(&profile, &numbers, &config, &day);
        let moon = base.value(Planet::Moon);
        assert!((raw.value(Planet::Moon) - moon * 1.1).abs() < EPS);
    }

    #[test]
    fn accumulation_is_deterministic() {
        let (profile, numbers, day) = setup(Some("Anna"), true);
        let config = ModifierConfig::default();
        assert_eq!(
            accumulate(&profile, &numbers, &config, &day),
            accumulate(&profile, &numbers, &config, &day)
        );
    }
}
