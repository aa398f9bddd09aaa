//! Base energy generator.
//!
//! `base = (seed * 10) mod 100`, then each planet adds its own modulation
//! of the target day, month, and two-digit year. The result is unbounded;
//! bounding happens only in [`crate::normalize`].

use chrono::{Datelike, NaiveDate};
use navagraha_types::{Planet, RawEnergy};

use crate::numerology::year_of;

/// Shared starting point for every planet.
pub const fn base_value(seed: u32) -> u32 {
    seed.wrapping_mul(10) % 100
}

/// Planet-specific modulation of (day, month, two-digit year).
pub const fn modulation(planet: Planet, day: u32, month: u32, yy: u32) -> u32 {
    match planet {
        Planet::Sun => day.saturating_mul(3).saturating_add(month) % 20,
        Planet::Moon => day.saturating_mul(2).saturating_add(yy) % 25,
        Planet::Jupiter => month.saturating_mul(4).saturating_add(day) % 18,
        Planet::Rahu => day.saturating_add(month).saturating_add(yy) % 22,
        Planet::Mercury => (day.saturating_mul(5) % 15).saturating_add(month),
        Planet::Venus => yy.saturating_mul(2).saturating_add(day) % 20,
        Planet::Ketu => day.saturating_mul(month) % 17,
        Planet::Saturn => yy.saturating_add(month.saturating_mul(3)) % 21,
        Planet::Mars => day.saturating_mul(4).saturating_add(yy) % 19,
    }
}

/// Initial per-planet values for `date`, seeded by the destiny number.
pub fn base_energy(seed: u32, date: NaiveDate) -> RawEnergy {
    let base = base_value(seed);
    let yy = year_of(date) % 100;
    let (day, month) = (date.day(), date.month());

    let mut raw = RawEnergy::zeroed(date);
    for planet in Planet::ALL {
        let value = base.saturating_add(modulation(planet, day, month, yy));
        raw.set(planet, f64::from(value));
    }
    raw
}
