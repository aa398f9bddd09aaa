//! Normalizer: round and clamp raw values into `0..=100`.

use navagraha_types::{EnergySeries, EnergyVector, RawEnergy};

/// Lowest bounded energy.
pub const MIN_ENERGY: u8 = 0;
/// Highest bounded energy.
pub const MAX_ENERGY: u8 = 100;

/// `clamp(round(value), 0, 100)`. NaN maps to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize_value(value: f64) -> u8 {
    if value.is_nan() {
        return MIN_ENERGY;
    }
    value
        .round()
        .clamp(f64::from(MIN_ENERGY), f64::from(MAX_ENERGY)) as u8
}

/// Bound every planet of one day.
pub fn normalize(raw: &RawEnergy) -> EnergyVector {
    EnergyVector {
        date: raw.date,
        values: raw
            .values
            .iter()
            .map(|(planet, value)| (*planet, normalize_value(*value)))
            .collect(),
    }
}

/// Bound a whole series, keeping its order.
pub fn normalize_series(series: &[RawEnergy]) -> EnergySeries {
    series.iter().map(normalize).collect()
}
