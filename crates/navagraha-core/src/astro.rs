//! Astronomical fact source trait and implementations.
//!
//! The engine never computes ephemerides. It asks an [`AstroSource`] for
//! the optional [`AstroFacts`] of each date: a ruling-planet override and
//! whether the moment of interest sits inside an auspicious or
//! inauspicious window. A source that has nothing to say returns `None`,
//! in which case the window factors are skipped and the ruling planet
//! comes from the weekday rotation.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use navagraha_types::AstroFacts;
use tracing::warn;

use crate::windows::DaylightWindows;

/// A source of per-date astronomical facts.
///
/// Implementations must be shareable across the blocking tasks used by
/// [`forecast_period_concurrent`](crate::forecast::forecast_period_concurrent).
pub trait AstroSource: Send + Sync {
    /// Facts for `date`, or `None` when the source has no data.
    fn facts(&self, date: NaiveDate) -> Option<AstroFacts>;
}

/// A source that never has data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAstroSource;

impl NoAstroSource {
    /// Create a new empty source.
    pub const fn new() -> Self {
        Self
    }
}

impl AstroSource for NoAstroSource {
    fn facts(&self, _date: NaiveDate) -> Option<AstroFacts> {
        None
    }
}

/// Derives window flags from fixed sunrise and sunset times and a moment
/// of interest, applying the weekday of each requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarWindowSource {
    sunrise: NaiveTime,
    sunset: NaiveTime,
    moment: NaiveTime,
}

impl SolarWindowSource {
    /// Create a source for the given daylight span and moment.
    pub const fn new(sunrise: NaiveTime, sunset: NaiveTime, moment: NaiveTime) -> Self {
        Self {
            sunrise,
            sunset,
            moment,
        }
    }
}

impl AstroSource for SolarWindowSource {
    fn facts(&self, date: NaiveDate) -> Option<AstroFacts> {
        match DaylightWindows::compute(date.weekday(), self.sunrise, self.sunset) {
            Ok(windows) => Some(AstroFacts {
                ruling_planet: None,
                auspicious_active: windows.is_auspicious(self.moment),
                inauspicious_active: windows.is_inauspicious(self.moment),
            }),
            Err(e) => {
                warn!(%date, error = %e, "skipping window factors");
                None
            }
        }
    }
}

/// Explicit facts per date, typically filled from an external lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedAstroSource {
    facts: BTreeMap<NaiveDate, AstroFacts>,
}

impl FixedAstroSource {
    /// Create an empty source.
    pub const fn new() -> Self {
        Self {
            facts: BTreeMap::new(),
        }
    }

    /// Record facts for `date`, replacing any earlier entry.
    pub fn insert(&mut self, date: NaiveDate, facts: AstroFacts) {
        self.facts.insert(date, facts);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, date: NaiveDate, facts: AstroFacts) -> Self {
        self.insert(date, facts);
        self
    }
}

impl AstroSource for FixedAstroSource {
    fn facts(&self, date: NaiveDate) -> Option<AstroFacts> {
        self.facts.get(&date).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use navagraha_types::Planet;

    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn no_source_has_no_facts() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert_eq!(NoAstroSource::new().facts(date), None);
    }

    #[test]
    fn solar_source_flags_rahu_kaal() {
        // 2024-05-20 is a Monday; Rahu Kaal is 07:30-09:00 for a 06:00-18:00 day.
        let source = SolarWindowSource::new(hm(6, 0), hm(18, 0), hm(8, 0));
        let facts = source.facts(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()).unwrap();
        assert!(facts.inauspicious_active);
        assert!(!facts.auspicious_active);
        assert_eq!(facts.ruling_planet, None);

        // The same moment on Tuesday falls outside every inauspicious window.
        let facts = source.facts(NaiveDate::from_ymd_opt(2024, 5, 21).unwrap()).unwrap();
        assert!(!facts.inauspicious_active);
    }

    #[test]
    fn solar_source_with_bad_daylight_degrades_to_none() {
        let source = SolarWindowSource::new(hm(18, 0), hm(6, 0), hm(12, 0));
        assert_eq!(source.facts(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()), None);
    }

    #[test]
    fn fixed_source_returns_only_recorded_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let facts = AstroFacts {
            ruling_planet: Some(Planet::Ketu),
            auspicious_active: true,
            inauspicious_active: false,
        };
        let source = FixedAstroSource::new().with(date, facts);
        assert_eq!(source.facts(date), Some(facts));
        assert_eq!(source.facts(date.succ_opt().unwrap()), None);
    }
}
