//! Planetary friend/enemy table and the ruling planet of a day.
//!
//! Relationships are declared per planet and are not symmetric: Moon
//! lists Mercury as a friend while Mercury lists Moon as an enemy. No
//! planet appears in its own sets.

use chrono::{Datelike, NaiveDate};
use navagraha_types::{AstroFacts, Planet};

/// How one planet regards another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Listed in the friend set.
    Friend,
    /// Listed in the enemy set.
    Enemy,
    /// Listed in neither set.
    Neutral,
    /// The same planet.
    Itself,
}

/// Friend set declared by `planet`.
pub const fn friends(planet: Planet) -> &'static [Planet] {
    use Planet::{Jupiter, Mars, Mercury, Moon, Rahu, Saturn, Sun, Venus};
    match planet {
        Planet::Sun => &[Moon, Mars, Jupiter],
        Planet::Moon => &[Sun, Mercury],
        Planet::Jupiter => &[Sun, Moon, Mars],
        Planet::Rahu => &[Mercury, Venus, Saturn],
        Planet::Mercury => &[Sun, Venus, Rahu],
        Planet::Venus => &[Mercury, Saturn, Rahu],
        Planet::Ketu => &[Mars, Venus],
        Planet::Saturn => &[Mercury, Venus, Rahu],
        Planet::Mars => &[Sun, Moon, Jupiter],
    }
}

/// Enemy set declared by `planet`.
pub const fn enemies(planet: Planet) -> &'static [Planet] {
    use Planet::{Ketu, Mars, Mercury, Moon, Rahu, Saturn, Sun, Venus};
    match planet {
        Planet::Sun => &[Venus, Saturn, Rahu],
        Planet::Moon => &[Rahu, Ketu],
        Planet::Jupiter => &[Mercury, Venus],
        Planet::Rahu => &[Sun, Moon, Mars],
        Planet::Mercury => &[Moon],
        Planet::Venus => &[Sun, Moon],
        Planet::Ketu => &[Sun, Moon],
        Planet::Saturn => &[Sun, Moon, Mars],
        Planet::Mars => &[Mercury],
    }
}

/// How `planet` regards `other`, according to `planet`'s own sets.
pub fn relationship(planet: Planet, other: Planet) -> Relationship {
    if planet == other {
        Relationship::Itself
    } else if friends(planet).contains(&other) {
        Relationship::Friend
    } else if enemies(planet).contains(&other) {
        Relationship::Enemy
    } else {
        Relationship::Neutral
    }
}

/// Ruling planet of `date`: the collaborator's override when present,
/// otherwise the weekday rotation.
pub fn ruling_planet(date: NaiveDate, facts: Option<&AstroFacts>) -> Planet {
    facts
        .and_then(|f| f.ruling_planet)
        .unwrap_or_else(|| Planet::ruling_weekday(date.weekday()))
}
