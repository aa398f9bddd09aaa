//! Enumeration types for the Navagraha energy engine.
//!
//! The nine planets form a closed set. Each carries a fixed number
//! in 1..=9 which is the value every digit-reduction factor compares
//! against.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Planets
// ---------------------------------------------------------------------------

/// One of the nine symbolic planetary entities.
///
/// Variants are declared in number order, so the derived `Ord` sorts
/// Sun (1) first and Mars (9) last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Planet {
    /// Number 1.
    Sun,
    /// Number 2.
    Moon,
    /// Number 3.
    Jupiter,
    /// Number 4 (north lunar node).
    Rahu,
    /// Number 5.
    Mercury,
    /// Number 6.
    Venus,
    /// Number 7 (south lunar node).
    Ketu,
    /// Number 8.
    Saturn,
    /// Number 9.
    Mars,
}

impl Planet {
    /// All nine planets in number order.
    pub const ALL: [Self; 9] = [
        Self::Sun,
        Self::Moon,
        Self::Jupiter,
        Self::Rahu,
        Self::Mercury,
        Self::Venus,
        Self::Ketu,
        Self::Saturn,
        Self::Mars,
    ];

    /// The planet's number (1..=9).
    pub const fn number(self) -> u32 {
        match self {
            Self::Sun => 1,
            Self::Moon => 2,
            Self::Jupiter => 3,
            Self::Rahu => 4,
            Self::Mercury => 5,
            Self::Venus => 6,
            Self::Ketu => 7,
            Self::Saturn => 8,
            Self::Mars => 9,
        }
    }

    /// Zero-based ordinal (`number - 1`).
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Jupiter => 2,
            Self::Rahu => 3,
            Self::Mercury => 4,
            Self::Venus => 5,
            Self::Ketu => 6,
            Self::Saturn => 7,
            Self::Mars => 8,
        }
    }

    /// Look up a planet by its number. Returns `None` outside 1..=9.
    pub const fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::Sun),
            2 => Some(Self::Moon),
            3 => Some(Self::Jupiter),
            4 => Some(Self::Rahu),
            5 => Some(Self::Mercury),
            6 => Some(Self::Venus),
            7 => Some(Self::Ketu),
            8 => Some(Self::Saturn),
            9 => Some(Self::Mars),
            _ => None,
        }
    }

    /// English display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Jupiter => "Jupiter",
            Self::Rahu => "Rahu",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Ketu => "Ketu",
            Self::Saturn => "Saturn",
            Self::Mars => "Mars",
        }
    }

    /// The planet ruling a weekday under the seven-day rotation.
    ///
    /// Rahu and Ketu never rule a weekday.
    pub const fn ruling_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::Sun,
            Weekday::Mon => Self::Moon,
            Weekday::Tue => Self::Mars,
            Weekday::Wed => Self::Mercury,
            Weekday::Thu => Self::Jupiter,
            Weekday::Fri => Self::Venus,
            Weekday::Sat => Self::Saturn,
        }
    }
}

impl core::fmt::Display for Planet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Terminal label assigned to a classified day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DayLabel {
    /// Composite score reached the threshold.
    Favorable,
    /// Composite score fell below the threshold.
    Challenging,
}

/// Direction of energy across a period (first half vs. second half).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Trend {
    /// Second half averages higher by more than the trend threshold.
    Rising,
    /// Second half averages lower by more than the trend threshold.
    Declining,
    /// Change within the trend threshold.
    Stable,
}

// ---------------------------------------------------------------------------
// Period modes
// ---------------------------------------------------------------------------

/// Length of the forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PeriodMode {
    /// A single date.
    Day,
    /// Seven contiguous dates.
    Week,
    /// Thirty contiguous dates.
    Month,
    /// Ninety contiguous dates.
    Quarter,
}

impl PeriodMode {
    /// Number of contiguous dates covered by this mode.
    pub const fn day_count(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }

    /// Parse a mode name (`day`, `week`, `month`, `quarter`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Some(Self::Day),
            "week" | "weekly" => Some(Self::Week),
            "month" | "monthly" => Some(Self::Month),
            "quarter" | "quarterly" => Some(Self::Quarter),
            _ => None,
        }
    }
}
