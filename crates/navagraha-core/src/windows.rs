//! Daylight partition into auspicious and inauspicious windows.
//!
//! Sunrise and sunset come from an external astronomical lookup; this
//! module only divides the daylight span. Daylight is split into eight
//! equal segments (so segment length varies from day to day), and the
//! weekday selects which segment is Rahu Kaal, Yamaganda, and Gulika.
//! Abhijit is a fixed 48-minute window centered on solar midday.

use chrono::{NaiveTime, Timelike, Weekday};

/// Length of the Abhijit window in minutes.
pub const ABHIJIT_MINUTES: u32 = 48;

/// Number of daylight segments.
pub const SEGMENTS: u32 = 8;

/// Errors from daylight partitioning.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WindowError {
    /// Sunset is not after sunrise.
    #[error("sunset {sunset} is not after sunrise {sunrise}")]
    InvalidDaylight {
        /// Supplied sunrise.
        sunrise: NaiveTime,
        /// Supplied sunset.
        sunset: NaiveTime,
    },
}

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Inclusive start.
    pub start: NaiveTime,
    /// Exclusive end.
    pub end: NaiveTime,
}

impl Interval {
    /// Whether `time` falls inside the interval.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Named windows for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaylightWindows {
    /// The eight daylight segments in order.
    pub segments: Vec<Interval>,
    /// Inauspicious.
    pub rahu_kaal: Interval,
    /// Inauspicious.
    pub yamaganda: Interval,
    /// Inauspicious.
    pub gulika: Interval,
    /// Auspicious midday window.
    pub abhijit: Interval,
}

/// One-based segment numbers (Rahu Kaal, Yamaganda, Gulika) per weekday.
const fn segment_numbers(weekday: Weekday) -> (usize, usize, usize) {
    match weekday {
        Weekday::Mon => (2, 4, 6),
        Weekday::Tue => (7, 3, 5),
        Weekday::Wed => (5, 2, 4),
        Weekday::Thu => (6, 1, 3),
        Weekday::Fri => (4, 7, 2),
        Weekday::Sat => (3, 6, 1),
        Weekday::Sun => (8, 5, 7),
    }
}

impl DaylightWindows {
    /// Partition the daylight between `sunrise` and `sunset`.
    ///
    /// Times are handled at whole-second resolution.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidDaylight`] if sunset is not after
    /// sunrise.
    pub fn compute(
        weekday: Weekday,
        sunrise: NaiveTime,
        sunset: NaiveTime,
    ) -> Result<Self, WindowError> {
        if sunset <= sunrise {
            return Err(WindowError::InvalidDaylight { sunrise, sunset });
        }
        let rise = sunrise.num_seconds_from_midnight();
        let set = sunset.num_seconds_from_midnight();
        let daylight = set.saturating_sub(rise);
        let segment = daylight / SEGMENTS;
        let at = |secs: u32| {
            NaiveTime::from_num_seconds_from_midnight_opt(secs.min(set), 0).unwrap_or(sunset)
        };

        let segments: Vec<Interval> = (0..SEGMENTS)
            .map(|i| {
                let start = rise.saturating_add(segment.saturating_mul(i));
                let end = if i.saturating_add(1) == SEGMENTS {
                    set
                } else {
                    start.saturating_add(segment)
                };
                Interval { start: at(start), end: at(end) }
            })
            .collect();

        let (rahu, yama, gulika) = segment_numbers(weekday);
        let pick = |number: usize| -> Interval {
            number
                .checked_sub(1)
                .and_then(|i| segments.get(i))
                .copied()
                .unwrap_or(Interval { start: sunrise, end: sunrise })
        };

        let midday = rise.saturating_add(daylight / 2);
        let half = ABHIJIT_MINUTES.saturating_mul(60) / 2;
        let abhijit = Interval {
            start: at(midday.saturating_sub(half)),
            end: at(midday.saturating_add(half)),
        };

        Ok(Self {
            rahu_kaal: pick(rahu),
            yamaganda: pick(yama),
            gulika: pick(gulika),
            abhijit,
            segments,
        })
    }

    /// Whether `time` falls inside Rahu Kaal, Yamaganda, or Gulika.
    pub fn is_inauspicious(&self, time: NaiveTime) -> bool {
        self.rahu_kaal.contains(time) || self.yamaganda.contains(time) || self.gulika.contains(time)
    }

    /// Whether `time` falls inside Abhijit.
    pub fn is_auspicious(&self, time: NaiveTime) -> bool {
        self.abhijit.contains(time)
    }
}
