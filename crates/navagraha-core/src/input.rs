//! Boundary validation for caller-supplied values.
//!
//! Everything past this module assumes well-formed input.

use chrono::{NaiveDate, NaiveTime};
use navagraha_types::{BirthDate, BirthProfile, PeriodMode};

use crate::grid::build_grid;
use crate::numerology::core_numbers;

/// Earliest accepted birth year.
pub const MIN_YEAR: u32 = 1000;
/// Latest accepted birth year.
pub const MAX_YEAR: u32 = 9999;

/// Errors raised while validating input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    /// The birth date is not `DD-MM-YYYY`.
    #[error("birth date {input:?} is not in DD-MM-YYYY format")]
    BirthFormat {
        /// The rejected input.
        input: String,
    },

    /// The parts parse but do not form a real calendar date.
    #[error("birth date {day:02}-{month:02}-{year} does not exist")]
    BirthOutOfRange {
        /// Day component.
        day: u32,
        /// Month component.
        month: u32,
        /// Year component.
        year: u32,
    },

    /// The target date is not `YYYY-MM-DD`.
    #[error("target date {input:?} is not in YYYY-MM-DD format")]
    TargetFormat {
        /// The rejected input.
        input: String,
    },

    /// A clock time is not `HH:MM`.
    #[error("time {input:?} is not in HH:MM format")]
    TimeFormat {
        /// The rejected input.
        input: String,
    },

    /// Unknown period mode name.
    #[error("unknown period mode {input:?} (expected day, week, month, or quarter)")]
    Mode {
        /// The rejected input.
        input: String,
    },
}

/// Parse `DD-MM-YYYY` into a validated [`BirthDate`].
///
/// # Errors
///
/// Returns [`InputError::BirthFormat`] for malformed text and
/// [`InputError::BirthOutOfRange`] for dates that do not exist.
pub fn parse_birth_date(input: &str) -> Result<BirthDate, InputError> {
    let format_error = || InputError::BirthFormat {
        input: input.to_owned(),
    };
    let trimmed = input.trim();
    let mut parts = trimmed.split('-');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format_error());
    };
    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return Err(format_error());
    }
    if ![day, month, year]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(format_error());
    }

    let day: u32 = day.parse().map_err(|_e| format_error())?;
    let month: u32 = month.parse().map_err(|_e| format_error())?;
    let year: u32 = year.parse().map_err(|_e| format_error())?;

    let exists = (MIN_YEAR..=MAX_YEAR).contains(&year)
        && i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .is_some();
    if !exists {
        return Err(InputError::BirthOutOfRange { day, month, year });
    }
    Ok(BirthDate { day, month, year })
}

/// Parse an ISO `YYYY-MM-DD` target date.
///
/// # Errors
///
/// Returns [`InputError::TargetFormat`] if the text is not a valid date.
pub fn parse_target_date(input: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_e| InputError::TargetFormat {
        input: input.to_owned(),
    })
}

/// Parse a 24-hour `HH:MM` clock time.
///
/// # Errors
///
/// Returns [`InputError::TimeFormat`] if the text is not a valid time.
pub fn parse_clock_time(input: &str) -> Result<NaiveTime, InputError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_e| InputError::TimeFormat {
        input: input.to_owned(),
    })
}

/// Parse a period mode name.
///
/// # Errors
///
/// Returns [`InputError::Mode`] for unknown names.
pub fn parse_mode(input: &str) -> Result<PeriodMode, InputError> {
    PeriodMode::parse(input).ok_or_else(|| InputError::Mode {
        input: input.to_owned(),
    })
}

/// Build a profile from validated parts, attaching the structural grid.
///
/// Blank names are treated as absent.
pub fn build_profile(birth: BirthDate, name: Option<&str>) -> BirthProfile {
    let core = core_numbers(&birth);
    BirthProfile {
        birth,
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned),
        grid: Some(build_grid(&birth, &core)),
    }
}
