//! Digit reduction and personal number derivation.
//!
//! Every number the factor accumulator compares against a planet comes
//! out of this module. Two reductions exist:
//!
//! - [`reduce`] sums decimal digits until one digit (1-9) remains.
//! - [`reduce_master`] stops early on the master totals 11, 22, and 33.
//!
//! Zero reduces to 9 (a complete cycle), so both functions are total
//! over `u32` and never return 0.

use chrono::{Datelike, NaiveDate};
use navagraha_types::{BirthDate, CoreNumbers, NameNumbers, PersonalNumberSet};

/// The master totals preserved by [`reduce_master`].
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Sum of the decimal digits of `n`.
const fn digit_sum(n: u32) -> u32 {
    let mut rest = n;
    let mut sum: u32 = 0;
    while rest > 0 {
        sum = sum.saturating_add(rest % 10);
        rest /= 10;
    }
    sum
}

/// Whether `n` is one of the master totals.
pub const fn is_master(n: u32) -> bool {
    matches!(n, 11 | 22 | 33)
}

/// Fully reduce `n` to a single digit in 1..=9.
pub const fn reduce(n: u32) -> u32 {
    if n == 0 {
        return 9;
    }
    let mut value = n;
    while value > 9 {
        value = digit_sum(value);
    }
    value
}

/// Reduce `n`, returning 11, 22, or 33 unchanged if the running value
/// ever lands on one of them.
pub const fn reduce_master(n: u32) -> u32 {
    if n == 0 {
        return 9;
    }
    let mut value = n;
    while value > 9 {
        if is_master(value) {
            return value;
        }
        value = digit_sum(value);
    }
    value
}

// ---------------------------------------------------------------------------
// Birth-derived numbers
// ---------------------------------------------------------------------------

/// Derive soul, mind, destiny, wisdom, and ruling numbers.
///
/// Destiny is always fully reduced; only the ruling number keeps master
/// totals.
pub const fn core_numbers(birth: &BirthDate) -> CoreNumbers {
    let total = birth
        .day
        .saturating_add(birth.month)
        .saturating_add(birth.year);
    CoreNumbers {
        soul: reduce(birth.day),
        mind: reduce(birth.month),
        destiny: reduce(total),
        wisdom: reduce(birth.day.saturating_add(birth.month)),
        ruling: reduce_master(total),
    }
}

/// The four-digit fractal: reductions of day, month, year, and their sum.
pub const fn digit_fractal(birth: &BirthDate) -> [u32; 4] {
    let total = birth
        .day
        .saturating_add(birth.month)
        .saturating_add(birth.year);
    [
        reduce(birth.day),
        reduce(birth.month),
        reduce(birth.year),
        reduce(total),
    ]
}

/// Calendar year of `date` as `u32` (years before 0 count as 0).
pub fn year_of(date: NaiveDate) -> u32 {
    u32::try_from(date.year()).unwrap_or(0)
}

/// Individual year -> month -> day cascade and problem numbers for
/// `target`.
pub fn personal_numbers(
    core: &CoreNumbers,
    birth: &BirthDate,
    target: NaiveDate,
) -> PersonalNumberSet {
    let target_year = year_of(target);
    let target_month = target.month();
    let target_day = target.day();

    let individual_year = reduce(
        birth
            .day
            .saturating_add(birth.month)
            .saturating_add(target_year),
    );
    let individual_month = reduce(individual_year.saturating_add(target_month));
    let individual_day = reduce(individual_month.saturating_add(target_day));

    let problem_numbers = [
        (individual_year, reduce(target_year)),
        (individual_month, reduce(target_month)),
        (individual_day, reduce(target_day)),
    ]
    .into_iter()
    .filter_map(|(cascade, calendar)| {
        let diff = cascade.abs_diff(calendar);
        (diff != 0).then(|| reduce(diff))
    })
    .collect();

    PersonalNumberSet {
        core: *core,
        target,
        individual_year,
        individual_month,
        individual_day,
        problem_numbers,
    }
}

// ---------------------------------------------------------------------------
// Name numbers
// ---------------------------------------------------------------------------

/// Chaldean letter value (1-8). Non-letters return `None`.
const fn chaldean_value(c: char) -> Option<u32> {
    match c.to_ascii_uppercase() {
        'A' | 'I' | 'J' | 'Q' | 'Y' => Some(1),
        'B' | 'K' | 'R' => Some(2),
        'C' | 'G' | 'L' | 'S' => Some(3),
        'D' | 'M' | 'T' => Some(4),
        'E' | 'H' | 'N' | 'X' => Some(5),
        'U' | 'V' | 'W' => Some(6),
        'O' | 'Z' => Some(7),
        'F' | 'P' => Some(8),
        _ => None,
    }
}

/// Pythagorean letter value: `(position - 1) mod 9 + 1`.
fn pythagorean_value(c: char) -> Option<u32> {
    let upper = c.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return None;
    }
    let position = u32::from(upper).checked_sub(u32::from('A'))?;
    Some((position % 9).saturating_add(1))
}

const fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Sum letter values through `table`, returning `None` when no letter
/// contributed.
fn letter_total(name: &str, table: impl Fn(char) -> Option<u32>) -> Option<u32> {
    name.chars()
        .filter_map(table)
        .fold(None, |acc: Option<u32>, v| {
            Some(acc.unwrap_or(0).saturating_add(v))
        })
        .map(reduce)
}

/// Derive the three name numbers. Only ASCII letters are considered.
pub fn name_numbers(name: &str) -> NameNumbers {
    NameNumbers {
        chaldean: letter_total(name, chaldean_value),
        expression: letter_total(name, pythagorean_value),
        soul_urge: letter_total(name, |c| {
            if is_vowel(c) {
                pythagorean_value(c)
            } else {
                None
            }
        }),
    }
}
