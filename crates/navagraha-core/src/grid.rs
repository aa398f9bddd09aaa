//! Structural 3x3 digit grid.
//!
//! Cells follow the Lo Shu layout:
//!
//! ```text
//! 4 9 2
//! 3 5 7
//! 8 1 6
//! ```
//!
//! The grid counts the non-zero digits of the birth date written as
//! `DDMMYYYY`, plus the destiny digit, plus the soul digit when the birth
//! day has two digits. The accumulator reads per-digit counts and the
//! eight line sums (three rows, three columns, two diagonals).

use navagraha_types::{BirthDate, CoreNumbers, DigitGrid, GridLine};

/// Digits on each row, column, and diagonal of the grid.
pub const LINES: [[u32; 3]; 8] = [
    // rows
    [4, 9, 2],
    [3, 5, 7],
    [8, 1, 6],
    // columns
    [4, 3, 8],
    [9, 5, 1],
    [2, 7, 6],
    // diagonals
    [4, 5, 6],
    [2, 5, 8],
];

/// Non-zero digits of the birth date as `DDMMYYYY`.
pub fn birth_digits(birth: &BirthDate) -> Vec<u32> {
    format!("{:02}{:02}{:04}", birth.day, birth.month, birth.year)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter(|d| *d != 0)
        .collect()
}

/// Build a grid from raw digits; zeros and values above 9 are skipped.
pub fn grid_from_digits<I>(digits: I) -> DigitGrid
where
    I: IntoIterator<Item = u32>,
{
    let mut counts = vec![0u32; 9];
    for digit in digits {
        let slot = digit
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| counts.get_mut(i));
        if let Some(count) = slot {
            *count = count.saturating_add(1);
        }
    }

    let count_of = |digit: u32| -> u32 {
        digit
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| counts.get(i))
            .copied()
            .unwrap_or(0)
    };

    let lines = LINES
        .iter()
        .map(|line| GridLine {
            digits: line.to_vec(),
            sum: line.iter().map(|d| count_of(*d)).sum(),
            complete: line.iter().all(|d| count_of(*d) > 0),
        })
        .collect();

    DigitGrid { counts, lines }
}

/// Grid for a birth date, including the destiny digit and (for two-digit
/// birth days) the soul digit.
pub fn build_grid(birth: &BirthDate, core: &CoreNumbers) -> DigitGrid {
    let mut digits = birth_digits(birth);
    digits.push(core.destiny);
    if birth.day >= 10 {
        digits.push(core.soul);
    }
    grid_from_digits(digits)
}
