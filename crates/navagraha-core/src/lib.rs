//! Scoring pipeline for the Navagraha energy engine.
//!
//! Given a birth profile and a target date, the pipeline derives personal
//! numbers, accumulates weighted factors on top of a base energy for each
//! of the nine planets, breaks up flat or repetitive series, bounds the
//! values to `0..=100`, and classifies and summarizes the days.
//!
//! # Modules
//!
//! - [`numerology`] -- Digit reduction, core and cascade numbers, name
//!   numbers.
//! - [`relationships`] -- Planetary friend/enemy table and ruling planet.
//! - [`grid`] -- The 3x3 digit grid built from a birth date.
//! - [`base`] -- Base energy per planet for a date.
//! - [`modifiers`] -- [`FactorKind`] and the [`ModifierConfig`] weight map.
//! - [`factors`] -- The weighted factor accumulator.
//! - [`windows`] -- Daylight windows (Rahu Kaal, Yamaganda, Gulika, Abhijit).
//! - [`astro`] -- [`AstroSource`] trait and implementations.
//! - [`anticyclic`] -- Spread and adjacent-day correction of a series.
//! - [`normalize`] -- Rounding and clamping into `0..=100`.
//! - [`classify`] -- Composite day score and label.
//! - [`aggregate`] -- Period rollups.
//! - [`forecast`] -- Orchestration for one day or one period.
//! - [`config`] -- YAML configuration and the snapshot store.
//! - [`input`] -- Boundary validation of caller-supplied strings.
//!
//! [`FactorKind`]: modifiers::FactorKind
//! [`ModifierConfig`]: modifiers::ModifierConfig
//! [`AstroSource`]: astro::AstroSource

pub mod aggregate;
pub mod anticyclic;
pub mod astro;
pub mod base;
pub mod classify;
pub mod config;
pub mod factors;
pub mod forecast;
pub mod grid;
pub mod input;
pub mod modifiers;
pub mod normalize;
pub mod numerology;
pub mod relationships;
pub mod windows;
