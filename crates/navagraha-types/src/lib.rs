//! Shared type definitions for the Navagraha energy engine.
//!
//! This crate is the single source of truth for the data that flows into
//! and out of the engine. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for chart front-ends.
//!
//! # Modules
//!
//! - [`enums`] -- Planets, day labels, trends, and period modes
//! - [`structs`] -- Birth inputs, derived numbers, energy vectors, and
//!   period summaries

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DayLabel, PeriodMode, Planet, Trend};
pub use structs::{
    AstroFacts, BirthDate, BirthProfile, CoreNumbers, DayClassification, DayForecast, DayScore,
    DigitGrid, EnergySeries, EnergyVector, GridLine, NameNumbers, PeriodForecast, PeriodSummary,
    PersonalNumberSet, RawEnergy,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings for every type marked #[ts(export)] into
        // the `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        // Enums
        let _ = crate::enums::Planet::export_all();
        let _ = crate::enums::DayLabel::export_all();
        let _ = crate::enums::Trend::export_all();
        let _ = crate::enums::PeriodMode::export_all();

        // Structs
        let _ = crate::structs::BirthDate::export_all();
        let _ = crate::structs::GridLine::export_all();
        let _ = crate::structs::DigitGrid::export_all();
        let _ = crate::structs::BirthProfile::export_all();
        let _ = crate::structs::CoreNumbers::export_all();
        let _ = crate::structs::PersonalNumberSet::export_all();
        let _ = crate::structs::NameNumbers::export_all();
        let _ = crate::structs::AstroFacts::export_all();
        let _ = crate::structs::RawEnergy::export_all();
        let _ = crate::structs::EnergyVector::export_all();
        let _ = crate::structs::DayClassification::export_all();
        let _ = crate::structs::DayScore::export_all();
        let _ = crate::structs::PeriodSummary::export_all();
        let _ = crate::structs::DayForecast::export_all();
        let _ = crate::structs::PeriodForecast::export_all();
    }
}
