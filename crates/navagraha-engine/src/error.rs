//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps one stage of a run so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: navagraha_core::config::ConfigError,
    },

    /// A command-line value was rejected.
    #[error("input error: {source}")]
    Input {
        /// The underlying validation error.
        #[from]
        source: navagraha_core::input::InputError,
    },

    /// The forecast itself failed.
    #[error("forecast error: {source}")]
    Forecast {
        /// The underlying forecast error.
        #[from]
        source: navagraha_core::forecast::ForecastError,
    },

    /// Daylight windows could not be built from the given times.
    #[error("window error: {source}")]
    Window {
        /// The underlying window error.
        #[from]
        source: navagraha_core::windows::WindowError,
    },

    /// Output serialization failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
