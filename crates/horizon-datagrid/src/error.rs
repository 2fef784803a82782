//! Error types for the data-grid engine.

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a grid configuration.
///
/// All variants are configuration-time failures, raised synchronously and
/// intended to be caught during application setup. Runtime state access for
/// an unknown column key is a contract violation and panics instead;
/// incomplete filters are an expected, tolerated state and never error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A second action column was registered on the same configuration.
    #[error("action column has already been defined")]
    ActionColumnAlreadyDefined,

    /// A row action or row route was registered while one already exists.
    /// The two are mutually exclusive per configuration.
    #[error("a row action or row route has already been defined")]
    RowInteractionAlreadyDefined,
}
