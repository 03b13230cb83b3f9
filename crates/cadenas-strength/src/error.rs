//! Error types for `cadenas-strength`.

use thiserror::Error;

/// Errors produced by the estimation engine.
#[derive(Debug, Error)]
pub enum StrengthError {
    /// Complexity level outside the valid `0..=MAX` range.
    ///
    /// Levels are rejected, never clamped — an out-of-range value is a
    /// caller contract violation.
    #[error("complexity level {value} out of range (maximum {max})")]
    ComplexityOutOfRange {
        /// The rejected level.
        value: u8,
        /// The highest valid level.
        max: u8,
    },
}
