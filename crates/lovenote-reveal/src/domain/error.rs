//! Reveal error types.

use thiserror::Error;

/// Errors raised while constructing reveal targets or cadences.
///
/// These are programming errors in the content or configuration: the
/// animator refuses to start rather than tick an undefined number of times.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevealError {
    /// A grid row does not have the same width as the first row.
    #[error("ragged grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// The grid has rows but they contain no cells.
    #[error("grid rows must contain at least one cell")]
    ZeroWidth,

    /// A cadence was configured with a zero step interval.
    #[error("reveal step interval must be greater than zero")]
    ZeroStep,
}
