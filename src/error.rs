//! Error taxonomy for complexity measurement.
//!
//! Two propagation classes exist:
//! - Batch-fatal errors (`InvalidInputKind`, `InvalidVariant`,
//!   `EigenvalueSearchExhausted`, `WorkerPool`) indicate a broken caller
//!   contract or a violated algorithmic invariant and abort the whole run.
//! - Per-session errors (`InvalidShape`, `DegenerateSequence`,
//!   `DegenerateSurrogate`) describe one session's data; the pipeline records
//!   them in the result table and continues with the next session.

use thiserror::Error;

/// All failure modes of the complexity engines and the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplexityError {
    /// Input could not be interpreted as a one-dimensional binary sequence.
    #[error("input is not a usable one-dimensional sequence: {0}")]
    InvalidInputKind(String),

    /// Unrecognized measure or variant name.
    #[error(
        "unknown measure variant '{0}'; valid inputs are \
         'LZ78temporal', 'LZ78spatial', 'LZ76temporal', 'LZ76spatial'"
    )]
    InvalidVariant(String),

    /// The sequence is too short (or empty) for the requested computation.
    #[error("degenerate sequence of length {0}")]
    DegenerateSequence(usize),

    /// The LZ76 eigenvalue search range was exhausted without resolution.
    /// The search is defined to terminate for every well-formed binary
    /// sequence, so this indicates a contract violation, not bad data.
    #[error("internal error: eigenvalue search exhausted at position {0}")]
    EigenvalueSearchExhausted(usize),

    /// A session's source is not a timepoints-by-channels numeric matrix.
    #[error("invalid session shape: {0}")]
    InvalidShape(String),

    /// The surrogate sequence produced zero complexity; the ratio is undefined.
    #[error("surrogate complexity is zero, entropy ratio undefined")]
    DegenerateSurrogate,

    /// The worker pool could not be constructed.
    #[error("worker pool initialization failed: {0}")]
    WorkerPool(String),
}

impl ComplexityError {
    /// Whether this error is confined to a single session's data.
    ///
    /// Session-local errors are recorded in the result table without
    /// halting the batch; everything else fails fast.
    #[must_use]
    pub fn is_session_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape(_) | Self::DegenerateSequence(_) | Self::DegenerateSurrogate
        )
    }
}
