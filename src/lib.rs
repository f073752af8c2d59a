//! Lzentropy - sequence-complexity measurement engine for multichannel time series.
//!
//! This library measures the Lempel-Ziv complexity of binary (or binarizable)
//! time series using several related algorithms:
//! - LZ76 exhaustive/primitive history decomposition (Lempel & Ziv, 1976)
//! - LZ78 incremental dictionary counting
//! - Shuffled-surrogate normalization (real-vs-null complexity ratio)
//!
//! Numeric signals are binarized via their analytic-signal amplitude envelope
//! and a global mean threshold, then flattened temporally or spatially before
//! measurement. Sessions are processed independently on a bounded worker pool.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

pub mod complexity;
pub mod error;
pub mod pipeline;
pub mod signal;

pub use complexity::{
    lz76_complexity, lz78_complexity, BinarySequence, ComplexityResult, Lz76Variant,
};
pub use error::ComplexityError;
pub use pipeline::{
    ComplexityPipeline, Family, Measure, PipelineConfig, ResultTable, SessionInput, SessionRecord,
    SessionSource, SessionStatus,
};
pub use signal::{analytic_envelope, shuffle_surrogate, Orientation, TimeSeriesMatrix};
