//! Sequence-complexity measurement engines.
//!
//! This module provides the pure, side-effect-free measures:
//! - `BinarySequence` codec - canonical binary symbol sequences
//! - LZ76 exhaustive/primitive complexity via history decomposition
//! - LZ78 dictionary-growth complexity ("cpr")
//!
//! All functions here are deterministic over immutable inputs; randomness
//! and iteration state live in the pipeline layer.

pub mod lz76;
pub mod lz78;
pub mod sequence;

// Re-export commonly used items
pub use lz76::{lz76_complexity, ComplexityResult, Lz76Variant};
pub use lz78::lz78_complexity;
pub use sequence::{BinarySequence, ONE_SYMBOL, ZERO_SYMBOL};
