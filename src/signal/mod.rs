//! Numeric-signal preprocessing for complexity measurement.
//!
//! This module turns raw multichannel recordings into the binary sequences
//! the complexity engines consume:
//! - `TimeSeriesMatrix` - timepoints-by-channels storage with flattening
//! - analytic-signal amplitude envelope extraction (FFT-based Hilbert)
//! - seeded per-channel shuffled surrogates (the null model)

pub mod envelope;
pub mod matrix;
pub mod surrogate;

// Re-export commonly used items
pub use envelope::analytic_envelope;
pub use matrix::{Orientation, TimeSeriesMatrix};
pub use surrogate::{derive_channel_seed, shuffle_surrogate};
