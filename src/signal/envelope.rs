//! Analytic-signal amplitude envelope extraction.
//!
//! Builds the analytic signal of each channel via the FFT: the spectrum is
//! zeroed over negative frequencies and doubled over positive ones (DC and,
//! for even lengths, the Nyquist bin pass through unchanged), then inverse
//! transformed. The envelope is the magnitude of the result - the canonical
//! amplitude measure used for binarization.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::signal::matrix::TimeSeriesMatrix;

/// Compute the per-channel analytic amplitude envelope of a matrix.
///
/// Each channel is transformed independently along time; the output matrix
/// has the same shape as the input. A single-timepoint matrix degenerates
/// to the per-sample magnitude (the one-sided spectrum of a length-1
/// series is the series itself).
#[must_use]
pub fn analytic_envelope(matrix: &TimeSeriesMatrix) -> TimeSeriesMatrix {
    let n = matrix.timepoints();

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(n);

    let mut out = matrix.clone();
    let mut spectrum = vec![Complex::new(0.0f64, 0.0); n];

    for c in 0..matrix.channels() {
        let samples = matrix.channel(c);
        for (slot, &v) in spectrum.iter_mut().zip(samples.iter()) {
            *slot = Complex::new(v, 0.0);
        }
        forward.process(&mut spectrum);

        // One-sided spectrum: keep DC (and Nyquist for even n), double the
        // positive frequencies, zero the negative ones.
        let half = n / 2;
        if n % 2 == 0 {
            for bin in spectrum.iter_mut().take(half).skip(1) {
                *bin *= 2.0;
            }
            for bin in spectrum.iter_mut().skip(half + 1) {
                *bin = Complex::new(0.0, 0.0);
            }
        } else {
            for bin in spectrum.iter_mut().take(half + 1).skip(1) {
                *bin *= 2.0;
            }
            for bin in spectrum.iter_mut().skip(half + 1) {
                *bin = Complex::new(0.0, 0.0);
            }
        }

        inverse.process(&mut spectrum);

        // rustfft does not normalize the inverse transform.
        let scale = 1.0 / n as f64;
        let envelope: Vec<f64> = spectrum.iter().map(|z| (z * scale).norm()).collect();
        out.set_channel(c, &envelope);
    }

    out
}
