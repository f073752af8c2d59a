//! Timepoints-by-channels matrix storage and flattening.
//!
//! Data is stored row-major (one row per timepoint), so all channels of a
//! timepoint are adjacent in memory. The two flattening orientations differ
//! only in which axis varies fastest, but that ordering materially changes
//! the Lempel-Ziv result downstream.

use crate::error::ComplexityError;

/// Flattening order for a binarized matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Row-major: all channels within a timepoint adjacent.
    #[default]
    Temporal,
    /// Transpose first: all timepoints within a channel adjacent.
    Spatial,
}

impl Orientation {
    /// Display name for the orientation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Temporal => "temporal",
            Self::Spatial => "spatial",
        }
    }

    /// All available orientations.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Temporal, Self::Spatial]
    }
}

/// A real-valued timepoints-by-channels matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesMatrix {
    data: Vec<f64>,
    timepoints: usize,
    channels: usize,
}

impl TimeSeriesMatrix {
    /// Build a matrix from row-major samples.
    ///
    /// # Errors
    /// Returns `InvalidShape` if either dimension is zero or the sample
    /// count does not match `timepoints * channels`.
    pub fn from_rows(
        data: Vec<f64>,
        timepoints: usize,
        channels: usize,
    ) -> Result<Self, ComplexityError> {
        if timepoints == 0 || channels == 0 {
            return Err(ComplexityError::InvalidShape(format!(
                "matrix must have at least one timepoint and one channel, got {timepoints}x{channels}"
            )));
        }
        if data.len() != timepoints * channels {
            return Err(ComplexityError::InvalidShape(format!(
                "expected {} samples for a {timepoints}x{channels} matrix, got {}",
                timepoints * channels,
                data.len()
            )));
        }
        Ok(Self {
            data,
            timepoints,
            channels,
        })
    }

    /// Number of timepoints (rows).
    #[must_use]
    pub fn timepoints(&self) -> usize {
        self.timepoints
    }

    /// Number of channels (columns).
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample at (timepoint, channel).
    #[inline]
    #[must_use]
    pub fn get(&self, t: usize, c: usize) -> f64 {
        self.data[t * self.channels + c]
    }

    /// One channel's samples in temporal order.
    #[must_use]
    pub fn channel(&self, c: usize) -> Vec<f64> {
        (0..self.timepoints).map(|t| self.get(t, c)).collect()
    }

    /// Replace one channel's samples in temporal order. Crate-internal:
    /// callers uphold the one-value-per-timepoint length invariant.
    pub(crate) fn set_channel(&mut self, c: usize, samples: &[f64]) {
        assert_eq!(samples.len(), self.timepoints);
        for (t, &v) in samples.iter().enumerate() {
            self.data[t * self.channels + c] = v;
        }
    }

    /// Mean over every sample in the matrix.
    #[must_use]
    pub fn global_mean(&self) -> f64 {
        let sum: f64 = self.data.iter().sum();
        sum / self.data.len() as f64
    }

    /// Binarize against a cutoff: a symbol is set iff its sample is
    /// strictly greater than `threshold`. Returned in the requested
    /// flattening order.
    #[must_use]
    pub fn binarize_flat(&self, threshold: f64, orientation: Orientation) -> Vec<bool> {
        match orientation {
            Orientation::Temporal => self.data.iter().map(|&v| v > threshold).collect(),
            Orientation::Spatial => {
                let mut out = Vec::with_capacity(self.data.len());
                for c in 0..self.channels {
                    for t in 0..self.timepoints {
                        out.push(self.get(t, c) > threshold);
                    }
                }
                out
            }
        }
    }

    /// Raw samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> TimeSeriesMatrix {
        // 3 timepoints x 2 channels:
        //   t0: 1 2
        //   t1: 3 4
        //   t2: 5 6
        TimeSeriesMatrix::from_rows(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap()
    }

    #[test]
    fn test_shape_validation() {
        assert!(TimeSeriesMatrix::from_rows(vec![], 0, 4).is_err());
        assert!(TimeSeriesMatrix::from_rows(vec![1.0; 6], 4, 2).is_err());
        assert!(TimeSeriesMatrix::from_rows(vec![1.0; 8], 4, 2).is_ok());
    }

    #[test]
    fn test_indexing_and_channels() {
        let m = sample_matrix();
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(2, 0), 5.0);
        assert_eq!(m.channel(0), vec![1.0, 3.0, 5.0]);
        assert_eq!(m.channel(1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_global_mean() {
        assert!((sample_matrix().global_mean() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_binarize_strictness() {
        let m = sample_matrix();
        // 3.0 is not strictly greater than 3.0.
        let flat = m.binarize_flat(3.0, Orientation::Temporal);
        assert_eq!(flat, vec![false, false, false, true, true, true]);
    }

    #[test]
    fn test_flatten_orientations_differ() {
        let m = sample_matrix();
        let temporal = m.binarize_flat(2.5, Orientation::Temporal);
        let spatial = m.binarize_flat(2.5, Orientation::Spatial);
        // t-major: (1,2),(3,4),(5,6) -> FFTTTT; c-major: (1,3,5),(2,4,6) -> FTTFTT
        assert_eq!(temporal, vec![false, false, true, true, true, true]);
        assert_eq!(spatial, vec![false, true, true, false, true, true]);
        assert_ne!(temporal, spatial);
    }

    #[test]
    fn test_set_channel_round_trip() {
        let mut m = sample_matrix();
        m.set_channel(1, &[9.0, 8.0, 7.0]);
        assert_eq!(m.channel(1), vec![9.0, 8.0, 7.0]);
        assert_eq!(m.channel(0), vec![1.0, 3.0, 5.0]);
    }
}
