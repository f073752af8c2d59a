//! Pipeline configuration and measure selection.
//!
//! A measure is the combination of an algorithm family (LZ76 or LZ78) and a
//! flattening orientation (temporal or spatial). [`Measure::from_str`]
//! accepts the four combined selector names (`"LZ76temporal"`,
//! `"LZ78spatial"`, ...); anything else is a configuration error that fails
//! before any session is processed.

use std::fmt;
use std::str::FromStr;

use crate::complexity::Lz76Variant;
use crate::error::ComplexityError;
use crate::signal::Orientation;

/// Default worker pool size.
pub const DEFAULT_WORKER_COUNT: usize = 8;

/// Complexity algorithm family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Family {
    /// LZ76 history decomposition (exhaustive or primitive).
    #[default]
    Lz76,
    /// LZ78 dictionary counting.
    Lz78,
}

impl Family {
    /// Display name for the family.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lz76 => "LZ76",
            Self::Lz78 => "LZ78",
        }
    }

    /// All available families.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Lz76, Self::Lz78]
    }
}

/// A fully-selected measure: family plus flattening orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Measure {
    pub family: Family,
    pub orientation: Orientation,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family.name(), self.orientation.name())
    }
}

impl FromStr for Measure {
    type Err = ComplexityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let measure = match s {
            "LZ76temporal" => Self {
                family: Family::Lz76,
                orientation: Orientation::Temporal,
            },
            "LZ76spatial" => Self {
                family: Family::Lz76,
                orientation: Orientation::Spatial,
            },
            "LZ78temporal" => Self {
                family: Family::Lz78,
                orientation: Orientation::Temporal,
            },
            "LZ78spatial" => Self {
                family: Family::Lz78,
                orientation: Orientation::Spatial,
            },
            other => return Err(ComplexityError::InvalidVariant(other.to_string())),
        };
        Ok(measure)
    }
}

/// Configuration for a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Algorithm family applied to the flattened sequences.
    pub family: Family,
    /// Flattening orientation.
    pub orientation: Orientation,
    /// History decomposition flavour; only meaningful for LZ76.
    pub lz76_variant: Lz76Variant,
    /// Length-normalize the LZ76 count; only meaningful for LZ76.
    pub normalize: bool,
    /// Run sessions on a worker pool rather than sequentially.
    pub parallel: bool,
    /// Worker pool size; must be positive.
    pub worker_count: usize,
    /// Base seed for surrogate generation.
    pub seed: u64,
    /// Echo caller metadata into the result table.
    pub keep_metadata: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            family: Family::Lz76,
            orientation: Orientation::Temporal,
            lz76_variant: Lz76Variant::Exhaustive,
            normalize: false,
            parallel: true,
            worker_count: DEFAULT_WORKER_COUNT,
            seed: 0,
            keep_metadata: true,
        }
    }
}

impl PipelineConfig {
    /// Default configuration for a given measure.
    #[must_use]
    pub fn for_measure(measure: Measure) -> Self {
        Self {
            family: measure.family,
            orientation: measure.orientation,
            ..Self::default()
        }
    }

    /// The configured measure.
    #[must_use]
    pub fn measure(&self) -> Measure {
        Measure {
            family: self.family,
            orientation: self.orientation,
        }
    }

    /// Check the configuration before any session runs.
    ///
    /// # Errors
    /// Returns `WorkerPool` if the worker count is zero.
    pub fn validate(&self) -> Result<(), ComplexityError> {
        if self.worker_count == 0 {
            return Err(ComplexityError::WorkerPool(
                "worker_count must be positive".into(),
            ));
        }
        Ok(())
    }
}
