//! Batch orchestration: from numeric matrices to an entropy result table.
//!
//! Each session walks a fixed stage sequence: envelope extraction,
//! global-mean binarization, surrogate generation, flattening, complexity
//! measurement on the real and surrogate sequences, and the final ratio.
//! Session-local data errors are recorded in the table and the batch
//! continues; contract violations abort the whole run before or during
//! processing (see `error`).
//!
//! Sessions are independent, so the batch is embarrassingly parallel: a
//! dedicated rayon pool of `worker_count` threads owns one session per
//! task, and results are collected back in input order. Surrogate seeds
//! are derived per session and per channel, so parallel and sequential
//! runs are bit-for-bit identical.

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::complexity::{lz76_complexity, lz78_complexity, BinarySequence};
use crate::error::ComplexityError;
use crate::pipeline::config::{Family, PipelineConfig};
use crate::pipeline::session::{
    ResultTable, SessionInput, SessionRecord, SessionSource, SessionStage, SessionStatus,
};
use crate::signal::{analytic_envelope, shuffle_surrogate};

/// The time-series complexity pipeline.
pub struct ComplexityPipeline {
    config: PipelineConfig,
}

impl ComplexityPipeline {
    /// Build a pipeline, validating the configuration up front.
    ///
    /// # Errors
    /// Returns a configuration error (fail-fast, before any session runs).
    pub fn new(config: PipelineConfig) -> Result<Self, ComplexityError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a batch of sessions into a result table.
    ///
    /// One record per input session, in input order. Session-local failures
    /// occupy their row with an empty entropy slot.
    ///
    /// # Errors
    /// Returns batch-fatal errors only: worker pool construction failure,
    /// or a violated caller contract (`InvalidInputKind`,
    /// `EigenvalueSearchExhausted`) surfaced by any session.
    pub fn run(&self, sessions: &[SessionInput]) -> Result<ResultTable, ComplexityError> {
        info!("Beginning entropy calculations");
        info!("Running {}", self.config.measure());

        let total = sessions.len();
        let records: Result<Vec<SessionRecord>, ComplexityError> = if self.config.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.worker_count)
                .build()
                .map_err(|e| ComplexityError::WorkerPool(e.to_string()))?;
            pool.install(|| {
                sessions
                    .par_iter()
                    .enumerate()
                    .map(|(index, session)| self.process_session(index, total, session))
                    .collect()
            })
        } else {
            sessions
                .iter()
                .enumerate()
                .map(|(index, session)| self.process_session(index, total, session))
                .collect()
        };

        Ok(ResultTable::new(records?))
    }

    /// Run one session end-to-end, converting session-local errors into a
    /// failed record and passing batch-fatal errors through.
    fn process_session(
        &self,
        index: usize,
        total: usize,
        session: &SessionInput,
    ) -> Result<SessionRecord, ComplexityError> {
        let metadata = if self.config.keep_metadata {
            session.metadata.clone()
        } else {
            Default::default()
        };

        let mut stage = SessionStage::Pending;
        match self.analyze_session(index, session, &mut stage) {
            Ok(ratio) => {
                debug!("Done with session {} of {total}", index + 1);
                Ok(SessionRecord {
                    index,
                    entropy: Some(ratio),
                    stage: SessionStage::Recorded,
                    status: SessionStatus::Completed,
                    metadata,
                })
            }
            Err(reason) if reason.is_session_local() => {
                warn!(
                    "Session {} of {total} failed at stage '{}': {reason}",
                    index + 1,
                    stage.name()
                );
                Ok(SessionRecord {
                    index,
                    entropy: None,
                    stage,
                    status: SessionStatus::Failed { reason },
                    metadata,
                })
            }
            Err(fatal) => Err(fatal),
        }
    }

    /// The per-session state machine. Advances `stage` as each step
    /// completes so failures carry the stage they died in.
    fn analyze_session(
        &self,
        index: usize,
        session: &SessionInput,
        stage: &mut SessionStage,
    ) -> Result<f64, ComplexityError> {
        let matrix = match &session.source {
            SessionSource::Matrix(m) => m,
            SessionSource::PathReference(path) => {
                return Err(ComplexityError::InvalidShape(format!(
                    "unresolved path reference '{path}'"
                )))
            }
            SessionSource::Empty => {
                return Err(ComplexityError::InvalidShape("empty session source".into()))
            }
        };

        let envelope = analytic_envelope(matrix);
        *stage = SessionStage::EnvelopeExtracted;

        // One global mean over the real envelope; the surrogate is
        // thresholded with this same cutoff, never its own mean.
        let threshold = envelope.global_mean();
        let surrogate = shuffle_surrogate(&envelope, self.config.seed, index);
        *stage = SessionStage::Binarized;

        let real_bits = envelope.binarize_flat(threshold, self.config.orientation);
        let surrogate_bits = surrogate.binarize_flat(threshold, self.config.orientation);
        *stage = SessionStage::Flattened;

        let real = self.flat_complexity(&real_bits)?;
        *stage = SessionStage::RealComplexityComputed;

        let null = self.flat_complexity(&surrogate_bits)?;
        *stage = SessionStage::SurrogateComplexityComputed;

        if null == 0.0 {
            return Err(ComplexityError::DegenerateSurrogate);
        }
        let ratio = real / null;
        *stage = SessionStage::RatioComputed;

        Ok(ratio)
    }

    /// Complexity of one flattened binary sequence under the configured
    /// family.
    fn flat_complexity(&self, bits: &[bool]) -> Result<f64, ComplexityError> {
        let sequence = BinarySequence::from_bools(bits)?;
        match self.config.family {
            Family::Lz76 => {
                let result =
                    lz76_complexity(&sequence, self.config.lz76_variant, self.config.normalize)?;
                Ok(result.count)
            }
            Family::Lz78 => Ok(lz78_complexity(sequence.encoded())? as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::lz78_complexity;
    use crate::pipeline::config::Measure;
    use crate::pipeline::session::SessionMetadata;
    use crate::signal::{Orientation, TimeSeriesMatrix};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    const TIMEPOINTS: usize = 100;
    const CHANNELS: usize = 17;

    /// Unstructured noise matrix, seeded for repeatability.
    fn noise_matrix(seed: u64) -> TimeSeriesMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let data: Vec<f64> = (0..TIMEPOINTS * CHANNELS)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        TimeSeriesMatrix::from_rows(data, TIMEPOINTS, CHANNELS).unwrap()
    }

    /// Amplitude-modulated carrier, identical across channels: strong
    /// temporal structure in the envelope.
    fn structured_matrix() -> TimeSeriesMatrix {
        let mut data = Vec::with_capacity(TIMEPOINTS * CHANNELS);
        for t in 0..TIMEPOINTS {
            let phase = t as f64 / TIMEPOINTS as f64;
            let modulation = 1.0 + 0.8 * (2.0 * PI * 3.0 * phase).sin();
            let sample = modulation * (2.0 * PI * 20.0 * phase).cos();
            for _ in 0..CHANNELS {
                data.push(sample);
            }
        }
        TimeSeriesMatrix::from_rows(data, TIMEPOINTS, CHANNELS).unwrap()
    }

    fn run_single(config: PipelineConfig, matrix: TimeSeriesMatrix) -> f64 {
        let pipeline = ComplexityPipeline::new(config).unwrap();
        let table = pipeline
            .run(&[SessionInput::from_matrix(matrix)])
            .unwrap();
        table.entropies()[0].expect("session should complete")
    }

    #[test]
    fn test_noise_ratio_near_unity() {
        let config = PipelineConfig {
            family: Family::Lz78,
            orientation: Orientation::Temporal,
            seed: 11,
            ..PipelineConfig::default()
        };
        let ratio = run_single(config, noise_matrix(1));
        assert!(
            (0.75..1.25).contains(&ratio),
            "noise ratio should be near 1.0, got {ratio}"
        );
    }

    #[test]
    fn test_structure_lowers_ratio() {
        let base = PipelineConfig {
            family: Family::Lz78,
            orientation: Orientation::Temporal,
            seed: 11,
            ..PipelineConfig::default()
        };
        let noise_ratio = run_single(base.clone(), noise_matrix(1));
        let structured_ratio = run_single(base, structured_matrix());
        assert!(
            structured_ratio < noise_ratio,
            "structure should lower the ratio: {structured_ratio} vs {noise_ratio}"
        );
        assert!(
            structured_ratio < 0.9,
            "structured ratio should be well below 1.0, got {structured_ratio}"
        );
    }

    #[test]
    fn test_reproducible_across_runs_and_scheduling() {
        for family in [Family::Lz76, Family::Lz78] {
            let parallel = PipelineConfig {
                family,
                seed: 99,
                parallel: true,
                worker_count: 4,
                ..PipelineConfig::default()
            };
            let sequential = PipelineConfig {
                parallel: false,
                ..parallel.clone()
            };

            let sessions: Vec<SessionInput> = (0..6)
                .map(|i| SessionInput::from_matrix(noise_matrix(i)))
                .collect();

            let a = ComplexityPipeline::new(parallel.clone())
                .unwrap()
                .run(&sessions)
                .unwrap();
            let b = ComplexityPipeline::new(parallel)
                .unwrap()
                .run(&sessions)
                .unwrap();
            let c = ComplexityPipeline::new(sequential)
                .unwrap()
                .run(&sessions)
                .unwrap();

            assert_eq!(a.entropies(), b.entropies(), "same-seed runs must match");
            assert_eq!(
                a.entropies(),
                c.entropies(),
                "parallel and sequential runs must match"
            );
        }
    }

    #[test]
    fn test_orientation_sensitivity() {
        // Binarized 4x4 matrix with constant rows: temporal flattening
        // produces long runs, spatial flattening strict alternation.
        let mut data = Vec::with_capacity(16);
        for t in 0..4 {
            let row = if t % 2 == 1 { 1.0 } else { 0.0 };
            for _ in 0..4 {
                data.push(row);
            }
        }
        let matrix = TimeSeriesMatrix::from_rows(data, 4, 4).unwrap();

        let temporal = matrix.binarize_flat(0.5, Orientation::Temporal);
        let spatial = matrix.binarize_flat(0.5, Orientation::Spatial);
        let temporal_count = lz78_complexity(
            BinarySequence::from_bools(&temporal).unwrap().encoded(),
        )
        .unwrap();
        let spatial_count = lz78_complexity(
            BinarySequence::from_bools(&spatial).unwrap().encoded(),
        )
        .unwrap();
        assert_ne!(
            temporal_count, spatial_count,
            "orientations must yield different complexity for an asymmetric matrix"
        );
    }

    #[test]
    fn test_bad_session_does_not_abort_batch() {
        let config = PipelineConfig {
            family: Family::Lz78,
            ..PipelineConfig::default()
        };
        let sessions = vec![
            SessionInput::from_matrix(noise_matrix(1)),
            SessionInput {
                source: SessionSource::Empty,
                metadata: SessionMetadata::new(),
            },
            SessionInput {
                source: SessionSource::PathReference("sub-01/ses-1.nii".into()),
                metadata: SessionMetadata::new(),
            },
            SessionInput::from_matrix(noise_matrix(2)),
        ];

        let table = ComplexityPipeline::new(config)
            .unwrap()
            .run(&sessions)
            .unwrap();

        assert_eq!(table.len(), 4, "failed sessions keep their rows");
        assert_eq!(table.completed_count(), 2);
        let entropies = table.entropies();
        assert!(entropies[0].is_some());
        assert!(entropies[1].is_none());
        assert!(entropies[2].is_none());
        assert!(entropies[3].is_some());

        for completed in [0, 3] {
            assert_eq!(table.records()[completed].stage, SessionStage::Recorded);
        }
        for failed in [1, 2] {
            assert_eq!(table.records()[failed].stage, SessionStage::Pending);
            match &table.records()[failed].status {
                SessionStatus::Failed { reason } => {
                    assert!(matches!(reason, ComplexityError::InvalidShape(_)));
                }
                SessionStatus::Completed => panic!("session {failed} should have failed"),
            }
        }
    }

    #[test]
    fn test_single_timepoint_session_completes() {
        // A 1-by-C matrix degenerates to its per-sample magnitudes and the
        // one-element channel shuffle is the identity, so real and surrogate
        // sequences coincide and the ratio is exactly 1.
        let config = PipelineConfig {
            family: Family::Lz78,
            orientation: Orientation::Temporal,
            ..PipelineConfig::default()
        };
        let matrix = TimeSeriesMatrix::from_rows(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
        let ratio = run_single(config, matrix);
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metadata_pass_through() {
        let mut metadata = SessionMetadata::new();
        metadata.insert("subject".into(), "sub-07".into());
        metadata.insert("condition".into(), "placebo".into());

        let session = SessionInput::from_matrix(noise_matrix(3)).with_metadata(metadata.clone());

        let keep = ComplexityPipeline::new(PipelineConfig::default())
            .unwrap()
            .run(std::slice::from_ref(&session))
            .unwrap();
        assert_eq!(keep.records()[0].metadata, metadata);

        let drop = ComplexityPipeline::new(PipelineConfig {
            keep_metadata: false,
            ..PipelineConfig::default()
        })
        .unwrap()
        .run(&[session])
        .unwrap();
        assert!(drop.records()[0].metadata.is_empty());
    }

    #[test]
    fn test_config_fail_fast() {
        let config = PipelineConfig {
            worker_count: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            ComplexityPipeline::new(config),
            Err(ComplexityError::WorkerPool(_))
        ));
    }

    #[test]
    fn test_measure_config_matches_request() {
        let measure: Measure = "LZ76spatial".parse().unwrap();
        let pipeline = ComplexityPipeline::new(PipelineConfig::for_measure(measure)).unwrap();
        assert_eq!(pipeline.config().measure(), measure);
    }

    #[test]
    fn test_lz76_families_complete() {
        // The LZ76 path (both variants, normalized and not) must also run
        // end-to-end and produce positive ratios.
        for &variant in crate::complexity::Lz76Variant::all() {
            for normalize in [false, true] {
                let config = PipelineConfig {
                    family: Family::Lz76,
                    lz76_variant: variant,
                    normalize,
                    seed: 5,
                    ..PipelineConfig::default()
                };
                let ratio = run_single(config, noise_matrix(4));
                assert!(ratio > 0.0);
            }
        }
    }
}
