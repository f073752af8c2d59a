//! Session inputs, per-session state, and the batch result table.

use std::collections::BTreeMap;

use crate::error::ComplexityError;
use crate::signal::TimeSeriesMatrix;

/// Caller-supplied metadata, passed through the pipeline uninterpreted.
pub type SessionMetadata = BTreeMap<String, String>;

/// Where a session's data comes from.
///
/// The loading collaborator is expected to resolve references into
/// `Matrix` before the pipeline runs; the core processes only that case
/// and records the others as per-session failures.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSource {
    /// A ready timepoints-by-channels numeric matrix.
    Matrix(TimeSeriesMatrix),
    /// An unresolved file reference.
    PathReference(String),
    /// No data supplied.
    Empty,
}

/// One session handed to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInput {
    pub source: SessionSource,
    pub metadata: SessionMetadata,
}

impl SessionInput {
    /// Session backed by a resolved matrix, without metadata.
    #[must_use]
    pub fn from_matrix(matrix: TimeSeriesMatrix) -> Self {
        Self {
            source: SessionSource::Matrix(matrix),
            metadata: SessionMetadata::new(),
        }
    }

    /// Attach caller metadata (subject/condition/session identifiers and
    /// the like - opaque to the core).
    #[must_use]
    pub fn with_metadata(mut self, metadata: SessionMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Stages a session passes through. Every record carries the last stage
/// its session reached: `Recorded` for a completed session, the stage the
/// failure struck in otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionStage {
    #[default]
    Pending,
    EnvelopeExtracted,
    Binarized,
    Flattened,
    RealComplexityComputed,
    SurrogateComplexityComputed,
    RatioComputed,
    Recorded,
}

impl SessionStage {
    /// Display name for the stage.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::EnvelopeExtracted => "envelope-extracted",
            Self::Binarized => "binarized",
            Self::Flattened => "flattened",
            Self::RealComplexityComputed => "real-complexity-computed",
            Self::SurrogateComplexityComputed => "surrogate-complexity-computed",
            Self::RatioComputed => "ratio-computed",
            Self::Recorded => "recorded",
        }
    }
}

/// Final status of one session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// The session produced an entropy ratio.
    Completed,
    /// The session failed with a session-local error.
    Failed { reason: ComplexityError },
}

impl SessionStatus {
    /// Whether the session completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// Position of the session in the input batch.
    pub index: usize,
    /// The entropy ratio, or `None` when the session failed.
    pub entropy: Option<f64>,
    /// Last stage the session reached.
    pub stage: SessionStage,
    /// Success or failure with diagnostics.
    pub status: SessionStatus,
    /// Echoed caller metadata (empty when `keep_metadata` is off).
    pub metadata: SessionMetadata,
}

/// Ordered collection of session records, one per input session.
///
/// Rows keep the input order; a failed session keeps its row with an empty
/// entropy slot rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<SessionRecord>,
}

impl ResultTable {
    /// Wrap a completed batch of records.
    #[must_use]
    pub fn new(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    /// All records in input order.
    #[must_use]
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entropy column, one slot per session in input order.
    #[must_use]
    pub fn entropies(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.entropy).collect()
    }

    /// Number of sessions that completed.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status.is_completed())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, entropy: Option<f64>) -> SessionRecord {
        let (stage, status) = match entropy {
            Some(_) => (SessionStage::Recorded, SessionStatus::Completed),
            None => (
                SessionStage::Pending,
                SessionStatus::Failed {
                    reason: ComplexityError::InvalidShape("test".into()),
                },
            ),
        };
        SessionRecord {
            index,
            entropy,
            stage,
            status,
            metadata: SessionMetadata::new(),
        }
    }

    #[test]
    fn test_table_preserves_order_and_failures() {
        let table = ResultTable::new(vec![
            record(0, Some(1.0)),
            record(1, None),
            record(2, Some(0.8)),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.entropies(), vec![Some(1.0), None, Some(0.8)]);
        assert_eq!(table.completed_count(), 2);
        assert!(!table.records()[1].status.is_completed());
        assert_eq!(table.records()[0].stage, SessionStage::Recorded);
        assert_eq!(table.records()[1].stage, SessionStage::Pending);
    }

    #[test]
    fn test_session_input_metadata() {
        let matrix = TimeSeriesMatrix::from_rows(vec![0.0, 1.0, 2.0, 3.0], 2, 2).unwrap();
        let mut metadata = SessionMetadata::new();
        metadata.insert("subject".into(), "sub-01".into());

        let input = SessionInput::from_matrix(matrix).with_metadata(metadata.clone());
        assert_eq!(input.metadata, metadata);
        assert!(matches!(input.source, SessionSource::Matrix(_)));
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(SessionStage::Pending.name(), "pending");
        assert_eq!(SessionStage::RatioComputed.name(), "ratio-computed");
        assert_eq!(SessionStage::Recorded.name(), "recorded");
    }
}
