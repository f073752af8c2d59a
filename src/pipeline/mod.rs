//! Session-batch orchestration.
//!
//! The pipeline is the only stateful layer of the crate: it walks each
//! session through envelope extraction, binarization, surrogate generation,
//! flattening and complexity measurement, then records one entropy ratio
//! per session into an ordered result table. Sessions are independent and
//! run on a bounded worker pool.

pub mod config;
pub mod runner;
pub mod session;

// Re-export commonly used items
pub use config::{Family, Measure, PipelineConfig, DEFAULT_WORKER_COUNT};
pub use runner::ComplexityPipeline;
pub use session::{
    ResultTable, SessionInput, SessionRecord, SessionSource, SessionStage, SessionStatus,
};
