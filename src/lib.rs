//! Lambda handlers for a three-step image classification workflow:
//! fetch and encode an S3 object, score it on a SageMaker endpoint, then gate
//! on prediction confidence.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod inference;
pub mod storage;

pub use envelope::{Envelope, Inferences, StageResponse};
pub use error::{GateRejection, PipelineError};
