use lambda_runtime::Diagnostic;
use thiserror::Error;

/// Why the threshold gate refused an envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateRejection {
    #[error("could not parse inference scores: {0}")]
    ParseError(String),
    #[error("THRESHOLD_CONFIDENCE_NOT_MET: max score {max} is below {threshold}")]
    ThresholdNotMet { max: f64, threshold: f64 },
}

/// Every way a stage invocation can fail.
///
/// Each variant maps to a stable `errorType` in the Lambda error response so
/// the workflow can catch threshold rejections separately from
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("object s3://{bucket}/{key} does not exist")]
    ObjectNotFound { bucket: String, key: String },
    #[error("failed to fetch s3://{bucket}/{key}: {message}")]
    Storage {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("scratch buffer I/O failed: {0}")]
    Scratch(#[from] std::io::Error),
    #[error("image_data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("endpoint {endpoint} invocation failed: {message}")]
    Inference { endpoint: String, message: String },
    #[error(transparent)]
    Rejected(#[from] GateRejection),
    #[error("environment variable {0} is not set")]
    MissingConfig(&'static str),
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidConfig { name: &'static str, value: String },
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

impl PipelineError {
    // Name reported as errorType to the invoking orchestrator
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MissingField",
            Self::ObjectNotFound { .. } => "ObjectNotFound",
            Self::Storage { .. } => "StorageError",
            Self::Scratch(_) => "ScratchIoError",
            Self::Decode(_) => "DecodeError",
            Self::Inference { .. } => "InferenceError",
            Self::Rejected(GateRejection::ParseError(_)) => "ParseError",
            Self::Rejected(GateRejection::ThresholdNotMet { .. }) => "ThresholdError",
            Self::MissingConfig(_) | Self::InvalidConfig { .. } => "ConfigError",
        }
    }
}

impl From<PipelineError> for Diagnostic {
    fn from(err: PipelineError) -> Self {
        Diagnostic {
            error_type: err.error_type().to_string(),
            error_message: err.to_string(),
        }
    }
}
