use std::env;
use std::path::PathBuf;

use crate::error::{PipelineError, Result};

pub const ENDPOINT_VAR: &str = "INFERENCE_ENDPOINT";
pub const CONTENT_TYPE_VAR: &str = "INFERENCE_CONTENT_TYPE";
pub const THRESHOLD_VAR: &str = "CONFIDENCE_THRESHOLD";
pub const SCRATCH_DIR_VAR: &str = "SCRATCH_DIR";

pub const DEFAULT_CONTENT_TYPE: &str = "image/png";
pub const DEFAULT_THRESHOLD: f64 = 0.88;
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// Settings for the predict stage, read once per cold start.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub endpoint_name: String,
    pub content_type: String,
}

impl EndpointConfig {
    // Endpoint name is required, content type falls back to image/png
    pub fn from_env() -> Result<Self> {
        Self::from_values(env::var(ENDPOINT_VAR).ok(), env::var(CONTENT_TYPE_VAR).ok())
    }

    pub fn from_values(endpoint: Option<String>, content_type: Option<String>) -> Result<Self> {
        let endpoint_name = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or(PipelineError::MissingConfig(ENDPOINT_VAR))?;
        let content_type = content_type
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        Ok(Self {
            endpoint_name,
            content_type,
        })
    }
}

// Threshold from env, falling back to the default when unset
pub fn confidence_threshold() -> Result<f64> {
    parse_threshold(env::var(THRESHOLD_VAR).ok())
}

// Unset means the default; anything outside [0, 1] is rejected
pub fn parse_threshold(raw: Option<String>) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_THRESHOLD);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(PipelineError::InvalidConfig {
            name: THRESHOLD_VAR,
            value: raw,
        }),
    }
}

// Scratch directory from env, /tmp when unset or empty
pub fn scratch_dir() -> PathBuf {
    env::var(SCRATCH_DIR_VAR)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRATCH_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_defaults_when_unset() {
        assert_eq!(parse_threshold(None).unwrap(), 0.88);
    }

    #[test]
    fn threshold_accepts_override() {
        assert_eq!(parse_threshold(Some(" 0.75 ".into())).unwrap(), 0.75);
    }

    #[test]
    fn threshold_rejects_garbage_and_out_of_range() {
        for raw in ["high", "1.5", "-0.1", "NaN"] {
            let err = parse_threshold(Some(raw.into())).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidConfig { name: THRESHOLD_VAR, .. }));
        }
    }

    #[test]
    fn endpoint_is_required() {
        let err = EndpointConfig::from_values(None, None).unwrap_err();
        assert!(matches!(err, PipelineError::MissingConfig(ENDPOINT_VAR)));

        let err = EndpointConfig::from_values(Some("  ".into()), None).unwrap_err();
        assert!(matches!(err, PipelineError::MissingConfig(ENDPOINT_VAR)));
    }

    #[test]
    fn content_type_defaults_to_png() {
        let cfg = EndpointConfig::from_values(Some("image-classification-1".into()), None).unwrap();
        assert_eq!(cfg.endpoint_name, "image-classification-1");
        assert_eq!(cfg.content_type, "image/png");
    }
}
