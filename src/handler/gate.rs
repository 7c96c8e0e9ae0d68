use tracing::instrument;

use crate::envelope::{Envelope, Inferences, StageResponse};
use crate::error::{GateRejection, Result};

/// Scores of an envelope that cleared the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub max: f64,
    pub scores: Vec<f64>,
}

// Accepts when the highest score is at least the threshold
pub fn evaluate(envelope: &Envelope, threshold: f64) -> Result<Accepted, GateRejection> {
    let scores = envelope.inferences.scores()?;
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max >= threshold {
        Ok(Accepted { max, scores })
    } else {
        Err(GateRejection::ThresholdNotMet { max, threshold })
    }
}

// Stage C: pass the envelope through or fail the workflow
#[instrument(skip_all, fields(s3_bucket = %event.body.s3_bucket, s3_key = %event.body.s3_key, threshold = threshold))]
pub fn function_handler(threshold: f64, event: StageResponse) -> Result<StageResponse> {
    let mut envelope = event.body;

    match evaluate(&envelope, threshold) {
        Ok(accepted) => {
            tracing::info!(max = accepted.max, "THRESHOLD_CONFIDENCE_MET");
            envelope.inferences = Inferences::Scores(accepted.scores);
            Ok(StageResponse::ok(envelope))
        }
        Err(rejection) => {
            tracing::warn!(%rejection, "envelope rejected");
            Err(rejection.into())
        }
    }
}
