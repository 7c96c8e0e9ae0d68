use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::instrument;

use crate::envelope::{parse_scores, Inferences, StageResponse};
use crate::error::{PipelineError, Result};
use crate::inference::InferenceEndpoint;

// Stage B: decode the image and attach the endpoint's scores to the envelope
#[instrument(skip_all, fields(s3_bucket = %event.body.s3_bucket, s3_key = %event.body.s3_key))]
pub async fn function_handler<E>(endpoint: &E, event: StageResponse) -> Result<StageResponse>
where
    E: InferenceEndpoint + ?Sized,
{
    let mut envelope = event.body;
    if envelope.image_data.is_empty() {
        return Err(PipelineError::MissingField("image_data"));
    }

    let image = STANDARD.decode(envelope.image_data.as_bytes())?;
    let text = endpoint.predict(image).await?;
    tracing::debug!(inferences = %text, "endpoint responded");

    envelope.inferences = Inferences::Scores(parse_scores(&text)?);
    Ok(StageResponse::ok(envelope))
}
