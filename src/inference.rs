use async_trait::async_trait;
use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::primitives::Blob;
use tracing::instrument;

use crate::config::EndpointConfig;
use crate::error::{PipelineError, Result};

/// A hosted model that turns request bytes into a text response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    /// Send `payload` as-is and return the response body as UTF-8 text.
    async fn predict(&self, payload: Vec<u8>) -> Result<String>;
}

/// SageMaker real-time endpoint, bound to one endpoint name per deployment.
pub struct SageMakerEndpoint {
    client: aws_sdk_sagemakerruntime::Client,
    config: EndpointConfig,
}

impl SageMakerEndpoint {
    pub fn new(client: aws_sdk_sagemakerruntime::Client, config: EndpointConfig) -> Self {
        Self { client, config }
    }

    fn failure(&self, message: String) -> PipelineError {
        PipelineError::Inference {
            endpoint: self.config.endpoint_name.clone(),
            message,
        }
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    #[instrument(skip(self, payload), fields(endpoint = %self.config.endpoint_name, size = payload.len()))]
    async fn predict(&self, payload: Vec<u8>) -> Result<String> {
        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.config.endpoint_name)
            .content_type(&self.config.content_type)
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(|err| self.failure(DisplayErrorContext(&err).to_string()))?;

        let body = output
            .body
            .map(Blob::into_inner)
            .ok_or_else(|| self.failure("empty response body".to_string()))?;

        String::from_utf8(body).map_err(|err| self.failure(format!("response is not UTF-8: {err}")))
    }
}
