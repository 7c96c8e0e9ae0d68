use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::instrument;

use crate::error::{PipelineError, Result};

/// Read side of object storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full contents of `bucket/key`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(|service| service.is_no_such_key())
                {
                    PipelineError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    PipelineError::Storage {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| PipelineError::Storage {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: err.to_string(),
            })?
            .into_bytes();

        tracing::debug!(size = bytes.len(), "object downloaded");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::{InvalidObjectState, NoSuchKey};
    use aws_sdk_s3::Client;
    use aws_smithy_mocks::{mock, mock_client};
    use aws_smithy_runtime_api::http::{Response as HttpResponse, StatusCode};
    use aws_smithy_types::body::SdkBody;

    #[tokio::test]
    async fn collects_object_body() {
        let rule = mock!(Client::get_object)
            .match_requests(|req| req.bucket() == Some("my-bucket") && req.key() == Some("a.png"))
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"\x89PNG"))
                    .build()
            });
        let store = S3ObjectStore::new(mock_client!(aws_sdk_s3, [&rule]));

        let bytes = store.get_object("my-bucket", "a.png").await.unwrap();

        assert_eq!(bytes, b"\x89PNG".to_vec());
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn no_such_key_maps_to_not_found() {
        let rule = mock!(Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let store = S3ObjectStore::new(mock_client!(aws_sdk_s3, [&rule]));

        let err = store.get_object("my-bucket", "gone.png").await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::ObjectNotFound { ref bucket, ref key }
                if bucket == "my-bucket" && key == "gone.png"
        ));
    }

    #[tokio::test]
    async fn other_service_errors_map_to_storage() {
        let rule = mock!(Client::get_object).then_error(|| {
            GetObjectError::InvalidObjectState(InvalidObjectState::builder().build())
        });
        let store = S3ObjectStore::new(mock_client!(aws_sdk_s3, [&rule]));

        let err = store.get_object("my-bucket", "archived.png").await.unwrap_err();

        assert_eq!(err.error_type(), "StorageError");
    }

    #[tokio::test]
    async fn server_error_maps_to_storage() {
        let rule = mock!(Client::get_object).then_http_response(|| {
            HttpResponse::new(StatusCode::try_from(500).unwrap(), SdkBody::empty())
        });
        let store = S3ObjectStore::new(mock_client!(aws_sdk_s3, [&rule]));

        let err = store.get_object("my-bucket", "a.png").await.unwrap_err();

        assert!(matches!(err, PipelineError::Storage { .. }));
    }
}
