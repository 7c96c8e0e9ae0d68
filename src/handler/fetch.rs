use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use tracing::instrument;

use crate::envelope::{Envelope, Inferences, StageResponse};
use crate::error::{PipelineError, Result};
use crate::storage::ObjectStore;

// Never derived from the key, which may exceed NAME_MAX or name a directory
const SCRATCH_FILE_NAME: &str = "image.png";

/// Location of the object to classify. Both fields are optional at the
/// serde level so a missing one is reported as `MissingField` instead of a
/// generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    pub s3_bucket: Option<String>,
    pub s3_key: Option<String>,
}

// Absent and empty both count as missing
fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(PipelineError::MissingField(field))
}

// Same file on every invocation; the previous buffer is overwritten
fn scratch_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(SCRATCH_FILE_NAME)
}

// Stage A: download the object, buffer it on local disk, base64-encode it.
// The scratch file is left behind; the execution environment is disposable.
#[instrument(skip_all, fields(s3_bucket = request.s3_bucket.as_deref(), s3_key = request.s3_key.as_deref()))]
pub async fn function_handler<S>(
    store: &S,
    scratch_dir: &Path,
    request: FetchRequest,
) -> Result<StageResponse>
where
    S: ObjectStore + ?Sized,
{
    let bucket = required(request.s3_bucket, "s3_bucket")?;
    let key = required(request.s3_key, "s3_key")?;

    let object = store.get_object(&bucket, &key).await?;

    let path = scratch_path(scratch_dir);
    tokio::fs::create_dir_all(scratch_dir).await?;
    tokio::fs::write(&path, &object).await?;
    let buffered = tokio::fs::read(&path).await?;

    tracing::info!(size = buffered.len(), scratch = %path.display(), "object encoded");

    Ok(StageResponse::ok(Envelope {
        s3_bucket: bucket,
        s3_key: key,
        image_data: STANDARD.encode(&buffered),
        inferences: Inferences::default(),
    }))
}
