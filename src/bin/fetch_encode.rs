use aws_config::BehaviorVersion;
use inference_pipeline_lambda::config;
use inference_pipeline_lambda::handler::fetch::{function_handler, FetchRequest};
use inference_pipeline_lambda::storage::S3ObjectStore;
use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Client and scratch location are built once per container
    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&shared_config));
    let scratch_dir = config::scratch_dir();

    let store = &store;
    let scratch_dir = scratch_dir.as_path();
    run(service_fn(move |event: LambdaEvent<FetchRequest>| async move {
        function_handler(store, scratch_dir, event.payload).await
    }))
    .await
}
