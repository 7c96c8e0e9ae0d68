use inference_pipeline_lambda::config;
use inference_pipeline_lambda::handler::gate::function_handler;
use inference_pipeline_lambda::StageResponse;
use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let threshold = config::confidence_threshold()?;
    tracing::info!(threshold, "threshold gate starting");

    run(service_fn(move |event: LambdaEvent<StageResponse>| async move {
        function_handler(threshold, event.payload)
    }))
    .await
}
