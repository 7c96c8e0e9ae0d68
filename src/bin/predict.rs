use aws_config::BehaviorVersion;
use inference_pipeline_lambda::config::EndpointConfig;
use inference_pipeline_lambda::handler::predict::function_handler;
use inference_pipeline_lambda::inference::SageMakerEndpoint;
use inference_pipeline_lambda::StageResponse;
use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Endpoint name comes from the deployment, not the event
    let endpoint_config = EndpointConfig::from_env()?;
    tracing::info!(endpoint = %endpoint_config.endpoint_name, "predict stage starting");

    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let endpoint = SageMakerEndpoint::new(
        aws_sdk_sagemakerruntime::Client::new(&shared_config),
        endpoint_config,
    );

    let endpoint = &endpoint;
    run(service_fn(move |event: LambdaEvent<StageResponse>| async move {
        function_handler(endpoint, event.payload).await
    }))
    .await
}
