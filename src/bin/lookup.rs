use ecs_task_lambdas::core::config::AppConfig;
use ecs_task_lambdas::ecs::AwsEcs;
use ecs_task_lambdas::lookup::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    ecs_task_lambdas::setup_logging();

    let config = AppConfig::from_env()?;
    let ecs = AwsEcs::from_config(&config).await;
    let ecs = &ecs;

    run(service_fn(move |event: LambdaEvent<_>| async move {
        handler(ecs, event).await
    }))
    .await
}
