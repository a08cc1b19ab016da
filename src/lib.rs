//! ECS task lambdas - two small Lambda functions over the ECS API.
//!
//! 1. A runner Lambda that starts runs of a service's current task definition
//! 2. A lookup Lambda that describes the single container of a service's
//!    current task definition as a flat map of strings
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - aws-sdk-ecs for DescribeServices, DescribeTaskDefinition and RunTask
//! - Tokio for async runtime
//!
//! Both lambdas resolve service → task definition through [`ecs::EcsApi`],
//! which tests replace with an in-memory implementation.
//!
//! # Example
//!
//! ```no_run
//! use ecs_task_lambdas::core::{config::AppConfig, models::LookupEvent};
//! use ecs_task_lambdas::ecs::AwsEcs;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     ecs_task_lambdas::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let ecs = AwsEcs::from_config(&config).await;
//!
//!     let event = LookupEvent {
//!         ecs_cluster: "production".into(),
//!         ecs_service: "web".into(),
//!         ecs_task_container_name: "web".into(),
//!     };
//!     let summary = ecs_task_lambdas::lookup::lookup_container(&ecs, &event).await?;
//!     println!("Running image: {}", summary.image);
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod core;
pub mod ecs;
pub mod errors;
pub mod lookup;
pub mod runner;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to `CloudWatch` Logs. The level comes from `RUST_LOG` and
/// defaults to `info`. Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```
/// ecs_task_lambdas::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
