use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::core::models::{RunTaskEvent, RunTaskOutcome, RunTaskRequest, TaskOverrides};
use crate::ecs::{self, EcsApi};
use crate::errors::EcsLambdaError;

pub use self::function_handler as handler;

pub const DEFAULT_COUNT: i32 = 1;

/// Lambda handler for the task runner entrypoint.
///
/// # Errors
///
/// Fails the invocation on any lookup, validation or RunTask error.
#[tracing::instrument(
    level = "info",
    skip(ecs, event),
    fields(request_id = %event.context.request_id)
)]
pub async fn function_handler(
    ecs: &dyn EcsApi,
    event: LambdaEvent<RunTaskEvent>,
) -> Result<RunTaskOutcome, Error> {
    info!(
        cluster = %event.payload.ecs_cluster,
        service = %event.payload.ecs_service,
        count = ?event.payload.count,
        started_by = ?event.payload.started_by,
        has_overrides = event.payload.overrides.is_some(),
        "Task runner received event"
    );

    run_service_task(ecs, &event.payload).await.map_err(|e| {
        error!(kind = e.kind(), "Task runner failed: {}", e);
        Error::from(e)
    })
}

/// Starts `count` runs of the service's current task definition.
///
/// # Errors
///
/// `ServiceLookup` if the service is missing or ambiguous, `UnsupportedConfiguration`
/// for multi-container task definitions, `InvalidOverrides` for unreadable overrides,
/// and lookup or RunTask failures from ECS.
pub async fn run_service_task(
    ecs: &dyn EcsApi,
    event: &RunTaskEvent,
) -> Result<RunTaskOutcome, EcsLambdaError> {
    let Some((task_definition, _)) =
        ecs::resolve_task_definition(ecs, &event.ecs_cluster, &event.ecs_service).await?
    else {
        return Err(EcsLambdaError::ServiceLookup(format!(
            "could not find service {} in cluster {}",
            event.ecs_service, event.ecs_cluster
        )));
    };

    let request = RunTaskRequest {
        task_definition,
        cluster: event.ecs_cluster.clone(),
        count: effective_count(event.count),
        started_by: event.started_by.clone(),
        overrides: parse_overrides(event.overrides.as_ref())?,
    };
    info!(
        task_definition = %request.task_definition,
        cluster = %request.cluster,
        count = request.count,
        started_by = ?request.started_by,
        overrides = ?request.overrides.as_ref().map(TaskOverrides::for_logging),
        "Running ECS task"
    );

    match ecs.run_task(request).await {
        Ok(outcome) => {
            info!(
                tasks = outcome.tasks.len(),
                failures = outcome.failures.len(),
                "RunTask succeeded: {:?}",
                outcome
            );
            Ok(outcome)
        }
        Err(e) => {
            error!("RunTask failed: {}", e);
            Err(e)
        }
    }
}

/// A missing or zero count runs a single task.
#[must_use]
pub fn effective_count(count: Option<i32>) -> i32 {
    count.filter(|&c| c != 0).unwrap_or(DEFAULT_COUNT)
}

/// Reads the caller's overrides without validating their values.
///
/// # Errors
///
/// Returns `InvalidOverrides` if the value does not have the ECS `TaskOverride` shape
/// or carries keys RunTask does not accept.
pub fn parse_overrides(overrides: Option<&Value>) -> Result<Option<TaskOverrides>, EcsLambdaError> {
    match overrides {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(TaskOverrides::deserialize(value)?)),
    }
}
