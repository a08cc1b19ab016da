use lambda_runtime::{Error, LambdaEvent};
use tracing::{error, info, warn};

use super::summary::ContainerSummary;
use crate::core::models::LookupEvent;
use crate::ecs::{self, EcsApi};
use crate::errors::EcsLambdaError;

pub use self::function_handler as handler;

/// Lambda handler for the task lookup entrypoint.
///
/// # Errors
///
/// Fails the invocation on ambiguous services, unsupported task definitions,
/// unknown containers and ECS failures. A missing service is not an error.
#[tracing::instrument(
    level = "info",
    skip(ecs, event),
    fields(request_id = %event.context.request_id)
)]
pub async fn function_handler(
    ecs: &dyn EcsApi,
    event: LambdaEvent<LookupEvent>,
) -> Result<ContainerSummary, Error> {
    info!("Task lookup received event: {:?}", event.payload);

    lookup_container(ecs, &event.payload).await.map_err(|e| {
        error!(kind = e.kind(), "Task lookup failed: {}", e);
        Error::from(e)
    })
}

/// Describes the named container of the service's current task definition.
///
/// # Errors
///
/// `ServiceLookup` for more than one matching service, `UnsupportedConfiguration`
/// for multi-container task definitions, `ContainerNotFound` when the name does
/// not match, and ECS lookup failures.
pub async fn lookup_container(
    ecs: &dyn EcsApi,
    event: &LookupEvent,
) -> Result<ContainerSummary, EcsLambdaError> {
    let Some((_, task_definition)) =
        ecs::resolve_task_definition(ecs, &event.ecs_cluster, &event.ecs_service).await?
    else {
        warn!(
            cluster = %event.ecs_cluster,
            service = %event.ecs_service,
            "Could not find service, returning empty map"
        );
        return Ok(ContainerSummary::service_missing());
    };

    let mut matching = task_definition
        .container_definitions
        .iter()
        .filter(|c| c.name.as_deref() == Some(event.ecs_task_container_name.as_str()));
    let container = match (matching.next(), matching.next()) {
        (Some(container), None) => container,
        _ => {
            return Err(EcsLambdaError::ContainerNotFound(
                event.ecs_task_container_name.clone(),
            ));
        }
    };

    let summary = ContainerSummary::from_container(container, task_definition.revision)?;
    info!(
        summary = ?summary.for_logging(),
        "Successfully returning populated map"
    );
    Ok(summary)
}
