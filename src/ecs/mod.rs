//! ECS access and the service → task definition resolution shared by both lambdas.
//!
//! The [`EcsApi`] trait is the seam between the handlers and the ECS API:
//! - [`client::AwsEcs`] talks to ECS through `aws-sdk-ecs`
//! - tests substitute an in-memory implementation

pub mod client;

use async_trait::async_trait;
use tracing::info;

use crate::core::models::{
    ContainerDescriptor, RunTaskOutcome, RunTaskRequest, ServiceDescriptor,
    TaskDefinitionDescriptor,
};
use crate::errors::EcsLambdaError;

pub use client::AwsEcs;

#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Describes `service` in `cluster`. An unknown service yields an empty list.
    async fn describe_services(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<ServiceDescriptor>, EcsLambdaError>;

    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<TaskDefinitionDescriptor, EcsLambdaError>;

    async fn run_task(&self, request: RunTaskRequest) -> Result<RunTaskOutcome, EcsLambdaError>;
}

/// Picks the single service out of a describe-services result.
///
/// Returns `Ok(None)` when nothing matched; callers decide whether that is fatal.
///
/// # Errors
///
/// Returns `ServiceLookup` when more than one service matched.
pub fn single_service(
    mut services: Vec<ServiceDescriptor>,
    cluster: &str,
    service: &str,
) -> Result<Option<ServiceDescriptor>, EcsLambdaError> {
    match services.len() {
        0 => Ok(None),
        1 => Ok(services.pop()),
        n => Err(EcsLambdaError::ServiceLookup(format!(
            "{n} services with name {service} found in cluster {cluster}"
        ))),
    }
}

/// # Errors
///
/// Returns `ServiceLookup` when the service does not reference a task definition.
pub fn task_definition_of(service: &ServiceDescriptor) -> Result<&str, EcsLambdaError> {
    service.task_definition.as_deref().ok_or_else(|| {
        EcsLambdaError::ServiceLookup(format!(
            "service {} has no task definition",
            service.service_name
        ))
    })
}

/// # Errors
///
/// Returns `UnsupportedConfiguration` unless the task definition has exactly one container.
pub fn single_container(
    task_definition: &TaskDefinitionDescriptor,
) -> Result<&ContainerDescriptor, EcsLambdaError> {
    match task_definition.container_definitions.as_slice() {
        [container] => Ok(container),
        containers => Err(EcsLambdaError::UnsupportedConfiguration(format!(
            "only a single container is supported per task definition, found {}",
            containers.len()
        ))),
    }
}

/// Resolves a service to its current task definition.
///
/// Returns `Ok(None)` if the service does not exist, before any task definition lookup.
///
/// # Errors
///
/// Propagates lookup failures and rejects multi-container task definitions.
pub async fn resolve_task_definition(
    ecs: &dyn EcsApi,
    cluster: &str,
    service: &str,
) -> Result<Option<(String, TaskDefinitionDescriptor)>, EcsLambdaError> {
    let services = ecs.describe_services(cluster, service).await?;
    let Some(found) = single_service(services, cluster, service)? else {
        return Ok(None);
    };

    let task_definition_id = task_definition_of(&found)?.to_string();
    info!(
        cluster = %cluster,
        service = %service,
        task_definition = %task_definition_id,
        "Resolved service task definition"
    );

    let task_definition = ecs.describe_task_definition(&task_definition_id).await?;
    info!(
        task_definition_arn = ?task_definition.task_definition_arn,
        family = ?task_definition.family,
        revision = task_definition.revision,
        containers = task_definition.container_definitions.len(),
        "Described task definition"
    );
    single_container(&task_definition)?;

    Ok(Some((task_definition_id, task_definition)))
}
