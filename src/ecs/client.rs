use async_trait::async_trait;
use aws_sdk_ecs::Client;
use aws_sdk_ecs::error::{BuildError, DisplayErrorContext};
use aws_sdk_ecs::types::{
    ContainerDefinition, ContainerOverride, EnvironmentFile, EnvironmentFileType,
    EphemeralStorage, Failure, InferenceAcceleratorOverride, KeyValuePair, ResourceRequirement,
    ResourceType, Task, TaskOverride,
};

use super::EcsApi;
use crate::core::config::AppConfig;
use crate::core::models::{
    ContainerDescriptor, ContainerOverrides, EnvironmentVariable, InferenceAcceleratorOverrides,
    KeyValue, LaunchFailure, LaunchedTask, RunTaskOutcome, RunTaskRequest, ServiceDescriptor,
    TaskDefinitionDescriptor, TaskOverrides, TypedValue,
};
use crate::errors::EcsLambdaError;

/// [`EcsApi`] backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsEcs {
    client: Client,
}

impl AwsEcs {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the SDK client from the lambda configuration.
    pub async fn from_config(config: &AppConfig) -> Self {
        let shared = config.load_sdk_config().await;
        let mut builder = aws_sdk_ecs::config::Builder::from(&shared);
        if let Some(url) = &config.ecs_endpoint_url {
            builder = builder.endpoint_url(url);
        }
        Self::new(Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl EcsApi for AwsEcs {
    async fn describe_services(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<ServiceDescriptor>, EcsLambdaError> {
        let resp = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|e| {
                EcsLambdaError::ServiceLookup(format!(
                    "ecs describe_services: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(resp
            .services()
            .iter()
            .map(|s| ServiceDescriptor {
                service_name: s.service_name().unwrap_or(service).to_string(),
                task_definition: s.task_definition().map(str::to_string),
            })
            .collect())
    }

    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<TaskDefinitionDescriptor, EcsLambdaError> {
        let resp = self
            .client
            .describe_task_definition()
            .task_definition(task_definition)
            .send()
            .await
            .map_err(|e| {
                EcsLambdaError::TaskDefinitionLookup(format!(
                    "ecs describe_task_definition: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let Some(td) = resp.task_definition() else {
            return Err(EcsLambdaError::TaskDefinitionLookup(format!(
                "no task definition returned for {task_definition}"
            )));
        };

        Ok(TaskDefinitionDescriptor {
            task_definition_arn: td.task_definition_arn().map(str::to_string),
            family: td.family().map(str::to_string),
            revision: td.revision(),
            container_definitions: td.container_definitions().iter().map(container).collect(),
        })
    }

    async fn run_task(&self, request: RunTaskRequest) -> Result<RunTaskOutcome, EcsLambdaError> {
        let overrides = request.overrides.as_ref().map(to_sdk_override).transpose()?;
        let resp = self
            .client
            .run_task()
            .task_definition(request.task_definition)
            .cluster(request.cluster)
            .count(request.count)
            .set_started_by(request.started_by)
            .set_overrides(overrides)
            .send()
            .await
            .map_err(|e| {
                EcsLambdaError::RunTask(format!("ecs run_task: {}", DisplayErrorContext(&e)))
            })?;

        Ok(RunTaskOutcome {
            tasks: resp.tasks().iter().map(launched_task).collect(),
            failures: resp.failures().iter().map(launch_failure).collect(),
        })
    }
}

fn container(def: &ContainerDefinition) -> ContainerDescriptor {
    ContainerDescriptor {
        name: def.name().map(str::to_string),
        image: def.image().map(str::to_string),
        cpu: def.cpu(),
        memory: def.memory(),
        memory_reservation: def.memory_reservation(),
        environment: def
            .environment()
            .iter()
            .map(|kv| EnvironmentVariable {
                name: kv.name().map(str::to_string),
                value: kv.value().map(str::to_string),
            })
            .collect(),
    }
}

fn launched_task(task: &Task) -> LaunchedTask {
    LaunchedTask {
        task_arn: task.task_arn().map(str::to_string),
        task_definition_arn: task.task_definition_arn().map(str::to_string),
        last_status: task.last_status().map(str::to_string),
        desired_status: task.desired_status().map(str::to_string),
        started_by: task.started_by().map(str::to_string),
    }
}

fn launch_failure(failure: &Failure) -> LaunchFailure {
    LaunchFailure {
        arn: failure.arn().map(str::to_string),
        reason: failure.reason().map(str::to_string),
        detail: failure.detail().map(str::to_string),
    }
}

fn invalid_override(error: BuildError) -> EcsLambdaError {
    EcsLambdaError::InvalidOverrides(error.to_string())
}

fn key_value_pair(kv: &KeyValue) -> KeyValuePair {
    KeyValuePair::builder()
        .set_name(kv.name.clone())
        .set_value(kv.value.clone())
        .build()
}

fn environment_file(file: &TypedValue) -> Result<EnvironmentFile, EcsLambdaError> {
    EnvironmentFile::builder()
        .value(&file.value)
        .r#type(EnvironmentFileType::from(file.kind.as_str()))
        .build()
        .map_err(invalid_override)
}

fn resource_requirement(req: &TypedValue) -> Result<ResourceRequirement, EcsLambdaError> {
    ResourceRequirement::builder()
        .value(&req.value)
        .r#type(ResourceType::from(req.kind.as_str()))
        .build()
        .map_err(invalid_override)
}

fn container_override(o: &ContainerOverrides) -> Result<ContainerOverride, EcsLambdaError> {
    let environment_files = o
        .environment_files
        .as_ref()
        .map(|files| files.iter().map(environment_file).collect::<Result<Vec<_>, _>>())
        .transpose()?;
    let resource_requirements = o
        .resource_requirements
        .as_ref()
        .map(|reqs| reqs.iter().map(resource_requirement).collect::<Result<Vec<_>, _>>())
        .transpose()?;

    Ok(ContainerOverride::builder()
        .set_name(o.name.clone())
        .set_command(o.command.clone())
        .set_environment(
            o.environment
                .as_ref()
                .map(|env| env.iter().map(key_value_pair).collect()),
        )
        .set_environment_files(environment_files)
        .set_cpu(o.cpu)
        .set_memory(o.memory)
        .set_memory_reservation(o.memory_reservation)
        .set_resource_requirements(resource_requirements)
        .build())
}

fn inference_accelerator_override(
    o: &InferenceAcceleratorOverrides,
) -> InferenceAcceleratorOverride {
    InferenceAcceleratorOverride::builder()
        .set_device_name(o.device_name.clone())
        .set_device_type(o.device_type.clone())
        .build()
}

/// Converts the wire-shaped overrides into the SDK type, field for field.
///
/// # Errors
///
/// Returns `InvalidOverrides` if a nested value lacks a field the SDK requires.
pub fn to_sdk_override(overrides: &TaskOverrides) -> Result<TaskOverride, EcsLambdaError> {
    let container_overrides = if overrides.container_overrides.is_empty() {
        None
    } else {
        Some(
            overrides
                .container_overrides
                .iter()
                .map(container_override)
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    let inference_accelerator_overrides = if overrides.inference_accelerator_overrides.is_empty() {
        None
    } else {
        Some(
            overrides
                .inference_accelerator_overrides
                .iter()
                .map(inference_accelerator_override)
                .collect(),
        )
    };
    let ephemeral_storage = overrides
        .ephemeral_storage
        .as_ref()
        .map(|storage| {
            Ok::<_, EcsLambdaError>(
                EphemeralStorage::builder()
                    .size_in_gib(storage.size_in_gib)
                    .build(),
            )
        })
        .transpose()?;

    Ok(TaskOverride::builder()
        .set_container_overrides(container_overrides)
        .set_cpu(overrides.cpu.clone())
        .set_memory(overrides.memory.clone())
        .set_task_role_arn(overrides.task_role_arn.clone())
        .set_execution_role_arn(overrides.execution_role_arn.clone())
        .set_inference_accelerator_overrides(inference_accelerator_overrides)
        .set_ephemeral_storage(ephemeral_storage)
        .build())
}
