use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invocation payload for the task runner lambda.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTaskEvent {
    pub ecs_cluster: String,
    pub ecs_service: String,
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(default)]
    pub started_by: Option<String>,
    // Passed through to RunTask; only its JSON shape is checked.
    #[serde(default)]
    pub overrides: Option<Value>,
}

/// Invocation payload for the task lookup lambda.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupEvent {
    pub ecs_cluster: String,
    pub ecs_service: String,
    pub ecs_task_container_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub service_name: String,
    pub task_definition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionDescriptor {
    pub task_definition_arn: Option<String>,
    pub family: Option<String>,
    pub revision: i32,
    pub container_definitions: Vec<ContainerDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub name: Option<String>,
    pub image: Option<String>,
    pub cpu: i32,
    pub memory: Option<i32>,
    pub memory_reservation: Option<i32>,
    pub environment: Vec<EnvironmentVariable>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariable {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

/// Parameters of a single RunTask call.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTaskRequest {
    pub task_definition: String,
    pub cluster: String,
    pub count: i32,
    pub started_by: Option<String>,
    pub overrides: Option<TaskOverrides>,
}

/// ECS `TaskOverride` in its JSON wire shape.
///
/// Every field RunTask accepts is modelled and any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskOverrides {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_overrides: Vec<ContainerOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inference_accelerator_overrides: Vec<InferenceAcceleratorOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_storage: Option<EphemeralStorageOverride>,
}

impl TaskOverrides {
    /// Copy safe to log: container environment values are replaced unless
    /// `debug-logs` is on.
    #[must_use]
    pub fn for_logging(&self) -> Self {
        #[cfg(feature = "debug-logs")]
        {
            self.clone()
        }
        #[cfg(not(feature = "debug-logs"))]
        {
            let container_overrides = self
                .container_overrides
                .iter()
                .map(|o| ContainerOverrides {
                    environment: o.environment.as_ref().map(|env| {
                        env.iter()
                            .map(|kv| KeyValue {
                                name: kv.name.clone(),
                                value: kv.value.as_ref().map(|_| "***".to_string()),
                            })
                            .collect()
                    }),
                    ..o.clone()
                })
                .collect();
            Self {
                container_overrides,
                ..self.clone()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContainerOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<KeyValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_files: Option<Vec<TypedValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_reservation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_requirements: Option<Vec<TypedValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyValue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// `{ "type": .., "value": .. }` pair, used by environment files and resource requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InferenceAcceleratorOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EphemeralStorageOverride {
    #[serde(rename = "sizeInGiB")]
    pub size_in_gib: i32,
}

/// What RunTask reported back, passed through to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTaskOutcome {
    pub tasks: Vec<LaunchedTask>,
    pub failures: Vec<LaunchFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchedTask {
    pub task_arn: Option<String>,
    pub task_definition_arn: Option<String>,
    pub last_status: Option<String>,
    pub desired_status: Option<String>,
    pub started_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFailure {
    pub arn: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}
