use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::models::{ContainerDescriptor, EnvironmentVariable};
use crate::errors::EcsLambdaError;

/// Image reported when the service has not been created yet.
pub const SERVICE_MISSING_IMAGE: &str = "<ECS_SERVICE_DOES_NOT_EXIST_YET>";

/// Flat, all-string description of a service's container.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub image: String,
    pub memory_reservation: String,
    pub cpu: String,
    pub memory: String,
    pub environment: String,
    pub task_revision: String,
}

impl ContainerSummary {
    /// Result for a service that does not exist.
    #[must_use]
    pub fn service_missing() -> Self {
        Self {
            image: SERVICE_MISSING_IMAGE.to_string(),
            memory_reservation: String::new(),
            cpu: String::new(),
            memory: String::new(),
            environment: String::new(),
            task_revision: String::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the environment cannot be serialized.
    pub fn from_container(
        container: &ContainerDescriptor,
        revision: i32,
    ) -> Result<Self, EcsLambdaError> {
        let environment = serde_json::to_string(&normalize_environment(&container.environment))
            .map_err(|e| {
                EcsLambdaError::UnsupportedConfiguration(format!("environment serialize: {e}"))
            })?;

        Ok(Self {
            image: container.image.clone().unwrap_or_default(),
            memory_reservation: optional_number(container.memory_reservation),
            cpu: container.cpu.to_string(),
            memory: optional_number(container.memory),
            environment,
            task_revision: revision.to_string(),
        })
    }

    /// Copy safe to log: environment values are replaced unless `debug-logs` is on.
    #[must_use]
    pub fn for_logging(&self) -> Self {
        #[cfg(feature = "debug-logs")]
        {
            self.clone()
        }
        #[cfg(not(feature = "debug-logs"))]
        {
            let masked = serde_json::from_str::<BTreeMap<String, String>>(&self.environment)
                .map(|env| {
                    let keys: BTreeMap<String, &str> =
                        env.into_keys().map(|k| (k, "***")).collect();
                    serde_json::to_string(&keys).unwrap_or_default()
                })
                .unwrap_or_else(|_| self.environment.clone());
            Self {
                environment: masked,
                ..self.clone()
            }
        }
    }
}

fn optional_number(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Collects environment pairs into a sorted map.
///
/// The value `"true"` is written as `"1"`, the way HCL reads booleans.
/// Later duplicates win.
#[must_use]
pub fn normalize_environment(environment: &[EnvironmentVariable]) -> BTreeMap<String, String> {
    environment
        .iter()
        .map(|var| {
            let name = var.name.clone().unwrap_or_default();
            let value = match var.value.as_deref() {
                Some("true") => "1".to_string(),
                other => other.unwrap_or_default().to_string(),
            };
            (name, value)
        })
        .collect()
}
