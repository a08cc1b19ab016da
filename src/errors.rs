use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcsLambdaError {
    #[error("Failed to resolve ECS service: {0}")]
    ServiceLookup(String),

    #[error("Failed to resolve ECS task definition: {0}")]
    TaskDefinitionLookup(String),

    #[error("Unsupported task definition: {0}")]
    UnsupportedConfiguration(String),

    #[error("Container definition not found: {0}")]
    ContainerNotFound(String),

    #[error("Failed to run ECS task: {0}")]
    RunTask(String),

    #[error("Invalid task overrides: {0}")]
    InvalidOverrides(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EcsLambdaError {
    /// Stable name of the error kind, independent of the message wording.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ServiceLookup(_) => "ServiceLookupError",
            Self::TaskDefinitionLookup(_) => "TaskDefinitionLookupError",
            Self::UnsupportedConfiguration(_) => "UnsupportedConfigurationError",
            Self::ContainerNotFound(_) => "ContainerNotFoundError",
            Self::RunTask(_) => "RunTaskError",
            Self::InvalidOverrides(_) => "InvalidOverridesError",
            Self::Config(_) => "ConfigError",
        }
    }
}

impl From<serde_json::Error> for EcsLambdaError {
    fn from(error: serde_json::Error) -> Self {
        EcsLambdaError::InvalidOverrides(error.to_string())
    }
}
