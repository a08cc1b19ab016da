use std::env;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::errors::EcsLambdaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub aws_region: String,
    pub ecs_endpoint_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, EcsLambdaError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EcsLambdaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let aws_region = lookup("AWS_REGION")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| EcsLambdaError::Config("AWS_REGION is not set".to_string()))?;

        Ok(Self {
            aws_region,
            ecs_endpoint_url: lookup("ECS_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
        })
    }

    /// Loads the shared AWS SDK config for this region.
    pub async fn load_sdk_config(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws_region.clone()))
            .load()
            .await
    }
}
