//! In-memory `EcsApi` shared by the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use ecs_task_lambdas::core::models::{
    ContainerDescriptor, EnvironmentVariable, LaunchedTask, RunTaskOutcome, RunTaskRequest,
    ServiceDescriptor, TaskDefinitionDescriptor,
};
use ecs_task_lambdas::ecs::EcsApi;
use ecs_task_lambdas::errors::EcsLambdaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DescribeServices { cluster: String, service: String },
    DescribeTaskDefinition(String),
    RunTask(RunTaskRequest),
}

pub struct FakeEcs {
    pub services: Vec<ServiceDescriptor>,
    pub task_definition: Result<TaskDefinitionDescriptor, String>,
    pub run_result: Result<RunTaskOutcome, String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeEcs {
    pub fn new(services: Vec<ServiceDescriptor>, task_definition: TaskDefinitionDescriptor) -> Self {
        Self {
            services,
            task_definition: Ok(task_definition),
            run_result: Ok(RunTaskOutcome {
                tasks: vec![LaunchedTask {
                    task_arn: Some("arn:aws:ecs:eu-west-1:123:task/prod/abc".to_string()),
                    last_status: Some("PROVISIONING".to_string()),
                    ..LaunchedTask::default()
                }],
                failures: vec![],
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn run_requests(&self) -> Vec<RunTaskRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RunTask(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl EcsApi for FakeEcs {
    async fn describe_services(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Vec<ServiceDescriptor>, EcsLambdaError> {
        self.record(Call::DescribeServices {
            cluster: cluster.to_string(),
            service: service.to_string(),
        });
        Ok(self.services.clone())
    }

    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<TaskDefinitionDescriptor, EcsLambdaError> {
        self.record(Call::DescribeTaskDefinition(task_definition.to_string()));
        self.task_definition
            .clone()
            .map_err(EcsLambdaError::TaskDefinitionLookup)
    }

    async fn run_task(&self, request: RunTaskRequest) -> Result<RunTaskOutcome, EcsLambdaError> {
        self.record(Call::RunTask(request));
        self.run_result.clone().map_err(EcsLambdaError::RunTask)
    }
}

pub fn service(name: &str, task_definition: &str) -> ServiceDescriptor {
    ServiceDescriptor {
        service_name: name.to_string(),
        task_definition: Some(task_definition.to_string()),
    }
}

pub fn web_container() -> ContainerDescriptor {
    ContainerDescriptor {
        name: Some("web".to_string()),
        image: Some("app:1".to_string()),
        cpu: 256,
        memory: Some(512),
        memory_reservation: Some(128),
        environment: vec![EnvironmentVariable::new("DEBUG", "true")],
    }
}

pub fn task_definition(containers: Vec<ContainerDescriptor>, revision: i32) -> TaskDefinitionDescriptor {
    TaskDefinitionDescriptor {
        task_definition_arn: Some(format!(
            "arn:aws:ecs:eu-west-1:123:task-definition/web:{revision}"
        )),
        family: Some("web".to_string()),
        revision,
        container_definitions: containers,
    }
}
