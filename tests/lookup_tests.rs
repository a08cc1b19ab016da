mod common;

use common::{Call, FakeEcs, service, task_definition, web_container};
use ecs_task_lambdas::core::models::{ContainerDescriptor, EnvironmentVariable, LookupEvent};
use ecs_task_lambdas::errors::EcsLambdaError;
use ecs_task_lambdas::lookup::{ContainerSummary, lookup_container};
use lambda_runtime::{Context, LambdaEvent};

fn event(container: &str) -> LookupEvent {
    LookupEvent {
        ecs_cluster: "prod".to_string(),
        ecs_service: "web".to_string(),
        ecs_task_container_name: container.to_string(),
    }
}

#[tokio::test]
async fn test_lookup_populates_summary() {
    let ecs = FakeEcs::new(
        vec![service("web", "web:7")],
        task_definition(vec![web_container()], 7),
    );

    let summary = lookup_container(&ecs, &event("web")).await.unwrap();

    assert_eq!(
        summary,
        ContainerSummary {
            image: "app:1".to_string(),
            memory_reservation: "128".to_string(),
            cpu: "256".to_string(),
            memory: "512".to_string(),
            environment: r#"{"DEBUG":"1"}"#.to_string(),
            task_revision: "7".to_string(),
        }
    );
    assert_eq!(
        ecs.calls(),
        vec![
            Call::DescribeServices {
                cluster: "prod".to_string(),
                service: "web".to_string()
            },
            Call::DescribeTaskDefinition("web:7".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_lookup_environment_is_sorted_and_normalized() {
    let container = ContainerDescriptor {
        environment: vec![
            EnvironmentVariable::new("ZONE", "eu"),
            EnvironmentVariable::new("FEATURE_X", "true"),
            EnvironmentVariable::new("FEATURE_Y", "false"),
            EnvironmentVariable::new("ANSWER", "42"),
        ],
        ..web_container()
    };
    let ecs = FakeEcs::new(
        vec![service("web", "web:3")],
        task_definition(vec![container], 3),
    );

    let summary = lookup_container(&ecs, &event("web")).await.unwrap();

    assert_eq!(
        summary.environment,
        r#"{"ANSWER":"42","FEATURE_X":"1","FEATURE_Y":"false","ZONE":"eu"}"#
    );
}

#[tokio::test]
async fn test_lookup_missing_service_returns_sentinel() {
    let ecs = FakeEcs::new(vec![], task_definition(vec![web_container()], 1));

    let summary = lookup_container(&ecs, &event("web")).await.unwrap();

    assert_eq!(summary, ContainerSummary::service_missing());
    assert_eq!(summary.image, "<ECS_SERVICE_DOES_NOT_EXIST_YET>");
    assert_eq!(ecs.calls().len(), 1, "no task definition lookup expected");
}

#[tokio::test]
async fn test_lookup_sentinel_is_fresh_per_call() {
    let ecs = FakeEcs::new(vec![], task_definition(vec![web_container()], 1));

    let mut first = lookup_container(&ecs, &event("web")).await.unwrap();
    first.image = "mutated".to_string();
    let second = lookup_container(&ecs, &event("web")).await.unwrap();

    assert_eq!(second, ContainerSummary::service_missing());
}

#[tokio::test]
async fn test_lookup_multiple_services_is_an_error() {
    let ecs = FakeEcs::new(
        vec![service("web", "web:1"), service("web", "web:2")],
        task_definition(vec![web_container()], 1),
    );

    let err = lookup_container(&ecs, &event("web")).await.unwrap_err();

    assert!(matches!(err, EcsLambdaError::ServiceLookup(_)));
    assert_eq!(ecs.calls().len(), 1, "no further remote calls expected");
}

#[tokio::test]
async fn test_lookup_rejects_multi_container_task_definition() {
    let sidecar = ContainerDescriptor {
        name: Some("envoy".to_string()),
        ..web_container()
    };
    let ecs = FakeEcs::new(
        vec![service("web", "web:1")],
        task_definition(vec![web_container(), sidecar], 1),
    );

    let err = lookup_container(&ecs, &event("web")).await.unwrap_err();
    assert_eq!(err.kind(), "UnsupportedConfigurationError");
}

#[tokio::test]
async fn test_lookup_rejects_empty_task_definition() {
    let ecs = FakeEcs::new(vec![service("web", "web:1")], task_definition(vec![], 1));

    let err = lookup_container(&ecs, &event("web")).await.unwrap_err();
    assert_eq!(err.kind(), "UnsupportedConfigurationError");
}

#[tokio::test]
async fn test_lookup_unknown_container_name() {
    let ecs = FakeEcs::new(
        vec![service("web", "web:1")],
        task_definition(vec![web_container()], 1),
    );

    let err = lookup_container(&ecs, &event("worker")).await.unwrap_err();

    match err {
        EcsLambdaError::ContainerNotFound(name) => assert_eq!(name, "worker"),
        other => panic!("Unexpected error type: {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_container_name_must_match_exactly() {
    let ecs = FakeEcs::new(
        vec![service("web", "web:1")],
        task_definition(vec![web_container()], 1),
    );

    let err = lookup_container(&ecs, &event("Web")).await.unwrap_err();
    assert_eq!(err.kind(), "ContainerNotFoundError");
}

#[tokio::test]
async fn test_lookup_task_definition_failure_propagates() {
    let mut ecs = FakeEcs::new(
        vec![service("web", "web:1")],
        task_definition(vec![web_container()], 1),
    );
    ecs.task_definition = Err("AccessDeniedException".to_string());

    let err = lookup_container(&ecs, &event("web")).await.unwrap_err();

    assert_eq!(err.kind(), "TaskDefinitionLookupError");
    assert!(err.to_string().contains("AccessDeniedException"));
}

#[tokio::test]
async fn test_lookup_handler_returns_serialized_summary() {
    let ecs = FakeEcs::new(
        vec![service("web", "web:7")],
        task_definition(vec![web_container()], 7),
    );

    let result = ecs_task_lambdas::lookup::handler(
        &ecs,
        LambdaEvent::new(event("web"), Context::default()),
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(result).unwrap(),
        serde_json::json!({
            "image": "app:1",
            "memory_reservation": "128",
            "cpu": "256",
            "memory": "512",
            "environment": "{\"DEBUG\":\"1\"}",
            "task_revision": "7"
        })
    );
}

#[tokio::test]
async fn test_lookup_handler_surfaces_errors() {
    let ecs = FakeEcs::new(
        vec![service("web", "web:1"), service("web", "web:2")],
        task_definition(vec![web_container()], 1),
    );

    let err = ecs_task_lambdas::lookup::handler(
        &ecs,
        LambdaEvent::new(event("web"), Context::default()),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("Failed to resolve ECS service"));
}

#[test]
fn test_lookup_event_requires_container_name() {
    let parsed = serde_json::from_value::<LookupEvent>(serde_json::json!({
        "ecs_cluster": "prod",
        "ecs_service": "web"
    }));
    assert!(parsed.is_err());
}
