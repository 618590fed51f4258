//! End-to-end tests for the demonstration endpoints.

use observability_demo::fault::SimulatedError;
use observability_demo::observability::TRACE_ID_HEADER;
use observability_demo::ServiceConfig;

mod common;

#[tokio::test]
async fn home_returns_welcome_with_a_trace_id() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 200);
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("missing trace id header");
    assert!(!trace_id.to_str().unwrap().is_empty());
    assert_eq!(res.text().await.unwrap(), "Welcome");

    shutdown.trigger();
}

#[tokio::test]
async fn inbound_trace_id_is_echoed_back() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/"))
        .header(TRACE_ID_HEADER, "upstream-trace-42")
        .send()
        .await
        .unwrap();

    assert_eq!(
        res.headers().get(TRACE_ID_HEADER).unwrap(),
        "upstream-trace-42"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn slow_endpoint_succeeds_when_failures_are_disabled() {
    let mut config = ServiceConfig::default();
    config.fault.max_delay_ms = 10;
    config.fault.failure_rate = 0.0;

    let (addr, shutdown) = common::start_service(config).await;
    let client = common::test_client();

    let res = client.get(format!("http://{addr}/slow")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Slow response");

    shutdown.trigger();
}

#[tokio::test]
async fn slow_endpoint_serves_a_catalog_error_when_failing() {
    let mut config = ServiceConfig::default();
    config.fault.max_delay_ms = 10;
    config.fault.failure_rate = 1.0;

    let (addr, shutdown) = common::start_service(config).await;
    let client = common::test_client();

    let res = client.get(format!("http://{addr}/slow")).send().await.unwrap();
    assert_eq!(res.status(), 500);

    let body = res.text().await.unwrap();
    let known: Vec<String> = SimulatedError::ALL.iter().map(|e| e.to_string()).collect();
    assert!(known.contains(&body), "unexpected error body: {body}");

    shutdown.trigger();
}

#[tokio::test]
async fn problem_forwards_the_downstream_body_verbatim() {
    let stub = common::start_stub_downstream("Response from slow external service").await;

    let mut config = ServiceConfig::default();
    config.downstream.url = format!("http://{stub}/external-service");

    let (addr, shutdown) = common::start_service(config).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/problem"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Response from slow external service");

    shutdown.trigger();
}

#[tokio::test]
async fn problem_hides_the_downstream_failure_cause() {
    let mut config = ServiceConfig::default();
    // Nothing listens on the discard port, so the call fails at transport level.
    config.downstream.url = "http://127.0.0.1:9/external-service".to_string();
    config.downstream.timeout_secs = 2;

    let (addr, shutdown) = common::start_service(config).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/problem"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "External service error");

    shutdown.trigger();
}
