//! End-to-end tests for the request observability pipeline.

use observability_demo::observability::TRACE_ID_HEADER;
use observability_demo::ServiceConfig;

mod common;

#[tokio::test]
async fn metrics_expose_request_counters_after_traffic() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;
    let client = common::test_client();

    client.get(format!("http://{addr}/")).send().await.unwrap();

    let res = client
        .get(format!("http://{addr}/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let content_type = res.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));

    let body = res.text().await.unwrap();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("http_request_duration_seconds"));
    assert!(body.contains(
        r#"http_requests_total{method="GET",route="/",status_code="200"} 1"#
    ));
    // No errors occurred, so the error counter has no samples yet.
    assert!(!body.contains("http_request_errors_total{"));

    shutdown.trigger();
}

#[tokio::test]
async fn error_responses_are_counted_as_errors() {
    let mut config = ServiceConfig::default();
    config.fault.max_delay_ms = 10;
    config.fault.failure_rate = 1.0;

    let (addr, shutdown) = common::start_service(config).await;
    let client = common::test_client();

    let res = client.get(format!("http://{addr}/slow")).send().await.unwrap();
    assert_eq!(res.status(), 500);

    let body = client
        .get(format!("http://{addr}/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains(
        r#"http_requests_total{method="GET",route="/slow",status_code="500"} 1"#
    ));
    assert!(body.contains(
        r#"http_request_errors_total{method="GET",route="/slow",status_code="500"} 1"#
    ));

    shutdown.trigger();
}

#[tokio::test]
async fn unmatched_routes_are_counted_under_a_fixed_label() {
    let (addr, shutdown) = common::start_service(ServiceConfig::default()).await;
    let client = common::test_client();

    let res = client
        .get(format!("http://{addr}/no-such-route"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    let body = client
        .get(format!("http://{addr}/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // The raw path must not appear as a label value.
    assert!(body.contains(
        r#"http_requests_total{method="GET",route="unmatched",status_code="404"} 1"#
    ));
    assert!(!body.contains("no-such-route"));

    shutdown.trigger();
}

#[tokio::test]
async fn every_endpoint_carries_a_trace_id() {
    let mut config = ServiceConfig::default();
    config.fault.max_delay_ms = 10;

    let (addr, shutdown) = common::start_service(config).await;
    let client = common::test_client();

    for path in ["/", "/slow", "/metrics", "/no-such-route"] {
        let res = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .unwrap_or_else(|| panic!("missing trace id on {path}"));
        assert!(!trace_id.to_str().unwrap().is_empty());
    }

    shutdown.trigger();
}
