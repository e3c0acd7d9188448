use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shiftsync::config::Config;
use shiftsync::handlers;
use shiftsync::sync::SyncPipeline;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(source: &MockServer, destination: &MockServer) -> Config {
    Config {
        agenda_id: 7,
        source_url: source.uri(),
        destination_url: destination.uri(),
        tenant: "amphiazh".to_string(),
        delete_synced_range: true,
        port: 0,
    }
}

fn shift_json(id: i64, name: &str, begin: &str, end: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "remark": "",
        "description": "",
        "status": "published",
        "department": {"id": 3, "name": "Cardiologie"},
        "beginDate": begin,
        "endDate": end,
    })
}

#[tokio::test]
async fn sync_endpoint_answers_one_json_line_per_shift() {
    let source = MockServer::start().await;
    let destination = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            shift_json(1, "Dagdienst", "2024-01-10T08:00:00Z", "2024-01-12T16:00:00Z"),
            shift_json(2, "Nachtdienst", "2024-02-01T22:00:00Z", "2024-02-03T06:00:00Z"),
        ])))
        .mount(&source)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&destination)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&destination)
        .await;

    let app = handlers::router(Arc::new(SyncPipeline::new(test_config(
        &source,
        &destination,
    ))));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?bearer=secret-token")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://example.com"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<Value> = body
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[0]["outcome"], "synced");
    assert_eq!(lines[1]["outcome"], "synced");
}

#[tokio::test]
async fn missing_bearer_is_rejected_before_any_outbound_call() {
    let source = MockServer::start().await;
    let destination = MockServer::start().await;

    let app = handlers::router(Arc::new(SyncPipeline::new(test_config(
        &source,
        &destination,
    ))));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(source.received_requests().await.unwrap().is_empty());
    assert!(destination.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_method_gets_405_and_no_side_effects() {
    let source = MockServer::start().await;
    let destination = MockServer::start().await;

    let app = handlers::router(Arc::new(SyncPipeline::new(test_config(
        &source,
        &destination,
    ))));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/?bearer=secret-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(source.received_requests().await.unwrap().is_empty());
    assert!(destination.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_maps_to_bad_gateway() {
    let source = MockServer::start().await;
    let destination = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&source)
        .await;

    let app = handlers::router(Arc::new(SyncPipeline::new(test_config(
        &source,
        &destination,
    ))));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/?bearer=secret-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("not found"));
}
