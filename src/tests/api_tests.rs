use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use crate::application::services::GatewayContext;
use crate::handlers::routes::{create_router, AppState};

fn disconnected_app() -> Router {
    create_router(AppState {
        context: GatewayContext::unmounted(),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = disconnected_app().oneshot(get("/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_connection_reports_disconnected() {
    let (status, body) = send(disconnected_app(), get("/v1/connection")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["connected"], false);
    assert!(body["data"]["contract_address"].is_null());
}

#[tokio::test]
async fn test_queries_return_not_connected() {
    let user = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    let uris = [
        format!("/v1/users/{}", user),
        format!("/v1/users/{}/exists", user),
        format!("/v1/users/{}/x3/1/active", user),
        format!("/v1/users/{}/x4/2/matrix", user),
        format!("/v1/users/{}/x3/3/cycles", user),
        format!("/v1/users/{}/x4/4/partners", user),
        "/v1/levels/1/price".to_string(),
    ];

    for uri in uris {
        let (status, body) = send(disconnected_app(), get(&uri)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert_eq!(body["error_code"], "NOT_CONNECTED", "{}", uri);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_invalid_address_is_rejected_before_gateway() {
    let (status, body) = send(disconnected_app(), get("/v1/users/0x1234")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert_eq!(body["validation_errors"][0]["field"], "address");
}

#[tokio::test]
async fn test_invalid_matrix_path_lists_every_problem() {
    let (status, body) = send(disconnected_app(), get("/v1/users/0x1234/x9/13/active")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validation_errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_register_validates_body() {
    let request = post_json(
        "/v1/transactions/register",
        serde_json::json!({ "referrer": "nope", "value": "1" }),
    );
    let (status, body) = send(disconnected_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validation_errors"][0]["field"], "referrer");
}

#[tokio::test]
async fn test_buy_level_requires_connection() {
    let request = post_json(
        "/v1/transactions/buy-level",
        serde_json::json!({ "matrix": "x3", "level": 2, "value": "10000000000000000" }),
    );
    let (status, body) = send(disconnected_app(), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_code"], "NOT_CONNECTED");
}

#[tokio::test]
async fn test_unparseable_level_uses_error_envelope() {
    let user = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    let uris = [
        "/v1/levels/300/price".to_string(),
        "/v1/levels/abc/price".to_string(),
        format!("/v1/users/{}/x3/300/active", user),
        format!("/v1/users/{}/x4/-1/partners", user),
    ];

    for uri in uris {
        let (status, body) = send(disconnected_app(), get(&uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false, "{}", uri);
        assert_eq!(body["error_code"], "VALIDATION_ERROR", "{}", uri);
        assert_eq!(body["validation_errors"][0]["field"], "level", "{}", uri);
    }
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/transactions/register")
        .header("content-type", "application/json")
        .body(Body::from("{\"referrer\": "))
        .unwrap();
    let (status, body) = send(disconnected_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "BAD_REQUEST");

    let request = post_json(
        "/v1/transactions/buy-level",
        serde_json::json!({ "matrix": "x3", "level": 300 }),
    );
    let (status, body) = send(disconnected_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "BAD_REQUEST");
    assert!(body["error"].as_str().unwrap().contains("level"));
}
