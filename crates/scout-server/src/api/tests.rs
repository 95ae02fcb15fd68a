use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use scout_core::{AppConfig, Environment};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("addr"),
        log_level: "debug".to_string(),
        catalog_path: None,
        nominatim_url: server.uri(),
        overpass_url: format!("{}/api/interpreter", server.uri()),
        search_radius_m: 1000,
        geocode_timeout_secs: 5,
        overpass_timeout_secs: 5,
        user_agent: "scout-test/0.1".to_string(),
    }
}

fn test_state(server: &MockServer) -> AppState {
    let scout = MarketScout::from_config(&test_config(server)).expect("scout");
    let catalog = Catalog::embedded().expect("catalog");
    AppState::new(Arc::new(scout), Arc::new(catalog))
}

fn test_app(server: &MockServer) -> Router {
    build_app(test_state(server))
}

fn post_analysis(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/analysis")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

async fn mount_overpass(server: &MockServer, elements: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "elements": elements })),
        )
        .mount(server)
        .await;
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_upstream_maps_to_bad_gateway() {
    let response = ApiError::new("req-1", "upstream_unavailable", "down").into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn health_reports_catalog_size_and_request_id() {
    let server = MockServer::start().await;
    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-health")
    );
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["machines"], 5);
    assert_eq!(json["meta"]["request_id"], "req-health");
}

#[tokio::test]
async fn machines_lists_catalog() {
    let server = MockServer::start().await;
    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/machines")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let machines = json["data"].as_array().expect("data array");
    assert_eq!(machines.len(), 5);
    assert_eq!(machines[0]["id"], "icesupply-hielo");
    assert_eq!(machines[0]["category"], "ice_market");
}

#[tokio::test]
async fn unknown_machine_is_not_found() {
    let server = MockServer::start().await;
    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/machines/nope")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn analysis_by_coordinates_returns_verdict() {
    let server = MockServer::start().await;
    mount_overpass(
        &server,
        serde_json::json!([
            { "type": "node", "id": 7, "lat": 19.0441, "lon": -98.1980,
              "tags": { "name": "Veterinaria San Francisco", "healthcare": "veterinary" } }
        ]),
    )
    .await;

    let response = test_app(&server)
        .oneshot(post_analysis(&serde_json::json!({
            "machine_id": "agranel-mascotas",
            "lat": 19.0436,
            "lon": -98.1981
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["machine"]["id"], "agranel-mascotas");
    assert_eq!(json["data"]["result"]["classification"], "validated-generic");
    assert_eq!(json["data"]["result"]["points"][0]["name"], "Veterinaria San Francisco");
    assert_eq!(json["data"]["result"]["points"][0]["kind"], "Comercio");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn analysis_by_address_geocodes_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "lat": "25.6866",
            "lon": "-100.3161",
            "display_name": "Macroplaza, Centro, Monterrey, Nuevo León, México"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    mount_overpass(&server, serde_json::json!([])).await;

    let response = test_app(&server)
        .oneshot(post_analysis(&serde_json::json!({
            "machine_id": "icesupply-hielo",
            "address": "Macroplaza, Monterrey"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json["data"]["location"]["label"],
        "Macroplaza, Centro, Monterrey, Nuevo León, México"
    );
    assert_eq!(json["data"]["result"]["classification"], "opportunity");
}

#[tokio::test]
async fn analysis_unknown_address_is_geocode_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_analysis(&serde_json::json!({
            "machine_id": "icesupply-hielo",
            "address": "Calle Inexistente 999"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "geocode_not_found");
    assert_eq!(
        json["error"]["message"],
        "No encontramos esa dirección. Intenta ser más específico."
    );
}

#[tokio::test]
async fn analysis_overpass_outage_is_inconclusive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_analysis(&serde_json::json!({
            "machine_id": "agranel-agua",
            "lat": 20.6597,
            "lon": -103.3496
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["result"]["classification"], "inconclusive");
}

#[tokio::test]
async fn analysis_without_site_is_validation_error() {
    let server = MockServer::start().await;
    let response = test_app(&server)
        .oneshot(post_analysis(&serde_json::json!({ "machine_id": "agranel-agua" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn analysis_unknown_machine_is_not_found() {
    let server = MockServer::start().await;
    let response = test_app(&server)
        .oneshot(post_analysis(&serde_json::json!({
            "machine_id": "nope",
            "lat": 19.0,
            "lon": -99.0
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeated_analyses_are_not_throttled() {
    let server = MockServer::start().await;
    mount_overpass(&server, serde_json::json!([])).await;
    let app = test_app(&server);
    let body = serde_json::json!({ "machine_id": "agranel-agua", "lat": 19.0, "lon": -99.0 });

    for _ in 0..40 {
        let response = app
            .clone()
            .oneshot(post_analysis(&body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn session_header_supersedes_stale_analysis() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "elements": [] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let app = test_app(&server);
    let request = |lat: f64| {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analysis")
            .header(header::CONTENT_TYPE, "application/json")
            .header(SESSION_HEADER, "tab-1")
            .body(Body::from(
                serde_json::json!({ "machine_id": "agranel-agua", "lat": lat, "lon": -99.0 })
                    .to_string(),
            ))
            .expect("request")
    };

    let stale = app.clone().oneshot(request(19.0));
    let fresh = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.clone().oneshot(request(19.5)).await
    };
    let (stale, fresh) = tokio::join!(stale, fresh);

    let stale = stale.expect("response");
    assert_eq!(stale.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(stale).await["error"]["code"], "superseded");
    assert_eq!(fresh.expect("response").status(), StatusCode::OK);
}

#[tokio::test]
async fn abandoned_requests_leave_no_sessions_behind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "elements": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let state = test_state(&server);
    let sessions = state.sessions.clone();
    let app = build_app(state);

    for tab in 0..20 {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analysis")
            .header(header::CONTENT_TYPE, "application/json")
            .header(SESSION_HEADER, format!("tab-{tab}"))
            .body(Body::from(
                serde_json::json!({ "machine_id": "agranel-agua", "lat": 19.0, "lon": -99.0 })
                    .to_string(),
            ))
            .expect("request");
        let outcome =
            tokio::time::timeout(Duration::from_millis(50), app.clone().oneshot(request)).await;
        assert!(outcome.is_err(), "request {tab} should still be waiting on Overpass");
    }

    assert_eq!(sessions.active_count(), 0);
}

#[tokio::test]
async fn oversized_request_id_is_replaced() {
    let server = MockServer::start().await;
    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "x".repeat(500))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let echoed = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("request id header");
    assert_eq!(echoed.len(), 36);
    assert_eq!(json_body(response).await["meta"]["request_id"], echoed);
}
