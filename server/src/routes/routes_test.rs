use super::*;
use session::Config;

fn state(mode: AuthMode) -> AppState {
    AppState::new(Config { api_url: "https://api.example.com".parse().unwrap(), auth_mode: mode })
}

#[tokio::test]
async fn healthz_reports_ok_and_auth_mode() {
    let (status, Json(body)) = healthz(State(state(AuthMode::Http))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Health { status: "ok", auth_mode: "http" });
}

#[test]
fn health_serializes_camel_case() {
    let json = serde_json::to_value(Health { status: "ok", auth_mode: "mock" }).unwrap();
    assert_eq!(json, serde_json::json!({ "status": "ok", "authMode": "mock" }));
}

#[test]
fn health_router_builds() {
    let _router = health_routes(state(AuthMode::Mock));
}
