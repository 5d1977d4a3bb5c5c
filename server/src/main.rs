mod routes;
mod state;

use session::Config;


const DEFAULT_PORT: u16 = 3000;

fn parse_port(raw: Option<&str>) -> Result<u16, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| format!("invalid PORT `{value}`")),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("no .env loaded: {e}");
    }
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("invalid configuration");
    let port = parse_port(std::env::var("PORT").ok().as_deref()).expect("invalid PORT");
    tracing::info!(api_url = %config.api_url, auth_mode = ?config.auth_mode, "configuration loaded");

    let state = state::AppState::new(config);
    let app = routes::leptos_app(state).expect("leptos configuration failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "admin console listening");
    axum::serve(listener, app).await.expect("server failed");
}
