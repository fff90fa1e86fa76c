//! HTTP API for the email triage pipeline.
//!
//! One POST endpoint accepts a multipart submission (inline text and/or an
//! uploaded file) and answers with the analysis JSON. Failures come back as
//! `{"error": "..."}` with status 200; clients distinguish the two shapes
//! solely by the `error` field.

pub mod routes;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS so a browser frontend served elsewhere can talk to us.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/analyze-email", post(routes::analyze_email))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the API server until the listener dies.
pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("triage API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
