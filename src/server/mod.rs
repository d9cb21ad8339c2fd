use axum::{routing::any, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::agent::AgentDirectory;

pub mod routes;

/// Logical name of the one agent instance this deployment talks to
pub const REVIEWER_NAME: &str = "code-reviewer";

/// Prefix of every path forwarded to the agent
pub const API_PREFIX: &str = "/api";

/// Server state
pub struct AppState {
    pub agents: AgentDirectory,
}

/// Build the front-door router: `/api/*` goes to the agent, everything else gets the UI
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/{*rest}", any(routes::forward_to_agent))
        .fallback(routes::ui_document)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, agents: AgentDirectory) -> anyhow::Result<()> {
    let state = Arc::new(AppState { agents });

    // Bring the agent up before accepting traffic
    state.agents.get(REVIEWER_NAME).await?;

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
