//! HTTP API for saving, running and explaining code snippets.

use axum::{routing::get, Router};
use ai_proxy::AiAssistant;
use code_exec::CodeExecutionService;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod auth;
pub mod error;
pub mod models;
mod routes;
pub mod store;

pub use auth::{TokenSigner, DEFAULT_PASSWORD_COST};
pub use error::ServerError;
use store::{SnippetStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub snippets: Arc<SnippetStore>,
    pub tokens: Arc<TokenSigner>,
    pub execution: Arc<CodeExecutionService>,
    pub assistant: Arc<AiAssistant>,
    /// Cancelled on shutdown; every execution runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        tokens: TokenSigner,
        execution: CodeExecutionService,
        assistant: AiAssistant,
    ) -> Self {
        Self {
            users: Arc::new(UserStore::new()),
            snippets: Arc::new(SnippetStore::new()),
            tokens: Arc::new(tokens),
            execution: Arc::new(execution),
            assistant: Arc::new(assistant),
            shutdown: CancellationToken::new(),
        }
    }

    /// Swaps in an empty user store hashing passwords at `cost`
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.users = Arc::new(UserStore::with_password_cost(cost));
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::api_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serves until `shutdown` is cancelled, then drains open connections
pub async fn run_server(
    app: Router,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;
    serve(listener, app, shutdown).await
}

/// Like [`run_server`] for an already bound listener
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Starting codepad server on {}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
