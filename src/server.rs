//! HTTP front end for the recommender.
//!
//! ## Endpoints
//!
//! - `POST /process-comment`: `RecommendRequest` JSON in, `RecommendResponse` JSON out
//! - `GET /health`: liveness probe
//!
//! CORS is wide open; the service is meant to be called from editor and
//! code-review extensions running on arbitrary origins.

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{DevrefError, Result};
use crate::recommender::Recommender;
use crate::request::{RecommendRequest, RecommendResponse};

/// Build the router without binding a socket.
pub fn router(recommender: Arc<Recommender>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/process-comment", post(handle_process_comment))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(recommender)
}

async fn handle_process_comment(
    State(recommender): State<Arc<Recommender>>,
    Json(request): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
    Json(recommender.process(&request).await)
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// A running HTTP server.
///
/// The server task is aborted when this handle is dropped.
pub struct Server {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl Server {
    /// Bind `{config.host}:{config.port}` (port `0` picks a free one) and
    /// serve on a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns [`DevrefError::Server`] if the listener cannot bind.
    pub async fn start(recommender: Arc<Recommender>, config: &ServerConfig) -> Result<Self> {
        let app = router(recommender);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| DevrefError::Server(format!("bind {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| DevrefError::Server(format!("failed to get local addr: {e}")))?;

        info!("devref listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
