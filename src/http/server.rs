//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Inject the upstream document store
//! - Bind server to listener and drain on shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ForwarderConfig, UploadPolicy};
use crate::docuware::DocumentStore;
use crate::http::handlers::{health, upload_document};
use crate::http::request::{make_request_span, request_id_header};

pub const UPLOAD_PATH: &str = "/api/v1/upload-diaspora-document";
pub const HEALTH_PATH: &str = "/health";

/// Application state injected into handlers.
///
/// Read-only; nothing here changes between requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub policy: Arc<UploadPolicy>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(config: &ForwarderConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            policy: Arc::new(config.upload.clone()),
            max_body_size: config.limits.max_body_size,
        }
    }
}

/// HTTP server for the document forwarder.
pub struct HttpServer {
    router: Router,
    config: ForwarderConfig,
}

impl HttpServer {
    /// Create a new HTTP server forwarding to `store`.
    pub fn new(config: ForwarderConfig, store: Arc<dyn DocumentStore>) -> Self {
        let state = AppState::new(&config, store);
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ForwarderConfig, state: AppState) -> Router {
    Router::new()
        .route(UPLOAD_PATH, post(upload_document))
        .route(HEALTH_PATH, get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.limits.max_body_size))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                .layer(PropagateRequestIdLayer::new(request_id_header())),
        )
}
