//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use docuware_forwarder::config::ForwarderConfig;
use docuware_forwarder::docuware::{DocumentStore, DocumentSubmission, StoredDocument};
use docuware_forwarder::http::{build_router, AppState, HttpServer, UPLOAD_PATH};
use docuware_forwarder::{DocuWareClient, Shutdown, UpstreamError};

/// base64("%PDF-1.4 sample document")
pub const SAMPLE_PDF_BASE64: &str = "JVBERi0xLjQgc2FtcGxlIGRvY3VtZW50";
pub const SAMPLE_PDF: &[u8] = b"%PDF-1.4 sample document";

/// A complete, valid upload request body.
pub fn upload_body() -> Value {
    json!({
        "fileCabinetId": "fc-1",
        "organizationId": "org-1",
        "username": "svc-user",
        "password": "s3cret",
        "metadata": {
            "memberId": "M-42",
            "memberName": "Jane Doe",
            "passportNumber": "P1234567",
            "branch": "London"
        },
        "documentBase64": SAMPLE_PDF_BASE64
    })
}

/// In-memory store that records every submission it receives.
pub struct RecordingStore {
    submissions: Mutex<Vec<DocumentSubmission>>,
    outcome: Box<dyn Fn() -> Result<StoredDocument, UpstreamError> + Send + Sync>,
}

impl RecordingStore {
    pub fn succeeding(document_id: &str, docuware_url: &str) -> Arc<Self> {
        let stored = StoredDocument {
            document_id: Some(json!(document_id)),
            docuware_url: Some(json!(docuware_url)),
        };
        Arc::new(Self {
            submissions: Mutex::new(Vec::new()),
            outcome: Box::new(move || Ok(stored.clone())),
        })
    }

    pub fn failing(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            submissions: Mutex::new(Vec::new()),
            outcome: Box::new(move || {
                Err(UpstreamError::Status {
                    status,
                    body: body.to_string(),
                })
            }),
        })
    }

    pub fn calls(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<DocumentSubmission> {
        self.submissions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn store(&self, submission: DocumentSubmission) -> Result<StoredDocument, UpstreamError> {
        self.submissions.lock().unwrap().push(submission);
        (self.outcome)()
    }
}

/// Router wired to `store` with the given config.
pub fn router_with(config: &ForwarderConfig, store: Arc<dyn DocumentStore>) -> Router {
    build_router(config, AppState::new(config, store))
}

pub fn upload_request(body: &Value) -> Request<Body> {
    json_request(body.to_string())
}

pub fn json_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(UPLOAD_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Config pointing the upstream at `base_url` with short timeouts.
pub fn config_for(base_url: &str) -> ForwarderConfig {
    let mut config = ForwarderConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = base_url.to_string();
    config.upstream.timeout_secs = 5;
    config.upstream.connect_timeout_secs = 2;
    config
}

/// Forwarder listening on an ephemeral port with the real DocuWare client.
pub struct RunningForwarder {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningForwarder {
    pub async fn start(config: ForwarderConfig) -> Self {
        let store = Arc::new(DocuWareClient::new(&config.upstream).unwrap());
        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config, store);
        let wait = shutdown.wait();
        tokio::spawn(async move {
            let _ = server.run(listener, wait).await;
        });

        Self { addr, shutdown }
    }

    pub fn upload_url(&self) -> String {
        format!("http://{}{}", self.addr, UPLOAD_PATH)
    }

    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .no_proxy()
            .build()
            .unwrap()
    }
}

impl Drop for RunningForwarder {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
