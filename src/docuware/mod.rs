//! DocuWare upstream integration.
//!
//! # Data Flow
//! ```text
//! ValidatedUpload
//!     → upload::form (DocumentSubmission: index fields + optional attachment)
//!     → DocumentStore::store
//!         → client.rs (URL, Basic auth, organization header, multipart body)
//!         → POST {base}/DocuWare/Platform/FileCabinets/{id}/Documents
//!     → StoredDocument | UpstreamError
//! ```
//!
//! # Design Decisions
//! - The handler only sees the `DocumentStore` trait, so tests swap in a mock
//! - One attempt per request: no retries, no circuit breaker
//! - Every call carries a deadline from `UpstreamConfig`

pub mod auth;
pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;

pub use auth::Credentials;
pub use client::DocuWareClient;

/// File part staged in memory for one request.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything needed to create one DocuWare record.
#[derive(Debug, Clone)]
pub struct DocumentSubmission {
    pub file_cabinet_id: String,
    /// Sent as `X-DocuWare-Organization` when set.
    pub organization_id: Option<String>,
    pub credentials: Credentials,
    /// Index fields in the order they are written to the form.
    pub fields: Vec<(&'static str, String)>,
    /// `None` creates a metadata-only record.
    pub attachment: Option<Attachment>,
}

impl DocumentSubmission {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Identifiers DocuWare returned for a stored record.
///
/// Values are relayed to the caller exactly as DocuWare sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredDocument {
    pub document_id: Option<Value>,
    pub docuware_url: Option<Value>,
}

impl StoredDocument {
    /// Pick `documentId` / `docuwareUrl` out of a response body.
    pub fn from_response(body: &Value) -> Self {
        Self {
            document_id: body.get("documentId").cloned(),
            docuware_url: body.get("docuwareUrl").cloned(),
        }
    }
}

/// Upstream document store the upload handler forwards to.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn store(&self, submission: DocumentSubmission) -> Result<StoredDocument, UpstreamError>;
}
