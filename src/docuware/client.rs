//! DocuWare Platform HTTP client.
//!
//! # Responsibilities
//! - Build the file cabinet documents URL
//! - Encode index fields and the optional file as multipart/form-data
//! - Attach Basic auth and the organization header
//! - Enforce connect and total request timeouts
//! - Classify the response as a stored record or an upstream error

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{info_span, Instrument};
use url::Url;

use crate::config::UpstreamConfig;
use crate::docuware::{DocumentStore, DocumentSubmission, StoredDocument};
use crate::error::UpstreamError;

/// Header scoping a request to a DocuWare organization.
pub const ORGANIZATION_HEADER: &str = "X-DocuWare-Organization";

/// Name of the multipart part carrying the document.
pub const FILE_PART: &str = "file";

/// reqwest-backed [`DocumentStore`].
///
/// Cheap to clone; the inner connection pool is shared.
#[derive(Clone)]
pub struct DocuWareClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl DocuWareClient {
    /// Create a client for the configured DocuWare host.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("'{}': {}", config.base_url, e)))?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// `{base}/DocuWare/Platform/FileCabinets/{file_cabinet_id}/Documents`.
    ///
    /// The cabinet id is percent-encoded as a single path segment.
    pub fn documents_url(&self, file_cabinet_id: &str) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["DocuWare", "Platform", "FileCabinets", file_cabinet_id, "Documents"]);
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for DocuWareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocuWareClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Turn index fields and the staged attachment into a multipart form.
///
/// The attachment bytes move into the form and are dropped with it.
fn build_form(
    fields: Vec<(&'static str, String)>,
    attachment: Option<crate::docuware::Attachment>,
) -> Result<Form, UpstreamError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }

    if let Some(attachment) = attachment {
        let part = Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(attachment.content_type)
            .map_err(|e| UpstreamError::Multipart(e.to_string()))?;
        form = form.part(FILE_PART, part);
    }

    Ok(form)
}

#[async_trait]
impl DocumentStore for DocuWareClient {
    async fn store(&self, submission: DocumentSubmission) -> Result<StoredDocument, UpstreamError> {
        let url = self.documents_url(&submission.file_cabinet_id)?;

        let span = info_span!(
            "docuware_store",
            file_cabinet_id = %submission.file_cabinet_id,
            username = %submission.credentials.username(),
            with_file = submission.attachment.is_some(),
        );

        async move {
            let DocumentSubmission {
                organization_id,
                credentials,
                fields,
                attachment,
                ..
            } = submission;

            let form = build_form(fields, attachment)?;

            let mut request = self
                .http
                .post(url)
                .header(AUTHORIZATION, credentials.authorization_header())
                .header(ACCEPT, "application/json");
            if let Some(organization_id) = organization_id {
                request = request.header(ORGANIZATION_HEADER, organization_id);
            }

            tracing::debug!("Sending record to DocuWare");
            let response = request.multipart(form).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: Value = match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(status = %status, error = %e, "DocuWare response is not JSON");
                    Value::Null
                }
            };

            tracing::debug!(status = %status, "DocuWare accepted record");
            Ok(StoredDocument::from_response(&parsed))
        }
        .instrument(span)
        .await
    }
}
