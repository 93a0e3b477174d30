//! Wire types for the upload endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::docuware::StoredDocument;

/// Body of `POST /api/v1/upload-diaspora-document`.
///
/// Every field is optional at the serde level so that missing fields surface
/// as validation errors with the service's own error shape rather than as
/// extractor rejections.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_cabinet_id: Option<String>,
    pub organization_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub metadata: Option<MemberMetadata>,
    pub document_base64: Option<String>,
}

/// Member details stored as DocuWare index fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMetadata {
    pub member_id: Option<String>,
    pub member_name: Option<String>,
    pub passport_number: Option<String>,
    pub id_number: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// Failure details attached to 500 responses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorInfo {
    pub code: String,
    pub details: Value,
}

/// Response body for every outcome of an upload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub status: UploadStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docuware_url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl UploadResult {
    /// DocuWare accepted the record; identifiers are relayed verbatim.
    pub fn stored(message: impl Into<String>, stored: StoredDocument) -> Self {
        Self {
            status: UploadStatus::Success,
            message: message.into(),
            document_id: stored.document_id,
            docuware_url: stored.docuware_url,
            error: None,
        }
    }

    /// The request was refused before anything was sent upstream.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Error,
            message: message.into(),
            document_id: None,
            docuware_url: None,
            error: None,
        }
    }

    /// Processing or the upstream call failed.
    pub fn failed(message: impl Into<String>, code: &str, details: Value) -> Self {
        Self {
            status: UploadStatus::Error,
            message: message.into(),
            document_id: None,
            docuware_url: None,
            error: Some(ErrorInfo {
                code: code.to_string(),
                details,
            }),
        }
    }
}
