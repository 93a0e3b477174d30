use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ForwarderError;
use crate::http::server::AppState;
use crate::upload::{build_submission, validate_request, UploadRequest, UploadResult};

pub const DOCUMENT_UPLOADED_MESSAGE: &str = "Document successfully uploaded to DocuWare";
pub const RECORD_CREATED_MESSAGE: &str = "Record successfully created in DocuWare";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn reject_body(rejection: JsonRejection, limit: usize) -> ForwarderError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ForwarderError::PayloadTooLarge { limit }
    } else {
        ForwarderError::validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// `POST /api/v1/upload-diaspora-document`
///
/// Validates the request, stages the document in memory and forwards one
/// multipart request to DocuWare. Validation failures return before the
/// store is touched.
pub async fn upload_document(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResult>, ForwarderError> {
    let Json(request) = payload.map_err(|rejection| reject_body(rejection, state.max_body_size))?;

    let upload = validate_request(request, &state.policy).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected upload request");
    })?;

    let file_cabinet_id = upload.file_cabinet_id.clone();
    let member_id = upload.member.id.clone();
    let with_file = upload.document.is_some();

    let submission = build_submission(upload, &state.policy);
    match state.store.store(submission).await {
        Ok(stored) => {
            tracing::info!(
                file_cabinet_id = %file_cabinet_id,
                member_id = %member_id,
                with_file,
                "Record created in DocuWare"
            );
            let message = if with_file {
                DOCUMENT_UPLOADED_MESSAGE
            } else {
                RECORD_CREATED_MESSAGE
            };
            Ok(Json(UploadResult::stored(message, stored)))
        }
        Err(e) => {
            tracing::error!(
                file_cabinet_id = %file_cabinet_id,
                member_id = %member_id,
                upstream_status = ?e.status(),
                details = %e.details(),
                "Error uploading document: {}",
                e
            );
            Err(e.into())
        }
    }
}
