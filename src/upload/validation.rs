//! Request validation.
//!
//! Turns a loosely-typed [`UploadRequest`] into a [`ValidatedUpload`] or a
//! 400-class [`ForwarderError`]. Nothing here performs I/O, so a rejected
//! request can never have reached DocuWare.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::UploadPolicy;
use crate::docuware::Credentials;
use crate::error::ForwarderError;
use crate::upload::types::UploadRequest;

pub const INVALID_BASE64_MESSAGE: &str = "Invalid Base64 string provided.";

/// Standard alphabet, whole quads, and an optional final group of two or
/// three characters with or without padding.
static BASE64_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}(?:==)?|[A-Za-z0-9+/]{3}=?)?$")
        .expect("base64 pattern compiles")
});

/// Decoder matching [`BASE64_PATTERN`]: padding optional, trailing bits ignored.
const DOCUMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Whether `input` is well-formed standard Base64.
pub fn is_valid_base64(input: &str) -> bool {
    BASE64_PATTERN.is_match(input)
}

/// Decode a document payload, rejecting anything [`is_valid_base64`] refuses.
pub fn decode_document(input: &str) -> Result<Vec<u8>, ForwarderError> {
    if !is_valid_base64(input) {
        return Err(ForwarderError::validation(INVALID_BASE64_MESSAGE));
    }
    DOCUMENT_ENGINE
        .decode(input)
        .map_err(|_| ForwarderError::validation(INVALID_BASE64_MESSAGE))
}

/// Member fields after validation. Optional fields are `None` when absent or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub passport_number: Option<String>,
    pub id_number: Option<String>,
    pub branch: Option<String>,
}

/// An upload that passed validation and is ready to be forwarded.
#[derive(Debug)]
pub struct ValidatedUpload {
    pub file_cabinet_id: String,
    pub organization_id: Option<String>,
    pub credentials: Credentials,
    pub member: Member,
    /// Decoded document bytes, `None` for a metadata-only record.
    pub document: Option<Vec<u8>>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Validate a request against the configured policy.
///
/// Missing fields are reported together; Base64 is only checked once every
/// required field is present.
pub fn validate_request(
    request: UploadRequest,
    policy: &UploadPolicy,
) -> Result<ValidatedUpload, ForwarderError> {
    let mut missing = Vec::new();

    let file_cabinet_id = present(&request.file_cabinet_id);
    if file_cabinet_id.is_none() {
        missing.push("fileCabinetId");
    }

    let organization_id = present(&request.organization_id);
    if organization_id.is_none() && policy.require_organization {
        missing.push("organizationId");
    }

    let username = present(&request.username);
    if username.is_none() {
        missing.push("username");
    }
    let password = present(&request.password);
    if password.is_none() {
        missing.push("password");
    }

    let metadata = request.metadata.unwrap_or_default();
    let member_id = present(&metadata.member_id);
    if member_id.is_none() {
        missing.push("metadata.memberId");
    }
    let member_name = present(&metadata.member_name);
    if member_name.is_none() {
        missing.push("metadata.memberName");
    }

    let encoded_document = request.document_base64.filter(|d| !d.is_empty());
    if encoded_document.is_none() && policy.require_document {
        missing.push("documentBase64");
    }

    let (
        Some(file_cabinet_id),
        Some(username),
        Some(password),
        Some(member_id),
        Some(member_name),
        true,
    ) = (
        file_cabinet_id,
        username,
        password,
        member_id,
        member_name,
        missing.is_empty(),
    )
    else {
        return Err(ForwarderError::validation(format!(
            "Invalid request: missing required fields ({}).",
            missing.join(", ")
        )));
    };

    let document = encoded_document
        .as_deref()
        .map(decode_document)
        .transpose()?;

    Ok(ValidatedUpload {
        file_cabinet_id,
        organization_id,
        credentials: Credentials::new(username, password),
        member: Member {
            id: member_id,
            name: member_name,
            passport_number: present(&metadata.passport_number),
            id_number: present(&metadata.id_number),
            branch: present(&metadata.branch),
        },
        document,
    })
}
