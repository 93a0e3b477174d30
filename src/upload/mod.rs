//! Diaspora document upload.
//!
//! # Data Flow
//! ```text
//! UploadRequest (JSON)
//!     → validation.rs (required fields, Base64 check, decode into memory)
//!     → form.rs (index fields, attachment name)
//!     → DocumentSubmission → docuware::DocumentStore
//!     → UploadResult (JSON)
//! ```

pub mod form;
pub mod types;
pub mod validation;

pub use form::build_submission;
pub use types::{ErrorInfo, MemberMetadata, UploadRequest, UploadResult, UploadStatus};
pub use validation::{is_valid_base64, validate_request, ValidatedUpload};
