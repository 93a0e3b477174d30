//! Mapping from a validated upload to DocuWare index fields.

use crate::config::UploadPolicy;
use crate::docuware::{Attachment, DocumentSubmission};
use crate::upload::validation::{Member, ValidatedUpload};

pub const DOCUMENT_CONTENT_TYPE: &str = "application/pdf";

/// File name DocuWare stores the attachment under: `{memberId}_{memberName}.pdf`
/// with whitespace in the name replaced by underscores.
pub fn attachment_file_name(member: &Member) -> String {
    let name: String = member
        .name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}_{}.pdf", member.id, name)
}

/// Index fields in form order. Optional fields are only written when present.
pub fn index_fields(member: &Member, document_type: &str) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("DocumentType", document_type.to_string()),
        ("MemberName", member.name.clone()),
        ("MemberId", member.id.clone()),
    ];

    let optional = [
        ("PassportNumber", &member.passport_number),
        ("IdNumber", &member.id_number),
        ("Branch", &member.branch),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            fields.push((name, value.clone()));
        }
    }

    fields
}

/// Assemble the submission for [`crate::docuware::DocumentStore::store`].
pub fn build_submission(upload: ValidatedUpload, policy: &UploadPolicy) -> DocumentSubmission {
    let fields = index_fields(&upload.member, &policy.document_type);

    let attachment = upload.document.map(|bytes| Attachment {
        file_name: attachment_file_name(&upload.member),
        content_type: DOCUMENT_CONTENT_TYPE,
        bytes,
    });

    let organization_id = upload
        .organization_id
        .filter(|_| policy.send_organization_header);

    DocumentSubmission {
        file_cabinet_id: upload.file_cabinet_id,
        organization_id,
        credentials: upload.credentials,
        fields,
        attachment,
    }
}
