use certs_core::model::CertificationId;
use serde_json::Value;

pub const CERTIFICATION_ID_FIELD: &str = "certificationId";

/// Problems with the file itself. Messages are shown to the user as-is.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("The file is not readable text")]
    NotText,
    #[error("The file is not valid JSON: {0}")]
    Malformed(String),
    #[error("No certificationId field found in JSON file")]
    MissingId,
    #[error("The certificationId field must be a string")]
    NotAString,
}

/// Pulls the certification id out of an uploaded document. Every other field is ignored.
pub fn extract_certification_id(text: &str) -> Result<CertificationId, PayloadError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| PayloadError::Malformed(e.to_string()))?;

    match document.get(CERTIFICATION_ID_FIELD) {
        None | Some(Value::Null) => Err(PayloadError::MissingId),
        Some(Value::String(id)) => {
            CertificationId::new(id.as_str()).map_err(|_| PayloadError::MissingId)
        }
        Some(_) => Err(PayloadError::NotAString),
    }
}
