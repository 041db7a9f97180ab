use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;
use utoipa::ToSchema;

pub const FOUND_MESSAGE: &str =
    "🔒 Zer0 Trace Found! This certification has been verified in our secure database.";
pub const NOT_FOUND_MESSAGE: &str =
    "❌ No matching certification found. This certificate may be invalid or not registered.";
pub const ID_REQUIRED_MESSAGE: &str = "Certification ID is required";
pub const INVALID_BODY_MESSAGE: &str =
    "Request body must be a JSON object with a string certificationId";
pub const LOOKUP_ERROR_MESSAGE: &str = "Error checking certification";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("certification id cannot be empty")]
pub struct EmptyCertificationId;

/// The key of a certification record. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CertificationId(String);

impl CertificationId {
    /// The id is kept exactly as given, no trimming or case folding happens,
    /// since lookups are exact matches.
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyCertificationId> {
        let id = id.into();
        if id.is_empty() {
            Err(EmptyCertificationId)
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CertificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The answer given for a single certification lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub verified: bool,
    pub message: Cow<'static, str>,
}

impl Verdict {
    pub fn new(verified: bool, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            verified,
            message: message.into(),
        }
    }

    pub fn found() -> Self {
        Self::new(true, FOUND_MESSAGE)
    }

    pub fn not_found() -> Self {
        Self::new(false, NOT_FOUND_MESSAGE)
    }

    pub fn id_required() -> Self {
        Self::new(false, ID_REQUIRED_MESSAGE)
    }

    pub fn invalid_body() -> Self {
        Self::new(false, INVALID_BODY_MESSAGE)
    }

    pub fn lookup_error() -> Self {
        Self::new(false, LOOKUP_ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(Err(EmptyCertificationId), CertificationId::new(""));
    }

    #[test]
    fn id_is_not_trimmed() {
        let id = CertificationId::new(" ABC123 ").expect("non-empty id");
        assert_eq!(" ABC123 ", id.as_str());
    }

    #[test]
    fn verdict_wire_format() {
        assert_eq!(
            json!({ "verified": false, "message": "Certification ID is required" }),
            serde_json::to_value(Verdict::id_required()).expect("verdict serializes"),
        );
    }

    #[test]
    fn verdict_reads_owned_message() {
        let verdict: Verdict =
            serde_json::from_value(json!({ "verified": true, "message": "all good" }))
                .expect("verdict deserializes");

        assert_eq!(Verdict::new(true, "all good"), verdict);
    }
}
