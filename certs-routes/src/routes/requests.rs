use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// The id of the certification to look up. Must be present and non-empty.
    #[serde(rename = "certificationId")]
    pub certification_id: Option<String>,
}
