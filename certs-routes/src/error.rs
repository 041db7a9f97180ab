use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use certs_core::model::Verdict;
use engine::error::PublicError;

#[derive(Debug, thiserror::Error)]
#[error("failed to verify certification")]
pub struct VerificationServiceError;

impl PublicError for VerificationServiceError {
    fn public_response(&self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(Verdict::lookup_error())).into_response()
    }
}
