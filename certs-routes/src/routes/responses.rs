use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use certs_core::model::Verdict;

/// A verdict and the status code it is sent with. 200 is used for both positive and
/// negative lookups; only bad input and store failures change the status.
#[derive(Debug)]
pub struct VerdictResponse {
    status_code: StatusCode,
    verdict: Verdict,
}

impl VerdictResponse {
    pub fn verified() -> Self {
        Self {
            status_code: StatusCode::OK,
            verdict: Verdict::found(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::OK,
            verdict: Verdict::not_found(),
        }
    }

    pub fn id_required() -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            verdict: Verdict::id_required(),
        }
    }

    pub fn invalid_body() -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            verdict: Verdict::invalid_body(),
        }
    }
}

impl IntoResponse for VerdictResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.verdict)).into_response()
    }
}
