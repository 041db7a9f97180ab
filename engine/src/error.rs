use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_stack::Report;
use std::error::Error;

/// How an error context is presented to callers. The full report never leaves the
/// service; endpoints log it through `#[instrument(err(Debug))]`.
pub trait PublicError: Error {
    fn public_response(&self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[derive(thiserror::Error)]
#[error("there was an error running the endpoint")]
pub struct EndpointError<T: Error>(Report<T>);

impl<T: Error> std::fmt::Debug for EndpointError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> From<Report<T>> for EndpointError<T>
where
    T: Error,
{
    fn from(value: Report<T>) -> Self {
        Self(value)
    }
}

impl<T: PublicError + Send + Sync + 'static> IntoResponse for EndpointError<T> {
    fn into_response(self) -> Response {
        self.0.current_context().public_response()
    }
}
