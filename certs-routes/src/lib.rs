use crate::error::VerificationServiceError;
use error_stack::Report;

pub type ServiceResult<T> = Result<T, Report<VerificationServiceError>>;

pub mod cors;
mod error;
mod metrics;
pub mod routes;
pub mod service;
pub mod state;

pub use metrics::MetricsInitError;
