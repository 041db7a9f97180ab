use crate::cors::CorsPolicy;
use crate::metrics::{self, MetricsInitError};
use crate::service::{VerificationRepo, VerificationService};
use axum::extract::FromRef;
use error_stack::Report;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct CertAppState<R> {
    pub service: VerificationService<R>,
    pub cors: CorsPolicy,
    pub metrics: Option<PrometheusHandle>,
}

impl<R: VerificationRepo> CertAppState<R> {
    /// Installs the global prometheus recorder, so this can only succeed once per process.
    pub fn new_with_metrics(repo: R, cors: CorsPolicy) -> Result<Self, Report<MetricsInitError>> {
        Ok(Self {
            service: VerificationService::new(repo),
            cors,
            metrics: Some(metrics::setup_recorder()?),
        })
    }

    pub fn new_without_metrics(repo: R, cors: CorsPolicy) -> Self {
        Self {
            service: VerificationService::new(repo),
            cors,
            metrics: None,
        }
    }
}

impl<R: VerificationRepo> FromRef<CertAppState<R>> for VerificationService<R> {
    fn from_ref(input: &CertAppState<R>) -> Self {
        input.service.clone()
    }
}
