use crate::ServiceResult;
use crate::error::VerificationServiceError;
use certs_core::CertificationRepository;
use certs_core::model::CertificationId;
use error_stack::ResultExt;
use tracing::instrument;

/// Anything that can back the verification service. Clones are expected to share the
/// same underlying store.
pub trait VerificationRepo: CertificationRepository + Clone + Send + Sync + 'static {}

impl<T> VerificationRepo for T where T: CertificationRepository + Clone + Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct VerificationService<R> {
    repo: R,
}

impl<R> VerificationService<R>
where
    R: VerificationRepo,
{
    pub fn new(repo: R) -> Self {
        VerificationService { repo }
    }

    #[instrument(skip_all, name = "service#verify")]
    pub async fn verify(&self, id: CertificationId) -> ServiceResult<VerificationOutcome> {
        let found = self
            .repo
            .exists(id)
            .await
            .change_context(VerificationServiceError)?;

        Ok(if found {
            VerificationOutcome::Verified
        } else {
            VerificationOutcome::NotFound
        })
    }
}
