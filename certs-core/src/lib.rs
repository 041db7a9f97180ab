use model::CertificationId;
use result::RepoResult;
use std::sync::Arc;

pub mod model;
pub mod result;

/// Read access to the record store holding issued certifications.
///
/// Writes happen elsewhere, so the only question this crate ever asks of the store is
/// whether a record with a given id is present. Duplicate rows for one id still count as
/// a single match.
pub trait CertificationRepository {
    fn exists(&self, id: CertificationId) -> impl Future<Output = RepoResult<bool>> + Send;
}

impl<T> CertificationRepository for Arc<T>
where
    T: CertificationRepository + Send + Sync,
{
    async fn exists(&self, id: CertificationId) -> RepoResult<bool> {
        (**self).exists(id).await
    }
}
