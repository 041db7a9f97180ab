use crate::postgres::RepoInitErr;
use crate::postgres::statements;
use certs_core::CertificationRepository;
use certs_core::model::CertificationId;
use certs_core::result::{RepoError, RepoResult};
use deadpool_postgres::{Object, Pool};
use error_stack::{Report, ResultExt};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CertificationRepo {
    pool: Pool,
}

impl std::fmt::Debug for CertificationRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificationRepo")
            .field("pool", &self.pool.status())
            .finish()
    }
}

impl CertificationRepo {
    /// Checks out a connection and prepares the lookup statement once, so a missing
    /// `certifications` table or an unreachable database is caught at startup instead of on
    /// the first request.
    pub async fn new(pool: Pool) -> Result<Self, Report<RepoInitErr>> {
        let client = pool.get().await.change_context(RepoInitErr)?;

        statements::certification_exists(&client)
            .await
            .change_context(RepoInitErr)
            .attach("could not prepare certification lookup, does the certifications table exist?")?;

        drop(client);
        debug!("certification lookup statement prepared");

        Ok(Self { pool })
    }

    async fn client(&self) -> RepoResult<Object> {
        self.pool.get().await.change_context(RepoError::Connection)
    }
}

impl CertificationRepository for CertificationRepo {
    #[instrument(skip_all, fields(certification_id = %id))]
    async fn exists(&self, id: CertificationId) -> RepoResult<bool> {
        let client = self.client().await?;

        let statement = statements::certification_exists(&client)
            .await
            .change_context(RepoError::Lookup)?;

        let row = client
            .query_one(&statement, &[&id.as_str()])
            .await
            .change_context(RepoError::Lookup)?;

        row.try_get("found").change_context(RepoError::Lookup)
    }
}
