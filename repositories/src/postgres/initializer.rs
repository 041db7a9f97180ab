use crate::postgres::certifications::CertificationRepo;
use crate::postgres::{ConnectionDetails, RepoMigrationErr};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use error_stack::{Report, ResultExt};
use std::str::FromStr;
use tokio_postgres::{Config, NoTls};
use tracing::{debug, info};

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./src/postgres/migrations");
}

#[derive(Debug, thiserror::Error)]
#[error("failed to create repos")]
pub struct RepoCreationErr;

/// Builds the connection pool and the repository on top of it.
///
/// The certifications table is owned by whoever issues certifications, so migrations are
/// off unless asked for. They exist for local development and tests.
#[derive(Debug, Default)]
pub struct RepoCreator {
    pool_size: Option<usize>,
    run_migrations: bool,
}

impl RepoCreator {
    pub fn with_pool_size(mut self, pool_size: Option<usize>) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    pub async fn create(
        self,
        connection_details: ConnectionDetails,
    ) -> Result<CertificationRepo, Report<RepoCreationErr>> {
        let config = match connection_details {
            ConnectionDetails::Url(url) => {
                Config::from_str(&url).change_context(RepoCreationErr)?
            }
        };

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(config, NoTls, mgr_config);
        let mut pool_builder = Pool::builder(mgr);
        if let Some(pool_size) = self.pool_size {
            pool_builder = pool_builder.max_size(pool_size);
        }
        debug!("building connection pool..");
        let pool = pool_builder.build().change_context(RepoCreationErr)?;

        if self.run_migrations {
            info!("running certification store migrations");
            run_migrations(&pool)
                .await
                .change_context(RepoCreationErr)?;
        } else {
            debug!("skipping migrations, the certification store is managed externally");
        }

        CertificationRepo::new(pool)
            .await
            .change_context(RepoCreationErr)
    }
}

// the connection used for migrations is dropped before returning so a pool of size 1
// still has a connection free for the repo
async fn run_migrations(pool: &Pool) -> Result<(), Report<RepoMigrationErr>> {
    let mut handle = pool.get().await.change_context(RepoMigrationErr)?;

    let client = &mut **handle;

    embedded::migrations::runner()
        .run_async(client)
        .await
        .change_context(RepoMigrationErr)?;
    Ok(())
}
