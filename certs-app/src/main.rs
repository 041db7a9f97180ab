use axum::Router;
use certs_routes::state::CertAppState;
use config::AppConfig;
use dotenv::dotenv;
use engine::app::{self, AppError, AppProperties, AppResult};
use error_stack::ResultExt;
use error_stack::fmt::ColorMode;
use repositories::postgres::ConnectionDetails;
use repositories::postgres::certifications::CertificationRepo;
use repositories::postgres::initializer::RepoCreator;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

#[tokio::main]
async fn main() {
    match try_main().await {
        Ok(_) => info!("certification verifier shutting down"),
        Err(e) => {
            error!("certification verifier exited with error: {e:?}");
        }
    }
}

fn init_logging() {
    error_stack::Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("CERTS_LOG"))
        .init();
}

async fn try_main() -> AppResult<()> {
    init_logging();

    if let Err(e) = dotenv() {
        warn!("failed to load .env file: {e}");
    }

    let config = AppConfig::from_env().change_context(AppError)?;

    let routes = build_routes(&config).await?;

    app::run(routes, AppProperties { port: config.port }).await
}

async fn build_routes(config: &AppConfig) -> AppResult<Router> {
    let repo = build_repo(config).await?;

    debug!("building routes..");
    let app_state = if config.metrics_enabled {
        CertAppState::new_with_metrics(repo, config.cors.clone()).change_context(AppError)?
    } else {
        CertAppState::new_without_metrics(repo, config.cors.clone())
    };

    Ok(certs_routes::routes::build(app_state)).inspect(|_| debug!("routes built"))
}

#[instrument(skip_all)]
async fn build_repo(config: &AppConfig) -> AppResult<CertificationRepo> {
    debug!("initializing repository");
    RepoCreator::default()
        .with_pool_size(config.pool_size)
        .with_migrations(config.run_migrations)
        .create(ConnectionDetails::Url(config.database_url.clone()))
        .await
        .change_context(AppError)
}
