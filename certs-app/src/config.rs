use certs_routes::cors::{ALLOW_ANY_ORIGIN, CorsPolicy};
use error_stack::{IntoReport, Report, ResultExt};
use std::str::FromStr;
use tracing::info;

const DATABASE_URL: &str = "DATABASE_URL";
const CERTS_PORT: &str = "CERTS_PORT";
const CERTS_DB_POOL_SIZE: &str = "CERTS_DB_POOL_SIZE";
const CERTS_ALLOWED_ORIGIN: &str = "CERTS_ALLOWED_ORIGIN";
const CERTS_METRICS: &str = "CERTS_METRICS";
const CERTS_RUN_MIGRATIONS: &str = "CERTS_RUN_MIGRATIONS";

const DEFAULT_PORT: u16 = 3001;

pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} has an invalid value")]
    Invalid(&'static str),
}

/// Everything the server needs, read once at startup and never changed afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub pool_size: Option<usize>,
    pub cors: CorsPolicy,
    pub metrics_enabled: bool,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL))?;

        let allowed_origin = lookup(CERTS_ALLOWED_ORIGIN).unwrap_or_else(|| {
            info!("{CERTS_ALLOWED_ORIGIN} not specified, allowing any origin");
            ALLOW_ANY_ORIGIN.to_string()
        });
        let cors = CorsPolicy::with_origin(&allowed_origin)
            .change_context(ConfigError::Invalid(CERTS_ALLOWED_ORIGIN))?;

        Ok(Self {
            database_url,
            port: parse_or(&lookup, CERTS_PORT, DEFAULT_PORT)?,
            pool_size: parse_opt(&lookup, CERTS_DB_POOL_SIZE)?,
            cors,
            metrics_enabled: parse_or(&lookup, CERTS_METRICS, true)?,
            run_migrations: parse_or(&lookup, CERTS_RUN_MIGRATIONS, false)?,
        })
    }
}

fn parse_opt<F, T>(lookup: &F, key: &'static str) -> ConfigResult<Option<T>>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            ConfigError::Invalid(key)
                .into_report()
                .attach(format!("could not parse '{raw}'"))
        }),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> ConfigResult<T>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or_else(|| {
        info!("{key} not specified, using default: {default}");
        default
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(vars: &[(&'static str, &str)]) -> ConfigResult<AppConfig> {
        let vars: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[(DATABASE_URL, "postgresql://localhost/certs")])
            .expect("valid config");

        assert_eq!("postgresql://localhost/certs", config.database_url);
        assert_eq!(DEFAULT_PORT, config.port);
        assert_eq!(None, config.pool_size);
        assert!(config.metrics_enabled);
        assert!(!config.run_migrations);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = config_from(&[]).expect_err("database url is required");

        assert!(matches!(
            err.current_context(),
            ConfigError::Missing(DATABASE_URL)
        ));
    }

    #[test]
    fn values_are_read_from_env() {
        let config = config_from(&[
            (DATABASE_URL, "postgresql://db/certs"),
            (CERTS_PORT, "8080"),
            (CERTS_DB_POOL_SIZE, "4"),
            (CERTS_METRICS, "false"),
            (CERTS_RUN_MIGRATIONS, "true"),
        ])
        .expect("valid config");

        assert_eq!(8080, config.port);
        assert_eq!(Some(4), config.pool_size);
        assert!(!config.metrics_enabled);
        assert!(config.run_migrations);
    }

    #[rstest]
    #[case::port(CERTS_PORT, "not-a-port")]
    #[case::port_out_of_range(CERTS_PORT, "70000")]
    #[case::pool_size(CERTS_DB_POOL_SIZE, "-1")]
    #[case::metrics(CERTS_METRICS, "yes")]
    #[case::origin(CERTS_ALLOWED_ORIGIN, "https://bad\norigin")]
    fn invalid_values_are_errors(#[case] key: &'static str, #[case] value: &str) {
        let err = config_from(&[(DATABASE_URL, "postgresql://db/certs"), (key, value)])
            .expect_err("invalid value rejected");

        assert!(matches!(err.current_context(), ConfigError::Invalid(k) if *k == key));
    }
}
