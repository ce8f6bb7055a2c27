//! [`Config`]-related definitions.

use common::Money;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use rust_decimal::Decimal;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Pricing configuration.
    pub pricing: Pricing,

    /// Image upload configuration.
    pub upload: Upload,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Pricing configuration, in PLN.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pricing {
    /// Price per circuit point new offers start with.
    #[default(Decimal::from(120))]
    pub price_per_point: Decimal,

    /// Connection cost charged per circuit protection, unless an offer fixes
    /// its own.
    #[default(Decimal::ZERO)]
    pub connection_cost_per_protection: Decimal,
}

impl From<Pricing> for service::Config {
    fn from(value: Pricing) -> Self {
        let Pricing {
            price_per_point,
            connection_cost_per_protection,
        } = value;
        Self {
            price_per_point: Money::pln(price_per_point),
            connection_cost_per_protection: Money::pln(
                connection_cost_per_protection,
            ),
        }
    }
}

/// Image upload configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Upload {
    /// Directory the uploaded component images are stored in.
    #[default("public/pictures/electricComponents".to_owned())]
    pub directory: String,

    /// Maximum size of an uploaded image, in bytes.
    #[default(5 * 1024 * 1024)]
    pub max_size: usize,
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,

    /// Maximum number of simultaneously open connections.
    #[default(16)]
    pub max_connections: usize,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
            max_connections,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            pool: Some(service::infra::postgres::PoolConfig::new(
                max_connections,
            )),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Config, Pricing};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("definitely-missing-config").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upload.max_size, 5 * 1024 * 1024);
        assert_eq!(config.pricing.price_per_point, Decimal::from(120));
        assert_eq!(config.postgres.max_connections, 16);
    }

    #[test]
    fn sizes_postgres_pool() {
        let pg = service::infra::postgres::Config::from(super::Postgres {
            max_connections: 4,
            ..super::Postgres::default()
        });

        assert_eq!(pg.pool.map(|p| p.max_size), Some(4));
        assert_eq!(pg.dbname.as_deref(), Some("postgres"));
    }

    #[test]
    fn converts_pricing_into_service_config() {
        let config = service::Config::from(Pricing {
            price_per_point: Decimal::from(150),
            connection_cost_per_protection: Decimal::from(15),
        });

        assert_eq!(config.price_per_point.amount, Decimal::from(150));
        assert_eq!(
            config.connection_cost_per_protection.amount,
            Decimal::from(15),
        );
    }
}
