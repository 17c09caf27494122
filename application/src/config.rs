//! [`Config`]-related definitions.

use std::time;

use common::Percent;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::{Deserialize, Deserializer};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Postgres configuration.
    #[serde(default)]
    pub postgres: Postgres,

    /// Log configuration.
    #[serde(default)]
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

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// GST rate (in percents) applied to the cost of extra lines or words.
    #[default(service::Config::default().gst_rate)]
    #[serde(deserialize_with = "deserialize_percent")]
    pub gst_rate: Percent,

    /// Receipt totals configuration.
    pub totals: Totals,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            gst_rate,
            totals: Totals { ttl },
        } = value;
        Self {
            gst_rate,
            totals_ttl: ttl,
        }
    }
}

/// Receipt totals configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Totals {
    /// Period the calculated totals stay cached for.
    #[default(service::Config::default().totals_ttl)]
    #[serde(with = "humantime_serde")]
    pub ttl: time::Duration,
}

/// Deserializes a [`Percent`] out of its string or numeric representation.
fn deserialize_percent<'de, D>(deserializer: D) -> Result<Percent, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(u64),
        Float(f64),
    }

    let raw = match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    };
    raw.parse().map_err(serde::de::Error::custom)
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
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
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
