use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

use crate::domain::IdPolicy;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct CrmConfig {
    pub server: Server,
    pub store: Store,
    pub assets: Assets,
    pub logger: Logger,
}

impl CrmConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::environment())
    }

    /// `CRM__STORE__ID_POLICY=count_based` のように `__` で階層を区切る
    fn environment() -> Environment {
        Environment::with_prefix("CRM").separator("__")
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(config::File::with_name("crm").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize::<CrmConfig>()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.address", "0.0.0.0:8080")?
            .set_default("server.shutdown_grace_secs", 10)?
            .set_default("store.seed", true)?
            .set_default("store.id_policy", "monotonic")?
            .set_default("assets.index", "./static/index.html")?
            .set_default("assets.postman", "./crm-backend.postman_collection.json")?
            .set_default("logger.level", "INFO")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub address: String,
    pub shutdown_grace_secs: u64,
    #[serde(default)]
    pub tls: Option<Tls>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Tls {
    pub cert: String,
    pub key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Store {
    pub seed: bool,
    pub id_policy: IdPolicy,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Assets {
    pub index: String,
    pub postman: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
    #[serde(default)]
    pub file: Option<String>,
}

/// ログレベル。大文字・小文字どちらの表記も受け付ける
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[serde(alias = "trace")]
    Trace,
    #[serde(alias = "debug")]
    Debug,
    #[serde(alias = "info")]
    Info,
    #[serde(alias = "warn")]
    Warn,
    #[serde(alias = "error")]
    Error,
}

impl From<Level> for tracing::Level {
    fn from(value: Level) -> Self {
        match value {
            Level::Trace => Self::TRACE,
            Level::Debug => Self::DEBUG,
            Level::Info => Self::INFO,
            Level::Warn => Self::WARN,
            Level::Error => Self::ERROR,
        }
    }
}
