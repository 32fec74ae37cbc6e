//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;
use healthflow_db::DbConfig;
use healthflow_surge::SurgeConfig;

use crate::api::ApiConfig;
use crate::telemetry::LogFormat;

/// HealthFlow server options. Every flag can also be set through the
/// matching `HEALTHFLOW_*` environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "healthflow", version, about = "HealthFlow resource allocation server")]
pub struct ServerArgs {
    /// Address the HTTP API listens on
    #[arg(long, env = "HEALTHFLOW_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// SurrealDB endpoint: mem://, surrealkv://<path> or ws://host:port
    #[arg(
        long,
        env = "HEALTHFLOW_DB_URL",
        default_value = "surrealkv://data/healthflow.db"
    )]
    pub db_url: String,

    /// SurrealDB namespace
    #[arg(long, env = "HEALTHFLOW_DB_NAMESPACE", default_value = "healthflow")]
    pub db_namespace: String,

    /// SurrealDB database
    #[arg(long, env = "HEALTHFLOW_DB_NAME", default_value = "main")]
    pub db_name: String,

    /// Root user for remote SurrealDB engines
    #[arg(long, env = "HEALTHFLOW_DB_USER")]
    pub db_user: Option<String>,

    /// Root password for remote SurrealDB engines
    #[arg(long, env = "HEALTHFLOW_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Share of total capacity released by a surge, in percent
    #[arg(long, env = "HEALTHFLOW_SURGE_PERCENT", default_value_t = 20)]
    pub surge_percent: u32,

    /// Maximum notifications returned by the notifications endpoint
    #[arg(long, env = "HEALTHFLOW_NOTIFICATION_LIMIT", default_value_t = 20)]
    pub notification_limit: u32,

    /// Log output format
    #[arg(long, env = "HEALTHFLOW_LOG_FORMAT", value_enum, default_value = "json")]
    pub log_format: LogFormat,
}

impl ServerArgs {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_name.clone(),
            username: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }

    pub fn surge_config(&self) -> SurgeConfig {
        SurgeConfig {
            surge_percent: self.surge_percent,
            ..SurgeConfig::default()
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            notification_limit: self.notification_limit,
        }
    }
}
