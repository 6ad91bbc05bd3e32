use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub twse: TwseConfig,
    pub broadcast: BroadcastConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwseConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// "twse" for the live quote API, "fixed" for the placeholder table.
    pub kind: String,
}

/// Chat platform credentials. Read straight from the environment because
/// both are required and their absence must stop the process before it
/// starts serving.
#[derive(Debug, Clone)]
pub struct LineConfig {
    pub channel_access_token: String,
    pub channel_secret: String,
}

impl LineConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let channel_access_token = env::var("LINE_CHANNEL_ACCESS_TOKEN")
            .map_err(|_| anyhow::anyhow!("LINE_CHANNEL_ACCESS_TOKEN is not set"))?;
        let channel_secret = env::var("LINE_CHANNEL_SECRET")
            .map_err(|_| anyhow::anyhow!("LINE_CHANNEL_SECRET is not set"))?;
        Ok(Self {
            channel_access_token,
            channel_secret,
        })
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 10000)?
            .set_default("twse.base_url", "https://mis.twse.com.tw")?
            .set_default("twse.timeout_secs", 10)?
            .set_default("broadcast.hour", 9)?
            .set_default("broadcast.minute", 0)?
            .set_default("provider.kind", "twse")?
            // Add in settings from configuration file
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from environment variables
            .add_source(Environment::with_prefix("STOCKBOT").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
