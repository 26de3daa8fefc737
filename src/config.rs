use config::{Config, Environment, File, FileFormat};
use model::RefetchPolicy;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Base URL of the catalog backend when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const ENV_PREFIX: &str = "CATALOG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Dashboard settings.
///
/// Read from an optional `dashboard.toml` in the working directory, then
/// overridden by `CATALOG_*` environment variables (`CATALOG_API_BASE_URL`,
/// `CATALOG_REFETCH_POLICY`, `CATALOG_PAGE_SIZE`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub refetch_policy: RefetchPolicy,
    /// Initial rows per page of the content table.
    pub page_size: usize,
    /// Also fetch the server-rendered chart when filters are applied.
    pub fetch_chart_image: bool,
    /// Per-request timeout; unset means wait indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refetch_policy: RefetchPolicy::default(),
            page_size: 10,
            fetch_chart_image: false,
            request_timeout_ms: None,
        }
    }
}

impl DashboardConfig {
    /// Loads `.env`, `dashboard.toml` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .add_source(File::with_name("dashboard").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let config = Self::finish(settings)?;
        info!(api_base_url = %config.api_base_url, refetch_policy = %config.refetch_policy, "Configuration loaded");
        Ok(config)
    }

    /// Builds a configuration from TOML text and an explicit variable map
    /// instead of the filesystem and process environment.
    pub fn from_sources<I, K, V>(toml: &str, env: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = env
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?;
        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        debug!(?config, "Configuration validated");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
