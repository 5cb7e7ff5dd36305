//! Configuration model loaded from external sources.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to load configuration: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

#[derive(Clone, Debug, Deserialize)]
/// Settings of the dashboard client.
pub struct DashboardConfig {
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub jwt_secret: String,
    /// Service token for non-interactive callers such as `check_api`.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_sign_in_url")]
    pub sign_in_url: String,
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    crate::DEFAULT_PAGE_SIZE
}

fn default_sign_in_url() -> String {
    "/auth/signin".to_string()
}

fn default_dashboard_url() -> String {
    "/dashboard".to_string()
}

impl DashboardConfig {
    /// Loads `config/default.yaml`, the `APP_ENV` profile (defaults to
    /// `local`) and `APP_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(Path::new("config"), &app_env)
    }

    pub fn load_from(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default = dir.join("default");
        let profile = dir.join(app_env);

        let settings = Config::builder()
            .add_source(File::with_name(&default.to_string_lossy()))
            .add_source(File::with_name(&profile.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
