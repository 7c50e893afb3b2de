mod types;
mod loader;
mod validators;

pub use types::*;
pub use loader::{load_config, get_config_path};
pub use validators::{validate_config, parse_timeout};

use anyhow::Result;
use std::time::Duration;

impl Config {
    pub fn load() -> Result<Self> {
        let config = load_config()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Config pointing at another server; every other setting stays default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.server.base_url = base_url.into();
        config
    }

    pub fn health_timeout(&self) -> Result<Duration> {
        parse_timeout("health_timeout", &self.server.health_timeout)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        parse_timeout("request_timeout", &self.server.request_timeout)
    }

    /// Endpoint URL under the configured base, tolerating a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
