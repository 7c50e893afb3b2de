use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use crate::config::types::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    let url = reqwest::Url::parse(&config.server.base_url)
        .with_context(|| format!("base_url is not a valid URL: {}", config.server.base_url))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("base_url must use http or https, got {}", url.scheme()));
    }

    if config.server.model.trim().is_empty() {
        return Err(anyhow!("model must not be empty"));
    }

    parse_timeout("health_timeout", &config.server.health_timeout)?;
    parse_timeout("request_timeout", &config.server.request_timeout)?;

    let temperature = config.generation.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        return Err(anyhow!("temperature must be between 0.0 and 2.0, got {}", temperature));
    }

    Ok(())
}

pub fn parse_timeout(name: &str, value: &str) -> Result<Duration> {
    let duration = humantime::parse_duration(value)
        .with_context(|| format!("{} is not a valid duration: {:?}", name, value))?;
    if duration.is_zero() {
        return Err(anyhow!("{} must be greater than zero", name));
    }
    Ok(duration)
}
