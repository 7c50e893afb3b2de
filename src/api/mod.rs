mod request;
mod types;

pub use request::{build_fix_request, parse_fix, ANALYSIS_TOOL_NAME, SUPPORTED_LANGUAGES};
pub use types::*;

use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use crate::config::Config;
use crate::error::{FixError, Result};

/// Client for a local chat-completions server (LM Studio or compatible).
pub struct InferenceClient {
    http: Client,
    base_url: String,
    models_url: String,
    completions_url: String,
    model: String,
    temperature: f32,
    health_timeout: Duration,
    request_timeout: Duration,
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let health_timeout = config
            .health_timeout()
            .map_err(|e| FixError::InvalidConfig(format!("{:#}", e)))?;
        let request_timeout = config
            .request_timeout()
            .map_err(|e| FixError::InvalidConfig(format!("{:#}", e)))?;

        let mut builder = Client::builder();
        if is_loopback(&config.server.base_url) {
            // A local server must not be routed through HTTP(S)_PROXY.
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| FixError::RequestBuildFailure(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.server.base_url.clone(),
            models_url: config.endpoint("models"),
            completions_url: config.endpoint("chat/completions"),
            model: config.server.model.clone(),
            temperature: config.generation.temperature,
            health_timeout,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True only if `GET /models` answers 200 within the health timeout.
    pub async fn health_check(&self) -> bool {
        debug!(url = %self.models_url, timeout = ?self.health_timeout, "checking server health");
        match self.http.get(&self.models_url).timeout(self.health_timeout).send().await {
            Ok(resp) => {
                debug!(status = %resp.status(), "health check answered");
                resp.status() == StatusCode::OK
            }
            Err(e) => {
                debug!(error = %e, "health check failed");
                false
            }
        }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        if self.health_check().await {
            Ok(())
        } else {
            Err(FixError::ServerUnavailable(self.base_url.clone()))
        }
    }

    /// Post one chat request. A single attempt; failures are returned as-is.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = serde_json::to_vec(request)
            .map_err(|e| FixError::RequestBuildFailure(e.to_string()))?;

        let http_request = self
            .http
            .post(&self.completions_url)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(self.request_timeout)
            .body(body)
            .build()
            .map_err(|e| FixError::RequestBuildFailure(e.to_string()))?;

        info!(url = %self.completions_url, model = %request.model, "requesting fix");
        let resp = self.http.execute(http_request).await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(FixError::NonSuccessStatus { status, body });
        }

        let response: ChatResponse = resp.json().await?;
        debug!(id = %response.id, choices = response.choices.len(), "chat response received");
        Ok(response)
    }

    pub async fn request_fix(&self, code: &str) -> Result<CodeFix> {
        let request = build_fix_request(code, &self.model, self.temperature);
        let response = self.chat(&request).await?;
        parse_fix(&response, code)
    }
}

fn is_loopback(base_url: &str) -> bool {
    match reqwest::Url::parse(base_url).ok().and_then(|url| url.host_str().map(str::to_owned)) {
        Some(host) => {
            host == "localhost"
                || host
                    .trim_matches(|c| c == '[' || c == ']')
                    .parse::<std::net::IpAddr>()
                    .map_or(false, |ip| ip.is_loopback())
        }
        None => false,
    }
}
