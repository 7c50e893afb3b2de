use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";
pub const DEFAULT_MODEL: &str = "llama-3.2-1b-instruct";
pub const DEFAULT_HEALTH_TIMEOUT: &str = "5s";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "120s";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub model: String,
    /// humantime string, e.g. "5s"
    pub health_timeout: String,
    /// humantime string, e.g. "2m"
    pub request_timeout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT.to_string(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
