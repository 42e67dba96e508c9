//! Application configuration. API credentials, endpoint, timeouts, paths.

use serde::Deserialize;

/// Gemini REST base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Whole-request timeout. Grounded generation of a full report is slow.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_REPORTS_DIR: &str = "./reports";

/// Environment variables checked, in order, when `api_key` is not configured.
const API_KEY_ENV_FALLBACKS: [&str; 3] = ["COMPETE_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Generative-model API key. Read from COMPETE_API_KEY (or GEMINI_API_KEY / API_KEY).
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL. Read from COMPETE_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model name. Read from COMPETE_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Read from COMPETE_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Read from COMPETE_CONNECT_TIMEOUT_SECS.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// Where exported Markdown documents go. Read from COMPETE_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// Use the offline mock model instead of the real service. Read from COMPETE_MOCK_AI.
    #[serde(default)]
    pub mock_ai: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("COMPETE").try_parsing(true));
        if let Ok(path) = std::env::var("COMPETE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the API key from config or the first non-empty fallback env var.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_FALLBACKS
                    .iter()
                    .filter_map(|name| std::env::var(name).ok())
                    .find(|k| !k.trim().is_empty())
            })
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn connect_timeout_secs_or_default(&self) -> u64 {
        self.connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS)
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORTS_DIR.to_string())
    }

    pub fn use_mock_ai(&self) -> bool {
        self.mock_ai.unwrap_or(false)
    }
}
