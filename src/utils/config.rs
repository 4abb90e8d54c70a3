// Centralized configuration for the analyzer

use std::env;
use std::time::Duration;

use crate::api::llm::GEMINI_API_BASE;
use crate::api::youtube::YOUTUBE_API_BASE;
use crate::error::{AnalysisError, Result};

/// Default Gemini model for report generation
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Bound applied to each remote call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request
pub const USER_AGENT: &str = "tubelens/0.1";

/// Everything the pipeline needs from the outside world.
/// Built once by the caller and passed in; the pipeline never reads the environment.
#[derive(Clone)]
pub struct AnalyzerConfig {
    pub youtube_api_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub request_timeout: Duration,
    pub youtube_base_url: String,
    pub gemini_base_url: String,
}

// Keys stay out of logs
impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("youtube_api_key", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("request_timeout", &self.request_timeout)
            .field("youtube_base_url", &self.youtube_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .finish()
    }
}

impl AnalyzerConfig {
    pub fn new(youtube_api_key: impl Into<String>, gemini_api_key: impl Into<String>) -> Self {
        Self {
            youtube_api_key: youtube_api_key.into(),
            gemini_api_key: gemini_api_key.into(),
            gemini_model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            youtube_base_url: YOUTUBE_API_BASE.to_string(),
            gemini_base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Load from `.env` and the process environment.
    /// Missing keys are left empty and caught by [`AnalyzerConfig::validate`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::new(
            env::var("YOUTUBE_API_KEY").unwrap_or_default(),
            env::var("GEMINI_API_KEY").unwrap_or_default(),
        );

        if let Ok(model) = env::var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.gemini_model = model;
            }
        }

        if let Some(secs) = env::var("TUBELENS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }

        config
    }

    /// Reject configurations that would fail on the first remote call
    pub fn validate(&self) -> Result<()> {
        if self.youtube_api_key.trim().is_empty() {
            return Err(AnalysisError::Config("YouTube API key is required".to_string()));
        }
        if self.gemini_api_key.trim().is_empty() {
            return Err(AnalysisError::Config("Gemini API key is required".to_string()));
        }
        if self.gemini_model.trim().is_empty() {
            return Err(AnalysisError::Config("Gemini model name is empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(AnalysisError::Config("request timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Shared HTTP client with the per-call bound applied
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| AnalysisError::Config(format!("failed to create HTTP client: {}", e)))
    }
}
