// Analysis pipeline
// resolve → fetch → metrics → AI report, strictly in sequence

use std::sync::Arc;

use tracing::{error, info};

use crate::api::llm::{GeminiClient, TextModel};
use crate::api::youtube::{fetch_channel, resolve_handle, ChannelApi, YouTubeClient};
use crate::error::Result;
use crate::features::metrics::calculate_metrics;
use crate::features::report::generate_report;
use crate::models::session::AnalysisSession;
use crate::utils::config::AnalyzerConfig;
use crate::utils::pdf_report::{render_report, RenderedReport};

/// Runs analyses against injected API clients. Holds no per-request state,
/// so one analyzer can serve concurrent requests.
#[derive(Clone)]
pub struct Analyzer {
    channels: Arc<dyn ChannelApi>,
    model: Arc<dyn TextModel>,
}

impl Analyzer {
    pub fn new(channels: Arc<dyn ChannelApi>, model: Arc<dyn TextModel>) -> Self {
        Self { channels, model }
    }

    /// Build the real YouTube and Gemini clients from a validated config
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let http_client = config.http_client()?;

        let channels = YouTubeClient::new(
            http_client.clone(),
            config.youtube_api_key.clone(),
            config.youtube_base_url.clone(),
        );
        let model = GeminiClient::new(
            http_client,
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        );

        Ok(Self::new(Arc::new(channels), Arc::new(model)))
    }

    /// Analyze one channel. Any stage failure aborts the rest and is returned once.
    pub async fn analyze(&self, input: &str) -> Result<AnalysisSession> {
        let handle = resolve_handle(input);
        info!(input, handle = %handle, "Starting channel analysis");

        let result = self.run(&handle).await;
        if let Err(e) = &result {
            error!(handle = %handle, "Channel analysis failed: {}", e);
        }
        result
    }

    async fn run(&self, handle: &str) -> Result<AnalysisSession> {
        let channel = fetch_channel(self.channels.as_ref(), handle).await?;
        let metrics = calculate_metrics(&channel)?;
        let report = generate_report(self.model.as_ref(), &channel, &metrics).await?;

        info!(
            channel_id = %channel.id,
            category = %report.category,
            "Channel analysis complete"
        );

        Ok(AnalysisSession::new(channel, metrics, report))
    }

    /// Analyze and render in one go
    pub async fn analyze_and_render(&self, input: &str) -> Result<(AnalysisSession, RenderedReport)> {
        let session = self.analyze(input).await?;
        let rendered = render_report(&session)?;
        Ok((session, rendered))
    }
}
