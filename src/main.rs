// tubelens - YouTube channel analyzer
// Fetches channel statistics, asks Gemini for an analysis and writes a PDF report

mod api;
mod error;
mod features;
mod models;
mod utils;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AnalysisError;
use crate::features::pipeline::Analyzer;
use crate::features::summary::render_summary;
use crate::utils::config::AnalyzerConfig;

/// Analyze a YouTube channel and export an AI-written PDF report
#[derive(Debug, Parser)]
#[command(name = "tubelens", version, about)]
struct Cli {
    /// Channel handle or URL, e.g. `@mychannel` or `https://youtube.com/@mychannel`
    channel: String,

    /// Directory the PDF report is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// YouTube Data API key (defaults to $YOUTUBE_API_KEY)
    #[arg(long)]
    youtube_key: Option<String>,

    /// Gemini API key (defaults to $GEMINI_API_KEY)
    #[arg(long)]
    gemini_key: Option<String>,

    /// Gemini model name (defaults to $GEMINI_MODEL or gemini-2.0-flash)
    #[arg(long)]
    model: Option<String>,

    /// Bound on each remote call, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the summary only, skip the PDF
    #[arg(long)]
    no_pdf: bool,
}

impl Cli {
    fn into_config(self) -> (AnalyzerConfig, String, PathBuf, bool) {
        let mut config = AnalyzerConfig::from_env();
        if let Some(key) = self.youtube_key {
            config.youtube_api_key = key;
        }
        if let Some(key) = self.gemini_key {
            config.gemini_api_key = key;
        }
        if let Some(model) = self.model {
            config.gemini_model = model;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        (config, self.channel, self.out_dir, self.no_pdf)
    }
}

/// Print the one user-facing line for a failure and hand the detail back for logging
fn surface(err: AnalysisError) -> anyhow::Error {
    match &err {
        // Configuration problems are the user's own input; show them as-is
        AnalysisError::Config(_) => eprintln!("{}", err),
        _ => eprintln!("{}", err.user_message()),
    }
    anyhow::Error::new(err)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, channel, out_dir, no_pdf) = cli.into_config();
    info!(?config, "Configuration loaded");

    let analyzer = Analyzer::from_config(&config).map_err(surface)?;

    if no_pdf {
        let session = analyzer.analyze(&channel).await.map_err(surface)?;
        println!("{}", render_summary(&session));
        return Ok(());
    }

    let (session, rendered) = analyzer
        .analyze_and_render(&channel)
        .await
        .map_err(surface)?;
    println!("{}", render_summary(&session));

    let path = rendered.save(&out_dir).await.map_err(surface)?;
    info!(path = %path.display(), size = rendered.bytes.len(), "PDF report written");
    println!("PDF report saved to {}", path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "tubelens=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Analysis aborted: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
