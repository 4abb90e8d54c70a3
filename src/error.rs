// Error types for the analysis pipeline

use thiserror::Error;

/// User-facing message for lookups that matched nothing
pub const MSG_NOT_FOUND: &str = "Channel not found. Please check the handle and try again.";
/// User-facing message for transport, timeout and metric failures
pub const MSG_ANALYSIS_FAILED: &str =
    "Error analyzing channel. Please check your inputs and try again.";
/// User-facing message for anything that went wrong producing the AI report
pub const MSG_REPORT_FAILED: &str = "Failed to generate AI report. Please try again.";

/// Every way a single analysis request can fail
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Search or detail lookup returned zero items
    #[error("channel not found: {0}")]
    NotFound(String),

    /// Remote call answered with a non-success status or broke mid-flight
    #[error("{call} request failed: {detail}")]
    Transport { call: &'static str, detail: String },

    /// Remote call exceeded the configured bound
    #[error("{call} request timed out")]
    Timeout { call: &'static str },

    /// The generative model call itself failed
    #[error("AI service error: {0}")]
    AiService(String),

    /// No parseable JSON object in the model output
    #[error("malformed AI response: {0}")]
    MalformedResponse(String),

    /// JSON parsed but a required field is missing or has the wrong type
    #[error("invalid AI response structure: {0}")]
    InvalidStructure(String),

    /// A metric denominator was zero
    #[error("cannot compute {metric}: {denominator} is zero")]
    DivisionByZero {
        metric: &'static str,
        denominator: &'static str,
    },

    /// A statistics counter was missing or not a decimal integer
    #[error("invalid {field} value {value:?}")]
    InvalidCounter { field: &'static str, value: String },

    /// Configuration was incomplete before any remote call was made
    #[error("configuration error: {0}")]
    Config(String),

    /// PDF backend failure
    #[error("render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Map a reqwest failure for the named call, keeping timeouts distinct
    pub fn from_reqwest(call: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Timeout { call }
        } else {
            AnalysisError::Transport {
                call,
                detail: err.to_string(),
            }
        }
    }

    /// The only text ever shown to the user; the `Display` form goes to the log
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::NotFound(_) => MSG_NOT_FOUND,
            AnalysisError::AiService(_)
            | AnalysisError::MalformedResponse(_)
            | AnalysisError::InvalidStructure(_) => MSG_REPORT_FAILED,
            AnalysisError::Transport { .. }
            | AnalysisError::Timeout { .. }
            | AnalysisError::DivisionByZero { .. }
            | AnalysisError::InvalidCounter { .. }
            | AnalysisError::Config(_)
            | AnalysisError::Render(_)
            | AnalysisError::Io(_) => MSG_ANALYSIS_FAILED,
        }
    }
}

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, AnalysisError>;
