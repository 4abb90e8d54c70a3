// AI report generator
// Builds the analysis prompt, calls the model and validates what comes back

use tracing::{debug, error, warn};

use crate::api::llm::TextModel;
use crate::error::{AnalysisError, Result};
use crate::models::channel::{ChannelMetrics, ChannelRecord};
use crate::models::report::AIReport;
use crate::utils::formatters::{format_dollars, format_number, format_percent, truncate};

/// Number of recommendations the prompt asks for
pub const RECOMMENDATION_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

const EXAMPLE_PAYLOAD: &str = r#"{
  "summary": "Channel analysis here...",
  "growthAnalysis": "Growth analysis here...",
  "contentStrategy": "Strategy insights here...",
  "recommendations": ["Recommendation 1", "Recommendation 2", "Recommendation 3"],
  "category": "Category name here"
}"#;

/// Build the single-turn prompt for one channel
pub fn build_prompt(record: &ChannelRecord, metrics: &ChannelMetrics) -> String {
    let counts = &metrics.counts;
    let earnings = &metrics.estimated_yearly_earnings;

    format!(
        "Analyze this YouTube channel and provide insights in JSON format. \
Include these exact keys: summary, growthAnalysis, contentStrategy, recommendations (as array), category.

Channel Details:
- Name: {title}
- Description: {description}
- Subscribers: {subscribers}
- Total Views: {views}
- Videos: {videos}
- Engagement Rate: {engagement}
- Average Views: {average}
- Est. Yearly Earnings: {min} - {max}

Provide:
1. summary: A detailed analysis of current performance (2-3 sentences)
2. growthAnalysis: Growth trends and potential (2-3 sentences)
3. contentStrategy: Strategic insights and opportunities (2-3 sentences)
4. recommendations: Array of {low}-{high} specific, actionable recommendations
5. category: Best-fitting YouTube category based on content/description

Response must be valid JSON. Example format:
{example}",
        title = record.title,
        description = record.description,
        subscribers = format_number(counts.subscribers),
        views = format_number(counts.views),
        videos = counts.videos,
        engagement = format_percent(metrics.engagement_rate),
        average = format_number(metrics.average_views),
        min = format_dollars(earnings.min),
        max = format_dollars(earnings.max),
        low = RECOMMENDATION_RANGE.start(),
        high = RECOMMENDATION_RANGE.end(),
        example = EXAMPLE_PAYLOAD,
    )
}

/// Find the first complete brace-delimited object in free text.
///
/// Braces inside JSON string literals (including escaped quotes) do not count
/// towards nesting. Returns `None` if no `{` exists or the first one never closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Turn raw model output into a validated report
pub fn parse_report(text: &str) -> Result<AIReport> {
    let json = extract_json_object(text).ok_or_else(|| {
        AnalysisError::MalformedResponse("no JSON object found in model output".to_string())
    })?;

    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| AnalysisError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let report = AIReport::from_value(value)?;

    if !RECOMMENDATION_RANGE.contains(&report.recommendations.len()) {
        warn!(
            count = report.recommendations.len(),
            "Model returned an unexpected number of recommendations"
        );
    }

    Ok(report)
}

/// Request and validate a report. Failures are logged with the raw output;
/// callers only ever show the generic message.
pub async fn generate_report(
    model: &dyn TextModel,
    record: &ChannelRecord,
    metrics: &ChannelMetrics,
) -> Result<AIReport> {
    let prompt = build_prompt(record, metrics);

    let text = model.generate(&prompt).await.map_err(|e| {
        error!(channel_id = %record.id, "AI request failed: {}", e);
        e
    })?;

    debug!(channel_id = %record.id, response_len = text.len(), "Received AI response");

    parse_report(&text).map_err(|e| {
        error!(
            channel_id = %record.id,
            response = %truncate(&text, 500),
            "Rejected AI response: {}",
            e
        );
        e
    })
}
