// Dashboard summary printed after an analysis

use std::fmt::Write;

use crate::models::session::AnalysisSession;
use crate::utils::formatters::{
    excerpt_lines, format_dollars, format_dollars_cents, format_number, format_percent, truncate,
};

/// Topic categories arrive as Wikipedia URLs; keep the article name
fn topic_label(topic: &str) -> &str {
    topic.rsplit('/').next().unwrap_or(topic)
}

/// Plain-text overview of a finished session: channel card, metrics grid and analysis
pub fn render_summary(session: &AnalysisSession) -> String {
    let channel = &session.channel;
    let metrics = &session.metrics;
    let report = &session.report;
    let counts = &metrics.counts;

    let mut out = String::new();

    // Infallible: writing into a String
    let _ = writeln!(out, "{}", channel.title);
    if let Some(custom_url) = &channel.custom_url {
        let _ = writeln!(out, "{}", custom_url);
    }
    for line in excerpt_lines(&channel.description, 2) {
        let _ = writeln!(out, "  {}", truncate(line, 100));
    }
    let _ = writeln!(out, "Category: {}", report.category);
    if !channel.topic_categories.is_empty() {
        let topics: Vec<&str> = channel.topic_categories.iter().map(|t| topic_label(t)).collect();
        let _ = writeln!(out, "Topics: {}", topics.join(", "));
    }
    if let Some(url) = &channel.thumbnail_url {
        let _ = writeln!(out, "Thumbnail: {}", url);
    }
    let _ = writeln!(out);

    let rows = [
        ("Subscribers", format_number(counts.subscribers)),
        ("Videos", format_number(counts.videos)),
        ("Total Views", format_number(counts.views)),
        ("Average Views", format_number(metrics.average_views)),
        ("Engagement Rate", format_percent(metrics.engagement_rate)),
        (
            "Revenue per 1000 Views",
            format_dollars_cents(metrics.estimated_earnings_per_thousand),
        ),
        (
            "Estimated Yearly Earnings",
            format!(
                "{} - {}",
                format_dollars(metrics.estimated_yearly_earnings.min),
                format_dollars(metrics.estimated_yearly_earnings.max)
            ),
        ),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{:<26}{}", label, value);
    }

    let _ = writeln!(out);
    for (heading, body) in [
        ("Channel Summary", &report.summary),
        ("Growth Analysis", &report.growth_analysis),
        ("Content Strategy", &report.content_strategy),
    ] {
        let _ = writeln!(out, "{}\n  {}\n", heading, body);
    }

    let _ = writeln!(out, "Key Recommendations");
    for (i, rec) in report.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, rec);
    }

    out
}
