// Metrics calculator
// Derives performance indicators from one channel snapshot, no I/O

use tracing::warn;

use crate::error::{AnalysisError, Result};
use crate::models::channel::{ChannelCounts, ChannelMetrics, ChannelRecord, EarningsRange};

/// Domain-average revenue per thousand views (USD)
pub const CPM_AVERAGE: f64 = 2.50;
/// Conservative revenue per thousand views for the earnings band
pub const CPM_LOW: f64 = 1.50;
/// Optimistic revenue per thousand views for the earnings band
pub const CPM_HIGH: f64 = 3.50;

/// Parse the decimal-text counters of a record
pub fn parse_counts(record: &ChannelRecord) -> Result<ChannelCounts> {
    let stats = &record.statistics;
    Ok(ChannelCounts {
        views: parse_counter(&record.id, "view count", &stats.view_count)?,
        subscribers: parse_counter(&record.id, "subscriber count", &stats.subscriber_count)?,
        videos: parse_counter(&record.id, "video count", &stats.video_count)?,
    })
}

fn parse_counter(channel_id: &str, field: &'static str, raw: &str) -> Result<u64> {
    // The API omits counters a channel has chosen to hide
    if raw.trim().is_empty() {
        warn!(channel_id, field, "Counter missing from channel statistics, likely hidden");
    }

    raw.trim()
        .parse::<u64>()
        .map_err(|_| AnalysisError::InvalidCounter {
            field,
            value: raw.to_string(),
        })
}

/// Compute metrics for a record.
///
/// Zero videos or zero views is an error rather than an infinite or NaN metric.
/// The yearly earnings band is the lifetime view count times fixed CPM bounds.
pub fn calculate_metrics(record: &ChannelRecord) -> Result<ChannelMetrics> {
    let counts = parse_counts(record)?;

    if counts.videos == 0 {
        return Err(AnalysisError::DivisionByZero {
            metric: "average views",
            denominator: "video count",
        });
    }
    if counts.views == 0 {
        return Err(AnalysisError::DivisionByZero {
            metric: "engagement rate",
            denominator: "view count",
        });
    }

    let views = counts.views as f64;
    let average_views = (views / counts.videos as f64).round() as u64;
    let engagement_rate = counts.subscribers as f64 / views * 100.0;

    let thousands = views / 1000.0;
    let estimated_yearly_earnings = EarningsRange {
        min: (thousands * CPM_LOW).round() as u64,
        max: (thousands * CPM_HIGH).round() as u64,
    };

    Ok(ChannelMetrics {
        counts,
        engagement_rate,
        average_views,
        estimated_earnings_per_thousand: CPM_AVERAGE,
        estimated_yearly_earnings,
    })
}
