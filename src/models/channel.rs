// Channel snapshot and derived metrics

use serde::{Deserialize, Serialize};

/// Raw statistics as returned by the YouTube Data API (decimal text)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelStatistics {
    pub view_count: String,
    pub subscriber_count: String,
    pub video_count: String,
}

/// Immutable snapshot of one channel at fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub custom_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub statistics: ChannelStatistics,
    pub topic_categories: Vec<String>,
}

/// Counters after parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelCounts {
    pub views: u64,
    pub subscribers: u64,
    pub videos: u64,
}

/// Earnings band in whole dollars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EarningsRange {
    pub min: u64,
    pub max: u64,
}

/// Performance indicators derived from exactly one `ChannelRecord`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetrics {
    pub counts: ChannelCounts,
    /// Subscribers as a percentage of total views
    pub engagement_rate: f64,
    pub average_views: u64,
    pub estimated_earnings_per_thousand: f64,
    pub estimated_yearly_earnings: EarningsRange,
}
