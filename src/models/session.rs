// Aggregate handed to the renderer

use super::channel::{ChannelMetrics, ChannelRecord};
use super::report::AIReport;

/// One complete analysis: record, metrics and report.
/// Only built once every pipeline stage has succeeded.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub channel: ChannelRecord,
    pub metrics: ChannelMetrics,
    pub report: AIReport,
}

impl AnalysisSession {
    pub fn new(channel: ChannelRecord, metrics: ChannelMetrics, report: AIReport) -> Self {
        Self {
            channel,
            metrics,
            report,
        }
    }
}
