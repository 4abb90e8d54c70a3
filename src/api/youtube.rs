// YouTube Data API client
// For resolving a handle and fetching channel metadata

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::models::channel::{ChannelRecord, ChannelStatistics};

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Turn user input into a channel handle.
///
/// Anything after the first `@` is the handle, with no further trimming,
/// so `https://youtube.com/@foo/videos` yields `foo/videos`. Input without
/// an `@`, or with nothing after it, passes through unchanged.
pub fn resolve_handle(input: &str) -> String {
    match input.split_once('@') {
        Some((_, handle)) if !handle.is_empty() => handle.to_string(),
        _ => input.to_string(),
    }
}

/// The two remote calls the fetcher needs
#[async_trait]
pub trait ChannelApi: Send + Sync {
    /// `search?type=channel` with the handle as query text
    async fn search_channels(&self, query: &str) -> Result<SearchResponse>;

    /// `channels?part=snippet,statistics,topicDetails` for one id
    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse>;
}

/// reqwest-backed implementation of [`ChannelApi`]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        call: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AnalysisError::from_reqwest(call, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Transport {
                call,
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AnalysisError::from_reqwest(call, e))
    }
}

#[async_trait]
impl ChannelApi for YouTubeClient {
    async fn search_channels(&self, query: &str) -> Result<SearchResponse> {
        self.get_json(
            "search",
            "search",
            &[("part", "snippet"), ("q", query), ("type", "channel")],
        )
        .await
    }

    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse> {
        self.get_json(
            "detail",
            "channels",
            &[("part", "snippet,statistics,topicDetails"), ("id", channel_id)],
        )
        .await
    }
}

/// Resolve a handle to a channel id, then fetch the full record.
/// Zero results at either step is `NotFound`; no step is retried.
pub async fn fetch_channel(api: &dyn ChannelApi, handle: &str) -> Result<ChannelRecord> {
    let search = api.search_channels(handle).await?;

    let channel_id = search
        .items
        .into_iter()
        .next()
        .and_then(|item| item.id.channel_id)
        .ok_or_else(|| AnalysisError::NotFound(handle.to_string()))?;

    debug!(handle, channel_id = %channel_id, "Resolved handle");

    let detail = api.list_channels(&channel_id).await?;
    let item = detail
        .items
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::NotFound(channel_id.clone()))?;

    let record = item.into_record();
    info!(channel_id = %record.id, title = %record.title, "Fetched channel");
    Ok(record)
}

// YouTube API response structures
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: ChannelStatistics,
    #[serde(rename = "topicDetails", default)]
    pub topic_details: Option<TopicDetails>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "customUrl")]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub thumbnails: std::collections::HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicDetails {
    #[serde(rename = "topicCategories", default)]
    pub topic_categories: Vec<String>,
}

impl ChannelItem {
    fn into_record(self) -> ChannelRecord {
        let thumbnails = &self.snippet.thumbnails;
        let thumbnail_url = thumbnails
            .get("high")
            .or_else(|| thumbnails.get("medium"))
            .or_else(|| thumbnails.get("default"))
            .map(|t| t.url.clone());

        ChannelRecord {
            id: self.id,
            title: self.snippet.title,
            description: self.snippet.description,
            custom_url: self.snippet.custom_url,
            thumbnail_url,
            statistics: self.statistics,
            topic_categories: self
                .topic_details
                .map(|t| t.topic_categories)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fakes::{
        detail_json, search_json, serve_once, short_timeout_client, silent_server, FakeChannelApi,
    };

    #[test]
    fn test_resolve_handle() {
        assert_eq!(resolve_handle("@foo"), "foo");
        assert_eq!(resolve_handle("plainhandle"), "plainhandle");
        assert_eq!(resolve_handle("https://youtube.com/@mychannel"), "mychannel");
        // Literal: no trimming after the first `@`
        assert_eq!(resolve_handle("https://youtube.com/@foo/videos"), "foo/videos");
        assert_eq!(resolve_handle("@a@b"), "a@b");
        assert_eq!(resolve_handle("foo@"), "foo@");
    }

    #[tokio::test]
    async fn test_fetch_channel_two_calls() {
        let api = FakeChannelApi::new(search_json(&["UC123"]), detail_json("UC123", "100", "10", "5"));
        let record = fetch_channel(&api, "foo").await.unwrap();

        assert_eq!(record.id, "UC123");
        assert_eq!(record.title, "Test Channel");
        assert_eq!(record.statistics.view_count, "100");
        assert_eq!(record.thumbnail_url.as_deref(), Some("https://img/high.jpg"));
        assert_eq!(record.custom_url.as_deref(), Some("@testchannel"));
        assert_eq!(record.topic_categories.len(), 1);
        assert_eq!(api.searched(), vec!["foo".to_string()]);
        assert_eq!(api.listed(), vec!["UC123".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_channel_takes_first_result() {
        let api = FakeChannelApi::new(search_json(&["UCfirst", "UCsecond"]), detail_json("UCfirst", "1", "1", "1"));
        fetch_channel(&api, "foo").await.unwrap();
        assert_eq!(api.listed(), vec!["UCfirst".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_channel_empty_search_is_not_found() {
        let api = FakeChannelApi::new(search_json(&[]), detail_json("UC123", "1", "1", "1"));
        let err = fetch_channel(&api, "ghost").await.unwrap_err();
        assert!(matches!(err, AnalysisError::NotFound(h) if h == "ghost"));
        assert!(api.listed().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_channel_empty_detail_is_not_found() {
        let api = FakeChannelApi::new(search_json(&["UC123"]), serde_json::json!({ "items": [] }));
        let err = fetch_channel(&api, "foo").await.unwrap_err();
        assert!(matches!(err, AnalysisError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_channel_propagates_transport_error() {
        let api = FakeChannelApi::failing_search(AnalysisError::Transport {
            call: "search",
            detail: "HTTP 403".into(),
        });
        let err = fetch_channel(&api, "foo").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Transport { call: "search", .. }));
        assert!(api.listed().is_empty());
    }

    #[tokio::test]
    async fn test_client_decodes_search_response() {
        let url = serve_once(
            "200 OK",
            r#"{"items":[{"id":{"kind":"youtube#channel","channelId":"UCreal"}}]}"#,
        );
        let client = YouTubeClient::new(short_timeout_client(), "key", url);

        let search = client.search_channels("foo").await.unwrap();
        assert_eq!(search.items[0].id.channel_id.as_deref(), Some("UCreal"));
    }

    #[tokio::test]
    async fn test_client_error_status_is_transport() {
        let url = serve_once("500 Internal Server Error", "boom");
        let client = YouTubeClient::new(short_timeout_client(), "key", url);

        let err = client.search_channels("foo").await.unwrap_err();
        match err {
            AnalysisError::Transport { call, detail } => {
                assert_eq!(call, "search");
                assert!(detail.contains("500"));
                assert!(detail.contains("boom"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_client_slow_response_is_timeout() {
        let (_listener, url) = silent_server();
        let client = YouTubeClient::new(short_timeout_client(), "key", url);

        let err = client.list_channels("UC1").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Timeout { call: "detail" }));
    }

    #[test]
    fn test_thumbnail_fallback_order() {
        let item: ChannelItem = serde_json::from_value(serde_json::json!({
            "id": "UC1",
            "snippet": {
                "title": "T",
                "thumbnails": { "default": { "url": "d" }, "medium": { "url": "m" } }
            },
            "statistics": { "viewCount": "1", "subscriberCount": "1", "videoCount": "1" }
        }))
        .unwrap();
        let record = item.into_record();
        assert_eq!(record.thumbnail_url.as_deref(), Some("m"));
        assert!(record.topic_categories.is_empty());
        assert_eq!(record.description, "");
    }
}
