// In-memory stand-ins for the remote APIs, used by unit tests

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::llm::TextModel;
use super::youtube::{ChannelApi, ChannelListResponse, SearchResponse};
use crate::error::{AnalysisError, Result};

pub fn search_json(channel_ids: &[&str]) -> Value {
    let items: Vec<Value> = channel_ids
        .iter()
        .map(|id| json!({ "id": { "kind": "youtube#channel", "channelId": id } }))
        .collect();
    json!({ "items": items })
}

pub fn detail_json(id: &str, views: &str, subscribers: &str, videos: &str) -> Value {
    json!({
        "items": [{
            "id": id,
            "snippet": {
                "title": "Test Channel",
                "description": "All about testing.",
                "customUrl": "@testchannel",
                "thumbnails": {
                    "default": { "url": "https://img/default.jpg" },
                    "medium": { "url": "https://img/medium.jpg" },
                    "high": { "url": "https://img/high.jpg" }
                }
            },
            "statistics": {
                "viewCount": views,
                "subscriberCount": subscribers,
                "videoCount": videos
            },
            "topicDetails": {
                "topicCategories": ["https://en.wikipedia.org/wiki/Technology"]
            }
        }]
    })
}

/// Loopback HTTP server that answers one request with a canned response.
/// Returns the base URL to point a client at.
pub fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{}", addr)
}

/// Loopback listener that accepts connections but never replies.
/// The listener must be kept alive for as long as the client is waiting.
pub fn silent_server() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

/// Client with a short per-call bound so timeouts trip quickly
pub fn short_timeout_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap()
}

// Drain headers and any declared body so closing the socket does not reset it
fn read_request(stream: &mut std::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

pub const VALID_REPORT: &str = r#"Sure! {"summary":"Solid channel.","growthAnalysis":"Growing steadily.","contentStrategy":"Keep tutorials coming.","recommendations":["Post weekly","Use shorts","Collaborate"],"category":"Science & Technology"} Hope that helps."#;

pub struct FakeChannelApi {
    search: Value,
    detail: Value,
    search_error: Mutex<Option<AnalysisError>>,
    searched: Mutex<Vec<String>>,
    listed: Mutex<Vec<String>>,
}

impl FakeChannelApi {
    pub fn new(search: Value, detail: Value) -> Self {
        Self {
            search,
            detail,
            search_error: Mutex::new(None),
            searched: Mutex::new(Vec::new()),
            listed: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_search(err: AnalysisError) -> Self {
        let api = Self::new(search_json(&[]), json!({ "items": [] }));
        *api.search_error.lock().unwrap() = Some(err);
        api
    }

    pub fn searched(&self) -> Vec<String> {
        self.searched.lock().unwrap().clone()
    }

    pub fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelApi for FakeChannelApi {
    async fn search_channels(&self, query: &str) -> Result<SearchResponse> {
        self.searched.lock().unwrap().push(query.to_string());
        if let Some(err) = self.search_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(serde_json::from_value(self.search.clone()).unwrap())
    }

    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse> {
        self.listed.lock().unwrap().push(channel_id.to_string());
        Ok(serde_json::from_value(self.detail.clone()).unwrap())
    }
}

pub struct FakeModel {
    reply: Mutex<Option<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Mutex::new(Some(Ok(text.to_string()))),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: AnalysisError) -> Self {
        Self {
            reply: Mutex::new(Some(Err(err))),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(AnalysisError::AiService("fake model already used".into())))
    }
}
