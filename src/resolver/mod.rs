//! Fetch → detect → parse → fan-out → assemble.
//!
//! Every step short-circuits on the first failure. The only place where
//! work runs concurrently is the program detail fan-out in `programs`.

mod episodes;
mod listings;
mod programs;

use std::sync::Arc;

use serde_json::json;

use crate::transport::{RequestDescriptor, Transport};
use crate::Result;

/// Where each resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Site root; the home page lists every program.
    pub base_url: String,
    /// Per-video API root, `{api_url}/video/{uuid}`.
    pub api_url: String,
    pub search_url: String,
    pub categories_url: String,
    pub sites: Vec<String>,
}

impl Endpoints {
    /// Absolute URL of a page path. Absolute input is returned unchanged.
    pub fn page_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub fn video_url(&self, uuid: &str) -> String {
        join_url(&self.api_url, &format!("video/{}", uuid))
    }

    /// Fixed-shape search body: first page, newest first.
    pub fn search_body(&self, query: &str) -> serde_json::Value {
        json!({
            "query": query,
            "sites": self.sites,
            "page": 0,
            "mode": "byDate",
        })
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Resolves catalog entities over a `Transport`. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ContentResolver {
    transport: Arc<dyn Transport>,
    endpoints: Arc<Endpoints>,
}

impl ContentResolver {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints: Arc::new(endpoints),
        }
    }

    async fn get(&self, url: &str) -> Result<String> {
        self.transport.fetch(&RequestDescriptor::get(url)).await
    }
}
