use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::resolver::Endpoints;
use crate::settings::Settings;
use crate::transport::{classify, RequestDescriptor, Transport};
use crate::Result;

enum Canned {
    Body(String),
    Status(u16),
}

/// In-memory transport: URL → canned response. Unknown URLs answer 404.
pub(crate) struct FakeTransport {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<RequestDescriptor>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
            latency: None,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Hold every response for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Canned::Body(body.into()));
        self
    }

    pub fn with_fixture(self, url: impl Into<String>, name: &str) -> Self {
        self.with_body(url, crate::parser::fixture(name))
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Canned::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    /// Most requests that were ever waiting on a response at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.responses.get(&request.url) {
            Some(Canned::Body(body)) => classify(200, body.clone(), request),
            Some(Canned::Status(status)) => classify(*status, String::new(), request),
            None => classify(404, String::new(), request),
        }
    }
}

pub(crate) fn endpoints() -> Endpoints {
    Settings::default().endpoints()
}

/// A minimal program page whose single playlist holds `node_ids`.
pub(crate) fn program_page(title: &str, node_ids: &[&str]) -> String {
    let episodes: Vec<serde_json::Value> = node_ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "title": format!("{} {}", title, id),
                "pageInfo": { "nodeId": id },
            })
        })
        .collect();
    let hero = serde_json::json!({
        "data": {
            "title": title,
            "playlists": [{ "id": "pl", "title": "Afleveringen", "episodes": episodes }],
        }
    });
    format!(
        "<html><body><div data-hero='{}'></div></body></html>",
        hero
    )
}
