use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::auth::AccessTokenProvider;
use crate::error::Failure;
use crate::settings::Settings;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// What to fetch. Attached to network failures so callers can see which request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    /// JSON body, POST only.
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body.to_string()),
        }
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{} {}", method, self.url)
    }
}

/// The only suspension point of every resolution.
///
/// A non-2xx response must yield `Failure::Network` and a 2xx response with
/// an empty body `Failure::EmptyJson`. Implementations do not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<String>;
}

/// `Transport` over a shared reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            token_provider: None,
        }
    }

    /// Client with the configured user agent and timeout, plus a bearer
    /// token when one is configured.
    pub fn from_settings(settings: &Settings) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let transport = Self::new(client);
        Ok(match settings.access_token() {
            Some(provider) => transport.with_token_provider(Arc::new(provider)),
            None => transport,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<String> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(request.body.clone().unwrap_or_default()),
        };

        if let Some(provider) = &self.token_provider {
            let token = provider.access_token().await?;
            builder = builder.bearer_auth(token.as_str());
        }

        debug!("{}", request);
        let response = builder.send().await.map_err(|e| {
            warn!("{} failed: {}", request, e);
            network_failure(None, request)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!("Reading body of {} failed: {}", request, e);
            network_failure(Some(status), request)
        })?;

        classify(status, body, request)
    }
}

/// Map a status and body onto the transport contract.
pub(crate) fn classify(status: u16, body: String, request: &RequestDescriptor) -> Result<String> {
    if !(200..300).contains(&status) {
        warn!("{} returned HTTP {}", request, status);
        return Err(network_failure(Some(status), request));
    }
    if body.trim().is_empty() {
        return Err(Failure::EmptyJson);
    }
    Ok(body)
}

fn network_failure(status: Option<u16>, request: &RequestDescriptor) -> Failure {
    Failure::Network {
        status,
        request: Box::new(request.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn non_success_status_is_network_failure() {
        let request = RequestDescriptor::get("https://www.vier.be/onbestaand");
        match classify(404, "Not Found".into(), &request) {
            Err(Failure::Network { status, request: failed }) => {
                assert_eq!(status, Some(404));
                assert_eq!(*failed, request);
            }
            other => panic!("expected network failure, got {:?}", other),
        }
    }

    #[test]
    fn empty_success_body_is_empty_json() {
        let request = RequestDescriptor::get("https://api.viervijfzes.be/video/x");
        assert!(matches!(classify(200, "  \n".into(), &request), Err(Failure::EmptyJson)));
        assert_eq!(classify(204, "{}".into(), &request).unwrap(), "{}");
    }

    #[test]
    fn post_descriptor_carries_json_body() {
        let request = RequestDescriptor::post_json(
            "https://api.viervijfzes.be/search",
            &serde_json::json!({ "page": 0 }),
        );
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"page":0}"#));
        assert_eq!(request.to_string(), "POST https://api.viervijfzes.be/search");
    }

    /// Serve one canned response and hand back the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut data = Vec::new();
            let mut buf = [0_u8; 1024];
            while !data.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                data.extend_from_slice(&buf[..read]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();
            String::from_utf8_lossy(&data).to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let (base, server) = serve_once("200 OK", "{\"ok\":true}").await;
        let transport = HttpTransport::new(reqwest::Client::new())
            .with_token_provider(Arc::new(StaticTokenProvider::new("secret-token")));

        let body = transport
            .fetch(&RequestDescriptor::get(format!("{}/video/abc", base)))
            .await
            .unwrap();
        assert_eq!(body, "{\"ok\":true}");

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /video/abc"), "{}", head);
        assert!(head.contains("authorization: bearer secret-token"), "{}", head);
    }

    #[tokio::test]
    async fn server_error_surfaces_status() {
        let (base, server) = serve_once("503 Service Unavailable", "down").await;
        let transport = HttpTransport::new(reqwest::Client::new());

        let result = transport.fetch(&RequestDescriptor::get(base)).await;
        server.await.unwrap();
        assert!(matches!(result, Err(Failure::Network { status: Some(503), .. })));
    }

    #[tokio::test]
    async fn missing_token_stops_the_request() {
        let transport = HttpTransport::new(reqwest::Client::new())
            .with_token_provider(Arc::new(StaticTokenProvider::new("")));
        let result = transport
            .fetch(&RequestDescriptor::get("http://127.0.0.1:9/never"))
            .await;
        assert!(matches!(result, Err(Failure::Authentication(_))));
    }
}
