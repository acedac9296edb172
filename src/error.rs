use thiserror::Error;

use crate::transport::RequestDescriptor;
use crate::validation::NonEmpty;

/// Every way a resolution can fail. Failures are returned, never retried.
#[derive(Debug, Error)]
pub enum Failure {
    /// Non-2xx response, or no response at all (`status` is `None`).
    #[error("{request} failed: {}", describe_status(.status))]
    Network {
        status: Option<u16>,
        request: Box<RequestDescriptor>,
    },

    #[error("response body was empty")]
    EmptyJson,

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] JsonError),

    #[error("HTML parsing failed with {} defect(s): {}", .0.len(), .0)]
    HtmlParsing(NonEmpty<HtmlError>),

    /// Pages were fetched and parsed, but nothing matched the requested key.
    #[error("no episode found")]
    NoEpisodeFound,

    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthFailure),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP status {}", code),
        None => "no response".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid value at `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("marker `{0}` not found in document")]
    MissingMarker(&'static str),

    #[error("field `{0}` missing from payload")]
    MissingField(&'static str),
}

/// A structural defect found while scraping an HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlError {
    #[error("link #{position} is malformed ({defects})")]
    MalformedLink {
        position: usize,
        defects: NonEmpty<LinkDefect>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkDefect {
    #[error("missing href")]
    MissingHref,
    #[error("missing text")]
    MissingText,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no access token available")]
    MissingToken,
    #[error("token provider failed: {0}")]
    Provider(String),
}
