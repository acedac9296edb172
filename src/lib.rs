//! Resolve programs, episodes, search hits and categories of the VIER
//! catalog from three kinds of upstream data: JSON embedded in HTML pages,
//! JSON REST endpoints and a search index.
//!
//! ```text
//! repo (facade) → resolver → { parser::detect, parser::* } → Transport
//! ```
//!
//! Nothing is cached: callers own the returned entities and decide how
//! long to keep them.

pub mod auth;
pub mod error;
pub mod models;
pub mod parser;
pub mod repo;
pub mod resolver;
pub mod settings;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::{AuthFailure, Failure, HtmlError, JsonError, LinkDefect};
pub use models::{
    Category, Content, Episode, EpisodeByNodeIdKey, EpisodeKey, EpisodeUuid, Program, ProgramKey,
    SearchHit, SearchKey,
};
pub use repo::{CategoryRepo, ContentRepository, EpisodeRepo, ProgramRepo, SearchRepo};
pub use resolver::{ContentResolver, Endpoints};
pub use settings::Settings;
pub use transport::{HttpTransport, RequestDescriptor, Transport};

pub type Result<T> = std::result::Result<T, Failure>;
