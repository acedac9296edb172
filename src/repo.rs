//! Public contract: one trait per entity family, one method per lookup key.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{
    Category, Content, Episode, EpisodeByNodeIdKey, EpisodeKey, EpisodeUuid, Program, ProgramKey,
    SearchHit, SearchKey,
};
use crate::resolver::{ContentResolver, Endpoints};
use crate::transport::Transport;
use crate::Result;

#[async_trait]
pub trait ProgramRepo: Send + Sync {
    /// Fetch the home page and the page of every program it lists, concurrently.
    ///
    /// Equivalent of `curl -X GET "https://www.vier.be/"` followed by one
    /// request per program. Expensive; cache the result.
    async fn fetch_programs(&self) -> Result<Vec<Program>>;

    /// Equivalent of `curl -X GET "https://www.vier.be/de-slimste-mens-ter-wereld"`.
    async fn fetch_program(&self, key: &ProgramKey) -> Result<Program>;

    /// Fetch the program page and pick the episode with the key's node id.
    async fn fetch_episode(&self, key: &EpisodeKey) -> Result<Episode>;
}

#[async_trait]
pub trait EpisodeRepo: Send + Sync {
    /// Equivalent of `curl -X GET "https://api.viervijfzes.be/video/<uuid>"`.
    async fn fetch_episode_by_uuid(&self, uuid: &EpisodeUuid) -> Result<Episode>;

    /// Fetch the episode's own page, which holds either a full program or a clip.
    async fn fetch_episode_by_node_id(&self, key: &EpisodeByNodeIdKey) -> Result<Episode>;
}

#[async_trait]
pub trait SearchRepo: Send + Sync {
    /// Equivalent of
    /// `curl -X POST -d '{"query":<query>,"sites":["vier"],"page":0,"mode":"byDate"}' "https://api.viervijfzes.be/search"`.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
}

/// Implements every repository over one transport.
#[derive(Clone)]
pub struct ContentRepository {
    resolver: ContentResolver,
}

impl ContentRepository {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            resolver: ContentResolver::new(transport, endpoints),
        }
    }

    /// Follow a search key down the lookup path it names.
    pub async fn resolve(&self, key: &SearchKey) -> Result<Content> {
        Ok(match key {
            SearchKey::Program(key) => Content::SingleProgram(self.resolver.fetch_program(key).await?),
            SearchKey::Episode(key) => Content::SingleEpisode(self.resolver.fetch_episode(key).await?),
            SearchKey::EpisodeByNodeId(key) => {
                Content::SingleEpisode(self.resolver.fetch_episode_by_node_id(key).await?)
            }
        })
    }
}

#[async_trait]
impl ProgramRepo for ContentRepository {
    async fn fetch_programs(&self) -> Result<Vec<Program>> {
        self.resolver.fetch_programs().await
    }

    async fn fetch_program(&self, key: &ProgramKey) -> Result<Program> {
        self.resolver.fetch_program(key).await
    }

    async fn fetch_episode(&self, key: &EpisodeKey) -> Result<Episode> {
        self.resolver.fetch_episode(key).await
    }
}

#[async_trait]
impl EpisodeRepo for ContentRepository {
    async fn fetch_episode_by_uuid(&self, uuid: &EpisodeUuid) -> Result<Episode> {
        self.resolver.fetch_episode_by_uuid(uuid).await
    }

    async fn fetch_episode_by_node_id(&self, key: &EpisodeByNodeIdKey) -> Result<Episode> {
        self.resolver.fetch_episode_by_node_id(key).await
    }
}

#[async_trait]
impl SearchRepo for ContentRepository {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.resolver.search(query).await
    }
}

#[async_trait]
impl CategoryRepo for ContentRepository {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.resolver.fetch_categories().await
    }
}
