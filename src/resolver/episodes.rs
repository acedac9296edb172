use scraper::Html;
use tracing::debug;

use super::ContentResolver;
use crate::error::Failure;
use crate::models::{Episode, EpisodeByNodeIdKey, EpisodeUuid};
use crate::parser::detect::{self, ContentType};
use crate::parser::{episode, program};
use crate::Result;

/// What an episode page resolved to without further fetching.
enum PageEpisode {
    Found(Episode),
    Clip(EpisodeUuid),
}

impl ContentResolver {
    /// Resolve an episode page that may hold either a full program or a single clip.
    pub async fn fetch_episode_by_node_id(&self, key: &EpisodeByNodeIdKey) -> Result<Episode> {
        let html = self.get(&key.url).await?;
        match episode_from_page(&html, &key.node_id)? {
            PageEpisode::Found(episode) => Ok(episode),
            PageEpisode::Clip(uuid) => self.fetch_episode_by_uuid(&uuid).await,
        }
    }

    pub async fn fetch_episode_by_uuid(&self, uuid: &EpisodeUuid) -> Result<Episode> {
        let json = self.get(&self.endpoints.video_url(&uuid.0)).await?;
        episode::parse(&json)
    }
}

fn episode_from_page(html: &str, node_id: &str) -> Result<PageEpisode> {
    let document = Html::parse_document(html);
    let content_type = detect::detect(&document);
    debug!("Episode page {} classified as {:?}", node_id, content_type);

    match content_type {
        ContentType::FullEpisode => program::parse_document(&document)?
            .into_episode(node_id)
            .map(PageEpisode::Found)
            .ok_or(Failure::NoEpisodeFound),
        ContentType::Clip => episode::parse_clip_document(&document).map(PageEpisode::Clip),
        ContentType::Unknown => Err(Failure::NoEpisodeFound),
    }
}
