use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry as embedded in its page's `data-hero` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub images: Option<Images>,
    pub playlists: Vec<Playlist>,
}

impl Program {
    /// All episodes in page order: playlist by playlist.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.playlists.iter().flat_map(|p| p.episodes.iter())
    }

    /// Take the first episode carrying `node_id`. Earlier playlists win on duplicates.
    pub fn into_episode(self, node_id: &str) -> Option<Episode> {
        self.playlists
            .into_iter()
            .flat_map(|p| p.episodes)
            .find(|e| e.page_info.node_id == node_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    pub hero: Option<String>,
    pub teaser: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub title: String,
    pub description: Option<String>,
    pub video_uuid: Option<String>,
    /// Seconds.
    pub duration: Option<f64>,
    pub image: Option<String>,
    pub episode_number: Option<u32>,
    pub season_number: Option<u32>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub unpublish_date: Option<DateTime<Utc>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub node_id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    pub site: Option<String>,
}

/// Opaque id of a video on the per-video API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeUuid(pub String);

impl fmt::Display for EpisodeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name and path of a program as listed on the home page. Only used to
/// drive the detail fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartialProgram {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: Source,
}

impl SearchHit {
    /// Which lookup resolves this hit, or `None` for hit types we cannot follow.
    pub fn search_key(&self) -> Option<SearchKey> {
        let source = &self.source;
        match source.hit_type {
            HitType::Program => Some(SearchKey::Program(ProgramKey::new(path_of(&source.url)))),
            HitType::Video | HitType::Clip => {
                let node_id = source.node_id.clone()?;
                Some(match &source.program_url {
                    Some(program_url) => SearchKey::Episode(EpisodeKey {
                        program_path: path_of(program_url),
                        node_id,
                    }),
                    None => SearchKey::EpisodeByNodeId(EpisodeByNodeIdKey {
                        url: source.url.clone(),
                        node_id,
                    }),
                })
            }
            HitType::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "type")]
    pub hit_type: HitType,
    pub title: String,
    pub url: String,
    pub intro: Option<String>,
    pub img: Option<String>,
    pub site: Option<String>,
    pub node_id: Option<String>,
    pub program_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitType {
    Program,
    Video,
    Clip,
    #[serde(other)]
    Other,
}

/// A program addressed by its page path, e.g. `/de-slimste-mens-ter-wereld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramKey {
    pub path: String,
}

impl ProgramKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// An episode addressed through the page of the program that lists it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeKey {
    pub program_path: String,
    pub node_id: String,
}

/// An episode addressed by its own page, which may hold a full program or a single clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeByNodeIdKey {
    pub url: String,
    pub node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchKey {
    Program(ProgramKey),
    Episode(EpisodeKey),
    EpisodeByNodeId(EpisodeByNodeIdKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub title: String,
    pub name: Option<String>,
    pub image_store_url: Option<String>,
    pub reference: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub permalink: Option<String>,
    pub reference_type: Option<String>,
}

/// A successful resolution, tagged by what was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Content {
    Programs(Vec<Program>),
    SingleProgram(Program),
    SingleEpisode(Episode),
    SearchResults(Vec<SearchHit>),
    Categories(Vec<Category>),
}

/// Path component of an absolute URL; relative input is returned as-is.
fn path_of(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(hit_type: HitType, node_id: Option<&str>, program_url: Option<&str>) -> SearchHit {
        SearchHit {
            id: "hit".into(),
            score: Some(1.0),
            source: Source {
                hit_type,
                title: "De Slimste Mens ter Wereld".into(),
                url: "https://www.vier.be/video/de-slimste-mens-ter-wereld/aflevering-1".into(),
                intro: None,
                img: None,
                site: Some("vier".into()),
                node_id: node_id.map(str::to_string),
                program_url: program_url.map(str::to_string),
            },
        }
    }

    #[test]
    fn program_hit_maps_to_program_path() {
        let mut h = hit(HitType::Program, None, None);
        h.source.url = "https://www.vier.be/de-slimste-mens-ter-wereld".into();
        assert_eq!(
            h.search_key(),
            Some(SearchKey::Program(ProgramKey::new("/de-slimste-mens-ter-wereld")))
        );
    }

    #[test]
    fn video_hit_with_program_goes_through_program_page() {
        let h = hit(
            HitType::Video,
            Some("1001"),
            Some("https://www.vier.be/de-slimste-mens-ter-wereld"),
        );
        assert_eq!(
            h.search_key(),
            Some(SearchKey::Episode(EpisodeKey {
                program_path: "/de-slimste-mens-ter-wereld".into(),
                node_id: "1001".into(),
            }))
        );
    }

    #[test]
    fn clip_hit_without_program_uses_its_own_page() {
        let h = hit(HitType::Clip, Some("2002"), None);
        assert_eq!(
            h.search_key(),
            Some(SearchKey::EpisodeByNodeId(EpisodeByNodeIdKey {
                url: "https://www.vier.be/video/de-slimste-mens-ter-wereld/aflevering-1".into(),
                node_id: "2002".into(),
            }))
        );
    }

    #[test]
    fn unfollowable_hits_have_no_key() {
        assert_eq!(hit(HitType::Video, None, None).search_key(), None);
        assert_eq!(hit(HitType::Other, Some("1"), None).search_key(), None);
    }

    #[test]
    fn relative_paths_are_kept() {
        assert_eq!(path_of("/gogglebox"), "/gogglebox");
        assert_eq!(path_of("https://www.vier.be/gogglebox"), "/gogglebox");
    }
}
