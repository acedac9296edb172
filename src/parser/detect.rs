use scraper::Html;

use super::{episode, program};

/// What an episode page turned out to hold. The site routes clips and full
/// episodes through the same URLs, so this is decided from the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    FullEpisode,
    Clip,
    Unknown,
}

/// Probe for the program marker first, then the clip marker.
/// A page carrying both is a full episode page.
pub fn detect(document: &Html) -> ContentType {
    if program::can_parse(document) {
        ContentType::FullEpisode
    } else if episode::can_parse_clip(document) {
        ContentType::Clip
    } else {
        ContentType::Unknown
    }
}
