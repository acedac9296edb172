use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::decode_str;
use crate::error::JsonError;
use crate::models::{Episode, EpisodeUuid};
use crate::Result;

const VIDEO_ATTR: &str = "data-video";

static VIDEO_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-video]").unwrap());

/// Decode the body of the per-video endpoint.
pub fn parse(json: &str) -> Result<Episode> {
    Ok(decode_str(json)?)
}

/// Cheap probe for a clip page: only looks for the element, does not decode it.
pub fn can_parse_clip(document: &Html) -> bool {
    document.select(&VIDEO_SELECTOR).next().is_some()
}

/// Read the video id out of the clip's `data-video` JSON.
pub fn parse_clip_document(document: &Html) -> Result<EpisodeUuid> {
    let payload = document
        .select(&VIDEO_SELECTOR)
        .next()
        .and_then(|div| div.value().attr(VIDEO_ATTR))
        .ok_or(JsonError::MissingMarker(VIDEO_ATTR))?;

    let video: Value = decode_str(payload)?;
    let id = match video.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(JsonError::MissingField("id").into()),
    };
    Ok(EpisodeUuid(id))
}
