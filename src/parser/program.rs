use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::{decode_str, decode_value};
use crate::error::{Failure, HtmlError, JsonError, LinkDefect};
use crate::models::{PartialProgram, Program};
use crate::validation::{self, NonEmpty, Validated};
use crate::Result;

const HERO_ATTR: &str = "data-hero";

static HERO_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-hero]").unwrap());
static PROGRAM_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.program-overview__link").unwrap());

/// Cheap probe: does the document carry a program payload? The payload is not decoded.
pub fn can_parse(document: &Html) -> bool {
    document.select(&HERO_SELECTOR).next().is_some()
}

pub fn parse(html: &str) -> Result<Program> {
    parse_document(&Html::parse_document(html))
}

/// Read the `data-hero` JSON and decode its `data` object. Unknown fields are ignored.
pub fn parse_document(document: &Html) -> Result<Program> {
    let payload = document
        .select(&HERO_SELECTOR)
        .next()
        .and_then(|div| div.value().attr(HERO_ATTR))
        .ok_or(JsonError::MissingMarker(HERO_ATTR))?;

    let mut hero: Value = decode_str(payload)?;
    let data = hero
        .get_mut("data")
        .map(Value::take)
        .ok_or(JsonError::MissingField("data"))?;

    Ok(decode_value(data)?)
}

/// Scrape every program link of the home page.
///
/// Each link is checked on its own and every malformed one is reported;
/// one malformed link yields exactly one `HtmlError`.
pub(crate) fn parse_partial_programs(html: &str) -> Result<Vec<PartialProgram>> {
    let document = Html::parse_document(html);
    let links = document
        .select(&PROGRAM_LINK_SELECTOR)
        .enumerate()
        .map(|(position, link)| validate_link(position, link));

    validation::sequence(links).map_err(Failure::HtmlParsing)
}

fn validate_link(position: usize, link: ElementRef<'_>) -> Validated<PartialProgram, HtmlError> {
    let path = match link.value().attr("href").map(str::trim) {
        Some(href) if !href.is_empty() => Ok(href.to_string()),
        _ => validation::invalid(LinkDefect::MissingHref),
    };
    let text = link.text().collect::<Vec<_>>().join(" ");
    let name = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let name = if name.is_empty() {
        validation::invalid(LinkDefect::MissingText)
    } else {
        Ok(name)
    };

    validation::zip(name, path)
        .map(|(name, path)| PartialProgram { name, path })
        .map_err(|defects| NonEmpty::new(HtmlError::MalformedLink { position, defects }))
}
