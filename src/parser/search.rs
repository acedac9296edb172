use serde_json::Value;

use super::{decode_str, decode_value};
use crate::error::JsonError;
use crate::models::SearchHit;
use crate::Result;

/// Decode a search response and return the rows under `hits.hits`, in order.
pub fn parse(json: &str) -> Result<Vec<SearchHit>> {
    let mut response: Value = decode_str(json)?;
    let hits = response
        .pointer_mut("/hits/hits")
        .map(Value::take)
        .ok_or(JsonError::MissingField("hits.hits"))?;

    Ok(decode_value(hits)?)
}
