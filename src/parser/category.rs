use serde_json::Value;

use super::{decode_str, decode_value};
use crate::error::Failure;
use crate::models::Category;
use crate::Result;

/// Decode the categories model. A body without `items` counts as empty, not malformed.
pub fn parse(json: &str) -> Result<Vec<Category>> {
    let mut model: Value = decode_str(json)?;
    let items = model
        .get_mut("items")
        .filter(|items| !items.is_null())
        .map(Value::take)
        .ok_or(Failure::EmptyJson)?;

    Ok(decode_value(items)?)
}
