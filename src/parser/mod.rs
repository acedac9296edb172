//! Pure extraction: raw HTML or JSON in, typed entity or typed failure out.
//! Nothing here touches the network.

pub mod category;
pub mod detect;
pub mod episode;
pub mod program;
pub mod search;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::JsonError;

/// Decode a JSON string, recording the path of the first offending value.
/// Anything but whitespace after the value is rejected.
pub(crate) fn decode_str<T: DeserializeOwned>(json: &str) -> Result<T, JsonError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| JsonError::Decode {
        path: e.path().to_string(),
        source: e.into_inner(),
    })?;
    deserializer.end().map_err(|source| JsonError::Decode {
        path: String::new(),
        source,
    })?;
    Ok(value)
}

pub(crate) fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, JsonError> {
    serde_path_to_error::deserialize(value).map_err(|e| JsonError::Decode {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}
