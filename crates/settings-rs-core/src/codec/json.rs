//! JSON codec backed by serde_json.

use super::{Codec, Format};
use crate::{SettingsError, SettingsTree, Value};

/// Pretty-printed JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, tree: &SettingsTree) -> Result<String, SettingsError> {
        for (key, value) in tree {
            ensure_finite(key, value)?;
        }
        let mut contents = serde_json::to_string_pretty(tree)?;
        contents.push('\n');
        Ok(contents)
    }

    fn decode(&self, contents: &str) -> Result<Value, SettingsError> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// serde_json silently writes NaN and infinities as `null`; refuse instead.
fn ensure_finite(path: &str, value: &Value) -> Result<(), SettingsError> {
    match value {
        Value::Float(number) if !number.is_finite() => Err(SettingsError::Serialization(format!(
            "cannot encode non-finite float at {path} as JSON"
        ))),
        Value::List(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(idx, item)| ensure_finite(&format!("{path}[{idx}]"), item)),
        Value::Map(map) => map
            .iter()
            .try_for_each(|(key, item)| ensure_finite(&format!("{path}.{key}"), item)),
        _ => Ok(()),
    }
}
