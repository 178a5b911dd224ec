//! YAML codec backed by serde_yaml, available with the `yaml` feature.
//!
//! YAML allows any scalar as a mapping key. Integer, float, and boolean keys
//! are stored under their text form (`404: not found` becomes `"404"`), and a
//! null key becomes the empty string.

use super::{Codec, Format};
use crate::{SettingsError, SettingsTree, Value};

/// YAML mapping document.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

#[cfg(feature = "yaml")]
impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, tree: &SettingsTree) -> Result<String, SettingsError> {
        Ok(serde_yaml::to_string(tree)?)
    }

    fn decode(&self, contents: &str) -> Result<Value, SettingsError> {
        let document: serde_yaml::Value = serde_yaml::from_str(contents)?;
        from_yaml(document)
    }
}

#[cfg(feature = "yaml")]
fn from_yaml(value: serde_yaml::Value) -> Result<Value, SettingsError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(flag) => Value::Bool(flag),
        Yaml::Number(number) => match number.as_i64() {
            Some(integer) => Value::Integer(integer),
            None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Yaml::String(text) => Value::String(text),
        Yaml::Sequence(items) => Value::List(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = SettingsTree::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_text(key)?, from_yaml(value)?);
            }
            Value::Map(map)
        }
        Yaml::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

#[cfg(feature = "yaml")]
fn key_text(key: serde_yaml::Value) -> Result<String, SettingsError> {
    match from_yaml(key)? {
        Value::List(_) | Value::Map(_) => Err(SettingsError::Serialization(
            "YAML mapping keys must be scalars".to_string(),
        )),
        scalar => Ok(scalar.to_string()),
    }
}

#[cfg(not(feature = "yaml"))]
impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, _tree: &SettingsTree) -> Result<String, SettingsError> {
        Err(unsupported())
    }

    fn decode(&self, _contents: &str) -> Result<Value, SettingsError> {
        Err(unsupported())
    }
}

#[cfg(not(feature = "yaml"))]
fn unsupported() -> SettingsError {
    SettingsError::UnsupportedFormat(
        "YAML support is not enabled (build with the `yaml` feature)".to_string(),
    )
}
