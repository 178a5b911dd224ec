//! Settings persistence across structured-literal, JSON, and YAML files.
//!
//! Each format is a [`Codec`] converting between a [`SettingsTree`] and file
//! contents. Saving is a single synchronous write with no atomic rename; a
//! failed write can leave a truncated file behind.

mod json;
mod literal;
mod yaml;


pub use json::JsonCodec;
pub use literal::LiteralCodec;
pub use yaml::YamlCodec;

use crate::{Settings, SettingsError, SettingsTree, Value};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// File extension conventionally used for structured-literal files.
pub const LITERAL_EXTENSION: &str = "settings";

/// Deepest map and list nesting that can be saved. The JSON and YAML parsers
/// refuse documents nested much deeper, so anything past this could be
/// written but never loaded again.
pub const MAX_NESTING: usize = 100;

/// Persisted file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `return { ... };` literal, parsed without evaluation.
    Structured,
    /// Pretty-printed JSON object.
    Json,
    /// YAML mapping document; requires the `yaml` feature.
    Yaml,
}

impl Format {
    /// Guess the format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            LITERAL_EXTENSION => Some(Format::Structured),
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Structured => "structured",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = SettingsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "structured" | "literal" => Ok(Format::Structured),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(SettingsError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Paired serializer/deserializer for one file format.
pub trait Codec {
    fn format(&self) -> Format;

    /// Render the tree as file contents.
    fn encode(&self, tree: &SettingsTree) -> Result<String, SettingsError>;

    /// Parse file contents. The result is not required to be a map.
    fn decode(&self, contents: &str) -> Result<Value, SettingsError>;
}

/// Codec implementing `format`.
pub fn codec_for(format: Format) -> Box<dyn Codec> {
    match format {
        Format::Structured => Box::new(LiteralCodec),
        Format::Json => Box::new(JsonCodec),
        Format::Yaml => Box::new(YamlCodec),
    }
}

/// Decode `contents` and require a map at the top level.
pub(crate) fn decode_tree(
    format: Format,
    contents: &str,
    label: &str,
) -> Result<SettingsTree, SettingsError> {
    let value = codec_for(format).decode(contents)?;
    value.into_map().map_err(|other| {
        SettingsError::InvalidConfiguration(format!(
            "{label} must contain a map, found {}",
            other.type_name()
        ))
    })
}

/// Whether `value` holds more than `limit` levels of maps and lists. Stops
/// descending once the limit is spent.
fn nested_deeper_than(value: &Value, limit: usize) -> bool {
    match value {
        Value::Map(map) => {
            limit == 0 || map.values().any(|child| nested_deeper_than(child, limit - 1))
        }
        Value::List(items) => {
            limit == 0 || items.iter().any(|child| nested_deeper_than(child, limit - 1))
        }
        _ => false,
    }
}

impl Settings {
    /// Serialize the tree as `format` and write it to `path`.
    ///
    /// Trees nested deeper than [`MAX_NESTING`] are refused with
    /// [`SettingsError::Serialization`] before anything is written.
    pub fn save_to_file(
        &self,
        path: impl AsRef<Path>,
        format: Format,
    ) -> Result<(), SettingsError> {
        let path = path.as_ref();
        info!("saving settings (path={}, format={format})", path.display());
        let contents = self.to_string_as(format)?;
        fs::write(path, contents).map_err(|err| {
            SettingsError::Serialization(format!(
                "failed to save settings to {}: {err}",
                path.display()
            ))
        })
    }

    /// Read `path` as `format` into a new store.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        format: Format,
        immutable: bool,
    ) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        info!("loading settings (path={}, format={format})", path.display());
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let label = path.display().to_string();
        let tree = decode_tree(format, &contents, &label)?;
        debug!("loaded settings (path={label}, entries={})", tree.len());
        Ok(Settings::new(tree, immutable))
    }

    /// Serialize the tree as `format` without touching the filesystem.
    pub fn to_string_as(&self, format: Format) -> Result<String, SettingsError> {
        let tree = self.all();
        if tree
            .values()
            .any(|value| nested_deeper_than(value, MAX_NESTING - 1))
        {
            return Err(SettingsError::Serialization(format!(
                "settings are nested deeper than {MAX_NESTING} levels"
            )));
        }
        codec_for(format).encode(tree)
    }

    /// Parse `contents` as `format` into a new store.
    pub fn from_str_as(
        contents: &str,
        format: Format,
        immutable: bool,
    ) -> Result<Self, SettingsError> {
        let tree = decode_tree(format, contents, "settings source")?;
        Ok(Settings::new(tree, immutable))
    }
}
