//! Constructors that build a [`Settings`] store from external sources.

use crate::codec::{self, Format};
use crate::{Settings, SettingsError, SettingsTree, Value};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Key/value lookup used by [`Settings::from_environment`].
pub trait EnvProvider {
    /// Value of the variable `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvProvider for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Where [`Settings::from_source`] gets its data.
pub enum SettingsSource {
    /// Called once; must produce a map.
    Producer(Box<dyn FnOnce() -> Value>),
    /// Used as is.
    Map(SettingsTree),
    /// Structured-literal file; must exist.
    Path(PathBuf),
}

impl SettingsSource {
    pub fn producer(producer: impl FnOnce() -> Value + 'static) -> Self {
        SettingsSource::Producer(Box::new(producer))
    }
}

impl fmt::Debug for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::Producer(_) => f.write_str("Producer(..)"),
            SettingsSource::Map(map) => f.debug_tuple("Map").field(map).finish(),
            SettingsSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
        }
    }
}

impl From<SettingsTree> for SettingsSource {
    fn from(map: SettingsTree) -> Self {
        SettingsSource::Map(map)
    }
}

impl From<PathBuf> for SettingsSource {
    fn from(path: PathBuf) -> Self {
        SettingsSource::Path(path)
    }
}

impl From<&Path> for SettingsSource {
    fn from(path: &Path) -> Self {
        SettingsSource::Path(path.to_path_buf())
    }
}

impl From<&str> for SettingsSource {
    fn from(path: &str) -> Self {
        SettingsSource::Path(PathBuf::from(path))
    }
}

impl Settings {
    /// Wrap an in-memory map.
    pub fn from_map(tree: SettingsTree, immutable: bool) -> Self {
        debug!("settings from map (entries={}, immutable={immutable})", tree.len());
        Settings::new(tree, immutable)
    }

    /// Load a structured-literal file. The file is parsed, never executed.
    pub fn from_literal_file(
        path: impl AsRef<Path>,
        immutable: bool,
    ) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        debug!("settings from literal file (path={})", path.display());
        let contents = fs::read_to_string(path)?;
        let tree = codec::decode_tree(Format::Structured, &contents, &path.display().to_string())?;
        Ok(Settings::new(tree, immutable))
    }

    /// Build from a producer, a map, or a literal file path.
    ///
    /// A path that does not exist is reported as an invalid source rather
    /// than a missing file.
    pub fn from_source(
        source: impl Into<SettingsSource>,
        immutable: bool,
    ) -> Result<Self, SettingsError> {
        match source.into() {
            SettingsSource::Producer(producer) => {
                let produced = producer();
                let tree = produced.into_map().map_err(|other| {
                    SettingsError::InvalidConfiguration(format!(
                        "producer must return a map, got {}",
                        other.type_name()
                    ))
                })?;
                Ok(Settings::from_map(tree, immutable))
            }
            SettingsSource::Map(tree) => Ok(Settings::from_map(tree, immutable)),
            SettingsSource::Path(path) if path.exists() => {
                Settings::from_literal_file(&path, immutable)
            }
            SettingsSource::Path(path) => Err(SettingsError::InvalidConfiguration(format!(
                "invalid configuration source: {}",
                path.display()
            ))),
        }
    }

    /// Read `keys` from `env`, each under the variable `uppercase(prefix + key)`.
    ///
    /// Settings are stored under the bare key; unset or empty variables
    /// become `Null`.
    pub fn from_environment<K: AsRef<str>>(
        keys: &[K],
        prefix: &str,
        immutable: bool,
        env: &impl EnvProvider,
    ) -> Self {
        let mut tree = SettingsTree::new();
        for key in keys {
            let key = key.as_ref();
            let name = format!("{prefix}{key}").to_uppercase();
            let value = env
                .var(&name)
                .filter(|value| !value.is_empty())
                .map_or(Value::Null, Value::String);
            debug!("environment lookup (name={name}, set={})", !value.is_null());
            tree.insert(key.to_string(), value);
        }
        Settings::new(tree, immutable)
    }
}
