//! Public surface for settings-rs.
//!
//! Re-exports the settings store and its building blocks, and provides a
//! small logging helper so binaries wire up diagnostics the same way.
//!
//! ```
//! use settings_rs::{Settings, SettingsTree, Value};
//!
//! let mut settings = Settings::from_map(SettingsTree::new(), false);
//! settings.set("app.name", "demo").unwrap();
//! assert_eq!(settings.get("app.name"), Some(&Value::from("demo")));
//! assert_eq!(settings.keys(), vec!["app.name".to_string()]);
//! ```

pub use settings_rs_core::*;

/// Re-export for convenience.
pub use settings_rs_core as core;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
    log::debug!("settings-rs logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }

    #[test]
    fn facade_exposes_full_round_trip() {
        init_logging();
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("app.settings");
        let mut settings = Settings::from_map(SettingsTree::new(), false);
        settings.set("server.port", 8080).expect("set");
        settings
            .save_to_file(&path, Format::from_path(&path).expect("format"))
            .expect("save");
        let loaded = Settings::load_from_file(&path, Format::Structured, true).expect("load");
        assert_eq!(
            loaded.get_typed("server.port", ValueKind::String, Value::Null),
            Value::from("8080")
        );
    }
}
