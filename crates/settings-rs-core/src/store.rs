//! The settings store: a mutable (or frozen) tree with validators and a
//! lookup cache.

use crate::coercion::{self, ValueKind};
use crate::error::SettingsError;
use crate::path;
use crate::validator::{Validator, ValidatorRegistry};
use crate::value::{SettingsTree, Value};
use log::{debug, warn};
use std::collections::HashMap;

/// Hierarchical, dot-path addressable settings.
///
/// Top-level keys are matched literally before dot-path navigation, so a key
/// such as `"app.name"` stored verbatim shadows a nested `app: { name }`.
#[derive(Debug, Default)]
pub struct Settings {
    tree: SettingsTree,
    immutable: bool,
    cache: HashMap<String, Value>,
    validators: ValidatorRegistry,
}

impl Settings {
    /// Wrap an existing tree.
    pub fn new(tree: SettingsTree, immutable: bool) -> Self {
        Self {
            tree,
            immutable,
            cache: HashMap::new(),
            validators: ValidatorRegistry::new(),
        }
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Look up `key`, trying the literal top-level key before the dot-path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.tree
            .get(key)
            .or_else(|| path::resolve(&self.tree, key))
    }

    /// Look up `key`, falling back to `default` when it does not resolve.
    ///
    /// A stored `Null` counts as present and is returned as is.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Store `value` at the dot-path `key`.
    ///
    /// Immutability and validation are both checked before the tree is
    /// touched, so a rejected write leaves the store unchanged. Validators
    /// match the literal key only.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), SettingsError> {
        self.ensure_mutable(key)?;
        let value = value.into();
        if !self.validators.accepts(key, &value) {
            warn!("validator rejected value (key={key}, type={})", value.type_name());
            return Err(SettingsError::Validation {
                key: key.to_string(),
            });
        }
        path::assign(&mut self.tree, key, value);
        Ok(())
    }

    pub fn has(&self, key: &str) -> bool {
        self.tree.contains_key(key) || path::resolve(&self.tree, key).is_some()
    }

    /// Remove `key`. Returns `Ok(false)` when nothing was stored there.
    pub fn remove(&mut self, key: &str) -> Result<bool, SettingsError> {
        self.ensure_mutable(key)?;
        if self.tree.shift_remove(key).is_some() {
            return Ok(true);
        }
        Ok(path::unassign(&mut self.tree, key))
    }

    /// Read-only view of the whole tree.
    pub fn all(&self) -> &SettingsTree {
        &self.tree
    }

    /// Every leaf as a flattened dot-path, in insertion order, de-duplicated.
    pub fn keys(&self) -> Vec<String> {
        path::flatten(&self.tree, "").into_keys().collect()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn into_tree(self) -> SettingsTree {
        self.tree
    }

    pub fn get_scoped(&self, scope: &str, key: &str) -> Option<&Value> {
        self.get(&scoped_key(scope, key))
    }

    pub fn get_scoped_or(&self, scope: &str, key: &str, default: impl Into<Value>) -> Value {
        self.get_or(&scoped_key(scope, key), default)
    }

    pub fn set_scoped(
        &mut self,
        scope: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<(), SettingsError> {
        self.set(&scoped_key(scope, key), value)
    }

    pub fn has_scoped(&self, scope: &str, key: &str) -> bool {
        self.has(&scoped_key(scope, key))
    }

    /// Memoized [`Settings::get_or`].
    ///
    /// The first result for a key is kept for the lifetime of the store;
    /// later `set`/`remove` calls do not invalidate it, and the `default` of
    /// later calls is ignored once the key is cached.
    pub fn get_cached(&mut self, key: &str, default: impl Into<Value>) -> Value {
        if let Some(value) = self.cache.get(key) {
            return value.clone();
        }
        let value = self.get_or(key, default);
        debug!("caching lookup (key={key}, type={})", value.type_name());
        self.cache.insert(key.to_string(), value.clone());
        value
    }

    /// Register or replace the validator for the literal `key`.
    ///
    /// Values already stored are not re-checked.
    pub fn add_validator(&mut self, key: impl Into<String>, validator: impl Validator + 'static) {
        self.validators.insert(key, Box::new(validator));
    }

    /// [`Settings::get_or`] followed by a permissive conversion to `kind`.
    pub fn get_typed(&self, key: &str, kind: ValueKind, default: impl Into<Value>) -> Value {
        coercion::coerce(self.get_or(key, default), kind)
    }

    fn ensure_mutable(&self, key: &str) -> Result<(), SettingsError> {
        if self.immutable {
            warn!("rejected mutation of immutable settings (key={key})");
            return Err(SettingsError::Immutable {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

impl From<SettingsTree> for Settings {
    fn from(tree: SettingsTree) -> Self {
        Settings::new(tree, false)
    }
}

fn scoped_key(scope: &str, key: &str) -> String {
    format!("{scope}{}{key}", path::SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(value: Value, immutable: bool) -> Settings {
        Settings::new(value.into_map().expect("map"), immutable)
    }

    fn empty() -> Settings {
        Settings::default()
    }

    #[test]
    fn literal_key_wins_over_nested_path() {
        let store = settings(
            [
                ("app.name", Value::from("literal")),
                ("app", [("name", "nested")].into_iter().collect()),
            ]
            .into_iter()
            .collect(),
            false,
        );
        assert_eq!(store.get("app.name"), Some(&Value::from("literal")));
    }

    #[test]
    fn set_builds_nested_structure() {
        let mut store = empty();
        store.set("app.name", "Y").expect("set");
        let expected: Value = [("app", [("name", "Y")].into_iter().collect::<Value>())]
            .into_iter()
            .collect();
        assert_eq!(Value::Map(store.all().clone()), expected);
    }

    #[test]
    fn get_or_returns_default_only_when_missing() {
        let mut store = empty();
        store.set("nothing", Value::Null).expect("set");
        assert_eq!(store.get_or("nothing", "fallback"), Value::Null);
        assert_eq!(store.get_or("absent", "fallback"), Value::from("fallback"));
    }

    #[test]
    fn set_through_literal_dotted_key_does_not_touch_it() {
        let mut store = settings([("a.b", 1)].into_iter().collect(), false);
        store.set("a.b", 2).expect("set");
        assert_eq!(store.get("a.b"), Some(&Value::Integer(1)));
        assert_eq!(store.all()["a"], [("b", 2)].into_iter().collect::<Value>());
    }

    #[test]
    fn remove_prefers_literal_key() {
        let mut store = settings(
            [
                ("a.b", Value::from(1)),
                ("a", [("b", 2)].into_iter().collect()),
            ]
            .into_iter()
            .collect(),
            false,
        );
        assert!(store.remove("a.b").expect("remove"));
        assert_eq!(store.get("a.b"), Some(&Value::Integer(2)));
        assert!(store.remove("a.b").expect("remove"));
        assert!(!store.remove("a.b").expect("remove"));
    }

    #[test]
    fn immutable_store_rejects_writes_but_reads() {
        let mut store = settings([("k", "v")].into_iter().collect(), true);
        assert!(matches!(
            store.set("k", "other"),
            Err(SettingsError::Immutable { .. })
        ));
        assert!(matches!(store.remove("k"), Err(SettingsError::Immutable { .. })));
        assert_eq!(store.get("k"), Some(&Value::from("v")));
        assert!(store.has("k"));
        assert_eq!(store.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn rejected_value_leaves_tree_unchanged() {
        let mut store = empty();
        store.add_validator("age", |value: &Value| value.as_i64().is_some_and(|n| n > 0));
        store.set("age", 30).expect("valid");
        let before = store.all().clone();
        assert!(matches!(
            store.set("age", -5),
            Err(SettingsError::Validation { key }) if key == "age"
        ));
        assert_eq!(store.all(), &before);
        assert_eq!(store.get_or("age", -5), Value::Integer(30));
    }

    #[test]
    fn validators_match_literal_keys_only() {
        let mut store = empty();
        store.add_validator("port", |value: &Value| value.as_i64().is_some());
        store.set_scoped("server", "port", "not a number").expect("unguarded");
        assert!(store.set("port", "nope").is_err());
    }

    #[test]
    fn cached_reads_stay_stale_after_writes() {
        let mut store = settings([("k", "first")].into_iter().collect(), false);
        assert_eq!(store.get_cached("k", Value::Null), Value::from("first"));
        store.set("k", "second").expect("set");
        assert_eq!(store.get_cached("k", Value::Null), Value::from("first"));
        store.remove("k").expect("remove");
        assert_eq!(store.get_cached("k", Value::Null), Value::from("first"));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn cache_remembers_defaults() {
        let mut store = empty();
        assert_eq!(store.get_cached("missing", "d1"), Value::from("d1"));
        assert_eq!(store.get_cached("missing", "d2"), Value::from("d1"));
    }

    #[test]
    fn scoped_accessors_prefix_keys() {
        let mut store = settings(
            [("app", [("name", "MyApp")].into_iter().collect::<Value>())]
                .into_iter()
                .collect(),
            false,
        );
        assert_eq!(store.get_scoped("app", "name"), store.get("app.name"));
        assert_eq!(
            store.get_scoped_or("app", "missing", "default"),
            Value::from("default")
        );
        store.set_scoped("app", "version", "1.0").expect("set");
        assert!(store.has_scoped("app", "version"));
        assert!(!store.has_scoped("app", "nonexistent"));
    }

    #[test]
    fn typed_reads_coerce() {
        let store = settings(
            [("value", "123"), ("flag", "1"), ("name", "test")]
                .into_iter()
                .collect(),
            false,
        );
        assert_eq!(store.get_typed("value", ValueKind::Int, Value::Null), Value::Integer(123));
        assert_eq!(store.get_typed("flag", ValueKind::Bool, Value::Null), Value::Bool(true));
        assert_eq!(store.get_typed("name", ValueKind::String, Value::Null), Value::from("test"));
        assert_eq!(store.get_typed("nonexistent", ValueKind::Int, 0), Value::Integer(0));
    }
}
