//! Dot-path navigation over a [`SettingsTree`].
//!
//! Keys are split on `.` into segments; each segment addresses one level of
//! nesting. Lists are leaves and are never indexed into.

use crate::value::{SettingsTree, Value};
use indexmap::IndexMap;

/// Segment separator for dot-path keys.
pub const SEPARATOR: char = '.';

/// Split a key into its path segments. An empty key yields one empty segment.
pub fn segments(key: &str) -> Vec<&str> {
    key.split(SEPARATOR).collect()
}

/// Walk `tree` one segment at a time, returning the terminal value.
///
/// Returns `None` when a segment is missing or an intermediate node is not a
/// map.
pub fn resolve<'a>(tree: &'a SettingsTree, key: &str) -> Option<&'a Value> {
    let mut parts = key.split(SEPARATOR);
    let first = parts.next()?;
    let mut current = tree.get(first)?;
    for part in parts {
        current = current.as_map()?.get(part)?;
    }
    Some(current)
}

/// Set `value` at `key`, creating intermediate maps on the way down.
///
/// An intermediate segment holding a non-map value is replaced with an empty
/// map; the previous value is lost.
pub fn assign<'a>(tree: &'a mut SettingsTree, key: &str, value: Value) -> &'a mut SettingsTree {
    assign_segments(tree, &segments(key), value);
    tree
}

fn assign_segments(tree: &mut SettingsTree, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [leaf] => {
            tree.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            // A non-map child becomes an empty map and keeps its position.
            let slot = tree.entry((*head).to_string()).or_default();
            let mut child = std::mem::take(slot).into_map().unwrap_or_default();
            assign_segments(&mut child, rest, value);
            *slot = Value::Map(child);
        }
    }
}

/// Remove the value at `key`. Returns whether a value was removed.
///
/// Parent maps are left in place even when they become empty.
pub fn unassign(tree: &mut SettingsTree, key: &str) -> bool {
    let parts = segments(key);
    let Some((leaf, prefix)) = parts.split_last() else {
        return false;
    };
    let mut current: &mut SettingsTree = tree;
    for part in prefix {
        match current.get_mut(*part).and_then(Value::as_map_mut) {
            Some(map) => current = map,
            None => return false,
        }
    }
    current.shift_remove(*leaf).is_some()
}

/// Flatten `tree` into dot-joined leaf paths.
///
/// When two entries produce the same path (a literal `"a.b"` key next to a
/// nested `a: { b }`), the later one in traversal order wins the value and
/// the path keeps its first position. Empty maps produce no entries.
pub fn flatten(tree: &SettingsTree, prefix: &str) -> IndexMap<String, Value> {
    let mut result = IndexMap::new();
    flatten_into(tree, prefix, &mut result);
    result
}

fn flatten_into(tree: &SettingsTree, prefix: &str, out: &mut IndexMap<String, Value>) {
    for (key, value) in tree {
        let full_key = join(prefix, key);
        match value {
            Value::Map(nested) => flatten_into(nested, &full_key, out),
            leaf => {
                out.insert(full_key, leaf.clone());
            }
        }
    }
}

/// Join a prefix and a key with the separator; an empty prefix is dropped.
pub fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{key}")
    }
}
