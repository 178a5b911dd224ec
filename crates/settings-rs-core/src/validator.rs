//! Per-key value validators.

use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// A predicate deciding whether a value may be stored under a key.
pub trait Validator {
    /// Return true if `value` is acceptable.
    fn accepts(&self, value: &Value) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> bool,
{
    fn accepts(&self, value: &Value) -> bool {
        self(value)
    }
}

/// Validators keyed by the literal key string they guard.
///
/// Lookups never split the key, so a validator registered for `"app.port"`
/// only guards writes addressed exactly as `"app.port"`.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the validator for `key`.
    pub fn insert(&mut self, key: impl Into<String>, validator: Box<dyn Validator>) {
        self.validators.insert(key.into(), validator);
    }

    /// Check `value` against the validator for `key`; keys without one accept
    /// anything.
    pub fn accepts(&self, key: &str, value: &Value) -> bool {
        self.validators
            .get(key)
            .is_none_or(|validator| validator.accepts(value))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.validators.keys().collect();
        keys.sort();
        f.debug_struct("ValidatorRegistry")
            .field("keys", &keys)
            .finish()
    }
}
