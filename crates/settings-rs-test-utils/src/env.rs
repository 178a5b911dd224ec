use parking_lot::Mutex;
use settings_rs_core::EnvProvider;
use std::collections::HashMap;

/// Map-backed environment that records every variable name looked up.
#[derive(Debug, Default)]
pub struct RecordingEnv {
    vars: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
}

impl RecordingEnv {
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Names passed to [`EnvProvider::var`], in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl EnvProvider for RecordingEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.lookups.lock().push(name.to_string());
        self.vars.get(name).cloned()
    }
}
