//! Injected key/value environment providers.
//!
//! The process environment is modeled as a capability handed to the loader
//! rather than a hidden global, so tests can bind against an isolated store
//! instead of mutating real process state.

use std::collections::BTreeMap;

/// A mutable key/value store the `.env` loader writes into and the binder
/// resolves keys against.
///
/// Lookups are case-insensitive in one direction: the `.env` grammar
/// lower-cases keys on store, while source-key annotations conventionally use
/// upper-case names, so `get` falls back from the exact key to its
/// lower-cased form.
pub trait EnvProvider {
    /// Store a key/value pair.
    fn set(&mut self, key: &str, value: &str);

    /// Fetch a value, trying the exact key first, then its lower-cased form.
    fn get(&self, key: &str) -> Option<String>;

    /// Whether the key resolves at all (the lookup counterpart of `get`).
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Provider backed by the real process environment.
///
/// `set` writes to an in-memory overlay consulted before the process table,
/// so loading a `.env` file never mutates process-global state. Reads are
/// not atomic across fields; callers must not mutate the same keys from
/// another thread mid-bind.
#[derive(Debug, Default)]
pub struct ProcessEnv {
    overlay: BTreeMap<String, String>,
}

impl ProcessEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EnvProvider for ProcessEnv {
    fn set(&mut self, key: &str, value: &str) {
        self.overlay.insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        let lowered = key.to_lowercase();
        self.overlay
            .get(key)
            .or_else(|| self.overlay.get(&lowered))
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .or_else(|| std::env::var(&lowered).ok())
    }
}

/// Pure in-memory provider for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    values: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from an iterator of pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::new();
        for (k, v) in pairs {
            env.set(&k.into(), &v.into());
        }
        env
    }
}

impl EnvProvider for MemoryEnv {
    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .or_else(|| self.values.get(&key.to_lowercase()))
            .cloned()
    }
}
