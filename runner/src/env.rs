//! Trimmed environment reads.
//!
//! Presence decides: a variable that is set (even to an empty or
//! whitespace-only value) yields its trimmed value, and only an unset variable
//! falls back to the default. The default is returned as given, untrimmed.

use std::collections::{BTreeMap, HashMap};
use std::env;

/// Where [`get_env_from`] looks variables up.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Non-UTF-8 values are still "set"; decode them rather than treating
        // them as absent.
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads `name` from the process environment, trimmed, or `default` if unset.
#[must_use]
pub fn get_env(name: &str, default: &str) -> String {
    get_env_from(&ProcessEnv, name, default)
}

/// [`get_env`] with an empty-string default.
#[must_use]
pub fn get_env_or_empty(name: &str) -> String {
    get_env(name, "")
}

/// Reads `name` from `source`, trimmed, or `default` if unset.
#[must_use]
pub fn get_env_from<S>(source: &S, name: &str, default: &str) -> String
where
    S: EnvSource + ?Sized,
{
    match source.var(name) {
        Some(value) => value.trim().to_string(),
        None => {
            tracing::debug!(name, "Environment variable unset, using default");
            default.to_string()
        }
    }
}
