//! Test utilities for provider tests

use crate::config::BackendKind;

/// Restores an environment variable to its previous value on drop.
///
/// Tests that touch the environment must also be `#[serial]`.
pub struct EnvGuard {
    key: String,
    original: Option<String>,
}

impl EnvGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: callers run under #[serial], so no other test thread reads
        // or writes the environment concurrently.
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }

    pub fn remove(key: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: see `EnvGuard::set`.
        unsafe { std::env::remove_var(key) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: see `EnvGuard::set`.
        unsafe {
            match &self.original {
                Some(value) => std::env::set_var(&self.key, value),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

/// Removes every backend API key variable and `AI_PROVIDER` for the
/// lifetime of the returned guards.
pub fn clear_provider_env() -> Vec<EnvGuard> {
    let mut guards: Vec<EnvGuard> = BackendKind::ALL
        .iter()
        .map(|kind| EnvGuard::remove(kind.api_key_env()))
        .collect();
    guards.push(EnvGuard::remove(crate::constants::config::PROVIDER_ENV));
    guards
}
