//! API credential resolution
//!
//! Keys are looked up in the process environment first, then in plain-text
//! files under a credentials directory (one key per file, surrounding
//! whitespace trimmed). Missing credentials are reported by the caller so
//! the operator sees which provider is unconfigured.

use std::path::PathBuf;

use tracing::debug;

/// Resolves API keys from the environment or from per-provider files.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at `dir`, e.g. `credentials/`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Look up a key: `env_var` first, then `<dir>/<file_name>`.
    ///
    /// Returns `None` when neither source yields a non-empty value.
    pub fn resolve(&self, env_var: &str, file_name: &str) -> Option<String> {
        if let Ok(value) = std::env::var(env_var) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }

        let path = self.dir.join(file_name);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    debug!(path = %path.display(), "credential file is empty");
                    None
                } else {
                    Some(contents.to_string())
                }
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "credential file not readable");
                None
            }
        }
    }
}
