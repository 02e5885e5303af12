// Configuration: where the content API lives and which key to send.
// Everything has a default so the CLI runs against a local dev server
// without any setup.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "GEEKSPATROL_API_URL";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEEKSPATROL_API_KEY";
/// Local dev server started by the site's `npm run dev`.
pub const DEFAULT_API_URL: &str = "http://localhost:4321";
/// Sent when no key is configured; the server answers 401 for writes.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

const KEY_FILE_NAME: &str = ".geekspatrol_api_key";

/// Base URL and API key shared by every request of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
}

impl Config {
    /// Build a config, dropping any trailing `/` from the base URL so
    /// endpoint paths can be appended as-is.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        }
    }

    /// Resolve the config from `GEEKSPATROL_API_URL` / `GEEKSPATROL_API_KEY`,
    /// then `~/.geekspatrol_api_key`, then the built-in defaults.
    pub fn from_env() -> Result<Self> {
        let base_url = non_empty_var(API_URL_VAR);
        let api_key = match non_empty_var(API_KEY_VAR) {
            Some(key) => Some(key),
            None => match key_file_path() {
                Some(path) => read_key_file(&path)?,
                None => None,
            },
        };

        Ok(Config::new(
            base_url.as_deref().unwrap_or(DEFAULT_API_URL),
            api_key.as_deref().unwrap_or(PLACEHOLDER_API_KEY),
        ))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Location of the key file in the user's home directory.
pub fn key_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(KEY_FILE_NAME))
}

/// Read the first non-blank line of a key file. A missing file is not an
/// error, an unreadable one is.
pub fn read_key_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(data
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read API key from {}", path.display())),
    }
}
