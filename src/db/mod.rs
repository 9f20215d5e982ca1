//! Connection store: the one persisted value, the server base URL.

use crate::config::STORAGE_KEY;
use crate::error::ClientError;
use tracing::warn;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;

/// Turns user input into a server base URL: trimmed, `http://` assumed when
/// no scheme is given, one trailing slash removed.
pub fn normalize_server_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    let invalid = || ClientError::InvalidServerUrl {
        input: raw.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let has_scheme = trimmed
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http://"))
        || trimmed
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("https://"));

    let with_scheme = if has_scheme {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let normalized = with_scheme
        .strip_suffix('/')
        .map(str::to_string)
        .unwrap_or(with_scheme);

    match reqwest::Url::parse(&normalized) {
        Ok(url) if url.has_host() => Ok(normalized),
        _ => Err(invalid()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_server_url(url: &str) -> Result<(), ClientError> {
    // Stored as a raw string, not JSON, so older builds can read the key.
    LocalStorage::raw()
        .set_item(STORAGE_KEY, url)
        .map_err(|e| ClientError::storage(format!("{e:?}")))
}

#[cfg(target_arch = "wasm32")]
pub fn load_server_url() -> Option<String> {
    match LocalStorage::raw().get_item(STORAGE_KEY) {
        Ok(value) => value.filter(|url| !url.trim().is_empty()),
        Err(err) => {
            warn!(error = ?err, "could not read stored server url");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_server_url(url: &str) -> Result<(), ClientError> {
    let path = store_path().ok_or_else(|| ClientError::storage("no data directory"))?;
    let mut values = read_store(&path);
    values.insert(STORAGE_KEY.to_string(), url.to_string());
    let json = serde_json::to_string_pretty(&values).map_err(ClientError::storage)?;
    std::fs::write(&path, json)
        .map_err(|e| ClientError::storage(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_server_url() -> Option<String> {
    let path = store_path()?;
    read_store(&path)
        .remove(STORAGE_KEY)
        .filter(|url| !url.trim().is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_store(path: &std::path::Path) -> HashMap<String, String> {
    let Ok(json) = std::fs::read_to_string(path) else {
        return HashMap::new();
    };
    serde_json::from_str(&json).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring unreadable connection store");
        HashMap::new()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn store_path() -> Option<std::path::PathBuf> {
    let data_dir = dirs::data_dir()?.join("localstream-client");
    std::fs::create_dir_all(&data_dir).ok()?;
    Some(data_dir.join("connection.json"))
}

/// Saves and logs instead of failing; the URL still works for this session.
pub fn remember_server_url(url: &str) {
    if let Err(err) = save_server_url(url) {
        warn!(error = %err, "could not persist server url");
    }
}
