use crate::api::fields;
use crate::api::models::*;
use crate::config::{
    AUDIO_STREAM_PATH, BLOCKED_ALBUMS, BLOCKED_ART_PATH, LIST_KEYS, MEDIA_LIST_PATH,
};
use crate::error::ClientError;
use once_cell::sync::Lazy;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, info, warn};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Client for a LocalStream server's media listing and audio stream endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStreamClient {
    base_url: String,
}

impl LocalStreamClient {
    pub fn new(server_url: &str) -> Self {
        let base_url = server_url.strip_suffix('/').unwrap_or(server_url).to_string();
        Self { base_url }
    }

    pub fn media_endpoint(&self) -> String {
        format!("{}{}", self.base_url, MEDIA_LIST_PATH)
    }

    pub fn stream_url(&self, item: &MediaItem) -> Result<String, ClientError> {
        let id = item.identifier().ok_or(ClientError::NoPlayableUrl)?;
        Ok(format!(
            "{}{}{}",
            self.base_url,
            AUDIO_STREAM_PATH,
            urlencoding::encode(&id)
        ))
    }

    /// Album art URL for `item`, or `None` when the bundled default artwork
    /// should be shown instead.
    pub fn thumbnail_url(&self, item: &MediaItem) -> Option<String> {
        let raw = item.thumbnail()?;
        if raw == BLOCKED_ART_PATH {
            return None;
        }
        if has_uri_scheme(&raw) || self.base_url.is_empty() {
            return Some(raw);
        }
        if raw.starts_with('/') {
            Some(format!("{}{}", self.base_url, raw))
        } else {
            Some(format!("{}/{}", self.base_url, raw))
        }
    }

    pub async fn fetch_catalog(&self) -> Result<Catalog, ClientError> {
        let endpoint = self.media_endpoint();
        info!(%endpoint, "requesting media catalog");

        let response = HTTP_CLIENT
            .get(&endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ClientError::catalog_load(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%endpoint, %status, "media catalog request rejected");
            return Err(ClientError::catalog_load(
                &endpoint,
                format!("Server responded with {}", status.as_u16()),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::catalog_load(&endpoint, e))?;

        let catalog = parse_catalog(body);
        info!(%endpoint, items = catalog.len(), "media catalog loaded");
        Ok(catalog)
    }
}

/// `scheme:` prefix as in `https:`, `content:`, `data:` or `blob:`.
fn has_uri_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '.' || c == '-'),
        _ => false,
    }
}

/// Pulls the raw item list out of a listing body. Unknown shapes give an
/// empty list.
pub fn extract_raw_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut object) => LIST_KEYS
            .iter()
            .find(|key| object.get(**key).is_some_and(fields::is_present))
            .and_then(|key| object.remove(*key))
            .and_then(|list| match list {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Whether a raw record belongs in the catalog: audio only, no system
/// sound albums, no `.wav` files.
pub fn is_listed(item: &fields::RawItem) -> bool {
    if !fields::is_audio(item) {
        return false;
    }
    let album = fields::album_name(item);
    if !album.is_empty() && BLOCKED_ALBUMS.contains(&album.as_str()) {
        return false;
    }
    !fields::has_wav_name(item)
}

/// Builds a catalog from a listing body, numbering items by their raw
/// position before filtering.
pub fn parse_catalog(body: Value) -> Catalog {
    let raw_items = extract_raw_items(body);
    let raw_count = raw_items.len();

    let items: Vec<MediaItem> = raw_items
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match value {
            Value::Object(map) => Some(MediaItem::new(index, map)),
            _ => None,
        })
        .filter(|item| is_listed(&item.fields))
        .collect();

    debug!(raw_count, kept = items.len(), "filtered media listing");
    Catalog::new(items)
}
