//! Field resolution for LocalStream media records.
//!
//! Servers disagree on field names, so every concept the client cares about
//! maps to an ordered list of candidate keys. The first candidate holding a
//! present value wins. The loader, the list view model and the playback
//! controller all resolve through this table.

use crate::config::{DURATION_MS_LOWER, DURATION_MS_UPPER, UNKNOWN_FOLDER, UNKNOWN_TITLE};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

pub type RawItem = Map<String, Value>;

pub const TITLE: &[&str] = &["title", "name", "fileName", "filename"];
pub const ARTIST: &[&str] = &["artist", "albumArtist", "album"];
pub const DURATION: &[&str] = &["duration", "lengthSeconds", "seconds"];
pub const FOLDER: &[&str] = &["folder", "folderName", "container", "parent", "parentTitle"];
pub const FOLDER_PATH: &[&str] = &["path", "filePath", "filepath", "fullPath", "location"];
pub const DATE: &[&str] = &[
    "date",
    "added",
    "addedAt",
    "createdAt",
    "modifiedAt",
    "lastModified",
    "mtime",
    "timestamp",
];
pub const IDENTIFIER: &[&str] = &["id", "mediaId", "audioId"];
pub const THUMBNAIL: &[&str] = &["albumArt"];
pub const MEDIA_TYPE: &[&str] = &["type", "mediaType", "kind"];
pub const ALBUM: &[&str] = &["album", "albumTitle", "album_name", "albumName"];
pub const FILE_NAME: &[&str] = &["fileName", "filename", "name"];
pub const WAV_CHECK: &[&str] = &[
    "fileName", "filename", "name", "title", "path", "filePath", "location", "url",
];

/// Whether a value counts as set: not null, not an empty string, not
/// `false`, not numeric zero.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn first_present<'a>(item: &'a RawItem, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|value| is_present(value))
}

/// Like [`first_present`] but only skips nulls, so `0` and `""` win.
pub fn first_non_null<'a>(item: &'a RawItem, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|value| !value.is_null())
}

/// Text form of a JSON scalar.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_i64() {
            Some(int) => int.to_string(),
            None => number.to_string(),
        },
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

fn present_text(item: &RawItem, candidates: &[&str]) -> Option<String> {
    first_present(item, candidates).map(value_text)
}

fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub fn title(item: &RawItem) -> String {
    let text = present_text(item, TITLE).unwrap_or_default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn artist(item: &RawItem) -> String {
    present_text(item, ARTIST).unwrap_or_default()
}

/// Normalizes a raw duration to whole seconds. Values in the millisecond
/// band are divided down.
pub fn normalize_duration_seconds(raw: Option<&Value>) -> u64 {
    let Some(n) = raw.and_then(value_number) else {
        return 0;
    };
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    if n > DURATION_MS_LOWER && n < DURATION_MS_UPPER {
        return (n / 1000.0).round() as u64;
    }
    n.round() as u64
}

pub fn duration_seconds(item: &RawItem) -> u64 {
    normalize_duration_seconds(first_present(item, DURATION))
}

pub fn folder_name(item: &RawItem) -> String {
    if let Some(direct) = present_text(item, FOLDER) {
        return direct;
    }

    if let Some(path) = present_text(item, FOLDER_PATH) {
        let parts: Vec<&str> = path
            .split(|c| c == '/' || c == '\\')
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() > 1 {
            return parts[parts.len() - 2].to_string();
        }
    }

    UNKNOWN_FOLDER.to_string()
}

/// Epoch milliseconds of the item's date, or 0 when missing or unparseable.
pub fn date_value(item: &RawItem) -> f64 {
    match first_present(item, DATE) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_date_millis(text).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parses the date layouts LocalStream servers are known to emit. Naive
/// timestamps are read as UTC.
pub fn parse_date_millis(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.timestamp_millis() as f64);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.timestamp_millis() as f64);
    }
    for layout in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(parsed.and_utc().timestamp_millis() as f64);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc().timestamp_millis() as f64)
}

/// Raw server identifier. `0` is valid; an empty string or `false` is not.
pub fn identifier_value(item: &RawItem) -> Option<&Value> {
    match first_non_null(item, IDENTIFIER)? {
        Value::String(text) if text.is_empty() => None,
        Value::Bool(false) => None,
        value => Some(value),
    }
}

/// Server identifier as text, as used in stream URLs.
pub fn identifier(item: &RawItem) -> Option<String> {
    identifier_value(item).map(value_text)
}

pub fn thumbnail(item: &RawItem) -> Option<String> {
    present_text(item, THUMBNAIL)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

pub fn is_audio(item: &RawItem) -> bool {
    present_text(item, MEDIA_TYPE)
        .map(|kind| kind.to_uppercase() == "AUDIO")
        .unwrap_or(false)
}

pub fn album_name(item: &RawItem) -> String {
    present_text(item, ALBUM)
        .map(|album| album.trim().to_lowercase())
        .unwrap_or_default()
}

pub fn file_name(item: &RawItem) -> String {
    present_text(item, FILE_NAME).unwrap_or_default()
}

pub fn has_wav_name(item: &RawItem) -> bool {
    WAV_CHECK.iter().any(|key| match item.get(*key) {
        Some(Value::String(text)) => text.trim().to_lowercase().ends_with(".wav"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawItem {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn title_prefers_first_present_candidate() {
        let item = raw(json!({ "title": "", "name": "  Blue Train ", "fileName": "x.mp3" }));
        assert_eq!(title(&item), "Blue Train");
    }

    #[test]
    fn whitespace_title_falls_back_to_unknown() {
        let item = raw(json!({ "title": "   ", "name": "ignored" }));
        assert_eq!(title(&item), UNKNOWN_TITLE);
        assert_eq!(title(&raw(json!({}))), UNKNOWN_TITLE);
    }

    #[test]
    fn artist_falls_back_to_album() {
        let item = raw(json!({ "album": "Kind of Blue" }));
        assert_eq!(artist(&item), "Kind of Blue");
        assert_eq!(artist(&raw(json!({}))), "");
    }

    #[test]
    fn duration_handles_seconds_and_milliseconds() {
        assert_eq!(duration_seconds(&raw(json!({ "duration": 215 }))), 215);
        assert_eq!(duration_seconds(&raw(json!({ "duration": 215_400 }))), 215);
        assert_eq!(duration_seconds(&raw(json!({ "lengthSeconds": "92.6" }))), 93);
        assert_eq!(duration_seconds(&raw(json!({ "duration": -4 }))), 0);
        assert_eq!(duration_seconds(&raw(json!({ "duration": "n/a" }))), 0);
        assert_eq!(duration_seconds(&raw(json!({ "duration": 0, "seconds": 61 }))), 61);
    }

    #[test]
    fn folder_prefers_explicit_field() {
        let item = raw(json!({ "folderName": "Jazz", "path": "/music/Rock/a.mp3" }));
        assert_eq!(folder_name(&item), "Jazz");
    }

    #[test]
    fn folder_from_path_parent_segment() {
        let unix = raw(json!({ "path": "/storage/Music/Rock/track.mp3" }));
        assert_eq!(folder_name(&unix), "Rock");
        let windows = raw(json!({ "filePath": "C:\\Users\\me\\Podcasts\\ep1.mp3" }));
        assert_eq!(folder_name(&windows), "Podcasts");
        let doubled = raw(json!({ "location": "Live//set.mp3" }));
        assert_eq!(folder_name(&doubled), "Live");
    }

    #[test]
    fn folder_unknown_without_parent() {
        assert_eq!(folder_name(&raw(json!({ "path": "track.mp3" }))), UNKNOWN_FOLDER);
        assert_eq!(folder_name(&raw(json!({}))), UNKNOWN_FOLDER);
    }

    #[test]
    fn date_accepts_numbers_and_strings() {
        assert_eq!(date_value(&raw(json!({ "mtime": 1_700_000_000_000u64 }))), 1.7e12);
        assert_eq!(
            date_value(&raw(json!({ "addedAt": "1970-01-01T00:00:01Z" }))),
            1000.0
        );
        assert_eq!(date_value(&raw(json!({ "date": "1970-01-02" }))), 86_400_000.0);
        assert_eq!(date_value(&raw(json!({ "date": "yesterday" }))), 0.0);
        assert_eq!(date_value(&raw(json!({}))), 0.0);
    }

    #[test]
    fn identifier_zero_is_valid() {
        assert_eq!(identifier(&raw(json!({ "id": 0 }))), Some("0".to_string()));
        assert_eq!(
            identifier(&raw(json!({ "id": null, "mediaId": "abc" }))),
            Some("abc".to_string())
        );
        assert_eq!(identifier(&raw(json!({ "id": "" }))), None);
        assert_eq!(identifier(&raw(json!({ "title": "x" }))), None);
    }

    #[test]
    fn audio_type_is_case_insensitive() {
        assert!(is_audio(&raw(json!({ "type": "audio" }))));
        assert!(is_audio(&raw(json!({ "kind": "Audio" }))));
        assert!(!is_audio(&raw(json!({ "type": "VIDEO" }))));
        assert!(!is_audio(&raw(json!({}))));
    }

    #[test]
    fn wav_detection_checks_every_string_candidate() {
        assert!(has_wav_name(&raw(json!({ "title": "Song", "url": "/x/song.Wav " }))));
        assert!(!has_wav_name(&raw(json!({ "title": "song.wav.mp3" }))));
        assert!(!has_wav_name(&raw(json!({ "name": 42 }))));
    }
}
