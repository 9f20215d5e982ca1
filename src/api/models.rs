use crate::api::fields::{self, RawItem};
use serde_json::Value;
use std::sync::Arc;

/// One audio record from the server, tagged with its position in the raw
/// response. The record itself is never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub original_index: usize,
    pub fields: RawItem,
}

impl MediaItem {
    pub fn new(original_index: usize, fields: RawItem) -> Self {
        Self {
            original_index,
            fields,
        }
    }

    pub fn title(&self) -> String {
        fields::title(&self.fields)
    }

    pub fn artist(&self) -> String {
        fields::artist(&self.fields)
    }

    pub fn duration_seconds(&self) -> u64 {
        fields::duration_seconds(&self.fields)
    }

    pub fn folder_name(&self) -> String {
        fields::folder_name(&self.fields)
    }

    pub fn date_value(&self) -> f64 {
        fields::date_value(&self.fields)
    }

    pub fn identifier(&self) -> Option<String> {
        fields::identifier(&self.fields)
    }

    pub fn thumbnail(&self) -> Option<String> {
        fields::thumbnail(&self.fields)
    }

    pub fn file_name(&self) -> String {
        fields::file_name(&self.fields)
    }

    /// Stable playback identity of this item.
    pub fn key(&self) -> TrackKey {
        match fields::identifier_value(&self.fields) {
            Some(Value::Number(number)) => TrackKey::NumericId(number.to_string()),
            Some(value) => TrackKey::Id(fields::value_text(value)),
            None => TrackKey::Index(self.original_index),
        }
    }

    /// Key used to find this item's row in the rendered list.
    pub fn dom_key(&self) -> String {
        match self.identifier() {
            Some(id) => id,
            None => format!("i-{}", self.original_index),
        }
    }
}

/// Identity of the current track. Never a position in a sorted list.
/// Numeric and string ids stay distinct, so `1` never matches `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackKey {
    Id(String),
    NumericId(String),
    Index(usize),
}

impl TrackKey {
    pub fn matches(&self, item: &MediaItem) -> bool {
        *self == item.key()
    }
}

/// The loaded item list for one connection. Cloning shares the items; a
/// reload replaces the whole catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Arc<[MediaItem]>,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, key: &TrackKey) -> Option<&MediaItem> {
        self.items.iter().find(|item| key.matches(item))
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items) || self.items == other.items
    }
}

pub fn format_duration(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Duration label for list rows; unknown durations render empty.
pub fn duration_label(seconds: u64) -> String {
    if seconds == 0 {
        String::new()
    } else {
        format_duration(seconds)
    }
}

/// Formats a playback clock value, flooring fractions.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_duration(0);
    }
    format_duration(seconds.floor() as u64)
}
