//! List view model: sort, search and folder grouping over the catalog.

use crate::api::MediaItem;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Original,
    Name,
    Date,
    Duration,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Original,
        SortKey::Name,
        SortKey::Date,
        SortKey::Duration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Original => "original",
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Duration => "duration",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Original => "Original",
            SortKey::Name => "Name",
            SortKey::Date => "Date",
            SortKey::Duration => "Duration",
        }
    }

    /// Parses a select value; anything unknown means original order.
    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }
}

/// Presentation state for the list. Not persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub search_query: String,
    pub sort_key: SortKey,
    pub sort_reversed: bool,
}

impl ViewState {
    /// Returns the sorted full playlist and the visible (searched) subset.
    pub fn derive<'a>(&self, items: &'a [MediaItem]) -> (Vec<&'a MediaItem>, Vec<&'a MediaItem>) {
        let sorted = derive_sorted(items, self.sort_key, self.sort_reversed);
        let filtered = derive_filtered(&sorted, &self.search_query);
        (sorted, filtered)
    }
}

/// Stable sort by `key`; `reversed` flips the finished sequence so ties keep
/// their mirrored order.
pub fn derive_sorted(items: &[MediaItem], key: SortKey, reversed: bool) -> Vec<&MediaItem> {
    let mut sorted: Vec<&MediaItem> = items.iter().collect();

    match key {
        SortKey::Name => sorted.sort_by_cached_key(|item| item.title().to_lowercase()),
        SortKey::Date => {
            let mut keyed: Vec<(f64, &MediaItem)> =
                sorted.iter().map(|item| (item.date_value(), *item)).collect();
            keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            sorted = keyed.into_iter().map(|(_, item)| item).collect();
        }
        SortKey::Duration => sorted.sort_by_cached_key(|item| item.duration_seconds()),
        SortKey::Original => sorted.sort_by_key(|item| item.original_index),
    }

    if reversed {
        sorted.reverse();
    }
    sorted
}

/// Text the search box matches against.
fn search_haystack(item: &MediaItem) -> String {
    [
        item.title(),
        item.artist(),
        item.folder_name(),
        item.file_name(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

pub fn derive_filtered<'a>(sorted: &[&'a MediaItem], query: &str) -> Vec<&'a MediaItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return sorted.to_vec();
    }
    sorted
        .iter()
        .copied()
        .filter(|item| search_haystack(item).contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FolderGroup<'a> {
    pub name: String,
    pub items: Vec<&'a MediaItem>,
}

/// Groups by resolved folder, folders in case-insensitive name order.
pub fn group_by_folder<'a>(filtered: &[&'a MediaItem]) -> Vec<FolderGroup<'a>> {
    let mut groups: Vec<FolderGroup<'a>> = Vec::new();
    for &item in filtered {
        let name = item.folder_name();
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.items.push(item),
            None => groups.push(FolderGroup {
                name,
                items: vec![item],
            }),
        }
    }
    groups.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn items(values: Vec<Value>) -> Vec<MediaItem> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(map) => MediaItem::new(index, map),
                _ => panic!("fixture must be an object"),
            })
            .collect()
    }

    fn titles(list: &[&MediaItem]) -> Vec<String> {
        list.iter().map(|item| item.title()).collect()
    }

    fn library() -> Vec<MediaItem> {
        items(vec![
            json!({ "title": "delta", "artist": "Miles", "folder": "Jazz", "duration": 300, "date": "2021-03-01" }),
            json!({ "title": "Alpha", "artist": "Nina", "path": "/music/blues/alpha.mp3", "duration": 120 }),
            json!({ "title": "charlie", "artist": "Miles", "folder": "jazz", "duration": 120, "date": 5 }),
            json!({ "title": "Bravo", "fileName": "bravo_live.mp3", "duration": 60 }),
        ])
    }

    #[test]
    fn sorts_by_duration_and_reverses() {
        let list = items(vec![
            json!({ "title": "b", "duration": 200 }),
            json!({ "title": "a", "duration": 100 }),
        ]);
        assert_eq!(titles(&derive_sorted(&list, SortKey::Duration, false)), vec!["a", "b"]);
        assert_eq!(titles(&derive_sorted(&list, SortKey::Duration, true)), vec!["b", "a"]);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let list = library();
        assert_eq!(
            titles(&derive_sorted(&list, SortKey::Name, false)),
            vec!["Alpha", "Bravo", "charlie", "delta"]
        );
    }

    #[test]
    fn duration_ties_keep_original_order() {
        let list = library();
        let sorted = derive_sorted(&list, SortKey::Duration, false);
        assert_eq!(titles(&sorted), vec!["Bravo", "Alpha", "charlie", "delta"]);

        let reversed = derive_sorted(&list, SortKey::Duration, true);
        assert_eq!(titles(&reversed), vec!["delta", "charlie", "Alpha", "Bravo"]);
    }

    #[test]
    fn missing_dates_sort_first() {
        let list = library();
        let sorted = derive_sorted(&list, SortKey::Date, false);
        assert_eq!(titles(&sorted), vec!["Alpha", "Bravo", "charlie", "delta"]);
    }

    #[test]
    fn resorting_is_stable_and_double_reverse_restores() {
        let list = library();
        let once = derive_sorted(&list, SortKey::Name, false);
        let owned: Vec<MediaItem> = once.iter().map(|item| (*item).clone()).collect();
        let twice = derive_sorted(&owned, SortKey::Name, false);
        assert_eq!(titles(&once), titles(&twice));

        let mut flipped = derive_sorted(&list, SortKey::Original, true);
        flipped.reverse();
        assert_eq!(flipped, derive_sorted(&list, SortKey::Original, false));
    }

    #[test]
    fn search_matches_any_resolved_field() {
        let list = library();
        let sorted = derive_sorted(&list, SortKey::Original, false);
        assert_eq!(titles(&derive_filtered(&sorted, "miles")), vec!["delta", "charlie"]);
        assert_eq!(titles(&derive_filtered(&sorted, " BLUES ")), vec!["Alpha"]);
        assert_eq!(titles(&derive_filtered(&sorted, "live")), vec!["Bravo"]);
        assert!(derive_filtered(&sorted, "zzz").is_empty());
    }

    #[test]
    fn blank_query_keeps_input_order() {
        let list = library();
        let sorted = derive_sorted(&list, SortKey::Name, true);
        assert_eq!(derive_filtered(&sorted, "   "), sorted);
    }

    #[test]
    fn filtering_is_idempotent() {
        let list = library();
        let sorted = derive_sorted(&list, SortKey::Name, false);
        let once = derive_filtered(&sorted, "a");
        assert_eq!(derive_filtered(&once, "a"), once);
    }

    #[test]
    fn original_index_survives_every_transform() {
        let list = library();
        let view = ViewState {
            search_query: "a".into(),
            sort_key: SortKey::Name,
            sort_reversed: true,
        };
        let (sorted, filtered) = view.derive(&list);
        for item in sorted.iter().chain(filtered.iter()) {
            assert_eq!(list[item.original_index].title(), item.title());
        }
        for group in group_by_folder(&filtered) {
            for item in group.items {
                assert_eq!(list[item.original_index].title(), item.title());
            }
        }
    }

    #[test]
    fn groups_cover_every_item_once() {
        let list = library();
        let sorted = derive_sorted(&list, SortKey::Original, false);
        let groups = group_by_folder(&sorted);

        let names: Vec<&str> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, vec!["blues", "Jazz", "jazz", "Unknown folder"]);

        let total: usize = groups.iter().map(|group| group.items.len()).sum();
        assert_eq!(total, sorted.len());
    }

    #[test]
    fn groups_preserve_relative_order() {
        let list = items(vec![
            json!({ "title": "z", "folder": "A" }),
            json!({ "title": "y", "folder": "B" }),
            json!({ "title": "x", "folder": "A" }),
        ]);
        let sorted = derive_sorted(&list, SortKey::Original, false);
        let groups = group_by_folder(&sorted);
        assert_eq!(groups[0].name, "A");
        assert_eq!(titles(&groups[0].items), vec!["z", "x"]);
        assert_eq!(titles(&groups[1].items), vec!["y"]);
    }

    #[test]
    fn sort_key_round_trips_select_values() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_value(key.as_str()), key);
        }
        assert_eq!(SortKey::from_value("rating"), SortKey::Original);
    }
}
