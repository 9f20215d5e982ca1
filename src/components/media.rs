use crate::api::{duration_label, Catalog, LocalStreamClient, MediaItem};
use crate::components::{
    pause_element, play_item, stop_playback, AppView, AudioController, Icon, Player, ServerUrlSignal, DEFAULT_ART,
};
use crate::error::ClientError;
use crate::library::{group_by_folder, SortKey, ViewState};
use crate::playback::PlaybackState;
use crate::utils::RequestTracker;
use dioxus::prelude::*;
use tracing::{debug, error};

/// What the status line above the list says.
#[derive(Debug, Clone, PartialEq)]
enum ListStatus {
    Loading,
    Failed(ClientError),
    Empty,
    NoMatches(String),
    Ready,
}

fn list_status(
    loading: bool,
    error: Option<ClientError>,
    catalog_len: usize,
    visible_len: usize,
    query: &str,
) -> ListStatus {
    if loading {
        ListStatus::Loading
    } else if let Some(err) = error {
        ListStatus::Failed(err)
    } else if catalog_len == 0 {
        ListStatus::Empty
    } else if visible_len == 0 {
        ListStatus::NoMatches(query.trim().to_string())
    } else {
        ListStatus::Ready
    }
}

#[component]
pub fn MediaView() -> Element {
    let mut server_url = use_context::<ServerUrlSignal>().0;
    let navigator = use_navigator();

    let mut catalog = use_signal(Catalog::default);
    let mut view_state = use_signal(ViewState::default);
    let mut playback = use_signal(PlaybackState::default);
    // A connected view starts loading right away; showing "empty" first would flash.
    let mut loading = use_signal(|| server_url.peek().is_some());
    let mut load_error = use_signal(|| None::<ClientError>);
    let mut requests = use_signal(RequestTracker::default);

    use_context_provider(|| catalog);
    use_context_provider(|| view_state);
    use_context_provider(|| playback);

    // Not connected: back to the connect screen.
    use_effect(move || {
        if server_url().is_none() {
            navigator.replace(AppView::ConnectView {});
        }
    });

    // (Re)load whenever the server changes; only the latest request may land.
    use_effect(move || {
        let Some(url) = server_url() else {
            return;
        };
        let token = requests.write().issue(url.clone());
        loading.set(true);
        load_error.set(None);

        spawn(async move {
            let result = LocalStreamClient::new(&url).fetch_catalog().await;
            if !requests.peek().is_current(&token) {
                debug!(%url, generation = token.generation(), "dropping stale catalog response");
                return;
            }
            match result {
                Ok(loaded) => catalog.set(loaded),
                Err(err) => {
                    error!(error = ?err, "catalog load failed");
                    load_error.set(Some(err));
                }
            }
            loading.set(false);
        });
    });

    // A reload can remove the current track.
    use_effect(move || {
        let catalog = catalog();
        let view = view_state.peek().clone();
        let (sorted, _) = view.derive(catalog.items());
        if playback.peek().is_orphaned(&sorted) {
            debug!("current track left the catalog; stopping");
            pause_element();
            playback.write().reconcile(&sorted);
        }
    });

    let on_change_server = move |_: MouseEvent| {
        stop_playback(playback);
        requests.write().invalidate();
        server_url.set(None);
    };

    let connected_to = server_url().unwrap_or_default();
    let catalog_now = catalog();
    let view = view_state();
    let (_, filtered) = view.derive(catalog_now.items());
    let groups = group_by_folder(&filtered);
    let current = use_memo(move || playback.read().current.clone());
    let is_playing = use_memo(move || playback.read().is_playing());
    let sort_value = view.sort_key.as_str();
    let reverse_label = if view.sort_reversed { "↑" } else { "↓" };
    let status = list_status(
        loading(),
        load_error(),
        catalog_now.len(),
        filtered.len(),
        &view.search_query,
    );
    let status_line = match status {
        ListStatus::Loading => rsx! {
            div { class: "status",
                Icon { name: "loader".to_string(), class: "icon".to_string() }
                span { "Loading your library…" }
            }
        },
        ListStatus::Failed(err) => rsx! {
            div { class: "status status-error", role: "alert", "{err}" }
        },
        ListStatus::Empty => rsx! {
            div { class: "status muted", "No audio files found on this server." }
        },
        ListStatus::NoMatches(query) => rsx! {
            div { class: "status muted", "No tracks match \"{query}\"." }
        },
        ListStatus::Ready => rsx! {},
    };

    rsx! {
        div { class: "media-page",
            header { class: "top-bar",
                div { class: "top-bar-title",
                    Icon { name: "music".to_string(), class: "icon".to_string() }
                    span { class: "muted", "Connected to " }
                    span { class: "server-url", "{connected_to}" }
                }
                button { class: "btn", onclick: on_change_server, "Change Server" }
            }

            div { class: "toolbar",
                div { class: "search-box",
                    Icon { name: "search".to_string(), class: "icon".to_string() }
                    input {
                        r#type: "search",
                        placeholder: "Search title, artist or folder",
                        value: "{view.search_query}",
                        oninput: move |e| view_state.write().search_query = e.value(),
                    }
                    if !view.search_query.is_empty() {
                        button {
                            class: "icon-btn",
                            aria_label: "Clear search",
                            onclick: move |_| view_state.write().search_query.clear(),
                            Icon { name: "x".to_string(), class: "icon".to_string() }
                        }
                    }
                }
                select {
                    class: "sort-select",
                    aria_label: "Sort by",
                    value: "{sort_value}",
                    onchange: move |e| view_state.write().sort_key = SortKey::from_value(&e.value()),
                    for key in SortKey::ALL {
                        option {
                            key: "{key.as_str()}",
                            value: key.as_str(),
                            selected: key == view.sort_key,
                            "{key.label()}"
                        }
                    }
                }
                button {
                    class: if view.sort_reversed { "icon-btn is-on" } else { "icon-btn" },
                    aria_label: "Reverse order",
                    title: "Reverse order",
                    onclick: move |_| {
                        let mut view = view_state.write();
                        view.sort_reversed = !view.sort_reversed;
                    },
                    "{reverse_label}"
                }
            }

            {status_line}

            div { class: "track-list",
                for group in groups.iter() {
                    section { key: "{group.name}", class: "folder-group",
                        h2 { class: "folder-title",
                            span { "{group.name}" }
                            span { class: "muted", "{group.items.len()}" }
                        }
                        ul {
                            for item in group.items.iter() {
                                TrackRow {
                                    key: "{item.dom_key()}",
                                    item: (*item).clone(),
                                    active: current.read().as_ref().is_some_and(|key| key.matches(item)),
                                    playing: is_playing(),
                                }
                            }
                        }
                    }
                }
            }

            Player {}
            AudioController {}
        }
    }
}

#[component]
fn TrackRow(item: MediaItem, active: bool, playing: bool) -> Element {
    let server_url = use_context::<ServerUrlSignal>().0;
    let playback = use_context::<Signal<PlaybackState>>();

    let art = server_url().and_then(|url| LocalStreamClient::new(&url).thumbnail_url(&item));
    let title = item.title();
    let artist = item.artist();
    let duration = duration_label(item.duration_seconds());
    let dom_key = item.dom_key();
    let row_class = if active { "track-row is-active" } else { "track-row" };
    let indicator = if active && playing { "equalizer" } else { "play" };

    let on_play = move |_: MouseEvent| {
        let url = server_url.peek().clone();
        if let Some(url) = url {
            play_item(&item, &url, playback);
        }
    };

    rsx! {
        li { class: "{row_class}", "data-track-key": "{dom_key}",
            AlbumArt { url: art, alt: title.clone(), class: "track-art".to_string() }
            div { class: "track-meta",
                span { class: "track-title", "{title}" }
                if !artist.is_empty() {
                    span { class: "track-artist muted", "{artist}" }
                }
            }
            span { class: "track-duration muted", "{duration}" }
            button {
                class: "icon-btn play-btn",
                aria_label: "Play {title}",
                onclick: on_play,
                Icon { name: indicator.to_string(), class: "icon".to_string() }
            }
        }
    }
}

/// Cover image that swaps to the bundled artwork when missing or broken.
#[component]
pub fn AlbumArt(url: Option<String>, alt: String, class: String) -> Element {
    let mut failed = use_signal(|| None::<String>);
    let remote = url.filter(|url| failed.read().as_ref() != Some(url));
    let on_error = {
        let remote = remote.clone();
        move |_: ImageEvent| failed.set(remote.clone())
    };

    rsx! {
        if let Some(src) = remote {
            img {
                class: "{class}",
                src: "{src}",
                alt: "{alt}",
                loading: "lazy",
                onerror: on_error,
            }
        } else {
            img { class: "{class}", src: DEFAULT_ART, alt: "{alt}" }
        }
    }
}
