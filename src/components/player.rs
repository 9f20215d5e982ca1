use crate::api::{format_time, Catalog, LocalStreamClient, MediaItem};
use crate::components::{
    pause_playback, play_item, resume_item, seek_current, skip_current, AlbumArt, Icon,
    ServerUrlSignal,
};
use crate::config::SKIP_SECONDS;
use crate::library::ViewState;
use crate::playback::{Direction, PlaybackState};
use dioxus::prelude::*;

/// Runs `f` against the playlist order currently on screen.
fn with_sorted<T>(
    catalog: Signal<Catalog>,
    view_state: Signal<ViewState>,
    f: impl FnOnce(&[&MediaItem]) -> T,
) -> T {
    let catalog = catalog.peek().clone();
    let view = view_state.peek().clone();
    let (sorted, _) = view.derive(catalog.items());
    f(&sorted)
}

fn current_item(catalog: Signal<Catalog>, playback: Signal<PlaybackState>) -> Option<MediaItem> {
    let key = playback.peek().current.clone()?;
    catalog.peek().find(&key).cloned()
}

fn scroll_to_row(dom_key: &str) {
    let key = serde_json::to_string(dom_key).unwrap_or_default();
    let script = format!(
        r#"(function () {{
            const key = {key};
            const row = document.querySelector('[data-track-key="' + CSS.escape(key) + '"]');
            if (row) row.scrollIntoView({{ behavior: "smooth", block: "center" }});
        }})();"#
    );
    let _ = document::eval(&script);
}

#[component]
pub fn Player() -> Element {
    let catalog = use_context::<Signal<Catalog>>();
    let view_state = use_context::<Signal<ViewState>>();
    let mut playback = use_context::<Signal<PlaybackState>>();
    let server_url = use_context::<ServerUrlSignal>().0;

    let state = playback();
    let item = state
        .current
        .as_ref()
        .and_then(|key| catalog.read().find(key).cloned());
    let duration = state.effective_duration(item.as_ref());
    let position = if duration > 0.0 {
        state.current_time.min(duration)
    } else {
        state.current_time
    };
    let art = item.as_ref().and_then(|item| {
        server_url().and_then(|url| LocalStreamClient::new(&url).thumbnail_url(item))
    });
    let title = item
        .as_ref()
        .map(|item| item.title())
        .unwrap_or_else(|| "Nothing playing".to_string());
    let artist = item.as_ref().map(|item| item.artist()).unwrap_or_default();
    let row_key = item.as_ref().map(|item| item.dom_key());
    let has_item = item.is_some();
    let can_seek = state.can_seek(item.as_ref());
    let has_tracks = !catalog.read().is_empty();
    let is_playing = state.is_playing();
    let playback_error = state.error.clone();

    let on_toggle = move |_: MouseEvent| {
        let Some(url) = server_url.peek().clone() else {
            return;
        };
        let playing = playback.peek().is_playing();
        with_sorted(catalog, view_state, |sorted| {
            let current = playback.peek().current_item(sorted);
            match current {
                None => {
                    if let Some(first) = sorted.first() {
                        play_item(first, &url, playback);
                    }
                }
                Some(_) if playing => pause_playback(playback),
                Some(item) => resume_item(item, &url, playback),
            }
        });
    };

    let step = move |direction: Direction| {
        let Some(url) = server_url.peek().clone() else {
            return;
        };
        with_sorted(catalog, view_state, |sorted| {
            let target = playback
                .peek()
                .target(sorted, direction, &mut rand::thread_rng());
            if let Some(index) = target {
                play_item(sorted[index], &url, playback);
            }
        });
    };

    let on_seek = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<f64>() {
            let item = current_item(catalog, playback);
            seek_current(value, item.as_ref(), playback);
        }
    };

    let skip = move |delta: f64| {
        let item = current_item(catalog, playback);
        skip_current(delta, item.as_ref(), playback);
    };

    rsx! {
        footer { class: "player",
            div { class: "player-track",
                AlbumArt { url: art, alt: title.clone(), class: "player-art".to_string() }
                div { class: "player-meta",
                    button {
                        class: "player-title",
                        r#type: "button",
                        disabled: !has_item,
                        title: "Show in list",
                        onclick: move |_| {
                            if let Some(key) = row_key.as_deref() {
                                scroll_to_row(key);
                            }
                        },
                        "{title}"
                    }
                    if !artist.is_empty() {
                        span { class: "player-artist muted", "{artist}" }
                    }
                }
            }

            div { class: "player-center",
                div { class: "player-controls",
                    button {
                        class: if state.repeat { "icon-btn is-on" } else { "icon-btn" },
                        aria_label: "Repeat",
                        onclick: move |_| playback.write().toggle_repeat(),
                        Icon { name: "repeat".to_string(), class: "icon".to_string() }
                    }
                    button {
                        class: "icon-btn",
                        aria_label: "Previous",
                        disabled: !has_tracks,
                        onclick: move |_| step(Direction::Backward),
                        Icon { name: "prev".to_string(), class: "icon".to_string() }
                    }
                    button {
                        class: "icon-btn",
                        aria_label: "Back 10 seconds",
                        disabled: !can_seek,
                        onclick: move |_| skip(-SKIP_SECONDS),
                        Icon { name: "rewind".to_string(), class: "icon".to_string() }
                    }
                    button {
                        class: "icon-btn play-toggle",
                        aria_label: if is_playing { "Pause" } else { "Play" },
                        disabled: !has_tracks,
                        onclick: on_toggle,
                        if is_playing {
                            Icon { name: "pause".to_string(), class: "icon-lg".to_string() }
                        } else {
                            Icon { name: "play".to_string(), class: "icon-lg".to_string() }
                        }
                    }
                    button {
                        class: "icon-btn",
                        aria_label: "Forward 10 seconds",
                        disabled: !can_seek,
                        onclick: move |_| skip(SKIP_SECONDS),
                        Icon { name: "fast-forward".to_string(), class: "icon".to_string() }
                    }
                    button {
                        class: "icon-btn",
                        aria_label: "Next",
                        disabled: !has_tracks,
                        onclick: move |_| step(Direction::Forward),
                        Icon { name: "next".to_string(), class: "icon".to_string() }
                    }
                    button {
                        class: if state.shuffle { "icon-btn is-on" } else { "icon-btn" },
                        aria_label: "Shuffle",
                        onclick: move |_| playback.write().toggle_shuffle(),
                        Icon { name: "shuffle".to_string(), class: "icon".to_string() }
                    }
                }

                div { class: "timeline",
                    span { class: "time muted", "{format_time(position)}" }
                    input {
                        r#type: "range",
                        min: "0",
                        max: "{duration}",
                        step: "1",
                        value: "{position}",
                        disabled: !can_seek,
                        oninput: on_seek,
                    }
                    span { class: "time muted", "{format_time(duration)}" }
                }

                if let Some(err) = playback_error {
                    p { class: "player-error", role: "alert", "{err}" }
                }
            }
        }
    }
}
