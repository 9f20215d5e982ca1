//! Audio Manager - drives the audio element outside the render cycle and
//! mirrors what it reports back into `PlaybackState`.

mod element;
mod playback_api;

pub use element::*;
pub use playback_api::*;

use crate::api::{Catalog, TrackKey};
use crate::components::ServerUrlSignal;
use crate::config::POLL_INTERVAL_MS;
use crate::library::ViewState;
use crate::playback::{EndedAction, PlaybackState};
use dioxus::prelude::*;
use tracing::debug;

#[component]
pub fn AudioController() -> Element {
    let catalog = use_context::<Signal<Catalog>>();
    let view_state = use_context::<Signal<ViewState>>();
    let mut playback = use_context::<Signal<PlaybackState>>();
    let server_url = use_context::<ServerUrlSignal>().0;

    // The element's loop flag follows the repeat toggle.
    let repeat = use_memo(move || playback.read().repeat);
    use_effect(move || set_loop(repeat()));

    use_future(move || async move {
        let mut last_emit = 0.0f64;
        let mut ended_for: Option<TrackKey> = None;

        loop {
            poll_delay(POLL_INTERVAL_MS).await;

            let Some(snapshot) = audio_snapshot().await else {
                continue;
            };
            let current = playback.peek().current.clone();
            if current.is_none() {
                ended_for = None;
                continue;
            }

            if (snapshot.current_time - last_emit).abs() >= 0.2 {
                last_emit = snapshot.current_time;
                playback.write().on_time_update(snapshot.current_time);
            }

            if snapshot.duration.is_finite()
                && snapshot.duration > 0.0
                && playback.peek().live_duration != Some(snapshot.duration.floor())
            {
                playback.write().on_metadata(snapshot.duration);
            }

            if !snapshot.ended {
                ended_for = None;
                let before = playback.peek().status;
                let mut mirrored = playback.peek().clone();
                mirrored.sync_paused(snapshot.paused);
                if mirrored.status != before {
                    playback.write().sync_paused(snapshot.paused);
                }
                continue;
            }

            // `ended` stays set until a new source loads; act on it once.
            if ended_for == current {
                continue;
            }
            ended_for = current;

            let catalog = catalog.peek().clone();
            let view = view_state.peek().clone();
            let (sorted, _) = view.derive(catalog.items());
            let action = playback.write().on_ended(&sorted, &mut rand::thread_rng());
            debug!(?action, "track ended");

            match action {
                EndedAction::Play(index) => {
                    let url = server_url.peek().clone();
                    if let Some(url) = url {
                        play_item(sorted[index], &url, playback);
                    }
                }
                EndedAction::LoopInPlace => {
                    // Repeat turned on after the element already finished.
                    let item = playback.peek().current_item(&sorted);
                    let url = server_url.peek().clone();
                    if let (Some(item), Some(url)) = (item, url) {
                        seek_to(0.0);
                        resume_item(item, &url, playback);
                    }
                }
                EndedAction::Stop => pause_element(),
            }
        }
    });

    rsx! {}
}
