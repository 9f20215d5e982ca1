// Playback actions shared by the list rows, the player bar and the controller.
use super::element::{pause_element, seek_to, set_source, start_playback};
use crate::api::{LocalStreamClient, MediaItem};
use crate::playback::PlaybackState;
use crate::utils::RequestToken;
use dioxus::prelude::*;
use tracing::{debug, info, warn};

/// Makes `item` current and starts it from the beginning.
pub fn play_item(item: &MediaItem, server_url: &str, mut playback: Signal<PlaybackState>) {
    let url = match LocalStreamClient::new(server_url).stream_url(item) {
        Ok(url) => url,
        Err(err) => {
            warn!(title = %item.title(), "track has no identifier");
            playback.write().report(err);
            return;
        }
    };

    let token = playback.write().begin(item.key(), &url);
    info!(title = %item.title(), %url, "starting track");
    set_source(&url);
    await_start(token, playback);
}

/// Plays the current track again from where it paused.
pub fn resume_item(item: &MediaItem, server_url: &str, mut playback: Signal<PlaybackState>) {
    let url = match LocalStreamClient::new(server_url).stream_url(item) {
        Ok(url) => url,
        Err(err) => {
            playback.write().report(err);
            return;
        }
    };
    let token = playback.write().resume(&url);
    await_start(token, playback);
}

fn await_start(token: RequestToken, mut playback: Signal<PlaybackState>) {
    spawn(async move {
        match start_playback().await {
            Ok(()) => {
                if !playback.write().confirm_started(&token) {
                    debug!(url = token.target(), "ignoring superseded playback start");
                }
            }
            Err(reason) => {
                if playback.write().start_failed(&token, reason.clone()) {
                    warn!(%reason, url = token.target(), "playback start rejected");
                }
            }
        }
    });
}

pub fn pause_playback(mut playback: Signal<PlaybackState>) {
    pause_element();
    playback.write().pause();
}

pub fn stop_playback(mut playback: Signal<PlaybackState>) {
    pause_element();
    playback.write().stop();
}

/// Seeks to an absolute position, clamped to the known duration.
pub fn seek_current(position: f64, item: Option<&MediaItem>, mut playback: Signal<PlaybackState>) {
    let target = playback.peek().seek_target(position, item);
    seek_to(target);
    playback.write().on_time_update(target);
}

/// Seeks relative to the current position.
pub fn skip_current(delta: f64, item: Option<&MediaItem>, mut playback: Signal<PlaybackState>) {
    let target = playback.peek().skip_target(delta, item);
    seek_to(target);
    playback.write().on_time_update(target);
}
