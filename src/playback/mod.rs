//! Playback controller state. Pure; the audio element side lives in
//! `components::audio_manager`.

use crate::api::{MediaItem, TrackKey};
use crate::config::SHUFFLE_RETRIES;
use crate::error::ClientError;
use crate::utils::{RequestToken, RequestTracker};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Idle,
    /// Source assigned and playback requested, not yet confirmed.
    Loading,
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What to do when the current track finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedAction {
    /// Repeat is on; the element's loop flag replays the track.
    LoopInPlace,
    /// Play this position of the sorted playlist.
    Play(usize),
    Stop,
}

/// Picks the next or previous playlist position.
///
/// Shuffle draws uniformly, re-rolling a bounded number of times while the
/// draw equals the current position, so a repeat is still possible.
/// Sequential movement wraps around the whole list.
pub fn advance<R: Rng>(
    len: usize,
    current: Option<usize>,
    direction: Direction,
    shuffle: bool,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if shuffle && len > 1 {
        let mut next = current;
        let mut attempts = 0;
        while attempts < SHUFFLE_RETRIES && next == current {
            next = Some(rng.gen_range(0..len));
            attempts += 1;
        }
        return next;
    }

    let target = match (direction, current) {
        (Direction::Forward, None) => 0,
        (Direction::Forward, Some(index)) => (index + 1) % len,
        (Direction::Backward, None) => len - 1,
        (Direction::Backward, Some(index)) => (index % len + len - 1) % len,
    };
    Some(target)
}

/// Position of `key` in the current ordering.
pub fn position_of(sorted: &[&MediaItem], key: &TrackKey) -> Option<usize> {
    sorted.iter().position(|item| key.matches(item))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackState {
    pub current: Option<TrackKey>,
    pub status: PlayerStatus,
    pub shuffle: bool,
    pub repeat: bool,
    pub current_time: f64,
    /// Duration reported by the media element once metadata is loaded.
    pub live_duration: Option<f64>,
    pub error: Option<ClientError>,
    starts: RequestTracker,
}

impl PlaybackState {
    /// True from the moment playback is requested until it pauses or stops.
    pub fn is_playing(&self) -> bool {
        matches!(self.status, PlayerStatus::Loading | PlayerStatus::Playing)
    }

    pub fn current_position(&self, sorted: &[&MediaItem]) -> Option<usize> {
        self.current.as_ref().and_then(|key| position_of(sorted, key))
    }

    pub fn current_item<'a>(&self, sorted: &[&'a MediaItem]) -> Option<&'a MediaItem> {
        self.current_position(sorted).map(|index| sorted[index])
    }

    /// Records `key` as current and waits for the element to confirm.
    pub fn begin(&mut self, key: TrackKey, stream_url: &str) -> RequestToken {
        self.current = Some(key);
        self.status = PlayerStatus::Loading;
        self.current_time = 0.0;
        self.live_duration = None;
        self.error = None;
        self.starts.issue(stream_url)
    }

    /// Re-requests playback of the paused current track.
    pub fn resume(&mut self, stream_url: &str) -> RequestToken {
        self.status = PlayerStatus::Loading;
        self.error = None;
        self.starts.issue(stream_url)
    }

    pub fn confirm_started(&mut self, token: &RequestToken) -> bool {
        if !self.starts.is_current(token) {
            return false;
        }
        if self.status == PlayerStatus::Loading {
            self.status = PlayerStatus::Playing;
        }
        true
    }

    /// The element refused to play; stay on the attempted track, not playing.
    pub fn start_failed(&mut self, token: &RequestToken, reason: impl Into<String>) -> bool {
        if !self.starts.is_current(token) {
            return false;
        }
        self.status = PlayerStatus::Paused;
        self.error = Some(ClientError::PlaybackStart {
            reason: reason.into(),
        });
        true
    }

    pub fn report(&mut self, error: ClientError) {
        self.error = Some(error);
    }

    pub fn pause(&mut self) {
        if self.current.is_some() {
            self.starts.invalidate();
            self.status = PlayerStatus::Paused;
        }
    }

    /// Mirrors play/pause changes made outside the app (media keys, browser UI).
    pub fn sync_paused(&mut self, paused: bool) {
        match (self.status, paused) {
            (PlayerStatus::Playing, true) => self.status = PlayerStatus::Paused,
            (PlayerStatus::Paused, false) if self.error.is_none() => {
                self.status = PlayerStatus::Playing
            }
            _ => {}
        }
    }

    pub fn stop(&mut self) {
        self.starts.invalidate();
        self.current = None;
        self.status = PlayerStatus::Idle;
        self.current_time = 0.0;
        self.live_duration = None;
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    pub fn on_time_update(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.current_time = seconds.max(0.0);
        }
    }

    pub fn on_metadata(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.live_duration = Some(duration.floor());
        }
    }

    /// Live duration, else the catalog's, else 0.
    pub fn effective_duration(&self, item: Option<&MediaItem>) -> f64 {
        self.live_duration
            .or_else(|| {
                item.map(|item| item.duration_seconds() as f64)
                    .filter(|seconds| *seconds > 0.0)
            })
            .unwrap_or(0.0)
    }

    /// Seeking and relative skips need a known duration.
    pub fn can_seek(&self, item: Option<&MediaItem>) -> bool {
        item.is_some() && self.effective_duration(item) > 0.0
    }

    pub fn seek_target(&self, requested: f64, item: Option<&MediaItem>) -> f64 {
        let duration = self.effective_duration(item);
        if !requested.is_finite() {
            return 0.0;
        }
        requested.clamp(0.0, duration)
    }

    pub fn skip_target(&self, delta: f64, item: Option<&MediaItem>) -> f64 {
        self.seek_target(self.current_time + delta, item)
    }

    /// Next or previous position under the current shuffle policy.
    pub fn target<R: Rng>(
        &self,
        sorted: &[&MediaItem],
        direction: Direction,
        rng: &mut R,
    ) -> Option<usize> {
        advance(
            sorted.len(),
            self.current_position(sorted),
            direction,
            self.shuffle,
            rng,
        )
    }

    pub fn on_ended<R: Rng>(&mut self, sorted: &[&MediaItem], rng: &mut R) -> EndedAction {
        if self.repeat {
            return EndedAction::LoopInPlace;
        }
        self.status = PlayerStatus::Ended;
        match self.target(sorted, Direction::Forward, rng) {
            Some(index) => EndedAction::Play(index),
            None => {
                self.stop();
                EndedAction::Stop
            }
        }
    }

    /// Whether the current track no longer resolves in the playlist.
    pub fn is_orphaned(&self, sorted: &[&MediaItem]) -> bool {
        self.current.is_some() && self.current_position(sorted).is_none()
    }

    pub fn reconcile(&mut self, sorted: &[&MediaItem]) {
        if self.is_orphaned(sorted) {
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
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

    fn five() -> Vec<MediaItem> {
        items((0..5).map(|n| json!({ "id": n, "title": format!("t{n}") })).collect())
    }

    #[test]
    fn sequential_forward_and_wrap() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(advance(5, Some(2), Direction::Forward, false, &mut rng), Some(3));
        assert_eq!(advance(5, Some(4), Direction::Forward, false, &mut rng), Some(0));
        assert_eq!(advance(5, None, Direction::Forward, false, &mut rng), Some(0));
    }

    #[test]
    fn sequential_backward_and_wrap() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(advance(5, Some(2), Direction::Backward, false, &mut rng), Some(1));
        assert_eq!(advance(5, Some(0), Direction::Backward, false, &mut rng), Some(4));
        assert_eq!(advance(5, None, Direction::Backward, false, &mut rng), Some(4));
    }

    #[test]
    fn empty_list_has_no_target() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(advance(0, None, Direction::Forward, true, &mut rng), None);
        assert_eq!(advance(0, Some(0), Direction::Backward, false, &mut rng), None);
    }

    #[test]
    fn shuffle_stays_in_range_and_mostly_moves() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut repeats = 0;
        for round in 0..1000 {
            let current = round % 5;
            let next = advance(5, Some(current), Direction::Forward, true, &mut rng)
                .expect("non-empty list");
            assert!(next < 5);
            if next == current {
                repeats += 1;
            }
        }
        assert!(repeats <= 10, "too many repeats: {repeats}");
    }

    #[test]
    fn shuffle_gives_up_after_bounded_retries() {
        let mut always_zero = StepRng::new(0, 0);
        assert_eq!(
            advance(5, Some(0), Direction::Forward, true, &mut always_zero),
            Some(0)
        );
    }

    #[test]
    fn single_item_shuffle_falls_back_to_sequential() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(advance(1, Some(0), Direction::Forward, true, &mut rng), Some(0));
    }

    #[test]
    fn identity_survives_resort() {
        let list = five();
        let mut state = PlaybackState::default();
        let forward: Vec<&MediaItem> = list.iter().collect();
        state.begin(list[3].key(), "http://nas/media/audio/3");
        assert_eq!(state.current_position(&forward), Some(3));

        let reversed: Vec<&MediaItem> = list.iter().rev().collect();
        assert_eq!(state.current_position(&reversed), Some(1));
        assert_eq!(state.current_item(&reversed).map(|i| i.title()), Some("t3".into()));
    }

    #[test]
    fn start_confirmation_respects_tokens() {
        let mut state = PlaybackState::default();
        let stale = state.begin(TrackKey::Index(0), "http://nas/media/audio/a");
        let fresh = state.begin(TrackKey::Index(1), "http://nas/media/audio/b");
        assert_eq!(state.status, PlayerStatus::Loading);

        assert!(!state.start_failed(&stale, "AbortError"));
        assert!(state.error.is_none());

        assert!(state.confirm_started(&fresh));
        assert_eq!(state.status, PlayerStatus::Playing);
        assert!(state.is_playing());
    }

    #[test]
    fn start_failure_keeps_identity() {
        let mut state = PlaybackState::default();
        let token = state.begin(TrackKey::Id("9".into()), "http://nas/media/audio/9");
        assert!(state.start_failed(&token, "NotAllowedError"));
        assert_eq!(state.current, Some(TrackKey::Id("9".into())));
        assert_eq!(state.status, PlayerStatus::Paused);
        assert!(!state.is_playing());
        assert!(matches!(state.error, Some(ClientError::PlaybackStart { .. })));
    }

    #[test]
    fn pause_discards_pending_start() {
        let mut state = PlaybackState::default();
        let token = state.begin(TrackKey::Index(0), "http://nas/media/audio/0");
        state.pause();
        assert!(!state.confirm_started(&token));
        assert_eq!(state.status, PlayerStatus::Paused);
    }

    #[test]
    fn ended_with_repeat_loops_in_place() {
        let list = five();
        let sorted: Vec<&MediaItem> = list.iter().collect();
        let mut state = PlaybackState::default();
        state.begin(list[4].key(), "x");
        state.toggle_repeat();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(state.on_ended(&sorted, &mut rng), EndedAction::LoopInPlace);
        assert_eq!(state.current, Some(list[4].key()));
    }

    #[test]
    fn ended_advances_with_wraparound() {
        let list = five();
        let sorted: Vec<&MediaItem> = list.iter().collect();
        let mut state = PlaybackState::default();
        state.begin(list[4].key(), "x");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(state.on_ended(&sorted, &mut rng), EndedAction::Play(0));
        assert_eq!(state.status, PlayerStatus::Ended);
    }

    #[test]
    fn ended_on_empty_playlist_goes_idle() {
        let mut state = PlaybackState::default();
        state.begin(TrackKey::Index(0), "x");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(state.on_ended(&[], &mut rng), EndedAction::Stop);
        assert_eq!(state.status, PlayerStatus::Idle);
        assert!(state.current.is_none());
    }

    #[test]
    fn toggles_do_not_touch_playback() {
        let mut state = PlaybackState::default();
        let token = state.begin(TrackKey::Index(2), "x");
        state.confirm_started(&token);
        state.toggle_shuffle();
        state.toggle_repeat();
        assert_eq!(state.status, PlayerStatus::Playing);
        assert_eq!(state.current, Some(TrackKey::Index(2)));
    }

    #[test]
    fn seek_clamps_to_known_duration() {
        let list = items(vec![json!({ "id": 1, "duration": 200 })]);
        let mut state = PlaybackState::default();
        assert_eq!(state.seek_target(250.0, Some(&list[0])), 200.0);
        assert_eq!(state.seek_target(-3.0, Some(&list[0])), 0.0);

        state.on_metadata(181.7);
        assert_eq!(state.effective_duration(Some(&list[0])), 181.0);
        assert_eq!(state.seek_target(190.0, Some(&list[0])), 181.0);

        let fresh = PlaybackState::default();
        assert_eq!(fresh.seek_target(30.0, None), 0.0);
    }

    #[test]
    fn seeking_needs_a_known_duration() {
        let list = items(vec![
            json!({ "id": 1 }),
            json!({ "id": 2, "duration": 90 }),
        ]);
        let mut state = PlaybackState::default();
        assert!(!state.can_seek(None));
        assert!(!state.can_seek(Some(&list[0])));
        assert!(state.can_seek(Some(&list[1])));

        state.on_metadata(42.0);
        assert!(state.can_seek(Some(&list[0])));
    }

    #[test]
    fn relative_skip_clamps_both_ends() {
        let list = items(vec![json!({ "id": 1, "duration": 100 })]);
        let mut state = PlaybackState::default();
        state.on_time_update(95.0);
        assert_eq!(state.skip_target(10.0, Some(&list[0])), 100.0);
        state.on_time_update(4.0);
        assert_eq!(state.skip_target(-10.0, Some(&list[0])), 0.0);
        assert_eq!(state.skip_target(10.0, Some(&list[0])), 14.0);
    }

    #[test]
    fn reconcile_stops_when_track_disappears() {
        let list = five();
        let mut state = PlaybackState::default();
        state.begin(TrackKey::Id("missing".into()), "x");
        let sorted: Vec<&MediaItem> = list.iter().collect();
        state.reconcile(&sorted);
        assert_eq!(state.status, PlayerStatus::Idle);

        state.begin(list[0].key(), "x");
        state.reconcile(&sorted);
        assert_eq!(state.current, Some(list[0].key()));
    }

    #[test]
    fn external_pause_is_mirrored() {
        let mut state = PlaybackState::default();
        let token = state.begin(TrackKey::Index(0), "x");
        state.confirm_started(&token);
        state.sync_paused(true);
        assert_eq!(state.status, PlayerStatus::Paused);
        state.sync_paused(false);
        assert_eq!(state.status, PlayerStatus::Playing);
    }
}
