//! Compile-time configuration for the LocalStream client.

use tracing::Level;

/// Storage key holding the normalized server base URL.
pub const STORAGE_KEY: &str = "localstream_server_url";

/// Media listing endpoint, relative to the server base.
pub const MEDIA_LIST_PATH: &str = "/api/media";

/// Streaming endpoint prefix; the url-encoded identifier is appended.
pub const AUDIO_STREAM_PATH: &str = "/media/audio/";

/// Object keys that may carry the item list, in priority order.
pub const LIST_KEYS: [&str; 4] = ["items", "files", "tracks", "audio"];

/// Album names whose tracks are never listed (system sounds).
/// `alams` matches a misspelling seen on real servers and is kept as-is.
pub const BLOCKED_ALBUMS: [&str; 4] = ["alams", "alarms", "ringtones", "notifications"];

/// Album art path some servers return for every track; it never resolves.
pub const BLOCKED_ART_PATH: &str = "/thumbnail/album/3579481289389474209";

pub const UNKNOWN_TITLE: &str = "Unknown title";
pub const UNKNOWN_FOLDER: &str = "Unknown folder";

/// Relative skip distance for the player bar.
pub const SKIP_SECONDS: f64 = 10.0;

/// Audio element poll interval.
pub const POLL_INTERVAL_MS: u32 = 250;

/// Re-rolls allowed when shuffle lands on the current track.
pub const SHUFFLE_RETRIES: usize = 5;

/// Durations strictly between these bounds are treated as milliseconds.
pub const DURATION_MS_LOWER: f64 = 6000.0;
pub const DURATION_MS_UPPER: f64 = 60.0 * 60.0 * 24.0 * 1000.0;

pub const LOG_LEVEL: Level = Level::INFO;
