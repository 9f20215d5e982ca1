//! The components module contains the routed views and the player chrome.

mod app;
mod app_view;
mod audio_manager;
mod connect;
mod icons;
mod media;
mod player;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use connect::*;
pub use icons::*;
pub use media::*;
pub use player::*;

use dioxus::prelude::*;

/// Shown when an item has no usable cover.
pub const DEFAULT_ART: Asset = asset!("/assets/default-art.svg");
