//! Route table for the client.

use crate::components::{AppShell, ConnectView, MediaView};
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        ConnectView {},
        #[route("/media")]
        MediaView {},
        #[route("/:..segments")]
        UnknownRoute { segments: Vec<String> },
}

/// Unknown paths land on the connect screen.
#[component]
fn UnknownRoute(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    tracing::debug!(path = %segments.join("/"), "redirecting unknown route");
    use_effect(move || {
        navigator.replace(AppView::ConnectView {});
    });
    rsx! {}
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::ConnectView {} | AppView::UnknownRoute { .. } => "Connect",
        AppView::MediaView {} => "Library",
    }
}
