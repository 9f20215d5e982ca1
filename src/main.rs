use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod db;
mod error;
mod library;
mod playback;
mod utils;

use components::AppView;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(config::LOG_LEVEL) {
        eprintln!("failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "theme-color", content: "#0f1115" }
        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
