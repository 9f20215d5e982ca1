use crate::components::{view_label, AppView};
use crate::db::load_server_url;
use dioxus::prelude::*;

/// The connected server's base URL, `None` while disconnected.
#[derive(Clone, Copy)]
pub struct ServerUrlSignal(pub Signal<Option<String>>);

#[component]
pub fn AppShell() -> Element {
    let server_url = use_signal(load_server_url);
    use_context_provider(|| ServerUrlSignal(server_url));

    let view = use_route::<AppView>();

    rsx! {
        document::Title { "LocalStream · {view_label(&view)}" }
        div { class: "app-container",
            main { class: "main-scroll",
                Outlet::<AppView> {}
            }
        }
    }
}
