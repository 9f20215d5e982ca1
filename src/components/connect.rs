use crate::components::{AppView, Icon, ServerUrlSignal};
use crate::db::{load_server_url, normalize_server_url, remember_server_url};
use crate::error::ClientError;
use dioxus::prelude::*;
use tracing::{info, warn};

#[component]
pub fn ConnectView() -> Element {
    let mut server_url = use_context::<ServerUrlSignal>().0;
    let navigator = use_navigator();
    let mut input = use_signal(|| load_server_url().unwrap_or_default());
    let mut error = use_signal(|| None::<ClientError>);

    // Connected (stored URL at startup, or just submitted): show the library.
    use_effect(move || {
        if server_url().is_some() {
            navigator.replace(AppView::MediaView {});
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match normalize_server_url(&input()) {
            Ok(url) => {
                info!(%url, "connecting to server");
                remember_server_url(&url);
                error.set(None);
                server_url.set(Some(url));
            }
            Err(err) => {
                warn!(input = %input(), "rejected server url");
                error.set(Some(err));
            }
        }
    };

    rsx! {
        section { class: "connect-page",
            div { class: "connect-card",
                div { class: "connect-header",
                    Icon { name: "server".to_string(), class: "icon-lg".to_string() }
                    h1 { "Connect to LocalStream" }
                    p { class: "muted",
                        "Enter the address shown by the LocalStream app on your phone."
                    }
                }
                form { class: "connect-form", onsubmit: on_submit,
                    label { r#for: "server-url", "Server URL" }
                    input {
                        id: "server-url",
                        r#type: "text",
                        placeholder: "http://192.168.1.11:8080",
                        autocomplete: "off",
                        value: "{input}",
                        oninput: move |e| input.set(e.value()),
                    }
                    if let Some(err) = error() {
                        p { class: "form-error", role: "alert", "{err}" }
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Connect" }
                }
            }
        }
    }
}
