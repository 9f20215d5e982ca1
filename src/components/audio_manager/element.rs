// The single audio element: web-sys on wasm, a webview JS bridge elsewhere.
use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(not(target_arch = "wasm32"))]
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "localstream-audio";

/// What the element reports on each poll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct AudioSnapshot {
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub ended: bool,
}

#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    // Nothing is fetched until a track is chosen.
    audio.set_attribute("preload", "none").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
pub fn set_source(url: &str) {
    if let Some(audio) = get_or_create_audio_element() {
        audio.set_src(url);
    }
}

/// Asks the element to play and waits for it to accept or refuse.
#[cfg(target_arch = "wasm32")]
pub async fn start_playback() -> Result<(), String> {
    let audio = get_or_create_audio_element().ok_or("audio element unavailable")?;
    let promise = audio.play().map_err(|err| format!("{err:?}"))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| {
            js_sys::Reflect::get(&err, &"name".into())
                .ok()
                .and_then(|name| name.as_string())
                .unwrap_or_else(|| format!("{err:?}"))
        })
}

#[cfg(target_arch = "wasm32")]
pub fn pause_element() {
    if let Some(audio) = get_or_create_audio_element() {
        let _ = audio.pause();
    }
}

#[cfg(target_arch = "wasm32")]
pub fn seek_to(position: f64) {
    if let Some(audio) = get_or_create_audio_element() {
        audio.set_current_time(position.max(0.0));
    }
}

#[cfg(target_arch = "wasm32")]
pub fn set_loop(enabled: bool) {
    if let Some(audio) = get_or_create_audio_element() {
        audio.set_loop(enabled);
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn audio_snapshot() -> Option<AudioSnapshot> {
    let audio = get_or_create_audio_element()?;
    Some(AudioSnapshot {
        current_time: audio.current_time(),
        duration: audio.duration(),
        paused: audio.paused(),
        ended: audio.ended(),
    })
}

#[cfg(target_arch = "wasm32")]
pub async fn poll_delay(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
const AUDIO_BRIDGE_JS: &str = r#"
(() => {
  if (window.__localstreamAudio) {
    return true;
  }

  const existing = document.getElementById("localstream-audio");
  const audio = existing || document.createElement("audio");
  if (!existing) {
    audio.id = "localstream-audio";
    audio.preload = "none";
    audio.style.display = "none";
    audio.setAttribute("playsinline", "true");
    document.body.appendChild(audio);
  }

  window.__localstreamAudio = {
    audio,
    apply(cmd) {
      switch (cmd && cmd.type) {
        case "src":
          audio.src = cmd.url;
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          audio.currentTime = Math.max(0, cmd.position || 0);
          break;
        case "loop":
          audio.loop = !!cmd.enabled;
          break;
      }
    },
    snapshot() {
      return {
        current_time: Number.isFinite(audio.currentTime) ? audio.currentTime : 0,
        duration: Number.isFinite(audio.duration) ? audio.duration : 0,
        paused: !!audio.paused,
        ended: !!audio.ended,
      };
    },
  };
  return true;
})();
"#;

#[cfg(not(target_arch = "wasm32"))]
fn ensure_audio_bridge() {
    let _ = document::eval(AUDIO_BRIDGE_JS);
}

#[cfg(not(target_arch = "wasm32"))]
fn audio_command(value: serde_json::Value) {
    ensure_audio_bridge();
    let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        r#"(function () {{
            const bridge = window.__localstreamAudio;
            if (!bridge) return false;
            bridge.apply({payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_source(url: &str) {
    audio_command(serde_json::json!({ "type": "src", "url": url }));
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn start_playback() -> Result<(), String> {
    ensure_audio_bridge();
    let eval = document::eval(
        r#"return (async function () {
            const bridge = window.__localstreamAudio;
            if (!bridge) return "audio bridge unavailable";
            try {
              await bridge.audio.play();
              return null;
            } catch (err) {
              return (err && err.name) ? err.name : String(err);
            }
        })();"#,
    );
    match eval.join::<Option<String>>().await {
        Ok(None) => Ok(()),
        Ok(Some(reason)) => Err(reason),
        Err(err) => Err(format!("{err:?}")),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn pause_element() {
    audio_command(serde_json::json!({ "type": "pause" }));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn seek_to(position: f64) {
    audio_command(serde_json::json!({ "type": "seek", "position": position.max(0.0) }));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_loop(enabled: bool) {
    audio_command(serde_json::json!({ "type": "loop", "enabled": enabled }));
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn audio_snapshot() -> Option<AudioSnapshot> {
    ensure_audio_bridge();
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__localstreamAudio;
            return bridge ? bridge.snapshot() : null;
        })();"#,
    );
    eval.join::<Option<AudioSnapshot>>().await.ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn poll_delay(ms: u32) {
    let script = format!(
        r#"return (async function () {{
            await new Promise(resolve => setTimeout(resolve, {ms}));
            return true;
        }})();"#
    );
    let _ = document::eval(&script).await;
}
