use dioxus::document::eval;
use serde::Deserialize;
use services::{FocusHub, FocusSignal};

/// Reports window focus transitions back to Rust. Re-running it replaces the
/// previous listeners.
const FOCUS_BRIDGE_SCRIPT: &str = r#"(function() {
    const previous = window.__quizFocusBridge;
    if (previous) {
        previous.detach();
    }
    const onVisibility = () => {
        const event = document.visibilityState === "hidden" ? "lost" : "regained";
        dioxus.send({ event });
    };
    const onBlur = () => dioxus.send({ event: "lost" });
    const onFocus = () => dioxus.send({ event: "regained" });
    document.addEventListener("visibilitychange", onVisibility);
    window.addEventListener("blur", onBlur);
    window.addEventListener("focus", onFocus);
    window.__quizFocusBridge = {
        detach() {
            document.removeEventListener("visibilitychange", onVisibility);
            window.removeEventListener("blur", onBlur);
            window.removeEventListener("focus", onFocus);
        },
    };
})();"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum FocusReport {
    Lost,
    Regained,
}

impl From<FocusReport> for FocusSignal {
    fn from(report: FocusReport) -> Self {
        match report {
            FocusReport::Lost => FocusSignal::Lost,
            FocusReport::Regained => FocusSignal::Regained,
        }
    }
}

/// Feed window focus changes into `hub` until the webview goes away.
pub async fn run_focus_bridge(hub: FocusHub) {
    let mut bridge = eval(FOCUS_BRIDGE_SCRIPT);
    loop {
        match bridge.recv::<FocusReport>().await {
            Ok(report) => {
                tracing::debug!(?report, "window focus changed");
                hub.emit(report.into());
            }
            Err(err) => {
                tracing::warn!("focus bridge stopped: {err:?}");
                break;
            }
        }
    }
}
