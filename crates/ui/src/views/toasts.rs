use std::time::{Duration, Instant};

use dioxus::prelude::*;
use quiz_core::{Notice, NoticeLevel};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    shown_at: Instant,
}

/// Shared toast queue, provided once by the layout.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn push(&mut self, notice: Notice) {
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        self.items.write().push(Toast {
            id,
            level: notice.level,
            message: notice.message,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.write().retain(|toast| toast.id != id);
    }

    fn prune(&mut self, now: Instant) {
        let expired = self
            .items
            .peek()
            .iter()
            .any(|toast| now.duration_since(toast.shown_at) >= TOAST_TTL);
        if expired {
            self.items
                .write()
                .retain(|toast| now.duration_since(toast.shown_at) < TOAST_TTL);
        }
    }
}

#[must_use]
pub fn level_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast toast-success",
        NoticeLevel::Warning => "toast toast-warning",
        NoticeLevel::Error => "toast toast-error",
    }
}

pub fn use_toast_provider() -> Toasts {
    use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    })
}

#[must_use]
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastStack() -> Element {
    let mut toasts = use_toasts();
    use_hook(move || {
        spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(500)).await;
                toasts.prune(Instant::now());
            }
        });
    });

    let items = toasts.items.read().clone();
    rsx! {
        div { class: "toasts", role: "status",
            for toast in items {
                div {
                    key: "{toast.id}",
                    class: level_class(toast.level),
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}
