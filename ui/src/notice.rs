//! User-facing notices (toasts).
//!
//! Controllers return [`Notice`] values; screens push them here and this
//! module renders the stack in a fixed overlay, auto-dismissing after a few
//! seconds. Every flow failure surfaces through this — nothing is swallowed.

use std::time::Duration;

use auth::{Notice, NoticeLevel};
use dioxus::prelude::*;

const DISMISS_AFTER: Duration = Duration::from_secs(4);

/// A notice currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveNotice {
    pub id: u64,
    pub notice: Notice,
}

/// The on-screen notice stack.
pub fn use_notices() -> Signal<Vec<ActiveNotice>> {
    use_context::<Signal<Vec<ActiveNotice>>>()
}

/// Show a notice and schedule its dismissal. The timer outlives the pushing
/// screen: a notice pushed right before a navigation still goes away.
pub fn push_notice(notices: &mut Signal<Vec<ActiveNotice>>, notice: Notice) {
    let id = notices.peek().last().map(|n| n.id + 1).unwrap_or(0);
    notices.write().push(ActiveNotice { id, notice });

    let mut notices = *notices;
    spawn_forever(async move {
        crate::sleep(DISMISS_AFTER).await;
        notices.write().retain(|n| n.id != id);
    });
}

/// Provides the notice context and renders the overlay.
#[component]
pub fn NoticeProvider(children: Element) -> Element {
    let mut notices = use_signal(Vec::<ActiveNotice>::new);
    use_context_provider(move || notices);

    rsx! {
        {children}

        div {
            class: "notice-stack",
            for active in notices() {
                NoticeItem {
                    key: "{active.id}",
                    active: active.clone(),
                    on_dismiss: move |id: u64| notices.write().retain(|n| n.id != id),
                }
            }
        }
    }
}

#[component]
fn NoticeItem(active: ActiveNotice, on_dismiss: EventHandler<u64>) -> Element {
    let id = active.id;
    let class = match active.notice.level {
        NoticeLevel::Info => "notice notice-info",
        NoticeLevel::Success => "notice notice-success",
        NoticeLevel::Error => "notice notice-error",
    };

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_dismiss.call(id),
            div { class: "notice-title", "{active.notice.title}" }
            div { class: "notice-body", "{active.notice.body}" }
        }
    }
}
