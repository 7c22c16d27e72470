//! Transient notice stack.
//!
//! Upload successes and failures surface here for a few seconds on top of
//! the inline lane state, so nothing fails silently.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::config::NOTICE_TTL_MS;
use crate::types::{Notice, NoticeLevel};

/// Push a notice and schedule its removal after the fixed TTL.
pub fn push_notice(set_notices: WriteSignal<Vec<Notice>>, level: NoticeLevel, message: &str) {
    let id = rand::random::<u64>();
    let message = message.to_string();

    match level {
        NoticeLevel::Error => log::error!("{} {}", level.emoji(), message),
        NoticeLevel::Success | NoticeLevel::Info => log::info!("{} {}", level.emoji(), message),
    }

    set_notices.update(|notices| {
        notices.push(Notice { id, level, message });
    });

    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TTL_MS).await;
        set_notices.update(|notices| notices.retain(|notice| notice.id != id));
    });
}

#[component]
pub fn NoticeStack(notices: ReadSignal<Vec<Notice>>) -> impl IntoView {
    view! {
        <div class="notice-stack" id="noticeStack">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let class_name = format!("notice {}", notice.level.css_class());
                    view! {
                        <div class=class_name>
                            {notice.level.emoji()} " " {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
