//! Document uploader section.
//!
//! Renders the upload lanes owned by a [`SlotManager`], wires each lane's
//! hidden file input and action buttons, and drives the async transport.
//! The manager lives in a single signal; every mutation goes through its
//! transition methods, so the UI layer stays a thin event adapter.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::components::notices::{push_notice, NoticeStack};
use crate::config::UploadConfig;
use crate::services::upload_document;
use crate::slots::{FileLike, Slot, SlotId, SlotManager, SlotPhase};
use crate::types::{Notice, NoticeLevel};

/// Browser file handle behind the manager's file seam.
#[derive(Clone, Debug, PartialEq)]
pub struct WebFile(pub web_sys::File);

impl FileLike for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        // File sizes come back as f64 from the DOM
        self.0.size() as u64
    }
}

fn status_label<F: FileLike>(slot: &Slot<F>) -> &'static str {
    match &slot.phase {
        SlotPhase::Idle => "No file selected",
        SlotPhase::Selected { .. } => "Ready to upload",
        SlotPhase::Replacing { .. } => "Ready to replace the stored file",
        SlotPhase::Uploading { .. } => "Uploading...",
        SlotPhase::Uploaded { .. } => "Uploaded",
        SlotPhase::Failed { .. } => "Upload failed",
    }
}

#[component]
pub fn UploaderSection(
    /// Invoked once per successful upload with the stored location.
    #[prop(into)]
    on_uploaded: Callback<String>,
    /// Override the default upload configuration.
    #[prop(optional)]
    config: Option<UploadConfig>,
) -> impl IntoView {
    let config = store_value(config.unwrap_or_default());
    let manager = create_rw_signal(SlotManager::<WebFile>::new(config.get_value()));
    let (notices, set_notices) = create_signal(Vec::<Notice>::new());

    let accept = config.with_value(|c| {
        c.allowed_extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(",")
    });
    let hint = config.with_value(|c| {
        format!(
            "Accepted: {} (up to {} MB per file). A new lane appears once every lane is filled.",
            c.allowed_extensions.join(", "),
            c.max_document_bytes / (1024 * 1024),
        )
    });

    view! {
        <div class="uploader-section" id="documentUploader">
            <h2>"Supporting documents"</h2>
            <p class="uploader-hint">{hint}</p>
            <For
                each=move || {
                    manager.with(|m| m.slots().iter().map(|slot| slot.id.clone()).collect::<Vec<_>>())
                }
                key=|slot_id| slot_id.clone()
                children=move |slot_id| {
                    view! {
                        <UploadLane
                            slot_id=slot_id
                            manager=manager
                            config=config
                            set_notices=set_notices
                            on_uploaded=on_uploaded
                            accept=accept.clone()
                        />
                    }
                }
            />
            <NoticeStack notices=notices/>
        </div>
    }
}

/// One upload lane row.
///
/// Lane rows are created per slot id and never torn down (lanes are
/// cleared in place), so each row subscribes to the manager signal and
/// reads its own slot back out on every change.
#[component]
fn UploadLane(
    slot_id: SlotId,
    manager: RwSignal<SlotManager<WebFile>>,
    config: StoredValue<UploadConfig>,
    set_notices: WriteSignal<Vec<Notice>>,
    on_uploaded: Callback<String>,
    accept: String,
) -> impl IntoView {
    let id = store_value(slot_id.clone());
    // Stored so every handler stays Copy; handlers inside Show children
    // must not capture anything they would move out of.
    let input_id = store_value(format!("laneInput-{}", slot_id));

    let lane = create_memo(move |_| {
        manager.with(|m| {
            m.slots()
                .iter()
                .find(|slot| slot.id == id.get_value())
                .cloned()
        })
    });

    // Programmatic click on the hidden input, as the picker has no
    // visible control of its own.
    let open_picker = move || {
        input_id.with_value(|input_id| {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                if let Some(element) = document.get_element_by_id(input_id) {
                    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                        input.click();
                    }
                }
            }
        })
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Reset the input so picking the same file again still fires
        input.set_value("");

        let outcome = manager
            .try_update(|m| m.select_file(&id.get_value(), WebFile(file)))
            .unwrap_or(Ok(()));
        if let Err(e) = outcome {
            push_notice(set_notices, NoticeLevel::Error, &e.to_string());
        }
    };

    let start_upload = move |_| {
        let staged = manager.try_update(|m| m.begin_upload(&id.get_value()));
        let ticket = match staged {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                push_notice(set_notices, NoticeLevel::Error, &e.to_string());
                return;
            }
            None => return,
        };
        let cfg = config.get_value();

        spawn_local(async move {
            let progress_id = ticket.slot_id.clone();
            let result = upload_document(
                &ticket.file.0,
                &ticket.original_name,
                ticket.queued_at,
                &cfg,
                move |sent, total| {
                    manager.update(|m| m.record_progress(&progress_id, sent, total));
                },
            )
            .await;

            match result {
                Ok(location) => {
                    let settled = manager
                        .try_update(|m| m.complete_upload(&ticket.slot_id, location.clone()))
                        .unwrap_or(false);
                    if settled {
                        push_notice(
                            set_notices,
                            NoticeLevel::Success,
                            &format!("{} uploaded", ticket.original_name),
                        );
                        on_uploaded.call(location);

                        // Let a batch of near-simultaneous completions land
                        // before scanning for a fresh lane.
                        TimeoutFuture::new(cfg.replenish_settle_ms).await;
                        manager.update(|m| {
                            m.replenish_if_full();
                        });
                    }
                }
                Err(e) => {
                    manager.update(|m| {
                        m.fail_upload(&ticket.slot_id, e.to_string());
                    });
                    push_notice(set_notices, NoticeLevel::Error, &e.to_string());
                }
            }
        });
    };

    let request_replace = move |_| {
        match manager.with(|m| m.request_replace(&id.get_value())) {
            Ok(()) => open_picker(),
            Err(e) => push_notice(set_notices, NoticeLevel::Error, &e.to_string()),
        }
    };

    let clear_lane = move |_| {
        manager.update(|m| {
            let _ = m.clear_slot(&id.get_value());
        });
    };

    view! {
        <div class=move || {
            format!(
                "upload-lane {}",
                lane.get().map(|slot| slot.phase_class()).unwrap_or("lane-idle"),
            )
        }>
            <div class="lane-main">
                <span class="lane-name">
                    {move || {
                        lane.get()
                            .and_then(|slot| slot.original_name)
                            .unwrap_or_else(|| "No file selected".to_string())
                    }}
                </span>
                <span class="lane-status">
                    {move || lane.get().map(|slot| status_label(&slot)).unwrap_or("")}
                </span>
            </div>

            <Show
                when=move || lane.get().map(|slot| slot.is_uploading()).unwrap_or(false)
                fallback=|| view! { }
            >
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style=move || {
                            format!(
                                "width: {}%;",
                                lane.get().map(|slot| slot.progress_percent()).unwrap_or(0),
                            )
                        }
                    ></div>
                </div>
            </Show>

            <Show
                when=move || lane.get().map(|slot| slot.last_error().is_some()).unwrap_or(false)
                fallback=|| view! { }
            >
                <div class="error-message">
                    {move || {
                        lane.get()
                            .and_then(|slot| slot.last_error().map(str::to_string))
                            .unwrap_or_default()
                    }}
                </div>
            </Show>

            <Show
                when=move || lane.get().map(|slot| slot.is_uploaded()).unwrap_or(false)
                fallback=|| view! { }
            >
                <a
                    class="doc-link"
                    target="_blank"
                    href=move || {
                        lane.get()
                            .and_then(|slot| slot.uploaded_location().map(str::to_string))
                            .unwrap_or_default()
                    }
                >
                    "View stored document"
                </a>
            </Show>

            <input
                type="file"
                id=input_id.get_value()
                accept=accept
                style="display:none"
                on:change=on_file_change
            />

            <div class="lane-actions">
                <Show
                    when=move || {
                        lane.get()
                            .map(|slot| !slot.is_uploaded() && !slot.is_uploading())
                            .unwrap_or(false)
                    }
                    fallback=|| view! { }
                >
                    <button class="lane-button" on:click=move |_| open_picker()>
                        "Choose file"
                    </button>
                </Show>
                <Show
                    when=move || {
                        lane.get()
                            .map(|slot| slot.staged_file().is_some() && !slot.is_uploading())
                            .unwrap_or(false)
                    }
                    fallback=|| view! { }
                >
                    <button class="lane-button primary" on:click=start_upload>
                        {move || {
                            if lane.get().map(|slot| slot.last_error().is_some()).unwrap_or(false) {
                                "Retry upload"
                            } else {
                                "Upload"
                            }
                        }}
                    </button>
                </Show>
                <Show
                    when=move || lane.get().map(|slot| slot.is_uploaded()).unwrap_or(false)
                    fallback=|| view! { }
                >
                    <button class="lane-button" on:click=request_replace>
                        "Replace"
                    </button>
                </Show>
                <button class="lane-button subtle" on:click=clear_lane>
                    "Clear"
                </button>
            </div>
        </div>
    }
}
