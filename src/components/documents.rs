//! Submitted documents list.
//!
//! Shows the stored locations collected through the uploader's on-uploaded
//! callback. In the full application these are persisted onto the supplier
//! record; the list here is the caller-side view of that seam.

use leptos::*;

#[component]
pub fn SubmittedDocuments(documents: ReadSignal<Vec<String>>) -> impl IntoView {
    view! {
        <Show
            when=move || !documents.get().is_empty()
            fallback=|| view! { }
        >
            <div class="submitted-docs">
                <h3>"Submitted documents"</h3>
                <ul>
                    <For
                        each=move || documents.get().into_iter().enumerate()
                        key=|(idx, _)| *idx
                        children=move |(_, location)| {
                            view! {
                                <li>
                                    <a href=location.clone() target="_blank" class="doc-link">
                                        {location}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </Show>
    }
}
