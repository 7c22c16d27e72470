//! Supplier Portal - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for onboarding suppliers of Nexbridge IT:
//! candidates upload their company documents lane by lane, each document
//! is stored on the media service, and the stored locations are handed to
//! the caller for persistence.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (portal navigation)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploaderSection (upload lanes + notices)               │
//! │  └── SubmittedDocuments (stored locations)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`slots`] - Upload lane state machine (pure, natively tested)
//! - [`types`] - Common types (errors, notices, API responses)
//! - [`components`] - UI components (Header, Uploader, Notices, etc.)
//! - [`services`] - Media service communication (upload transport)

use leptos::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod slots;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Notices
    Notice, NoticeLevel,
    // API
    MediaUploadResponse,
    // Errors
    AppError, AppResult,
};

// Slot machine
pub use slots::{FileLike, Slot, SlotId, SlotManager, SlotPhase, UploadTicket};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Supplier Portal - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Stored locations collected from the uploader. The full application
    // persists these onto the supplier record; the portal page keeps the
    // caller-side list visible.
    let (documents, set_documents) = create_signal(Vec::<String>::new());

    let on_uploaded = Callback::new(move |location: String| {
        log::info!("📎 Document stored at {}", location);
        set_documents.update(|docs| docs.push(location));
    });

    view! {
        <Header/>
        <Hero/>
        <UploaderSection on_uploaded=on_uploaded/>
        <SubmittedDocuments documents=documents/>
        <Footer/>
    }
}
