//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Copyright © 2026 Nexbridge IT • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="https://nexbridge-it.com/privacy" class="footer-link" target="_blank">
                    "Privacy"
                </a>
                <a href="https://nexbridge-it.com/terms" class="footer-link" target="_blank">
                    "Terms"
                </a>
                <a href="https://www.linkedin.com/company/nexbridge-it" class="footer-link" target="_blank">
                    "LinkedIn"
                </a>
            </div>
        </footer>
    }
}
