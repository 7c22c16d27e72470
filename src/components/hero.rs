//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Supplier Onboarding"</h1>
            <p class="subtitle">
                "Register as a supplier for Nexbridge IT. "
                "Upload your company documents below; each one is stored securely "
                "and attached to your application."
            </p>
        </div>
    }
}
