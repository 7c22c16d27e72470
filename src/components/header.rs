use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">"NEXBRIDGE IT"</a>
                <span class="badge">"Supplier Portal"</span>
            </div>
            <nav class="header-links">
                <a href="https://nexbridge-it.com" class="header-link" target="_blank">
                    "Main site"
                </a>
                <a href="mailto:suppliers@nexbridge-it.com" class="header-link">
                    "Contact"
                </a>
            </nav>
        </header>
    }
}
