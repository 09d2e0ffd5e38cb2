use leptos::prelude::*;
use soku_core::Theme;
use tracing::{debug, info};

/// Publishes the theme tokens as CSS custom properties for everything inside it.
#[component]
pub fn ThemeProvider(#[prop(into)] theme: Signal<Theme>, children: Children) -> impl IntoView {
    info!("rendering <ThemeProvider/>");

    let style = move || {
        let theme = theme.get();
        debug!("applying theme (dark mode: {})", theme.dark_mode);
        format!(
            "{} color: var(--text1); background-color: var(--bg1);",
            theme.css_variables()
        )
    };

    view! {
        <div class="theme-root min-h-screen" class=("dark", move || theme.get().dark_mode) style=style>
            {children()}
        </div>
    }
}
