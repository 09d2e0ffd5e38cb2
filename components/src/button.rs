use leptos::{ev, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Light,
    /// Red, for actions the user should think twice about.
    Error,
    /// Green, for an action that has already happened.
    Confirmed,
    Outlined,
}

impl ButtonVariant {
    pub fn style(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "background-color: var(--primary1); color: var(--white);",
            ButtonVariant::Light => "background-color: var(--primary5); color: var(--primary-text1);",
            ButtonVariant::Error => "background-color: var(--red1); color: var(--white); border: 1px solid var(--red1);",
            ButtonVariant::Confirmed => {
                "background-color: var(--green1); color: var(--white); opacity: 0.5; border: 1px solid var(--green1);"
            }
            ButtonVariant::Outlined => {
                "background-color: transparent; color: var(--text1); border: 1px solid var(--bg2);"
            }
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional, into)] variant: Signal<ButtonVariant>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional, into)] class: String,
    on_click: impl Fn(ev::MouseEvent) + 'static,
    children: Children,
) -> impl IntoView {
    let style = move || {
        format!(
            "width: 100%; padding: 18px; border-radius: 20px; font-weight: 500; {}",
            variant.get().style()
        )
    };

    view! {
        <button
            class=format!("disabled:opacity-50 disabled:cursor-auto {class}")
            style=style
            disabled=move || disabled.get()
            on:click=on_click
        >
            {children()}
        </button>
    }
}
