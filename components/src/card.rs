use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Plain,
    Light,
    Grey,
    LightGrey,
    Outline,
    Yellow,
    Pink,
    Blue,
}

impl CardVariant {
    /// Inline style for the variant, in terms of the theme variables.
    pub fn style(&self) -> &'static str {
        match self {
            CardVariant::Plain => "",
            CardVariant::Light => "border: 1px solid transparent; background-color: transparent;",
            CardVariant::Grey => "background-color: #ebebeb;",
            CardVariant::LightGrey => "background-color: var(--bg2);",
            CardVariant::Outline => "border: 1px solid var(--bg3);",
            CardVariant::Yellow => {
                "background-color: rgba(243, 132, 30, 0.05); color: var(--yellow2); font-weight: 500;"
            }
            CardVariant::Pink => {
                "background-color: rgba(255, 0, 122, 0.03); color: var(--primary1); font-weight: 500;"
            }
            CardVariant::Blue => {
                "background-color: var(--primary5); color: #0094ec; border-radius: var(--border-radius); width: fit-content; font-weight: 500;"
            }
        }
    }
}

#[component]
pub fn Card(
    #[prop(optional)] variant: CardVariant,
    #[prop(optional, into)] padding: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let padding = padding.unwrap_or_else(|| "1.25rem".to_string());
    let style = format!(
        "width: 100%; box-sizing: border-box; border-radius: 16px; padding: {padding}; {}",
        variant.style()
    );

    view! {
        <div class=class style=style>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variants_use_theme_variables() {
        assert_eq!(CardVariant::LightGrey.style(), "background-color: var(--bg2);");
        assert!(CardVariant::Outline.style().contains("var(--bg3)"));
        assert!(CardVariant::Blue.style().contains("var(--border-radius)"));
        assert_eq!(CardVariant::default().style(), "");
    }
}
