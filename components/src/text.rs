use leptos::prelude::*;

/// Typography presets. Each maps to a weight, an optional size and a theme colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    #[default]
    Main,
    Link,
    Black,
    White,
    Body,
    LargeHeader,
    MediumHeader,
    SubHeader,
    Small,
    Blue,
    Yellow,
    DarkGray,
    Gray,
    Italic,
    Error(bool),
}

impl TextKind {
    pub fn style(&self) -> String {
        let (weight, size, color) = match self {
            TextKind::Main => (500, None, Some("text2")),
            TextKind::Link => (500, None, Some("primary1")),
            TextKind::Black => (500, None, Some("text1")),
            TextKind::White => (500, None, Some("white")),
            TextKind::Body => (400, Some(16), Some("text1")),
            TextKind::LargeHeader => (600, Some(24), None),
            TextKind::MediumHeader => (500, Some(20), None),
            TextKind::SubHeader => (400, Some(14), None),
            TextKind::Small => (500, Some(11), None),
            TextKind::Blue => (500, None, Some("blue1")),
            TextKind::Yellow => (500, None, Some("yellow1")),
            TextKind::DarkGray => (500, None, Some("text3")),
            TextKind::Gray => (500, None, Some("bg3")),
            TextKind::Italic => (500, Some(12), Some("text2")),
            TextKind::Error(true) => (500, None, Some("red1")),
            TextKind::Error(false) => (500, None, Some("text2")),
        };

        let mut style = format!("font-weight: {weight};");
        if let Some(size) = size {
            style.push_str(&format!(" font-size: {size}px;"));
        }
        if let Some(color) = color {
            style.push_str(&format!(" color: var(--{color});"));
        }
        if *self == TextKind::Italic {
            style.push_str(" font-style: italic;");
        }
        style
    }
}

#[component]
pub fn Text(#[prop(optional, into)] kind: Signal<TextKind>, children: Children) -> impl IntoView {
    view! {
        <div class="m-0" style=move || kind.get().style()>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_styles() {
        assert_eq!(TextKind::Main.style(), "font-weight: 500; color: var(--text2);");
        assert_eq!(
            TextKind::Body.style(),
            "font-weight: 400; font-size: 16px; color: var(--text1);"
        );
        assert_eq!(TextKind::LargeHeader.style(), "font-weight: 600; font-size: 24px;");
        assert!(TextKind::Italic.style().ends_with("font-style: italic;"));
    }

    #[test]
    fn test_error_text_color() {
        assert!(TextKind::Error(true).style().contains("var(--red1)"));
        assert!(TextKind::Error(false).style().contains("var(--text2)"));
    }
}
