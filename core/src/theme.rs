//! Colour and spacing tokens.
//!
//! A [`Theme`] is built once from the dark-mode flag and handed to the theme
//! provider, which publishes every token as a CSS custom property.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    pub white: &'static str,
    pub black: &'static str,

    pub text1: &'static str,
    pub text2: &'static str,
    pub text3: &'static str,
    pub text4: &'static str,
    pub text5: &'static str,

    pub bg1: &'static str,
    pub bg2: &'static str,
    pub bg3: &'static str,
    pub bg4: &'static str,
    pub bg5: &'static str,

    pub modal_bg: &'static str,
    pub advanced_bg: &'static str,

    pub primary1: &'static str,
    pub primary2: &'static str,
    pub primary3: &'static str,
    pub primary4: &'static str,
    pub primary5: &'static str,
    pub primary_text1: &'static str,

    pub secondary1: &'static str,
    pub secondary2: &'static str,
    pub secondary3: &'static str,

    pub red1: &'static str,
    pub red2: &'static str,
    pub red3: &'static str,
    pub green1: &'static str,
    pub yellow1: &'static str,
    pub yellow2: &'static str,
    pub blue1: &'static str,

    pub border_radius: &'static str,
}

pub fn colors(dark_mode: bool) -> Colors {
    Colors {
        white: "#FFFFFF",
        black: "#000000",

        text1: if dark_mode { "#04bbfb" } else { "#000000" },
        text2: if dark_mode { "#04bbfb" } else { "#565A69" },
        text3: if dark_mode { "#04bbfb" } else { "#888D9B" },
        text4: if dark_mode { "#04bbfb" } else { "#C3C5CB" },
        text5: if dark_mode { "#04bbfb" } else { "#EDEEF2" },

        bg1: if dark_mode { "red" } else { "#FFFFFF" },
        bg2: if dark_mode { "#E9EAEB" } else { "#F7F8FA" },
        bg3: if dark_mode { "#E9EAEB" } else { "#EDEEF2" },
        bg4: if dark_mode { "#3a506f" } else { "#CED0D9" },
        bg5: if dark_mode { "#6C7284" } else { "#888D9B" },

        modal_bg: if dark_mode { "rgba(0,0,0,.425)" } else { "rgba(0,0,0,0.3)" },
        advanced_bg: if dark_mode { "rgba(0,0,0,0.1)" } else { "rgba(255,255,255,0.6)" },

        primary1: if dark_mode { "#05195a" } else { "#0e0e23" },
        primary2: if dark_mode { "#05195a" } else { "#FF8CC3" },
        primary3: if dark_mode { "#04bbfb" } else { "#FF99C9" },
        primary4: if dark_mode { "#04bbfb" } else { "#F6DDE8" },
        primary5: if dark_mode { "#04bbfb" } else { "#ebebeb" },
        primary_text1: if dark_mode { "#6da8ff" } else { "#ff007a" },

        secondary1: if dark_mode { "#0094ec" } else { "#ff007a" },
        secondary2: if dark_mode { "#17000b26" } else { "#F6DDE8" },
        secondary3: if dark_mode { "#17000b26" } else { "#FDEAF1" },

        red1: "#FD4040",
        red2: "#F82D3A",
        red3: "#D60000",
        green1: "#27AE60",
        yellow1: "#FFE270",
        yellow2: "#F3841E",
        blue1: "#0094ec",

        border_radius: "25px",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub dark_mode: bool,
    pub colors: Colors,
}

impl Theme {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            colors: colors(dark_mode),
        }
    }

    /// Named tokens in a stable order.
    pub fn tokens(&self) -> Vec<(&'static str, &'static str)> {
        let c = &self.colors;
        vec![
            ("white", c.white),
            ("black", c.black),
            ("text1", c.text1),
            ("text2", c.text2),
            ("text3", c.text3),
            ("text4", c.text4),
            ("text5", c.text5),
            ("bg1", c.bg1),
            ("bg2", c.bg2),
            ("bg3", c.bg3),
            ("bg4", c.bg4),
            ("bg5", c.bg5),
            ("modal-bg", c.modal_bg),
            ("advanced-bg", c.advanced_bg),
            ("primary1", c.primary1),
            ("primary2", c.primary2),
            ("primary3", c.primary3),
            ("primary4", c.primary4),
            ("primary5", c.primary5),
            ("primary-text1", c.primary_text1),
            ("secondary1", c.secondary1),
            ("secondary2", c.secondary2),
            ("secondary3", c.secondary3),
            ("red1", c.red1),
            ("red2", c.red2),
            ("red3", c.red3),
            ("green1", c.green1),
            ("yellow1", c.yellow1),
            ("yellow2", c.yellow2),
            ("blue1", c.blue1),
            ("border-radius", c.border_radius),
        ]
    }

    /// The tokens as an inline `style` value, e.g. `--text1: #000000;`.
    pub fn css_variables(&self) -> String {
        self.tokens()
            .into_iter()
            .map(|(name, value)| format!("--{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_modes_share_status_colors() {
        let light = colors(false);
        let dark = colors(true);
        assert_eq!(light.red1, dark.red1);
        assert_eq!(light.green1, dark.green1);
        assert_eq!(light.border_radius, "25px");
        assert_ne!(light.text1, dark.text1);
    }

    #[test]
    fn test_css_variables() {
        let css = Theme::new(false).css_variables();
        assert!(css.starts_with("--white: #FFFFFF; --black: #000000; --text1: #000000;"));
        assert!(css.ends_with("--border-radius: 25px;"));
        assert!(Theme::new(true).css_variables().contains("--bg1: red;"));
    }
}
