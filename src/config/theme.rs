//! Theme configuration options for reel
//!
//! This module defines the `[theme]` table of reel.toml. Every color accepts a name
//! ("cyan") or a hex code ("#RRGGBB"). A color left at "default" falls back to the
//! internal default for that slot.

use crate::utils::parse_color;

use ratatui::style::Color;
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// directory = "lightcyan"
/// highlight = "#444444"
/// [theme.header]
/// fg = "black"
/// bg = "yellow"
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    header: ColorPair,
    nomatch_header: ColorPair,
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    file: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    media: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    inaccessible: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    highlight: Color,
    input: ColorPair,
    border: ColorPair,
    status_update: ColorPair,
    status_error: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header: ColorPair::new(Color::White, Color::Blue),
            nomatch_header: ColorPair::new(Color::Red, Color::Blue),
            directory: Color::Cyan,
            file: Color::White,
            media: Color::Yellow,
            inaccessible: Color::Red,
            highlight: Color::Magenta,
            input: ColorPair::new(Color::White, Color::Red),
            border: ColorPair::new(Color::White, Color::Blue),
            status_update: ColorPair::new(Color::White, Color::Blue),
            status_error: ColorPair::new(Color::White, Color::Red),
        }
    }
}

/// Picks `user` unless it was left at Reset.
fn or_default(user: Color, default: Color) -> Color {
    if user == Color::Reset { default } else { user }
}

impl Theme {
    /// Internal default theme, used as the fallback for colors set to Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn header(&self) -> ColorPair {
        self.header.resolve(&Theme::internal_defaults().header)
    }

    pub fn nomatch_header(&self) -> ColorPair {
        self.nomatch_header
            .resolve(&Theme::internal_defaults().nomatch_header)
    }

    pub fn directory(&self) -> Color {
        or_default(self.directory, Theme::internal_defaults().directory)
    }

    pub fn file(&self) -> Color {
        or_default(self.file, Theme::internal_defaults().file)
    }

    pub fn media(&self) -> Color {
        or_default(self.media, Theme::internal_defaults().media)
    }

    pub fn inaccessible(&self) -> Color {
        or_default(self.inaccessible, Theme::internal_defaults().inaccessible)
    }

    pub fn highlight(&self) -> Color {
        or_default(self.highlight, Theme::internal_defaults().highlight)
    }

    pub fn input(&self) -> ColorPair {
        self.input.resolve(&Theme::internal_defaults().input)
    }

    pub fn border(&self) -> ColorPair {
        self.border.resolve(&Theme::internal_defaults().border)
    }

    pub fn status_update(&self) -> ColorPair {
        self.status_update
            .resolve(&Theme::internal_defaults().status_update)
    }

    pub fn status_error(&self) -> ColorPair {
        self.status_error
            .resolve(&Theme::internal_defaults().status_error)
    }
}

/// Foreground and background of one themed element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    #[inline]
    pub fn fg(&self) -> Color {
        self.fg
    }

    #[inline]
    pub fn bg(&self) -> Color {
        self.bg
    }

    /// Replaces Reset colors with those from `other`.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: or_default(self.fg, other.fg),
            bg: or_default(self.bg, other.bg),
        }
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
