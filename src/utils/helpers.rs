//! Helpers for reel.
//!
//! - Color parsing from names or hex codes
//! - Expanding a leading `~` to the home directory
//! - Clamping configured column widths to sane values

use ratatui::style::Color;
use std::path::{Path, PathBuf};

/// Narrowest column a listing may use.
pub const MIN_COLUMN_WIDTH: u16 = 4;
/// Widest column a listing may use.
pub const MAX_COLUMN_WIDTH: u16 = 500;

/// Parses a string (color name or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB).
/// Unknown values fall back to `Color::Reset`.
pub fn parse_color(s: &str) -> Color {
    match s.trim().to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        other => other
            .strip_prefix('#')
            .and_then(parse_hex)
            .unwrap_or(Color::Reset),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    let rgb = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Replaces a leading `~` (alone or followed by a separator) with the home directory.
/// Anything else, including `~user`, is returned unchanged.
pub fn expand_home_path(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with(['/', std::path::MAIN_SEPARATOR]))
        && let Some(home) = get_home()
    {
        let rest = rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR]);
        return if rest.is_empty() { home } else { home.join(rest) };
    }
    PathBuf::from(input)
}

/// Resolves user input for a directory change: `~` expands, relative paths are
/// taken from `base`.
pub fn resolve_input_path(input: &str, base: &Path) -> PathBuf {
    let expanded = expand_home_path(input.trim());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Safely clamp a configured column width.
///
/// Prints a warning when the value was out of range.
pub fn clamp_column_width(value: u16) -> u16 {
    let clamped = value.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
    if clamped != value {
        eprintln!(
            "[Warning] column width {} out of range ({}..={}), clamped to {}",
            value, MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH, clamped
        );
    }
    clamped
}
