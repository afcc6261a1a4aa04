//! Status line on the last screen row.

use crate::config::{ColorPair, Theme};
use crate::ui::surface::{Surface, write_str};

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct StatusLine {
    text: String,
    error: bool,
    colors: ColorPair,
    update_colors: ColorPair,
    error_colors: ColorPair,
}

impl StatusLine {
    pub fn new(theme: &Theme) -> Self {
        Self {
            text: String::new(),
            error: false,
            colors: theme.status_update(),
            update_colors: theme.status_update(),
            error_colors: theme.status_error(),
        }
    }

    pub fn show_update(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.error = false;
        self.colors = self.update_colors;
    }

    pub fn show_error(&mut self, err: &dyn Display) {
        self.text = err.to_string();
        self.error = true;
        self.colors = self.error_colors;
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        if height == 0 {
            return;
        }
        write_str(
            surface,
            0,
            height - 1,
            width,
            self.colors.fg(),
            self.colors.bg(),
            &self.text,
        );
    }
}
