//! The general configuration settings for reel.
//!
//! This module defines the [General] struct for deserializing
//! the `[general]` table of reel.toml and the [InternalGeneral] struct
//! holding the checked values used at runtime.

use crate::utils::clamp_column_width;

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_COLUMN_WIDTH: u16 = 50;
pub const DEFAULT_RECURSIVE_COLUMN_WIDTH: u16 = 80;
pub const DEFAULT_SCROLL_TICK_MS: u64 = 250;
const MIN_SCROLL_TICK_MS: u64 = 20;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    pub column_width: u16,
    pub recursive_column_width: u16,
    pub scroll_tick_ms: u64,
    pub scroll_all: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            column_width: DEFAULT_COLUMN_WIDTH,
            recursive_column_width: DEFAULT_RECURSIVE_COLUMN_WIDTH,
            scroll_tick_ms: DEFAULT_SCROLL_TICK_MS,
            scroll_all: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalGeneral {
    column_width: u16,
    recursive_column_width: u16,
    scroll_tick: Duration,
    scroll_all: bool,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            column_width: clamp_column_width(g.column_width),
            recursive_column_width: clamp_column_width(g.recursive_column_width),
            scroll_tick: Duration::from_millis(g.scroll_tick_ms.max(MIN_SCROLL_TICK_MS)),
            scroll_all: g.scroll_all,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn column_width(&self) -> u16 {
        self.column_width
    }

    #[inline]
    pub fn recursive_column_width(&self) -> u16 {
        self.recursive_column_width
    }

    #[inline]
    pub fn scroll_tick(&self) -> Duration {
        self.scroll_tick
    }

    #[inline]
    pub fn scroll_all(&self) -> bool {
        self.scroll_all
    }

    pub fn set_column_width(&mut self, width: u16) {
        self.column_width = clamp_column_width(width);
    }
}
