//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::ui::layout::{AppLayout, HitMap};

use super::page::Page;

/// Top-level application state.
pub struct AppState {
    /// Every section's reveal, selection and navigation state.
    pub page: Page,
    /// User-configurable keybindings and timings.
    pub config: AppConfig,
    /// Interactive rectangles of the last drawn frame.
    pub hits: HitMap,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frames drawn so far; drives animations.
    pub tick: u64,
    started: Instant,
}

impl AppState {
    /// `cols × rows` is the whole terminal; the page gets all but the
    /// status bar.
    pub fn new(cols: u16, rows: u16, config: AppConfig) -> Self {
        let page = Page::new(cols, AppLayout::page_rows(rows), config.timings.clone());
        Self {
            page,
            config,
            hits: HitMap::default(),
            should_quit: false,
            status_message: None,
            tick: 0,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// One animation frame: advance the page clock to wall time.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        let now = self.elapsed();
        self.page.advance(now);
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.page.resize(cols, AppLayout::page_rows(rows));
    }
}
