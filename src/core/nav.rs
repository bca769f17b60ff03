//! Page sections and the scroll-aware navigation bar.
//!
//! The anchor strings are the one contract shared between the navigation
//! bar and the sections; keep them stable.

use std::time::Duration;

use super::host::{CancelToken, Delivery, EventSource, Host, InstanceId, Signal};
use super::timer::Schedule;

// ───────────────────────────────────────── sections ──────────

/// Top-level, independently addressable regions of the page, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Home,
    HowWeSee,
    Technology,
    Environment,
}

impl SectionId {
    pub const ALL: &[SectionId] = &[
        SectionId::Home,
        SectionId::HowWeSee,
        SectionId::Technology,
        SectionId::Environment,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "#inicio",
            SectionId::HowWeSee => "#como-enxergamos",
            SectionId::Technology => "#tecnologia",
            SectionId::Environment => "#ciencia-meio-ambiente",
        }
    }

    /// Link text shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            SectionId::Home => "Início",
            SectionId::HowWeSee => "O Invisível",
            SectionId::Technology => "Tecnologia",
            SectionId::Environment => "Ciência & Meio Ambiente",
        }
    }

    /// Accepts the anchor with or without its leading `#`.
    pub fn from_anchor(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Self::ALL
            .iter()
            .copied()
            .find(|section| &section.anchor()[1..] == s)
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        let i = self.index();
        Self::ALL[(i + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

// ───────────────────────────────────────── nav bar ───────────

/// Side effect requested by the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Smooth-scroll the page to the section.
    ScrollTo(SectionId),
}

/// Scroll-aware navigation bar state.
#[derive(Debug)]
pub struct NavBar {
    id: InstanceId,
    /// Scroll offset past which the bar switches to its solid background.
    threshold: f64,
    /// How long the mobile menu takes to close.  The scroll waits for it.
    close_delay: Duration,
    scrolled: bool,
    menu_open: bool,
    listener: Option<CancelToken>,
    /// A link click waiting for the menu to finish closing.
    pending: Option<(CancelToken, SectionId)>,
}

impl NavBar {
    pub fn new(id: InstanceId, threshold: f64, close_delay: Duration) -> Self {
        Self {
            id,
            threshold,
            close_delay,
            scrolled: false,
            menu_open: false,
            listener: None,
            pending: None,
        }
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Section a pending link click will scroll to.
    #[cfg(test)]
    pub fn pending_target(&self) -> Option<SectionId> {
        self.pending.map(|(_, s)| s)
    }

    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.listener.is_some() {
            return;
        }
        self.listener = Some(host.subscribe(self.id, EventSource::Scroll));
        self.scrolled = host.scroll_offset() > self.threshold;
    }

    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, delivery: &Delivery) -> Option<NavCommand> {
        match delivery.signal {
            Signal::Scroll if self.listener == Some(delivery.token) => {
                let scrolled = host.scroll_offset() > self.threshold;
                if scrolled != self.scrolled {
                    tracing::debug!(scrolled, "nav background switched");
                    self.scrolled = scrolled;
                }
                None
            }
            Signal::Timer => match self.pending {
                Some((token, section)) if token == delivery.token => {
                    self.pending = None;
                    Some(NavCommand::ScrollTo(section))
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// A navigation link was clicked.
    ///
    /// With the menu closed the scroll happens now.  With it open, the menu
    /// closes first and the scroll is deferred by the close delay so the two
    /// transitions do not overlap.  A newer click replaces a deferred one.
    pub fn click_link<H: Host + ?Sized>(&mut self, host: &mut H, section: SectionId) -> Option<NavCommand> {
        if let Some((token, _)) = self.pending.take() {
            host.cancel(token);
        }
        if !self.menu_open {
            return Some(NavCommand::ScrollTo(section));
        }
        self.menu_open = false;
        let token = host.schedule(self.id, Schedule::Once(self.close_delay));
        self.pending = Some((token, section));
        None
    }

    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(token) = self.listener.take() {
            host.cancel(token);
        }
        if let Some((token, _)) = self.pending.take() {
            host.cancel(token);
        }
    }
}
