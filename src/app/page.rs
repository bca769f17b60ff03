//! The page: composition root for every section's state.
//!
//! Owns the [`Runtime`] and one controller per behaviour:
//!
//! * nav bar (scrolled flag, mobile menu, deferred link scroll)
//! * `#como-enxergamos`: an intersection trigger feeding a step activator
//! * `#tecnologia`: the technology selector
//! * `#ciencia-meio-ambiente`: one staggered scroll trigger per card
//!
//! Controllers never see each other.  Deliveries are routed by owner id.

use std::time::Duration;

use crate::config::RevealTimings;
use crate::core::content::{MAPPING_STEPS, ORG_CARDS, TECHNOLOGIES};
use crate::core::host::{Delivery, Host, InstanceId, RegionId, Runtime};
use crate::core::nav::{NavBar, NavCommand, SectionId};
use crate::core::reveal::{IntersectionReveal, ScrollReveal, StepActivator};
use crate::core::selector::{LayoutClass, TechSelector};
use crate::ui::smooth_scroll::SmoothScroll;

use super::document::{rows_to_units, Document};

const NAV_ID: InstanceId = InstanceId(0);
const STEPS_TRIGGER_ID: InstanceId = InstanceId(1);
const STEPS_ID: InstanceId = InstanceId(2);
const CARD_BASE: u32 = 100;

/// Ease-out factor for section jumps.
const SCROLL_SPEED: f64 = 0.3;

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    Step(usize),
    Card(usize),
}

pub struct Page {
    runtime: Runtime,
    timings: RevealTimings,
    doc: Document,
    nav: NavBar,
    steps_trigger: IntersectionReveal,
    steps: StepActivator,
    tech: TechSelector,
    cards: Vec<ScrollReveal>,
    hovered_card: Option<usize>,
    scroll: SmoothScroll,
    /// Section the running smooth scroll is heading for.
    scroll_section: Option<SectionId>,
    disposed: bool,
}

impl Page {
    /// Build and mount every section for a `cols × rows` viewport.
    pub fn new(cols: u16, rows: u16, timings: RevealTimings) -> Self {
        let doc = Document::compute(cols, rows, &timings);
        let runtime = Runtime::new(doc.viewport());
        let sensitivity = timings.sensitivity();

        let cards = (0..ORG_CARDS.len())
            .map(|i| {
                ScrollReveal::staggered(
                    InstanceId(CARD_BASE + i as u32),
                    RegionId::Card(i),
                    i,
                    timings.stagger_step(),
                    sensitivity,
                )
            })
            .collect();

        let mut page = Self {
            runtime,
            nav: NavBar::new(NAV_ID, timings.nav_scroll_threshold, timings.menu_close()),
            steps_trigger: IntersectionReveal::new(
                STEPS_TRIGGER_ID,
                RegionId::Section(SectionId::HowWeSee),
                timings.intersection_threshold,
            ),
            steps: StepActivator::new(STEPS_ID, MAPPING_STEPS.len(), timings.step_interval()),
            tech: TechSelector::new(TECHNOLOGIES),
            cards,
            hovered_card: None,
            scroll: SmoothScroll::new(SCROLL_SPEED),
            scroll_section: None,
            disposed: false,
            timings,
            doc,
        };
        page.attach_regions();
        page.mount();
        page.pump(Duration::ZERO);
        page
    }

    fn attach_regions(&mut self) {
        for &(id, span) in self.doc.sections() {
            self.runtime.attach(
                RegionId::Section(id),
                rows_to_units(f64::from(span.top)),
                rows_to_units(f64::from(span.height)),
            );
        }
        for (i, card) in self.doc.cards.iter().enumerate() {
            self.runtime.attach(
                RegionId::Card(i),
                rows_to_units(f64::from(card.top)),
                rows_to_units(f64::from(card.height)),
            );
        }
    }

    fn mount(&mut self) {
        self.nav.mount(&mut self.runtime);
        self.steps_trigger.mount(&mut self.runtime);
        for card in &mut self.cards {
            card.mount(&mut self.runtime);
        }
    }

    // ── time & events ──────────────────────────────────────────

    /// Advance the page clock to `now`: one smooth-scroll frame, then every
    /// timer due by `now`.
    pub fn advance(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        if self.scroll.is_animating() {
            self.scroll.tick();
            self.sync_scroll();
            if !self.scroll.is_animating() {
                self.scroll_section = None;
            }
        }
        self.pump(now);
    }

    /// Dispatch queued deliveries and timers due by `until`.
    fn pump(&mut self, until: Duration) {
        while let Some(delivery) = self.runtime.poll(until) {
            self.dispatch(delivery);
        }
    }

    fn dispatch(&mut self, d: Delivery) {
        if self.disposed {
            return;
        }
        match d.owner {
            NAV_ID => {
                if let Some(cmd) = self.nav.handle(&mut self.runtime, &d) {
                    self.execute(cmd);
                }
            }
            STEPS_TRIGGER_ID => {
                if self.steps_trigger.handle(&mut self.runtime, &d) {
                    self.steps.set_section_visible(&mut self.runtime, true);
                }
            }
            STEPS_ID => {
                self.steps.handle(&mut self.runtime, &d);
            }
            InstanceId(n) if n >= CARD_BASE => {
                let index = (n - CARD_BASE) as usize;
                if let Some(card) = self.cards.get_mut(index) {
                    if card.handle(&mut self.runtime, &d) {
                        tracing::debug!(card = ORG_CARDS[index].id, at = ?d.at, "card revealed");
                    }
                }
            }
            other => tracing::trace!(owner = ?other, "delivery without owner"),
        }
    }

    fn execute(&mut self, cmd: NavCommand) {
        match cmd {
            NavCommand::ScrollTo(section) => {
                let top = self.doc.span(section).top.min(self.doc.max_scroll());
                tracing::debug!(section = section.anchor(), top, "scrolling to section");
                self.scroll.set_target(f64::from(top));
                self.scroll_section = Some(section);
            }
        }
    }

    /// Push the animator's position into the runtime as a scroll event.
    fn sync_scroll(&mut self) {
        self.runtime.scroll_to(rows_to_units(self.scroll.position()));
    }

    /// Terminal resized.  Geometry is recomputed and regions re-attached.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.disposed {
            return;
        }
        let section = self.current_section();
        let offset_in_section = self.scroll_row().saturating_sub(self.doc.span(section).top);

        self.doc = Document::compute(cols, rows, &self.timings);
        self.runtime.set_viewport(self.doc.viewport());
        self.attach_regions();

        // Keep the same section on screen.
        let row = (self.doc.span(section).top + offset_in_section).min(self.doc.max_scroll());
        self.scroll.jump_to(f64::from(row));
        // A nav scroll in flight keeps heading for its section's new top.
        if let Some(target) = self.scroll_section {
            let top = self.doc.span(target).top.min(self.doc.max_scroll());
            self.scroll.set_target(f64::from(top));
        }
        self.sync_scroll();
        let now = self.runtime.now();
        self.pump(now);
    }

    /// Scroll by whole rows, immediately.
    pub fn scroll_by(&mut self, delta: i32) {
        if self.disposed {
            return;
        }
        let current = i64::from(self.scroll.row());
        let max = i64::from(self.doc.max_scroll());
        let row = (current + i64::from(delta)).clamp(0, max);
        self.scroll.jump_to(row as f64);
        self.scroll_section = None;
        self.sync_scroll();
        let now = self.runtime.now();
        self.pump(now);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_by(i32::MIN);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_by(i32::MAX);
    }

    /// Put `section` at the top of the window without animating.
    pub fn jump_to_section(&mut self, section: SectionId) {
        let target = i64::from(self.doc.span(section).top);
        let delta = target - i64::from(self.scroll_row());
        self.scroll_by(delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
    }

    /// Behaves like clicking the section's nav link.
    pub fn click_link(&mut self, section: SectionId) {
        if self.disposed {
            return;
        }
        if let Some(cmd) = self.nav.click_link(&mut self.runtime, section) {
            self.execute(cmd);
        }
    }

    pub fn toggle_menu(&mut self) {
        if !self.disposed && self.doc.compact_nav {
            self.nav.toggle_menu();
        }
    }

    pub fn close_menu(&mut self) {
        if self.disposed {
            return;
        }
        self.nav.close_menu();
    }

    // ── pointer ────────────────────────────────────────────────

    /// The pointer moved onto `hover` (or onto nothing interactive).
    pub fn pointer_over(&mut self, hover: Option<Hover>) {
        if self.disposed {
            return;
        }
        match hover {
            Some(Hover::Step(i)) => {
                // Leaving one step for another drops the old highlight even
                // when the new step is still hidden.
                if self.steps.highlighted() != Some(i) {
                    self.steps.pointer_leave();
                    self.steps.pointer_enter(i);
                }
            }
            _ => {
                if self.steps.highlighted().is_some() {
                    self.steps.pointer_leave();
                }
            }
        }
        self.hovered_card = match hover {
            Some(Hover::Card(i)) => Some(i),
            _ => None,
        };
    }

    // ── technology ─────────────────────────────────────────────

    pub fn select_tech(&mut self, id: &str) {
        if self.disposed {
            return;
        }
        self.tech.select(id, self.doc.layout);
    }

    /// Toggle (touch) or re-select (pointer) the current item; from no
    /// selection, opens the first one.
    pub fn activate_tech(&mut self) {
        if self.disposed {
            return;
        }
        match self.tech.selected() {
            Some(id) => self.tech.select(id, self.doc.layout),
            None => self.tech.select_next(),
        }
    }

    pub fn next_tech(&mut self) {
        if self.disposed {
            return;
        }
        self.tech.select_next();
    }

    pub fn prev_tech(&mut self) {
        if self.disposed {
            return;
        }
        self.tech.select_prev();
    }

    // ── teardown ───────────────────────────────────────────────

    /// Cancel every listener and timer.  Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.nav.dispose(&mut self.runtime);
        self.steps_trigger.dispose(&mut self.runtime);
        self.steps.dispose(&mut self.runtime);
        for card in &mut self.cards {
            card.dispose(&mut self.runtime);
        }
        for &(id, _) in self.doc.sections() {
            self.runtime.detach(RegionId::Section(id));
        }
        for i in 0..self.doc.cards.len() {
            self.runtime.detach(RegionId::Card(i));
        }
        self.scroll_section = None;
        tracing::debug!(
            listeners = self.runtime.listener_count(),
            timers = self.runtime.pending_timers(),
            "page disposed"
        );
    }

    // ── render model ───────────────────────────────────────────

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn layout(&self) -> LayoutClass {
        self.doc.layout
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    pub fn steps(&self) -> &StepActivator {
        &self.steps
    }

    #[cfg(test)]
    pub fn steps_section_visible(&self) -> bool {
        self.steps_trigger.visible()
    }

    pub fn tech(&self) -> &TechSelector {
        &self.tech
    }

    pub fn card(&self, index: usize) -> Option<&ScrollReveal> {
        self.cards.get(index)
    }

    pub fn card_visible(&self, index: usize) -> bool {
        self.cards.get(index).is_some_and(|c| c.visible())
    }

    pub fn hovered_card(&self) -> Option<usize> {
        self.hovered_card
    }

    pub fn scroll_row(&self) -> u32 {
        self.scroll.row()
    }

    #[cfg(test)]
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn current_section(&self) -> SectionId {
        self.doc.section_at(self.scroll.row())
    }

    /// Page clock.
    pub fn now(&self) -> Duration {
        self.runtime.now()
    }

    #[cfg(test)]
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.dispose();
    }
}
