//! Visibility reveal controllers.
//!
//! Three one-shot, monotonic behaviours:
//!
//! * [`IntersectionReveal`]: visible the first time its region is inside the
//!   viewport by at least a threshold fraction.
//! * [`ScrollReveal`]: visible once its region's top edge rises above a
//!   sensitivity line, optionally after a per-index stagger delay.
//! * [`StepActivator`]: once told its section is visible, reveals one step per
//!   timer tick until all steps are shown.
//!
//! Every controller follows the same lifecycle: `mount` registers with the
//! [`Host`], `handle` consumes deliveries addressed to it, `dispose` cancels
//! every token it still holds.  All three are idempotent, and nothing is
//! mutated after `dispose`.

use std::time::Duration;

use super::host::{CancelToken, Delivery, EventSource, Host, InstanceId, RegionId, Signal, Viewport};
use super::timer::Schedule;

// ───────────────────────────────────────── reveal state ──────

/// `visible` only ever goes false → true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    visible: bool,
}

impl RevealState {
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` only for the call that performed the transition.
    fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }
}

// ───────────────────────────────────────── sensitivity ───────

/// Fraction of the viewport height used as the scroll-reveal trigger line,
/// picked by viewport width.
///
/// Narrow viewports scroll less per gesture, so their line sits lower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivity {
    /// Widths at or below this use `narrow`.
    pub breakpoint: f64,
    pub narrow: f64,
    pub wide: f64,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            narrow: 0.97,
            wide: 0.8,
        }
    }
}

impl Sensitivity {
    pub fn factor(&self, width: f64) -> f64 {
        if width <= self.breakpoint {
            self.narrow
        } else {
            self.wide
        }
    }

    /// Offset from the top of the viewport that a region's top edge must rise
    /// above.
    pub fn trigger_line(&self, viewport: Viewport) -> f64 {
        viewport.height * self.factor(viewport.width)
    }
}

// ───────────────────────────────────────── intersection ──────

/// Strategy A: reveal on first sufficient intersection, then stop observing.
#[derive(Debug)]
pub struct IntersectionReveal {
    id: InstanceId,
    region: RegionId,
    threshold: f64,
    state: RevealState,
    observation: Option<CancelToken>,
    disposed: bool,
}

impl IntersectionReveal {
    pub fn new(id: InstanceId, region: RegionId, threshold: f64) -> Self {
        Self {
            id,
            region,
            threshold: threshold.clamp(0.0, 1.0),
            state: RevealState::default(),
            observation: None,
            disposed: false,
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[cfg(test)]
    pub fn visible(&self) -> bool {
        self.state.visible()
    }

    #[cfg(test)]
    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    /// Start observing.  No-op once revealed, disposed, or already observing.
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.disposed || self.state.visible() || self.observation.is_some() {
            return;
        }
        self.observation = Some(host.subscribe(self.id, EventSource::Intersection(self.region)));
    }

    /// Returns `true` when this delivery revealed the region.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, delivery: &Delivery) -> bool {
        if self.disposed || self.observation != Some(delivery.token) {
            return false;
        }
        let Signal::Intersection { ratio } = delivery.signal else {
            return false;
        };
        if ratio <= 0.0 || ratio < self.threshold {
            return false;
        }
        if !self.state.reveal() {
            return false;
        }
        if let Some(token) = self.observation.take() {
            host.cancel(token);
        }
        tracing::debug!(id = ?self.id, region = ?self.region, ratio, "revealed on intersection");
        true
    }

    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.disposed = true;
        if let Some(token) = self.observation.take() {
            host.cancel(token);
        }
    }
}

// ───────────────────────────────────────── scroll ────────────

/// Strategy B: reveal once the region's top edge is above the sensitivity
/// line, after `delay`.
#[derive(Debug)]
pub struct ScrollReveal {
    id: InstanceId,
    region: RegionId,
    delay: Duration,
    sensitivity: Sensitivity,
    state: RevealState,
    /// Scroll and resize listeners.
    listeners: Vec<CancelToken>,
    /// Delayed transition, once the line has been crossed.
    pending: Option<CancelToken>,
    revealed_at: Option<Duration>,
    disposed: bool,
}

impl ScrollReveal {
    pub fn new(id: InstanceId, region: RegionId, delay: Duration, sensitivity: Sensitivity) -> Self {
        Self {
            id,
            region,
            delay,
            sensitivity,
            state: RevealState::default(),
            listeners: Vec::new(),
            pending: None,
            revealed_at: None,
            disposed: false,
        }
    }

    /// The `index`-th member of a staggered grid: delayed by `index × step`.
    pub fn staggered(
        id: InstanceId,
        region: RegionId,
        index: usize,
        step: Duration,
        sensitivity: Sensitivity,
    ) -> Self {
        let delay = step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
        Self::new(id, region, delay, sensitivity)
    }

    pub fn visible(&self) -> bool {
        self.state.visible()
    }

    /// Host time of the transition, if it happened.
    pub fn revealed_at(&self) -> Option<Duration> {
        self.revealed_at
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Register listeners and evaluate once right away: a region already in
    /// view on first render gets no scroll event to react to.
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.disposed || self.state.visible() || !self.listeners.is_empty() {
            return;
        }
        self.listeners.push(host.subscribe(self.id, EventSource::Scroll));
        self.listeners.push(host.subscribe(self.id, EventSource::Resize));
        self.evaluate(host);
    }

    /// Returns `true` when this delivery revealed the region.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, delivery: &Delivery) -> bool {
        if self.disposed {
            return false;
        }
        match delivery.signal {
            Signal::Scroll | Signal::Resize if self.listeners.contains(&delivery.token) => {
                self.evaluate(host)
            }
            Signal::Timer if self.pending == Some(delivery.token) => {
                self.pending = None;
                self.reveal(host, delivery.at)
            }
            _ => false,
        }
    }

    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.disposed = true;
        self.release(host);
    }

    fn evaluate<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        // Cheap guard first: revealed or already counting down.
        if self.state.visible() || self.pending.is_some() {
            return false;
        }
        let Some(rect) = host.region_rect(self.region) else {
            return false;
        };
        let line = self.sensitivity.trigger_line(host.viewport());
        if rect.top >= line {
            return false;
        }
        if self.delay.is_zero() {
            let now = host.now();
            return self.reveal(host, now);
        }
        tracing::trace!(id = ?self.id, delay = ?self.delay, "reveal scheduled");
        self.pending = Some(host.schedule(self.id, Schedule::Once(self.delay)));
        false
    }

    fn reveal<H: Host + ?Sized>(&mut self, host: &mut H, at: Duration) -> bool {
        if !self.state.reveal() {
            return false;
        }
        self.revealed_at = Some(at);
        // Nothing left to listen for.
        self.release(host);
        tracing::debug!(id = ?self.id, region = ?self.region, ?at, "revealed on scroll");
        true
    }

    fn release<H: Host + ?Sized>(&mut self, host: &mut H) {
        for token in self.listeners.drain(..) {
            host.cancel(token);
        }
        if let Some(token) = self.pending.take() {
            host.cancel(token);
        }
    }
}

// ───────────────────────────────────────── steps ─────────────

/// `revealed ≤ total`, never decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    revealed: usize,
    total: usize,
}

impl StepProgress {
    pub fn new(total: usize) -> Self {
        Self { revealed: 0, total }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    fn advance(&mut self) {
        if self.revealed < self.total {
            self.revealed += 1;
        }
    }
}

/// Reveals a fixed list of steps one per tick once its section is visible.
/// Also tracks which revealed step the pointer is over.
#[derive(Debug)]
pub struct StepActivator {
    id: InstanceId,
    period: Duration,
    progress: StepProgress,
    timer: Option<CancelToken>,
    started: bool,
    disposed: bool,
    highlighted: Option<usize>,
}

impl StepActivator {
    pub fn new(id: InstanceId, total: usize, period: Duration) -> Self {
        Self {
            id,
            period,
            progress: StepProgress::new(total),
            timer: None,
            started: false,
            disposed: false,
            highlighted: None,
        }
    }

    pub fn progress(&self) -> StepProgress {
        self.progress
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        index < self.progress.revealed
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Feed the parent trigger's visibility.  The first `true` starts the
    /// sequence; everything else is ignored.
    pub fn set_section_visible<H: Host + ?Sized>(&mut self, host: &mut H, visible: bool) {
        if !visible || self.started || self.disposed {
            return;
        }
        self.started = true;
        if self.progress.is_complete() {
            return;
        }
        tracing::debug!(id = ?self.id, total = self.progress.total, "step sequence started");
        self.timer = Some(host.schedule(self.id, Schedule::Every(self.period)));
    }

    /// Returns `true` when the delivery advanced the sequence.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &mut H, delivery: &Delivery) -> bool {
        if self.disposed || self.timer != Some(delivery.token) {
            return false;
        }
        self.progress.advance();
        tracing::trace!(id = ?self.id, revealed = self.progress.revealed, "step revealed");
        if self.progress.is_complete() {
            if let Some(token) = self.timer.take() {
                host.cancel(token);
            }
        }
        true
    }

    /// Pointer entered step `index`; only revealed steps can be highlighted.
    pub fn pointer_enter(&mut self, index: usize) {
        if self.is_revealed(index) {
            self.highlighted = Some(index);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.highlighted = None;
    }

    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.disposed = true;
        self.highlighted = None;
        if let Some(token) = self.timer.take() {
            host.cancel(token);
        }
    }
}
