//! The host seam: environment queries, subscriptions and timers.
//!
//! Reveal controllers never touch the terminal or a clock directly.  They ask
//! a [`Host`] for the viewport and region geometry, and they register interest
//! in scroll / resize / intersection events or timers, receiving a
//! [`CancelToken`] for each registration.  Teardown is `cancel(token)`.
//!
//! [`Runtime`] is the one concrete host.  It keeps region geometry in
//! document coordinates, a scroll offset, a listener registry, a
//! [`TimerQueue`] and a FIFO outbox of pending [`Delivery`]s.  The page pumps
//! the outbox with [`Runtime::poll`] and routes each delivery to its owner.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use super::nav::SectionId;
use super::timer::{Schedule, TimerId, TimerQueue};

// ───────────────────────────────────────── geometry ──────────

/// Viewport size in layout units (one unit ≈ one CSS pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A region's vertical extent relative to the top edge of the viewport.
/// Negative `top` means the region starts above the fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub top: f64,
    pub height: f64,
}

impl ViewRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A region's vertical extent in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DocRect {
    top: f64,
    height: f64,
}

/// Addressable observation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Section(SectionId),
    /// The n-th card of the organisation grid.
    Card(usize),
}

/// Identifies the controller instance that owns a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

// ───────────────────────────────────────── subscriptions ─────

/// What a listener is interested in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventSource {
    Scroll,
    Resize,
    /// Visible-fraction updates for one region.
    Intersection(RegionId),
}

/// Handle for any registration made through a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelToken {
    Listener(u64),
    Timer(TimerId),
}

/// Payload of a [`Delivery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Scroll,
    Resize,
    /// Fraction (0–1) of the observed region inside the viewport.
    Intersection { ratio: f64 },
    Timer,
}

/// One callback invocation, addressed to its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivery {
    pub owner: InstanceId,
    pub token: CancelToken,
    /// Host time at which the event happened.
    pub at: Duration,
    pub signal: Signal,
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    owner: InstanceId,
    source: EventSource,
}

// ───────────────────────────────────────── trait ─────────────

/// Everything a reveal controller may ask of its environment.
pub trait Host {
    /// Time since the host started.
    fn now(&self) -> Duration;
    fn viewport(&self) -> Viewport;
    fn scroll_offset(&self) -> f64;
    /// `None` when the region is not attached (target-unavailable).
    fn region_rect(&self, region: RegionId) -> Option<ViewRect>;
    fn subscribe(&mut self, owner: InstanceId, source: EventSource) -> CancelToken;
    fn schedule(&mut self, owner: InstanceId, schedule: Schedule) -> CancelToken;
    /// Returns `false` if the token was already cancelled or spent.
    fn cancel(&mut self, token: CancelToken) -> bool;
}

// ───────────────────────────────────────── runtime ───────────

/// The concrete host.  Time only moves when [`Runtime::poll`] is called, so
/// the same type serves as the fake clock in tests.
#[derive(Debug)]
pub struct Runtime {
    now: Duration,
    viewport: Viewport,
    scroll_offset: f64,
    regions: HashMap<RegionId, DocRect>,
    /// Keyed by listener id; ids grow monotonically so iteration order is
    /// subscription order.
    listeners: BTreeMap<u64, Listener>,
    next_listener: u64,
    timers: TimerQueue<InstanceId>,
    outbox: VecDeque<Delivery>,
}

impl Runtime {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            now: Duration::ZERO,
            viewport,
            scroll_offset: 0.0,
            regions: HashMap::new(),
            listeners: BTreeMap::new(),
            next_listener: 0,
            timers: TimerQueue::new(),
            outbox: VecDeque::new(),
        }
    }

    // ── geometry ───────────────────────────────────────────────

    /// Attach (or move) a region.  Intersection listeners for it are told
    /// about its current visible fraction.
    pub fn attach(&mut self, region: RegionId, top: f64, height: f64) {
        self.regions.insert(region, DocRect { top, height });
        self.notify_intersections(Some(region));
    }

    /// Detach a region.  Queries against it return `None` until re-attached.
    pub fn detach(&mut self, region: RegionId) {
        self.regions.remove(&region);
    }

    /// Move the viewport.  Negative offsets clamp to zero; an unchanged
    /// offset produces no events.
    pub fn scroll_to(&mut self, offset: f64) {
        let offset = offset.max(0.0);
        if offset == self.scroll_offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify(EventSource::Scroll, Signal::Scroll);
        self.notify_intersections(None);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.notify(EventSource::Resize, Signal::Resize);
        self.notify_intersections(None);
    }

    /// Fraction of `region` inside the viewport, or `None` if it is detached
    /// or has no height.
    pub fn visible_fraction(&self, region: RegionId) -> Option<f64> {
        let rect = self.region_rect(region)?;
        if rect.height <= 0.0 {
            return None;
        }
        let overlap = rect.bottom().min(self.viewport.height) - rect.top.max(0.0);
        Some((overlap.max(0.0) / rect.height).clamp(0.0, 1.0))
    }

    // ── pumping ────────────────────────────────────────────────

    /// Next delivery to dispatch.
    ///
    /// Queued deliveries come first.  Otherwise the earliest timer due at or
    /// before `until` fires and the clock jumps to its deadline.  When nothing
    /// is left the clock settles at `until` and `None` is returned.
    pub fn poll(&mut self, until: Duration) -> Option<Delivery> {
        if let Some(d) = self.outbox.pop_front() {
            return Some(d);
        }
        if let Some(fired) = self.timers.pop_due(until) {
            self.now = self.now.max(fired.at);
            let delivery = Delivery {
                owner: fired.payload,
                token: CancelToken::Timer(fired.id),
                at: fired.at,
                signal: Signal::Timer,
            };
            tracing::trace!(?delivery, "timer fired");
            return Some(delivery);
        }
        self.now = self.now.max(until);
        None
    }

    // ── introspection ──────────────────────────────────────────

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[cfg(test)]
    pub fn has_queued(&self) -> bool {
        !self.outbox.is_empty()
    }

    // ── internals ──────────────────────────────────────────────

    fn notify(&mut self, source: EventSource, signal: Signal) {
        let at = self.now;
        for (&id, listener) in &self.listeners {
            if listener.source == source {
                self.outbox.push_back(Delivery {
                    owner: listener.owner,
                    token: CancelToken::Listener(id),
                    at,
                    signal,
                });
            }
        }
    }

    /// Push the current ratio to intersection listeners (all of them, or only
    /// those watching `only`).  Detached regions are skipped.
    fn notify_intersections(&mut self, only: Option<RegionId>) {
        let targets: Vec<(u64, InstanceId, RegionId)> = self
            .listeners
            .iter()
            .filter_map(|(&id, l)| match l.source {
                EventSource::Intersection(region) if only.map_or(true, |o| o == region) => {
                    Some((id, l.owner, region))
                }
                _ => None,
            })
            .collect();

        for (id, owner, region) in targets {
            let Some(ratio) = self.visible_fraction(region) else {
                continue;
            };
            self.outbox.push_back(Delivery {
                owner,
                token: CancelToken::Listener(id),
                at: self.now,
                signal: Signal::Intersection { ratio },
            });
        }
    }
}

impl Host for Runtime {
    fn now(&self) -> Duration {
        self.now
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn region_rect(&self, region: RegionId) -> Option<ViewRect> {
        self.regions.get(&region).map(|r| ViewRect {
            top: r.top - self.scroll_offset,
            height: r.height,
        })
    }

    fn subscribe(&mut self, owner: InstanceId, source: EventSource) -> CancelToken {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.insert(id, Listener { owner, source });
        tracing::trace!(?owner, ?source, id, "subscribed");

        // Like an intersection observer, report the initial state right away.
        if let EventSource::Intersection(region) = source {
            if let Some(ratio) = self.visible_fraction(region) {
                self.outbox.push_back(Delivery {
                    owner,
                    token: CancelToken::Listener(id),
                    at: self.now,
                    signal: Signal::Intersection { ratio },
                });
            }
        }
        CancelToken::Listener(id)
    }

    fn schedule(&mut self, owner: InstanceId, schedule: Schedule) -> CancelToken {
        CancelToken::Timer(self.timers.schedule(self.now, schedule, owner))
    }

    fn cancel(&mut self, token: CancelToken) -> bool {
        let removed = match token {
            CancelToken::Listener(id) => self.listeners.remove(&id).is_some(),
            CancelToken::Timer(id) => self.timers.cancel(id),
        };
        // Anything already queued for this token is stale now.
        self.outbox.retain(|d| d.token != token);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: InstanceId = InstanceId(7);

    fn drain(rt: &mut Runtime, until: Duration) -> Vec<Delivery> {
        std::iter::from_fn(|| rt.poll(until)).collect()
    }

    #[test]
    fn region_rect_is_relative_to_scroll_offset() {
        let mut rt = Runtime::new(Viewport::new(1024.0, 600.0));
        rt.attach(RegionId::Card(0), 900.0, 200.0);
        rt.scroll_to(400.0);
        let rect = rt.region_rect(RegionId::Card(0)).unwrap();
        assert_eq!(rect.top, 500.0);
        assert_eq!(rect.bottom(), 700.0);
        assert_eq!(rt.visible_fraction(RegionId::Card(0)), Some(0.5));
    }

    #[test]
    fn detached_region_is_unavailable() {
        let mut rt = Runtime::new(Viewport::new(1024.0, 600.0));
        rt.attach(RegionId::Card(1), 0.0, 100.0);
        rt.detach(RegionId::Card(1));
        assert!(rt.region_rect(RegionId::Card(1)).is_none());
        assert!(rt.visible_fraction(RegionId::Card(1)).is_none());
    }

    #[test]
    fn intersection_subscription_reports_initial_ratio() {
        let mut rt = Runtime::new(Viewport::new(1024.0, 600.0));
        rt.attach(RegionId::Section(SectionId::Technology), 500.0, 200.0);
        let token = rt.subscribe(OWNER, EventSource::Intersection(RegionId::Section(SectionId::Technology)));
        let got = drain(&mut rt, Duration::ZERO);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].token, token);
        assert_eq!(got[0].signal, Signal::Intersection { ratio: 0.5 });
    }

    #[test]
    fn scroll_notifies_only_scroll_listeners() {
        let mut rt = Runtime::new(Viewport::new(1024.0, 600.0));
        let scroll = rt.subscribe(OWNER, EventSource::Scroll);
        rt.subscribe(OWNER, EventSource::Resize);
        rt.scroll_to(10.0);
        let got = drain(&mut rt, Duration::ZERO);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].token, scroll);
        assert_eq!(got[0].signal, Signal::Scroll);

        // Same offset again: no event.
        rt.scroll_to(10.0);
        assert!(drain(&mut rt, Duration::ZERO).is_empty());
    }

    #[test]
    fn cancel_purges_queued_deliveries() {
        let mut rt = Runtime::new(Viewport::new(1024.0, 600.0));
        let token = rt.subscribe(OWNER, EventSource::Scroll);
        rt.scroll_to(50.0);
        assert!(rt.has_queued());
        assert!(rt.cancel(token));
        assert!(!rt.cancel(token));
        assert!(drain(&mut rt, Duration::ZERO).is_empty());
        assert_eq!(rt.listener_count(), 0);
    }

    #[test]
    fn poll_advances_clock_to_timer_deadline_then_to_until() {
        let mut rt = Runtime::new(Viewport::new(1024.0, 600.0));
        let token = rt.schedule(OWNER, Schedule::Once(Duration::from_millis(300)));
        let d = rt.poll(Duration::from_secs(1)).unwrap();
        assert_eq!(d.token, token);
        assert_eq!(d.at, Duration::from_millis(300));
        assert_eq!(rt.now(), Duration::from_millis(300));
        assert!(rt.poll(Duration::from_secs(1)).is_none());
        assert_eq!(rt.now(), Duration::from_secs(1));
        assert_eq!(rt.pending_timers(), 0);
    }
}
