//! Host runtime services for the simulator.
//!
//! [`SimHost`] queues the face's requests: dirty regions for the compositor, element
//! frames, one-shot timers keyed by virtual due time, and the single tick
//! subscription.

use std::collections::HashMap;

use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};
use watchface_common::{DirtyRegions, Element, Host, Region, TickUnit, TimerToken};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PendingTimer {
    due_ms: u64,
    token: TimerToken,
}

#[derive(Debug, Default)]
pub struct SimHost {
    now_ms: u64,
    dirty: DirtyRegions,
    frames: HashMap<Element, Rectangle>,
    timers: Vec<PendingTimer>,
    subscription: Option<TickUnit>,
    subscribes: u32,
    unsubscribes: u32,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time that newly registered timers count from.
    pub fn set_now(
        &mut self,
        now_ms: u64,
    ) {
        self.now_ms = now_ms;
    }

    /// Take every pending dirty region.
    pub fn take_dirty(&mut self) -> DirtyRegions {
        self.dirty.take()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Due time of the earliest pending timer.
    pub fn next_timer_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    /// Timers due at the same instant fire in registration order.
    pub fn pop_due_timer(
        &mut self,
        now_ms: u64,
    ) -> Option<TimerToken> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(i, t)| (t.due_ms, *i))?;
        Some(self.timers.remove(index).token)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub const fn subscription(&self) -> Option<TickUnit> {
        self.subscription
    }

    /// Total subscribe and unsubscribe requests, in that order.
    #[inline]
    pub const fn subscription_changes(&self) -> (u32, u32) {
        (self.subscribes, self.unsubscribes)
    }

    pub fn frame(
        &self,
        element: Element,
    ) -> Option<Rectangle> {
        self.frames.get(&element).copied()
    }
}

impl Host for SimHost {
    fn mark_dirty(
        &mut self,
        region: Region,
    ) {
        self.dirty.insert(region);
    }

    fn set_frame(
        &mut self,
        element: Element,
        frame: Rectangle,
    ) {
        debug!("host: {element:?} frame -> {frame:?}");
        self.frames.insert(element, frame);
        match element {
            Element::Date => self.dirty.insert(Region::Date),
            Element::StatusCluster => {
                self.dirty.insert(Region::Battery);
                self.dirty.insert(Region::Bluetooth);
            }
        }
    }

    fn register_timer(
        &mut self,
        delay_ms: u32,
        token: TimerToken,
    ) {
        self.timers.push(PendingTimer { due_ms: self.now_ms + u64::from(delay_ms), token });
    }

    fn subscribe_tick(
        &mut self,
        unit: TickUnit,
    ) {
        if let Some(active) = self.subscription {
            warn!("host: subscribing to {unit} ticks while {active} ticks are active");
        }
        debug_assert!(self.subscription.is_none(), "at most one tick subscription");
        debug!("host: subscribed to {unit} ticks");
        self.subscription = Some(unit);
        self.subscribes += 1;
    }

    fn unsubscribe_tick(&mut self) {
        debug!("host: unsubscribed");
        self.subscription = None;
        self.unsubscribes += 1;
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::{Point, Size};

    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut host = SimHost::new();
        host.register_timer(50, TimerToken(1));
        host.register_timer(30, TimerToken(2));
        host.register_timer(30, TimerToken(3));

        assert_eq!(host.next_timer_due(), Some(30));
        assert_eq!(host.pop_due_timer(20), None, "nothing due yet");
        assert_eq!(host.pop_due_timer(30), Some(TimerToken(2)), "earliest registered first");
        assert_eq!(host.pop_due_timer(30), Some(TimerToken(3)));
        assert_eq!(host.pop_due_timer(100), Some(TimerToken(1)));
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_timer_delay_counts_from_now() {
        let mut host = SimHost::new();
        host.set_now(1000);
        host.register_timer(30, TimerToken(7));
        assert_eq!(host.next_timer_due(), Some(1030));
    }

    #[test]
    fn test_set_frame_repaints_element() {
        let mut host = SimHost::new();
        let frame = Rectangle::new(Point::new(41, 99), Size::new(24, 28));
        host.set_frame(Element::StatusCluster, frame);

        assert_eq!(host.frame(Element::StatusCluster), Some(frame));
        let dirty = host.take_dirty();
        assert!(dirty.contains(Region::Battery), "battery repaints at the new frame");
        assert!(dirty.contains(Region::Bluetooth), "bluetooth moves with the cluster");
        assert!(!host.is_dirty(), "take clears the queue");
    }

    #[test]
    fn test_subscription_counters() {
        let mut host = SimHost::new();
        host.subscribe_tick(TickUnit::Second);
        host.unsubscribe_tick();
        host.subscribe_tick(TickUnit::Minute);

        assert_eq!(host.subscription(), Some(TickUnit::Minute));
        assert_eq!(host.subscription_changes(), (2, 1));
    }
}
