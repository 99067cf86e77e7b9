//! Requests the face makes of the host runtime.
//!
//! The host owns the layer tree, the tick service and the timer queue. Every
//! request is deferred: marking a region dirty or registering a timer only queues
//! work that the host delivers later through the [`WatchFace`](crate::face::WatchFace)
//! handlers, on the same thread.

use embedded_graphics::primitives::Rectangle;

use crate::animation::TimerToken;
use crate::power::TickUnit;
use crate::render::Region;

/// A movable element whose layer frame the host positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Element {
    /// Weekday and day-of-month label.
    Date,
    /// Battery and bluetooth icons, moved together.
    StatusCluster,
}

/// Host runtime services.
pub trait Host {
    /// Queue a repaint of `region`.
    fn mark_dirty(
        &mut self,
        region: Region,
    );

    /// Move an element's layer. The host repaints it at its new frame.
    fn set_frame(
        &mut self,
        element: Element,
        frame: Rectangle,
    );

    /// Fire [`handle_timer`](crate::face::WatchFace::handle_timer) once with
    /// `token` after `delay_ms`.
    fn register_timer(
        &mut self,
        delay_ms: u32,
        token: TimerToken,
    );

    /// Start tick notifications at `unit` granularity.
    fn subscribe_tick(
        &mut self,
        unit: TickUnit,
    );

    /// Stop tick notifications.
    fn unsubscribe_tick(&mut self);
}

/// Recording host for unit tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::render::DirtyRegions;

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub dirty: DirtyRegions,
        pub frames: Vec<(Element, Rectangle)>,
        pub timers: Vec<(u32, TimerToken)>,
        pub subscription: Option<TickUnit>,
        pub subscribes: u32,
        pub unsubscribes: u32,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pop the most recently registered timer token.
        pub fn take_timer(&mut self) -> Option<TimerToken> {
            self.timers.pop().map(|(_, token)| token)
        }

        /// Forget everything recorded so far except the subscription.
        pub fn clear(&mut self) {
            self.dirty = DirtyRegions::EMPTY;
            self.frames.clear();
            self.timers.clear();
            self.subscribes = 0;
            self.unsubscribes = 0;
        }
    }

    impl Host for RecordingHost {
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
            self.frames.push((element, frame));
        }

        fn register_timer(
            &mut self,
            delay_ms: u32,
            token: TimerToken,
        ) {
            self.timers.push((delay_ms, token));
        }

        fn subscribe_tick(
            &mut self,
            unit: TickUnit,
        ) {
            assert!(self.subscription.is_none(), "subscribed twice without unsubscribing");
            self.subscription = Some(unit);
            self.subscribes += 1;
        }

        fn unsubscribe_tick(&mut self) {
            self.subscription = None;
            self.unsubscribes += 1;
        }
    }
}
