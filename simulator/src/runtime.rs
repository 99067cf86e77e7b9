//! Cooperative event loop standing in for the watch runtime.
//!
//! Events are processed one at a time in virtual-time order. Each step fires at
//! most one timer, tick or battery drain, then composites if anything is dirty.
//! At the same instant, due timers go before the tick.

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use embedded_graphics::prelude::DrawTarget;
use log::{debug, info};
use watchface_common::colors::BACKGROUND;
use watchface_common::{BatteryState, FaceConfig, Region, TickUnit, WatchFace};

use crate::clock::SimClock;
use crate::framebuffer::Framebuffer;
use crate::host::SimHost;
use crate::timing::{DRAIN_INTERVAL_MS, MAX_COMPOSITE_PASSES};

/// Startup scenario.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeOptions {
    pub config: FaceConfig,
    pub start: NaiveDateTime,
    pub battery: BatteryState,
    pub bluetooth: bool,
    pub drain: bool,
}

/// Counters shown in the headless summary and on the debug page.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuntimeStats {
    pub ticks: u32,
    pub timer_firings: u32,
    pub composites: u32,
    /// Paint requests per region, indexed by `Region as usize`.
    pub requests: [u32; Region::Z_ORDER.len()],
}

impl RuntimeStats {
    pub const fn requests_for(
        &self,
        region: Region,
    ) -> u32 {
        self.requests[region as usize]
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Event {
    Timer,
    Tick(TickUnit),
    Drain,
}

/// Rank for ordering events at the same instant.
const fn event_rank(event: Event) -> u8 {
    match event {
        Event::Timer => 0,
        Event::Tick(_) => 1,
        Event::Drain => 2,
    }
}

pub struct Runtime {
    face: WatchFace,
    host: SimHost,
    clock: SimClock,
    display: Framebuffer,
    stats: RuntimeStats,
    battery: BatteryState,
    drain: bool,
    next_drain_ms: u64,
}

impl Runtime {
    /// Create the face and composite the first frame.
    pub fn new(options: RuntimeOptions) -> Result<Self> {
        let clock = SimClock::new(options.start);
        let mut host = SimHost::new();
        let face = WatchFace::new(options.config, &clock.now(), options.battery, options.bluetooth, &mut host)
            .map_err(|e| anyhow!("invalid face configuration: {e}"))?;

        let mut runtime = Self {
            face,
            host,
            clock,
            display: Framebuffer::new(),
            stats: RuntimeStats::default(),
            battery: options.battery,
            drain: options.drain,
            next_drain_ms: DRAIN_INTERVAL_MS,
        };
        runtime.composite();
        Ok(runtime)
    }

    /// Process every event due up to `target_ms` of virtual time.
    pub fn run_until(
        &mut self,
        target_ms: u64,
    ) {
        while let Some((at, event)) = self.next_event() {
            if at > target_ms {
                break;
            }
            self.clock.advance_to(at);
            self.host.set_now(at);
            self.dispatch(event);
            self.composite();
        }
        self.clock.advance_to(target_ms);
        self.host.set_now(self.clock.elapsed_ms());
    }

    fn next_event(&self) -> Option<(u64, Event)> {
        let timer = self.host.next_timer_due().map(|at| (at, Event::Timer));
        let tick = self
            .host
            .subscription()
            .map(|unit| (self.clock.next_boundary(unit), Event::Tick(unit)));
        let drain = self.drain.then_some((self.next_drain_ms, Event::Drain));

        [timer, tick, drain]
            .into_iter()
            .flatten()
            .min_by_key(|(at, event)| (*at, event_rank(*event)))
    }

    fn dispatch(
        &mut self,
        event: Event,
    ) {
        let now = self.clock.now();
        match event {
            Event::Timer => {
                if let Some(token) = self.host.pop_due_timer(self.clock.elapsed_ms()) {
                    self.stats.timer_firings += 1;
                    self.face.handle_timer(&mut self.host, token, &now);
                }
            }
            Event::Tick(unit) => {
                self.stats.ticks += 1;
                self.face.handle_tick(&mut self.host, &now, unit);
            }
            Event::Drain => {
                self.next_drain_ms += DRAIN_INTERVAL_MS;
                if !self.battery.plugged && self.battery.percent > 0 {
                    self.set_battery(BatteryState::new(self.battery.percent - 1, false));
                }
            }
        }
    }

    /// Redraw the whole layer tree if any region is dirty.
    pub fn composite(&mut self) {
        let now = self.clock.now();
        for _ in 0..MAX_COMPOSITE_PASSES {
            let dirty = self.host.take_dirty();
            if dirty.is_empty() {
                return;
            }
            for region in dirty.iter() {
                self.stats.requests[region as usize] += 1;
            }

            self.display.clear(BACKGROUND).ok();
            for region in Region::Z_ORDER {
                self.face.paint(&mut self.host, region, &now, &mut self.display);
            }
            self.stats.composites += 1;
        }
        if self.host.is_dirty() {
            debug!("compositor: regions still dirty after {MAX_COMPOSITE_PASSES} passes");
        }
    }

    // =========================================================================
    // Scenario Controls
    // =========================================================================

    /// Deliver a new battery reading.
    pub fn set_battery(
        &mut self,
        battery: BatteryState,
    ) {
        self.battery = battery;
        info!("battery now {battery}");
        self.face.handle_battery_change(&mut self.host, battery);
        self.composite();
    }

    /// Change the charge level by `delta` percent, clamped to 0-100.
    #[cfg_attr(not(feature = "sdl"), allow(dead_code))]
    pub fn adjust_battery(
        &mut self,
        delta: i16,
    ) {
        let percent = (i16::from(self.battery.percent) + delta).clamp(0, 100) as u8;
        self.set_battery(BatteryState::new(percent, self.battery.plugged));
    }

    #[cfg_attr(not(feature = "sdl"), allow(dead_code))]
    pub fn toggle_plugged(&mut self) {
        self.set_battery(BatteryState::new(self.battery.percent, !self.battery.plugged));
    }

    pub fn toggle_bluetooth(&mut self) {
        let connected = !self.face.bluetooth_connected();
        self.face.handle_bluetooth_change(&mut self.host, connected);
        self.composite();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub const fn face(&self) -> &WatchFace {
        &self.face
    }

    pub const fn host(&self) -> &SimHost {
        &self.host
    }

    pub const fn display(&self) -> &Framebuffer {
        &self.display
    }

    pub const fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};
    use watchface_common::hands::Hand;
    use watchface_common::{AnimationPhase, Element, PowerMode, Quadrant};

    use super::*;

    fn options_at(
        h: u32,
        m: u32,
        s: u32,
    ) -> RuntimeOptions {
        RuntimeOptions {
            config: FaceConfig::default(),
            start: NaiveDate::from_ymd_opt(2024, 3, 13).unwrap().and_hms_opt(h, m, s).unwrap(),
            battery: BatteryState::new(80, false),
            bluetooth: true,
            drain: false,
        }
    }

    // -------------------------------------------------------------------------
    // Startup Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_composite_paints_everything() {
        let runtime = Runtime::new(options_at(2, 40, 0)).unwrap();
        for region in Region::Z_ORDER {
            assert_eq!(runtime.stats().requests_for(region), 1, "{} requested once", region.name());
        }
        assert!(runtime.display().ink_count() > 0, "first frame drawn");
    }

    #[test]
    fn test_animation_completes() {
        let mut runtime = Runtime::new(options_at(2, 40, 0)).unwrap();
        runtime.run_until(10_000);

        assert_eq!(runtime.face().phase(), AnimationPhase::Done);
        assert_eq!(runtime.host().pending_timers(), 0, "fast timer discarded after the sweep");
        assert!(runtime.face().second_hand_visible(), "second hand alive");
        assert!(runtime.stats().timer_firings > 40, "sweep ran on the fast timer");
    }

    #[test]
    fn test_midnight_sweep_finishes() {
        let mut runtime = Runtime::new(options_at(0, 0, 0)).unwrap();
        runtime.run_until(10_000);

        assert_eq!(runtime.face().phase(), AnimationPhase::Done);
        let now = runtime.now();
        assert_eq!(runtime.face().hand_angle(Hand::Hour, &now), 0, "hour hand back at twelve");
    }

    #[test]
    fn test_start_just_before_midnight_shows_new_date() {
        let mut runtime = Runtime::new(options_at(23, 59, 59)).unwrap();
        assert_eq!(runtime.face().date_label(), "Wed\n13");

        runtime.run_until(15_000);
        assert_eq!(runtime.face().phase(), AnimationPhase::Done);
        assert_eq!(runtime.face().date_label(), "Thu\n14", "midnight tick fell inside the sweep");
    }

    // -------------------------------------------------------------------------
    // Steady-State Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_second_ticks_in_normal_mode() {
        let mut runtime = Runtime::new(options_at(2, 40, 0)).unwrap();
        runtime.run_until(30_000);
        assert_eq!(runtime.stats().ticks, 30, "one tick per virtual second");
    }

    #[test]
    fn test_indicators_chase_quadrant_change() {
        // 02:44:50 is mask 5 (battery q3); at 02:45:00 the minute hand enters q3
        let mut runtime = Runtime::new(options_at(2, 44, 50)).unwrap();
        assert_eq!(runtime.face().placement().battery, Quadrant::TopLeft);

        runtime.run_until(12_000);
        assert_eq!(runtime.now().minute(), 45);
        assert_eq!(runtime.face().placement().battery, Quadrant::BottomLeft, "mask 9 moves battery to q2");
        assert_eq!(runtime.face().placement().date, Quadrant::BottomRight, "date stays in q1");
        assert_eq!(
            runtime.host().frame(Element::StatusCluster),
            Some(Quadrant::BottomLeft.fit(watchface_common::placement::STATUS_SIZE))
        );
    }

    // -------------------------------------------------------------------------
    // Power Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_low_battery_ticks_per_minute() {
        let mut options = options_at(2, 40, 0);
        options.battery = BatteryState::new(15, false);
        let mut runtime = Runtime::new(options).unwrap();
        assert_eq!(runtime.face().power_mode(), PowerMode::Conserving);

        runtime.run_until(180_000);
        assert_eq!(runtime.host().subscription(), Some(TickUnit::Minute));
        assert_eq!(runtime.stats().ticks, 3, "three minute ticks in three minutes");
        assert!(!runtime.face().second_hand_visible(), "second hand hidden");
    }

    #[test]
    fn test_drain_switches_once() {
        let mut options = options_at(2, 40, 0);
        options.battery = BatteryState::new(21, false);
        options.drain = true;
        let mut runtime = Runtime::new(options).unwrap();

        runtime.run_until(5 * 60_000);
        assert_eq!(runtime.face().battery().percent, 16);
        assert_eq!(runtime.face().power_mode(), PowerMode::Conserving);
        assert_eq!(runtime.host().subscription_changes(), (2, 1), "initial subscribe plus one switch");
    }

    #[test]
    fn test_plugging_in_restores_seconds() {
        let mut options = options_at(2, 40, 0);
        options.battery = BatteryState::new(10, false);
        let mut runtime = Runtime::new(options).unwrap();

        runtime.toggle_plugged();
        assert_eq!(runtime.face().power_mode(), PowerMode::Normal);
        assert_eq!(runtime.host().subscription(), Some(TickUnit::Second));
    }

    #[test]
    fn test_bluetooth_toggle_repaints() {
        let mut runtime = Runtime::new(options_at(2, 40, 0)).unwrap();
        let before = runtime.stats().requests_for(Region::Bluetooth);

        runtime.toggle_bluetooth();
        assert!(!runtime.face().bluetooth_connected());
        assert_eq!(runtime.stats().requests_for(Region::Bluetooth), before + 1);
    }
}
