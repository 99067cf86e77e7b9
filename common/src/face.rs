//! The watch face application state and its event handlers.
//!
//! [`WatchFace`] holds everything the face knows: applied indicator placement,
//! startup animation, power policy and the last battery and bluetooth readings.
//! The host calls one handler per notification and [`WatchFace::paint`] per dirty
//! region; each handler runs to completion and talks back only through [`Host`].

use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;
use log::{debug, info};

use crate::animation::{AnimationPhase, StartupAnimation, TimerToken};
use crate::config::{ConfigError, FaceConfig};
use crate::debug_log::DebugLog;
use crate::hands::{HOUR_HAND_POINTS, Hand, HandAngles, MINUTE_HAND_POINTS};
use crate::host::{Element, Host};
use crate::placement::{AppliedPlacement, IndicatorPlacement};
use crate::power::{BatteryState, PowerMode, PowerPolicy, TickUnit};
use crate::render::{Region, tick_regions};
use crate::widgets::{
    DateLabel,
    battery_icon_frame,
    bluetooth_icon_frame,
    draw_battery,
    draw_bluetooth,
    draw_center_cap,
    draw_date,
    draw_dial,
    draw_hand,
    draw_second_hand,
    format_date,
};

/// Watch face state.
#[derive(Debug)]
pub struct WatchFace {
    config: FaceConfig,
    placement: IndicatorPlacement,
    animation: StartupAnimation,
    power: PowerPolicy,
    battery: BatteryState,
    bluetooth: bool,
    date: DateLabel,
    log: DebugLog,
}

impl WatchFace {
    /// Build the face and make the initial host requests.
    ///
    /// Placement is seeded with one unconditional computation and both element
    /// frames are pushed to the host. The tick subscription follows the power
    /// policy for `battery`. Every region starts dirty.
    pub fn new<H: Host>(
        config: FaceConfig,
        now: &NaiveDateTime,
        battery: BatteryState,
        bluetooth: bool,
        host: &mut H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let placement = IndicatorPlacement::seed(now.hour(), now.minute());
        host.set_frame(Element::StatusCluster, placement.battery_frame());
        host.set_frame(Element::Date, placement.date_frame());

        let mut power = PowerPolicy::new(&config);
        power.start(host, battery);

        let mut face = Self {
            config,
            placement,
            animation: StartupAnimation::new(&config),
            power,
            battery,
            bluetooth,
            date: format_date(now),
            log: DebugLog::new(),
        };
        face.log.push_fmt(format_args!("start {}", placement.applied()));
        face.log.push_fmt(format_args!("power {}", face.power.mode()));

        for region in Region::Z_ORDER {
            host.mark_dirty(region);
        }
        info!("watch face started at {now}: {}, battery {battery}", placement.applied());
        Ok(face)
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Tick from the subscription service.
    ///
    /// The first tick starts the sweep. Ticks while it runs are dropped; the fast
    /// timer owns the display. Once done, ticks redraw on the steady cadence.
    pub fn handle_tick<H: Host>(
        &mut self,
        host: &mut H,
        now: &NaiveDateTime,
        unit: TickUnit,
    ) {
        match self.animation.phase() {
            AnimationPhase::Idle => {
                if let Some(token) = self.animation.start() {
                    host.register_timer(self.config.animation_interval_ms, token);
                    self.log.push("anim start");
                }
            }
            AnimationPhase::Done => {
                let mut regions = tick_regions(now, unit);
                if regions.contains(Region::Date) {
                    self.refresh_date(host, now);
                }
                if !self.second_hand_visible() {
                    regions.remove(Region::SecondHand);
                }
                for region in regions.iter() {
                    host.mark_dirty(region);
                }
            }
            phase => debug!("tick at {now} ignored during {phase}"),
        }
    }

    /// Fast animation timer firing.
    pub fn handle_timer<H: Host>(
        &mut self,
        host: &mut H,
        token: TimerToken,
        now: &NaiveDateTime,
    ) {
        let before = self.animation.phase();
        let Some(step) = self
            .animation
            .on_timer(token, HandAngles::at(now), self.seconds_enabled())
        else {
            return;
        };

        for region in step.redraw.iter() {
            host.mark_dirty(region);
        }
        if let Some(next) = step.reschedule {
            host.register_timer(self.config.animation_interval_ms, next);
        }

        let after = self.animation.phase();
        if after != before {
            self.log.push_fmt(format_args!("anim {after}"));
            if after == AnimationPhase::Done {
                info!("startup animation finished at {now}");
                // Ticks were dropped during the sweep, including any midnight roll
                self.refresh_date(host, now);
            }
        }
    }

    fn refresh_date<H: Host>(
        &mut self,
        host: &mut H,
        now: &NaiveDateTime,
    ) {
        let label = format_date(now);
        if label != self.date {
            self.date = label;
            host.mark_dirty(Region::Date);
            info!("date label now {:?}", self.date.as_str());
        }
    }

    /// Battery state notification.
    pub fn handle_battery_change<H: Host>(
        &mut self,
        host: &mut H,
        battery: BatteryState,
    ) {
        if battery == self.battery {
            return;
        }
        self.battery = battery;
        host.mark_dirty(Region::Battery);

        if self.power.update(host, battery) {
            self.log.push_fmt(format_args!("power {} {}", self.power.mode(), battery.percent));
        }
    }

    /// Bluetooth connection notification.
    pub fn handle_bluetooth_change<H: Host>(
        &mut self,
        host: &mut H,
        connected: bool,
    ) {
        if connected == self.bluetooth {
            return;
        }
        self.bluetooth = connected;
        host.mark_dirty(Region::Bluetooth);
        info!("bluetooth {}", if connected { "connected" } else { "disconnected" });
        self.log.push(if connected { "bt up" } else { "bt down" });
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint one region.
    ///
    /// Painting [`Region::Indicators`] draws nothing; it recomputes the preferred
    /// placement and moves whichever elements changed quadrant.
    pub fn paint<H, D>(
        &mut self,
        host: &mut H,
        region: Region,
        now: &NaiveDateTime,
        display: &mut D,
    ) where
        H: Host,
        D: DrawTarget<Color = BinaryColor>,
    {
        match region {
            Region::Background => draw_dial(display),
            Region::Indicators => self.chase(host, now),
            Region::Date => draw_date(display, self.placement.date_frame(), &self.date),
            Region::Battery => draw_battery(display, battery_icon_frame(self.placement.battery_frame()), self.battery),
            Region::Bluetooth => {
                draw_bluetooth(display, bluetooth_icon_frame(self.placement.battery_frame()), self.bluetooth);
            }
            Region::HourHand => draw_hand(display, &HOUR_HAND_POINTS, self.hand_angle(Hand::Hour, now)),
            Region::MinuteHand => draw_hand(display, &MINUTE_HAND_POINTS, self.hand_angle(Hand::Minute, now)),
            Region::SecondHand => {
                if self.second_hand_visible() {
                    draw_second_hand(display, self.hand_angle(Hand::Second, now));
                }
            }
            Region::Center => draw_center_cap(display),
        }
    }

    fn chase<H: Host>(
        &mut self,
        host: &mut H,
        now: &NaiveDateTime,
    ) {
        if self.animation.phase().indicators_frozen() {
            return;
        }

        let update = self.placement.chase(now.hour(), now.minute());
        let applied = self.placement.applied();
        if let Some(frame) = update.battery {
            host.set_frame(Element::StatusCluster, frame);
            self.log.push_fmt(format_args!("bat -> {}", applied.battery));
        }
        if let Some(frame) = update.date {
            host.set_frame(Element::Date, frame);
            self.log.push_fmt(format_args!("date -> {}", applied.date));
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn config(&self) -> &FaceConfig {
        &self.config
    }

    #[inline]
    pub const fn phase(&self) -> AnimationPhase {
        self.animation.phase()
    }

    #[inline]
    pub const fn power_mode(&self) -> PowerMode {
        self.power.mode()
    }

    /// Tick granularity the face currently wants.
    #[inline]
    pub const fn tick_unit(&self) -> TickUnit {
        self.power.tick_unit()
    }

    #[inline]
    pub const fn placement(&self) -> AppliedPlacement {
        self.placement.applied()
    }

    #[inline]
    pub const fn battery(&self) -> BatteryState {
        self.battery
    }

    #[inline]
    pub const fn bluetooth_connected(&self) -> bool {
        self.bluetooth
    }

    /// Current date label, `"%a\n%d"`.
    pub fn date_label(&self) -> &str {
        self.date.as_str()
    }

    /// Event log for the debug page.
    #[inline]
    pub const fn log(&self) -> &DebugLog {
        &self.log
    }

    /// The second hand needs per-second ticks and a finished hour/minute sweep.
    pub fn second_hand_visible(&self) -> bool {
        self.seconds_enabled() && self.animation.phase() >= AnimationPhase::AnimatingSeconds
    }

    /// Angle `hand` is drawn at: the sweep accumulator while animating, live time after.
    pub fn hand_angle(
        &self,
        hand: Hand,
        now: &NaiveDateTime,
    ) -> u16 {
        self.animation.hand_angle(hand, hand.angle(now))
    }

    fn seconds_enabled(&self) -> bool {
        self.config.seconds_supported && self.power.mode() == PowerMode::Normal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
