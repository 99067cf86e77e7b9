//! Battery-driven tick granularity.
//!
//! Per-second ticks keep the second hand alive but wake the CPU sixty times as
//! often. When the watch is unplugged and low, the policy drops to minute ticks
//! and the second hand is hidden until the battery recovers or the charger is
//! connected.

use core::fmt;

use log::info;

use crate::config::FaceConfig;
use crate::host::Host;
use crate::render::Region;

/// Battery reading as reported by the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BatteryState {
    /// Charge level, 0-100.
    pub percent: u8,
    /// Charger connected.
    pub plugged: bool,
}

impl BatteryState {
    pub const fn new(
        percent: u8,
        plugged: bool,
    ) -> Self {
        Self { percent: if percent > 100 { 100 } else { percent }, plugged }
    }

    /// Unplugged and under `threshold` percent.
    #[inline]
    pub const fn is_low(
        self,
        threshold: u8,
    ) -> bool {
        !self.plugged && self.percent < threshold
    }
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%{}", self.percent, if self.plugged { " plugged" } else { "" })
    }
}

/// Tick notification granularity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TickUnit {
    Second,
    Minute,
}

impl fmt::Display for TickUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Second => "second",
            Self::Minute => "minute",
        })
    }
}

/// Power policy state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PowerMode {
    Normal,
    Conserving,
}

impl fmt::Display for PowerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Conserving => "conserving",
        })
    }
}

/// Chooses the tick subscription from battery state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PowerPolicy {
    mode: PowerMode,
    seconds_supported: bool,
    low_battery_percent: u8,
}

impl PowerPolicy {
    pub const fn new(config: &FaceConfig) -> Self {
        Self {
            mode: PowerMode::Normal,
            seconds_supported: config.seconds_supported,
            low_battery_percent: config.low_battery_percent,
        }
    }

    #[inline]
    pub const fn mode(&self) -> PowerMode {
        self.mode
    }

    /// Granularity the host should deliver in the current mode.
    pub const fn tick_unit(&self) -> TickUnit {
        match (self.seconds_supported, self.mode) {
            (true, PowerMode::Normal) => TickUnit::Second,
            _ => TickUnit::Minute,
        }
    }

    /// Mode a battery reading calls for.
    pub const fn mode_for(
        &self,
        battery: BatteryState,
    ) -> PowerMode {
        if self.seconds_supported && battery.is_low(self.low_battery_percent) {
            PowerMode::Conserving
        } else {
            PowerMode::Normal
        }
    }

    /// Initial, unconditional subscription.
    pub fn start<H: Host>(
        &mut self,
        host: &mut H,
        battery: BatteryState,
    ) {
        self.mode = self.mode_for(battery);
        info!("power: starting in {} mode, {} ticks ({battery})", self.mode, self.tick_unit());
        host.subscribe_tick(self.tick_unit());
    }

    /// React to a battery change. Returns true if the subscription was switched.
    ///
    /// Re-applying the current mode is a no-op. A switch always unsubscribes before
    /// subscribing so the host never holds two subscriptions.
    pub fn update<H: Host>(
        &mut self,
        host: &mut H,
        battery: BatteryState,
    ) -> bool {
        let mode = self.mode_for(battery);
        if mode == self.mode {
            return false;
        }

        host.unsubscribe_tick();
        self.mode = mode;
        host.subscribe_tick(self.tick_unit());
        host.mark_dirty(Region::SecondHand);
        info!("power: {mode} mode, {} ticks ({battery})", self.tick_unit());
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
