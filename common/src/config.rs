//! Display geometry, animation timing and power thresholds.
//!
//! Geometry is fixed at compile time, so quadrant rectangles and element boxes cost
//! nothing per frame. Tunables that a host may want to change at startup live in [`FaceConfig`].
//!
//! # Compile-Time Validation
//!
//! Each geometry group carries `const` assertions. If a box is resized so that it no
//! longer fits inside a quadrant, compilation fails instead of the element spilling
//! under the clock hands.

use core::fmt;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (144x168 memory LCD).
pub const SCREEN_WIDTH: u32 = 144;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 168;

/// Screen center X coordinate. The hands rotate around this point.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Quadrant Layout
// =============================================================================

/// Horizontal margin kept free for the dial numerals.
///
/// The numerals are asymmetric (35px left, 28px right); the larger value is used on
/// both sides so the four quadrants stay the same size.
pub const X_MARGIN: u32 = 35;

/// Vertical margin kept free for the dial numerals (25px top, 26px bottom).
pub const Y_MARGIN: u32 = 26;

/// Width of one quadrant rectangle.
pub const QUADRANT_WIDTH: u32 = (SCREEN_WIDTH - 2 * X_MARGIN) / 2;

/// Height of one quadrant rectangle.
pub const QUADRANT_HEIGHT: u32 = (SCREEN_HEIGHT - 2 * Y_MARGIN) / 2;

const _: () = assert!(2 * X_MARGIN < SCREEN_WIDTH);
const _: () = assert!(2 * Y_MARGIN < SCREEN_HEIGHT);

// =============================================================================
// Indicator Boxes
// =============================================================================

/// Width of the date label box ("Wed" over "13").
pub const DATE_WIDTH: u32 = 32;

/// Height of the date label box.
pub const DATE_HEIGHT: u32 = 48;

/// Width of the battery + bluetooth cluster.
pub const STATUS_WIDTH: u32 = 24;

/// Height of the battery + bluetooth cluster.
pub const STATUS_HEIGHT: u32 = 28;

/// Battery icon box, relative to the status cluster origin: (x, y, w, h).
pub const BATTERY_ICON: (i32, i32, u32, u32) = (0, 0, 24, 12);

/// Bluetooth icon box, relative to the status cluster origin: (x, y, w, h).
pub const BLUETOOTH_ICON: (i32, i32, u32, u32) = (8, 16, 9, 12);

const _: () = assert!(DATE_WIDTH <= QUADRANT_WIDTH);
const _: () = assert!(DATE_HEIGHT <= QUADRANT_HEIGHT);
const _: () = assert!(STATUS_WIDTH <= QUADRANT_WIDTH);
const _: () = assert!(STATUS_HEIGHT <= QUADRANT_HEIGHT);
const _: () = assert!(BATTERY_ICON.1 as u32 + BATTERY_ICON.3 <= BLUETOOTH_ICON.1 as u32);
const _: () = assert!(BLUETOOTH_ICON.1 as u32 + BLUETOOTH_ICON.3 <= STATUS_HEIGHT);

// =============================================================================
// Startup Animation Defaults
// =============================================================================

/// Interval of the fast one-shot timer driving the startup sweep.
pub const ANIMATION_INTERVAL_MS: u32 = 30;

/// Degrees the hour hand advances per animation firing.
pub const HOUR_STEP_DEG: u16 = 10;

/// Degrees the minute hand advances per animation firing.
pub const MINUTE_STEP_DEG: u16 = 6;

/// Degrees the second hand advances per animation firing.
pub const SECOND_STEP_DEG: u16 = 12;

// =============================================================================
// Power Policy Defaults
// =============================================================================

/// Charge level (percent) below which an unplugged watch drops to minute ticks.
pub const LOW_BATTERY_PERCENT: u8 = 20;

const _: () = assert!(LOW_BATTERY_PERCENT <= 100);

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Startup tunables for the watch face.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceConfig {
    /// Whether the platform can deliver per-second ticks at all.
    /// When false the second hand is never shown and the power policy is inert.
    pub seconds_supported: bool,
    pub low_battery_percent: u8,
    pub animation_interval_ms: u32,
    pub hour_step_deg: u16,
    pub minute_step_deg: u16,
    pub second_step_deg: u16,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            seconds_supported: true,
            low_battery_percent: LOW_BATTERY_PERCENT,
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            hour_step_deg: HOUR_STEP_DEG,
            minute_step_deg: MINUTE_STEP_DEG,
            second_step_deg: SECOND_STEP_DEG,
        }
    }
}

impl FaceConfig {
    /// Check that every tunable is usable by the animation and power policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for step in [self.hour_step_deg, self.minute_step_deg, self.second_step_deg] {
            if step == 0 || step > 360 {
                return Err(ConfigError::StepOutOfRange(step));
            }
        }
        if self.low_battery_percent > 100 {
            return Err(ConfigError::ThresholdOutOfRange(self.low_battery_percent));
        }
        Ok(())
    }
}

/// Rejected [`FaceConfig`] value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The animation timer interval must be non-zero.
    ZeroInterval,
    /// A sweep step must be within 1..=360 degrees.
    StepOutOfRange(u16),
    /// The low battery threshold is a percentage.
    ThresholdOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "animation interval must be non-zero"),
            Self::StepOutOfRange(step) => write!(f, "sweep step {step} outside 1..=360 degrees"),
            Self::ThresholdOutOfRange(pct) => write!(f, "low battery threshold {pct}% above 100%"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_size() {
        assert_eq!(QUADRANT_WIDTH, 37);
        assert_eq!(QUADRANT_HEIGHT, 58);
    }

    #[test]
    fn test_center() {
        assert_eq!(CENTER_X, 72);
        assert_eq!(CENTER_Y, 84);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(FaceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_steps_ordering() {
        // Minute sweep uses the smaller step
        assert!(MINUTE_STEP_DEG < HOUR_STEP_DEG);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = FaceConfig { animation_interval_ms: 0, ..FaceConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_validate_rejects_bad_steps() {
        let zero = FaceConfig { minute_step_deg: 0, ..FaceConfig::default() };
        assert_eq!(zero.validate(), Err(ConfigError::StepOutOfRange(0)));

        let huge = FaceConfig { second_step_deg: 361, ..FaceConfig::default() };
        assert_eq!(huge.validate(), Err(ConfigError::StepOutOfRange(361)));
    }

    #[test]
    fn test_validate_rejects_threshold() {
        let config = FaceConfig { low_battery_percent: 101, ..FaceConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOutOfRange(101)));
    }
}
