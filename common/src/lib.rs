//! Core logic and widgets for the analog watch face.
//!
//! This crate contains platform-agnostic code shared by the simulator and any
//! device port:
//!
//! - [`config`]: Display geometry, animation and power defaults, [`FaceConfig`]
//! - [`colors`]: Foreground/background colors for the 1-bit display
//! - [`styles`]: Pre-computed primitive and text styles
//! - [`quadrant`]: The four quadrants indicators may occupy
//! - [`placement`]: Occupancy mask, preference table and placement chasing
//! - [`hands`]: Hand angles and outlines
//! - [`animation`]: Startup sweep state machine and timer tokens
//! - [`power`]: Battery-driven tick granularity
//! - [`render`]: Regions, dirty tracking and the redraw cadence
//! - [`host`]: Requests made of the host runtime
//! - [`face`]: The [`WatchFace`] application state
//! - [`debug_log`]: Event ring buffer for the debug page
//! - [`widgets`]: Drawing routines
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Time is passed in by the host as `chrono` values; nothing here reads a clock.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animation;
pub mod colors;
pub mod config;
pub mod debug_log;
pub mod face;
pub mod hands;
pub mod host;
pub mod placement;
pub mod power;
pub mod quadrant;
pub mod render;
pub mod styles;
pub mod widgets;

// Re-export commonly used items
pub use animation::{AnimationPhase, TimerToken};
pub use config::{ConfigError, FaceConfig};
pub use face::WatchFace;
pub use host::{Element, Host};
pub use power::{BatteryState, PowerMode, TickUnit};
pub use quadrant::Quadrant;
pub use render::{DirtyRegions, Region};
