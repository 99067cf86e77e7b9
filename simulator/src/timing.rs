//! Timing constants for the simulator.
//!
//! These use `std::time::Duration` or virtual milliseconds and have no place in the
//! `no_std` common crate.

use std::time::Duration;

/// Target frame time of the interactive window (~50 FPS).
#[cfg_attr(not(feature = "sdl"), allow(dead_code))]
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Virtual time between battery drain steps.
pub const DRAIN_INTERVAL_MS: u64 = 60_000;

/// Compositor passes per event. A paint may move an element, which dirties it
/// again; the second pass draws it at its new frame.
pub const MAX_COMPOSITE_PASSES: usize = 3;
