//! Startup sweep: the hands spin into place, then the indicators and second hand
//! come alive.
//!
//! The sweep is driven by a fast one-shot timer that is re-armed after every firing
//! until the sequence reaches [`AnimationPhase::Done`]. Each arming issues a fresh
//! [`TimerToken`]; a firing whose token does not match the one pending is stale and
//! is dropped without touching any state.
//!
//! ```text
//! Idle ─tick─► Start ─► Hours ─► Minutes ─► Indicators ─► Seconds ─► Done
//!                 └────────── one step per timer firing ──────────┘
//! ```

use core::fmt;

use log::debug;

use crate::config::FaceConfig;
use crate::hands::{Hand, HandAngles};
use crate::render::{DirtyRegions, Region};

// =============================================================================
// Phase
// =============================================================================

/// Stage of the startup sequence. Only ever moves forward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AnimationPhase {
    Idle,
    Start,
    AnimatingHours,
    AnimatingMinutes,
    AnimatingIndicators,
    AnimatingSeconds,
    Done,
}

impl AnimationPhase {
    /// Following phase. `Done` is terminal.
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::Start,
            Self::Start => Self::AnimatingHours,
            Self::AnimatingHours => Self::AnimatingMinutes,
            Self::AnimatingMinutes => Self::AnimatingIndicators,
            Self::AnimatingIndicators => Self::AnimatingSeconds,
            Self::AnimatingSeconds | Self::Done => Self::Done,
        }
    }

    /// True while the fast timer owns the display.
    #[inline]
    pub const fn is_animating(self) -> bool {
        !matches!(self, Self::Idle | Self::Done)
    }

    /// Indicators hold still until the hands have swept in.
    #[inline]
    pub const fn indicators_frozen(self) -> bool {
        matches!(
            self,
            Self::Start | Self::AnimatingHours | Self::AnimatingMinutes | Self::AnimatingIndicators
        )
    }
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Start => "start",
            Self::AnimatingHours => "hours",
            Self::AnimatingMinutes => "minutes",
            Self::AnimatingIndicators => "indicators",
            Self::AnimatingSeconds => "seconds",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Hand Sweep
// =============================================================================

/// Angle accumulator for one hand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HandSweep {
    angle: u16,
    step: u16,
}

impl HandSweep {
    pub const fn new(step: u16) -> Self {
        Self { angle: 0, step }
    }

    /// Current accumulated angle.
    #[inline]
    pub const fn angle(&self) -> u16 {
        self.angle
    }

    /// Advance one step towards `target`. Returns true once the goal is reached.
    ///
    /// A target of 0 means the hand points at twelve, so the goal becomes a full
    /// turn instead of a sweep of zero length. The accumulator never overshoots the
    /// goal and never moves backwards.
    pub fn advance(
        &mut self,
        target: u16,
    ) -> bool {
        let goal = if target == 0 { 360 } else { target };
        let next = self.angle.saturating_add(self.step).min(goal);
        self.angle = self.angle.max(next);
        self.angle >= goal
    }
}

// =============================================================================
// Timer Tokens
// =============================================================================

/// Generation stamp carried by every animation timer firing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TimerToken(pub u32);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Startup Animation
// =============================================================================

/// Effect of one accepted timer firing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnimationStep {
    /// Regions to repaint.
    pub redraw: DirtyRegions,
    /// Token to arm the next firing with, `None` once the sequence is done.
    pub reschedule: Option<TimerToken>,
}

/// The startup sweep state machine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartupAnimation {
    phase: AnimationPhase,
    hour: HandSweep,
    minute: HandSweep,
    second: HandSweep,
    generation: u32,
    pending: Option<TimerToken>,
}

impl StartupAnimation {
    pub const fn new(config: &FaceConfig) -> Self {
        Self {
            phase: AnimationPhase::Idle,
            hour: HandSweep::new(config.hour_step_deg),
            minute: HandSweep::new(config.minute_step_deg),
            second: HandSweep::new(config.second_step_deg),
            generation: 0,
            pending: None,
        }
    }

    #[inline]
    pub const fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Token of the firing currently expected, if any.
    #[inline]
    pub const fn pending(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Whether a firing carrying `token` would be acted on.
    #[inline]
    pub fn accepts(
        &self,
        token: TimerToken,
    ) -> bool {
        self.pending == Some(token)
    }

    /// Leave `Idle` on the first tick. Returns the token to arm the fast timer with,
    /// or `None` if the sequence already started.
    pub fn start(&mut self) -> Option<TimerToken> {
        if self.phase != AnimationPhase::Idle {
            return None;
        }
        self.enter(AnimationPhase::Start);
        Some(self.arm())
    }

    /// Run one timer firing.
    ///
    /// `targets` are the live hand angles; `seconds_shown` is false when the second
    /// hand is hidden, in which case the seconds stage completes on its first firing.
    /// Returns `None` for a stale token.
    pub fn on_timer(
        &mut self,
        token: TimerToken,
        targets: HandAngles,
        seconds_shown: bool,
    ) -> Option<AnimationStep> {
        if !self.accepts(token) {
            debug!("animation: dropping stale timer {token} (pending {:?})", self.pending);
            return None;
        }
        self.pending = None;

        let mut redraw = DirtyRegions::EMPTY;
        let finished = match self.phase {
            AnimationPhase::Start => true,
            AnimationPhase::AnimatingHours => {
                redraw.insert(Region::HourHand);
                self.hour.advance(targets.hour)
            }
            AnimationPhase::AnimatingMinutes => {
                redraw.insert(Region::MinuteHand);
                self.minute.advance(targets.minute)
            }
            AnimationPhase::AnimatingIndicators => {
                redraw.insert(Region::Indicators);
                true
            }
            AnimationPhase::AnimatingSeconds => {
                if seconds_shown {
                    redraw.insert(Region::SecondHand);
                    self.second.advance(targets.second)
                } else {
                    true
                }
            }
            AnimationPhase::Idle | AnimationPhase::Done => return None,
        };

        if finished {
            self.enter(self.phase.next());
        }

        let reschedule = if self.phase == AnimationPhase::Done {
            // Snap the swept hands onto live time
            redraw.insert(Region::HourHand);
            redraw.insert(Region::MinuteHand);
            None
        } else {
            Some(self.arm())
        };

        Some(AnimationStep { redraw, reschedule })
    }

    /// Angle to draw `hand` at, given its live angle.
    ///
    /// Until the sequence is done each hand sits at its accumulator, which is 0
    /// (twelve o'clock) before its own stage begins.
    pub const fn hand_angle(
        &self,
        hand: Hand,
        live: u16,
    ) -> u16 {
        if matches!(self.phase, AnimationPhase::Done) {
            return live;
        }
        match hand {
            Hand::Hour => self.hour.angle(),
            Hand::Minute => self.minute.angle(),
            Hand::Second => self.second.angle(),
        }
    }

    fn enter(
        &mut self,
        phase: AnimationPhase,
    ) {
        debug!("animation: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn arm(&mut self) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken(self.generation);
        self.pending = Some(token);
        token
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
