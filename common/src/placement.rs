//! Quadrant placement for the date label and the battery/bluetooth cluster.
//!
//! The hour and minute hands each sweep one quadrant. The two occupied quadrants are
//! folded into a 4-bit [`OccupancyMask`], and the mask selects a hand-curated
//! [`Placement`] from [`PREFERRED_PLACEMENTS`] that keeps both indicators clear of
//! the hands.
//!
//! # Chasing
//!
//! [`IndicatorPlacement::chase`] runs on every indicator redraw. It looks up the
//! preference for the current time and moves only the elements whose preferred
//! quadrant differs from the one applied. A second call with the same time moves
//! nothing, so chasing is self-correcting without tracking hand movement.

use core::fmt;

use embedded_graphics::prelude::Size;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::config::{DATE_HEIGHT, DATE_WIDTH, STATUS_HEIGHT, STATUS_WIDTH};
use crate::quadrant::Quadrant;
use crate::quadrant::Quadrant::{BottomLeft as BL, BottomRight as BR, TopLeft as TL, TopRight as TR};

/// Size of the date label box.
pub const DATE_SIZE: Size = Size::new(DATE_WIDTH, DATE_HEIGHT);

/// Size of the battery + bluetooth cluster.
pub const STATUS_SIZE: Size = Size::new(STATUS_WIDTH, STATUS_HEIGHT);

// =============================================================================
// Occupancy Mask
// =============================================================================

/// Set of quadrants currently swept by the hour and minute hands.
///
/// Only masks with one or two bits set are reachable (both hands in one quadrant, or
/// in two different ones).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OccupancyMask(u8);

impl OccupancyMask {
    /// Mask for the given wall-clock hour (0-23) and minute (0-59).
    pub const fn from_time(hour: u32, minute: u32) -> Self {
        Self::from_hands(Quadrant::from_hour(hour), Quadrant::from_minute(minute))
    }

    /// Mask with the hour hand quadrant bit and the minute hand quadrant bit set.
    pub const fn from_hands(hour: Quadrant, minute: Quadrant) -> Self {
        Self(hour.bit() | minute.bit())
    }

    /// Raw 4-bit value (0-15).
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether a quadrant is swept by a hand.
    #[inline]
    pub const fn is_occupied(self, quadrant: Quadrant) -> bool {
        self.0 & quadrant.bit() != 0
    }
}

// =============================================================================
// Placement Preference Table
// =============================================================================

/// Preferred quadrants for the status cluster and the date label.
///
/// `None` is the "no preference" sentinel: the element keeps whatever quadrant it
/// already occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Placement {
    pub battery: Option<Quadrant>,
    pub date: Option<Quadrant>,
}

impl Placement {
    /// Entry for masks that are unreachable or have no sensible layout.
    pub const NONE: Self = Self { battery: None, date: None };

    const fn pick(battery: Quadrant, date: Quadrant) -> Self {
        Self { battery: Some(battery), date: Some(date) }
    }

    /// Battery preference as a signed index, `-1` for no preference.
    pub const fn battery_index(self) -> i8 {
        sentinel_index(self.battery)
    }

    /// Date preference as a signed index, `-1` for no preference.
    pub const fn date_index(self) -> i8 {
        sentinel_index(self.date)
    }
}

const fn sentinel_index(q: Option<Quadrant>) -> i8 {
    match q {
        Some(q) => q.index() as i8,
        None => -1,
    }
}

/// Layout preferences indexed by occupancy mask.
///
/// Derivation rule: both indicators land in quadrants neither hand occupies, in two
/// different quadrants; among the free ones the pick is aesthetic (the status cluster
/// mostly rides the top edge). The choices are kept as data and are not recomputed.
/// Masks 0, 7, 11, 13, 14 and 15 cannot occur with two hands and carry the sentinel.
pub const PREFERRED_PLACEMENTS: [Placement; 16] = [
    Placement::NONE,         // 0b0000: unreachable
    Placement::pick(TL, BL), // 0b0001: TR
    Placement::pick(TL, BL), // 0b0010: BR
    Placement::pick(TL, BL), // 0b0011: TR + BR
    Placement::pick(TR, BR), // 0b0100: BL
    Placement::pick(TL, BR), // 0b0101: TR + BL
    Placement::pick(TL, TR), // 0b0110: BR + BL
    Placement::NONE,         // 0b0111: unreachable
    Placement::pick(TR, BR), // 0b1000: TL
    Placement::pick(BL, BR), // 0b1001: TR + TL
    Placement::pick(TR, BL), // 0b1010: BR + TL
    Placement::NONE,         // 0b1011: unreachable
    Placement::pick(TR, BR), // 0b1100: BL + TL
    Placement::NONE,         // 0b1101: unreachable
    Placement::NONE,         // 0b1110: unreachable
    Placement::NONE,         // 0b1111: unreachable
];

/// Look up the preferred placement for an occupancy mask.
#[inline]
pub const fn preferred_placement(mask: OccupancyMask) -> Placement {
    PREFERRED_PLACEMENTS[(mask.bits() & 0x0F) as usize]
}

// =============================================================================
// Applied Placement State
// =============================================================================

/// Quadrants the indicators currently occupy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppliedPlacement {
    pub battery: Quadrant,
    pub date: Quadrant,
}

impl AppliedPlacement {
    /// Used when the very first computation yields a sentinel. The two elements
    /// take different quadrants on the left edge.
    pub const FALLBACK: Self = Self {
        battery: Quadrant::TopLeft,
        date: Quadrant::BottomLeft,
    };
}

impl fmt::Display for AppliedPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bat={} date={}", self.battery, self.date)
    }
}

/// Frames that moved during one chase. `None` means the element stays put.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlacementUpdate {
    pub battery: Option<Rectangle>,
    pub date: Option<Rectangle>,
}

impl PlacementUpdate {
    /// True when neither element moved.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.battery.is_none() && self.date.is_none()
    }
}

/// Applied indicator placement, chasing the free quadrants as the hands move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndicatorPlacement {
    applied: AppliedPlacement,
}

impl IndicatorPlacement {
    /// Seed the placement with one unconditional computation.
    ///
    /// A sentinel field resolves to [`AppliedPlacement::FALLBACK`], so the applied state is
    /// always concrete from the first frame on.
    pub fn seed(hour: u32, minute: u32) -> Self {
        let preferred = preferred_placement(OccupancyMask::from_time(hour, minute));
        let applied = AppliedPlacement {
            battery: preferred.battery.unwrap_or(AppliedPlacement::FALLBACK.battery),
            date: preferred.date.unwrap_or(AppliedPlacement::FALLBACK.date),
        };
        debug!("placement seeded at {hour:02}:{minute:02}: {applied}");
        Self { applied }
    }

    /// Recompute the preference for the current time and move what differs.
    pub fn chase(
        &mut self,
        hour: u32,
        minute: u32,
    ) -> PlacementUpdate {
        self.apply(preferred_placement(OccupancyMask::from_time(hour, minute)))
    }

    /// Apply a preference, field by field. Sentinel fields are a no-op.
    pub fn apply(
        &mut self,
        preferred: Placement,
    ) -> PlacementUpdate {
        let mut update = PlacementUpdate::default();

        if let Some(battery) = preferred.battery
            && battery != self.applied.battery
        {
            debug!("chase: moving battery from {} to {}", self.applied.battery, battery);
            self.applied.battery = battery;
            update.battery = Some(self.battery_frame());
        }

        if let Some(date) = preferred.date
            && date != self.applied.date
        {
            debug!("chase: moving date from {} to {}", self.applied.date, date);
            self.applied.date = date;
            update.date = Some(self.date_frame());
        }

        update
    }

    /// Currently applied quadrants.
    #[inline]
    pub const fn applied(&self) -> AppliedPlacement {
        self.applied
    }

    /// Status cluster frame, centered in its quadrant.
    #[inline]
    pub const fn battery_frame(&self) -> Rectangle {
        self.applied.battery.fit(STATUS_SIZE)
    }

    /// Date label frame, centered in its quadrant.
    #[inline]
    pub const fn date_frame(&self) -> Rectangle {
        self.applied.date.fit(DATE_SIZE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Occupancy Mask Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_mask_example_two_forty() {
        // 02:40 -> hour quadrant 0, minute quadrant 2
        let mask = OccupancyMask::from_time(2, 40);
        assert_eq!(mask.bits(), 0b0101);
    }

    #[test]
    fn test_mask_example_six_fifty() {
        // 06:50 -> hour quadrant 2, minute quadrant 3
        let mask = OccupancyMask::from_time(6, 50);
        assert_eq!(mask.bits(), 0b1100);
    }

    #[test]
    fn test_reachable_masks() {
        let mut seen = [false; 16];
        for hour in 0..24 {
            for minute in 0..60 {
                let mask = OccupancyMask::from_time(hour, minute);
                let ones = mask.bits().count_ones();
                assert!(ones == 1 || ones == 2, "{hour:02}:{minute:02} gave mask {:#06b}", mask.bits());
                seen[mask.bits() as usize] = true;
            }
        }
        let reachable: [usize; 10] = [1, 2, 3, 4, 5, 6, 8, 9, 10, 12];
        for (bits, was_seen) in seen.iter().enumerate() {
            assert_eq!(*was_seen, reachable.contains(&bits), "mask {bits} reachability");
        }
    }

    #[test]
    fn test_mask_is_occupied() {
        let mask = OccupancyMask::from_hands(Quadrant::TopRight, Quadrant::BottomLeft);
        assert!(mask.is_occupied(Quadrant::TopRight));
        assert!(mask.is_occupied(Quadrant::BottomLeft));
        assert!(!mask.is_occupied(Quadrant::BottomRight));
        assert!(!mask.is_occupied(Quadrant::TopLeft));
    }

    // -------------------------------------------------------------------------
    // Preference Table Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_table_values_in_range() {
        for (bits, entry) in PREFERRED_PLACEMENTS.iter().enumerate() {
            assert!((-1..=3).contains(&entry.battery_index()), "mask {bits} battery");
            assert!((-1..=3).contains(&entry.date_index()), "mask {bits} date");
        }
    }

    #[test]
    fn test_table_example_entries() {
        let two_forty = preferred_placement(OccupancyMask::from_time(2, 40));
        assert_eq!((two_forty.battery_index(), two_forty.date_index()), (3, 1));

        let six_fifty = preferred_placement(OccupancyMask::from_time(6, 50));
        assert_eq!((six_fifty.battery_index(), six_fifty.date_index()), (0, 1));
    }

    #[test]
    fn test_reachable_entries_avoid_hands() {
        for hour in 0..24 {
            for minute in 0..60 {
                let mask = OccupancyMask::from_time(hour, minute);
                let entry = preferred_placement(mask);
                let (Some(battery), Some(date)) = (entry.battery, entry.date) else {
                    panic!("reachable mask {} has a sentinel", mask.bits());
                };
                assert!(!mask.is_occupied(battery), "{hour:02}:{minute:02} battery under a hand");
                assert!(!mask.is_occupied(date), "{hour:02}:{minute:02} date under a hand");
                assert_ne!(battery, date, "{hour:02}:{minute:02} indicators share a quadrant");
            }
        }
    }

    #[test]
    fn test_unreachable_entries_are_sentinels() {
        for bits in [0usize, 7, 11, 13, 14, 15] {
            assert_eq!(PREFERRED_PLACEMENTS[bits], Placement::NONE, "mask {bits}");
        }
    }

    // -------------------------------------------------------------------------
    // Chase Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_seed_applies_preference() {
        let placement = IndicatorPlacement::seed(6, 50);
        assert_eq!(placement.applied().battery, Quadrant::TopRight);
        assert_eq!(placement.applied().date, Quadrant::BottomRight);
    }

    #[test]
    fn test_chase_is_idempotent() {
        let mut placement = IndicatorPlacement::seed(2, 10);
        let first = placement.chase(2, 40);
        assert!(!first.is_empty(), "Moving minute hand should move something");
        let second = placement.chase(2, 40);
        assert!(second.is_empty(), "Second chase at the same time must not move anything");
    }

    #[test]
    fn test_chase_moves_only_changed_element() {
        // 02:10 -> mask 0b0001 -> (TL, BL); 02:40 -> mask 0b0101 -> (TL, BR)
        let mut placement = IndicatorPlacement::seed(2, 10);
        let update = placement.chase(2, 40);
        assert_eq!(update.battery, None, "Battery stays in TL");
        assert_eq!(update.date, Some(Quadrant::BottomRight.fit(DATE_SIZE)));
        assert_eq!(placement.applied().date, Quadrant::BottomRight);
    }

    #[test]
    fn test_chase_frames_match_applied() {
        let mut placement = IndicatorPlacement::seed(0, 0);
        let update = placement.chase(6, 50);
        assert_eq!(update.battery, Some(placement.battery_frame()));
        assert_eq!(update.date, Some(placement.date_frame()));
    }

    #[test]
    fn test_sentinel_keeps_applied_state() {
        let mut placement = IndicatorPlacement::seed(6, 50);
        let before = placement.applied();

        let update = placement.apply(PREFERRED_PLACEMENTS[0b0111]);

        assert!(update.is_empty(), "Sentinel entry must not move anything");
        assert_eq!(placement.applied(), before, "Sentinel entry must keep the applied state");
    }

    #[test]
    fn test_fallback_keeps_elements_apart() {
        let fallback = AppliedPlacement::FALLBACK;
        assert_ne!(fallback.battery, fallback.date, "fallback must not stack both elements");
        assert_eq!(fallback.to_string(), "bat=q3 date=q2");
    }

    #[test]
    fn test_sentinel_is_not_quadrant_zero() {
        let mut placement = IndicatorPlacement::seed(2, 40); // (TL, BR)
        let update = placement.apply(Placement { battery: None, date: Some(Quadrant::BottomLeft) });

        assert_eq!(update.battery, None, "Sentinel battery must stay put");
        assert_eq!(placement.applied().battery, Quadrant::TopLeft, "Sentinel is not TopRight");
        assert_eq!(placement.applied().date, Quadrant::BottomLeft);
    }
}
