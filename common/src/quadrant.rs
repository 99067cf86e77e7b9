//! The four fixed screen quadrants available to the date label and status cluster.
//!
//! Quadrants are numbered clockwise starting at the top right, matching the arc each
//! hand sweeps through: the hour hand spends hours 0-2 over quadrant 0, the minute
//! hand spends minutes 0-14 there, and so on around the dial.
//!
//! ```text
//!        ┌──────────┬──────────┐
//!        │    3     │    0     │
//!        │ top-left │top-right │
//!        ├──────────┼──────────┤  (centre 72,84)
//!        │    2     │    1     │
//!        │ bot-left │ bot-right│
//!        └──────────┴──────────┘
//! ```

use core::fmt;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::config::{QUADRANT_HEIGHT, QUADRANT_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, X_MARGIN, Y_MARGIN};

/// One of the four screen quadrants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    TopRight = 0,
    BottomRight = 1,
    BottomLeft = 2,
    TopLeft = 3,
}

/// Bounding boxes, indexed by quadrant number.
const QUADRANT_RECTS: [Rectangle; 4] = [
    quadrant_rect((SCREEN_WIDTH / 2) as i32, Y_MARGIN as i32),
    quadrant_rect((SCREEN_WIDTH / 2) as i32, (SCREEN_HEIGHT / 2) as i32),
    quadrant_rect(X_MARGIN as i32, (SCREEN_HEIGHT / 2) as i32),
    quadrant_rect(X_MARGIN as i32, Y_MARGIN as i32),
];

const fn quadrant_rect(x: i32, y: i32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(QUADRANT_WIDTH, QUADRANT_HEIGHT))
}

impl Quadrant {
    /// All quadrants in index order.
    pub const ALL: [Self; 4] = [Self::TopRight, Self::BottomRight, Self::BottomLeft, Self::TopLeft];

    /// Quadrant the hour hand points into. Each quadrant covers a three hour arc.
    #[inline]
    pub const fn from_hour(hour: u32) -> Self {
        Self::from_index((hour % 12) / 3)
    }

    /// Quadrant the minute hand points into. Each quadrant covers fifteen minutes.
    #[inline]
    pub const fn from_minute(minute: u32) -> Self {
        Self::from_index((minute % 60) / 15)
    }

    /// Map a value already reduced to 0..4.
    const fn from_index(index: u32) -> Self {
        match index {
            0 => Self::TopRight,
            1 => Self::BottomRight,
            2 => Self::BottomLeft,
            _ => Self::TopLeft,
        }
    }

    /// Quadrant number (0-3).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Single occupancy bit for this quadrant.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Fixed bounding rectangle of this quadrant.
    #[inline]
    pub const fn rect(self) -> Rectangle {
        QUADRANT_RECTS[self as usize]
    }

    /// Center a `size` box inside this quadrant.
    ///
    /// Origin is `(x + (qw - w) / 2, y + (qh - h) / 2)` in signed arithmetic, so an
    /// oversized box is still centered (it overhangs evenly).
    pub const fn fit(self, size: Size) -> Rectangle {
        let q = self.rect();
        let x = q.top_left.x + (q.size.width as i32 - size.width as i32) / 2;
        let y = q.top_left.y + (q.size.height as i32 - size.height as i32) / 2;
        Rectangle::new(Point::new(x, y), size)
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = InvalidQuadrant;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=3 => Ok(Self::from_index(u32::from(value))),
            _ => Err(InvalidQuadrant(value)),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.index())
    }
}

/// A quadrant number outside 0..4.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidQuadrant(pub u8);

impl fmt::Display for InvalidQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quadrant {} out of range 0..4", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::ContainsPoint;

    use super::*;
    use crate::config::{DATE_HEIGHT, DATE_WIDTH, STATUS_HEIGHT, STATUS_WIDTH};

    // -------------------------------------------------------------------------
    // Hand Position Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_hand_quadrants_in_range() {
        for hour in 0..24 {
            let q = Quadrant::from_hour(hour).index();
            assert!(q < 4, "hour {hour} mapped to quadrant {q}");
        }
        for minute in 0..60 {
            let q = Quadrant::from_minute(minute).index();
            assert!(q < 4, "minute {minute} mapped to quadrant {q}");
        }
    }

    #[test]
    fn test_from_hour_matches_formula() {
        for hour in 0..24 {
            assert_eq!(
                u32::from(Quadrant::from_hour(hour).index()),
                (hour % 12) / 3,
                "hour {hour}"
            );
        }
    }

    #[test]
    fn test_from_minute_matches_formula() {
        for minute in 0..60 {
            assert_eq!(u32::from(Quadrant::from_minute(minute).index()), minute / 15, "minute {minute}");
        }
    }

    #[test]
    fn test_from_hour_boundaries() {
        assert_eq!(Quadrant::from_hour(2), Quadrant::TopRight);
        assert_eq!(Quadrant::from_hour(3), Quadrant::BottomRight);
        assert_eq!(Quadrant::from_hour(6), Quadrant::BottomLeft);
        assert_eq!(Quadrant::from_hour(11), Quadrant::TopLeft);
        assert_eq!(Quadrant::from_hour(12), Quadrant::TopRight);
        assert_eq!(Quadrant::from_hour(23), Quadrant::TopLeft);
    }

    // -------------------------------------------------------------------------
    // Geometry Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_quadrant_rects() {
        assert_eq!(Quadrant::TopRight.rect(), Rectangle::new(Point::new(72, 26), Size::new(37, 58)));
        assert_eq!(Quadrant::BottomRight.rect(), Rectangle::new(Point::new(72, 84), Size::new(37, 58)));
        assert_eq!(Quadrant::BottomLeft.rect(), Rectangle::new(Point::new(35, 84), Size::new(37, 58)));
        assert_eq!(Quadrant::TopLeft.rect(), Rectangle::new(Point::new(35, 26), Size::new(37, 58)));
    }

    #[test]
    fn test_fit_centers_date_box() {
        let frame = Quadrant::TopRight.fit(Size::new(DATE_WIDTH, DATE_HEIGHT));
        // (37 - 32) / 2 = 2, (58 - 48) / 2 = 5
        assert_eq!(frame, Rectangle::new(Point::new(74, 31), Size::new(32, 48)));
    }

    #[test]
    fn test_fit_centers_status_box() {
        let frame = Quadrant::BottomLeft.fit(Size::new(STATUS_WIDTH, STATUS_HEIGHT));
        // (37 - 24) / 2 = 6, (58 - 28) / 2 = 15
        assert_eq!(frame, Rectangle::new(Point::new(41, 99), Size::new(24, 28)));
    }

    #[test]
    fn test_fit_stays_inside_quadrant() {
        for q in Quadrant::ALL {
            let frame = q.fit(Size::new(DATE_WIDTH, DATE_HEIGHT));
            let rect = q.rect();
            assert!(rect.contains(frame.top_left), "{q} frame origin outside quadrant");
            assert!(
                frame.bottom_right().is_some_and(|p| rect.contains(p)),
                "{q} frame corner outside quadrant"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Conversion Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_try_from_round_trip() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::try_from(q.index()), Ok(q));
        }
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Quadrant::try_from(4), Err(InvalidQuadrant(4)));
        assert_eq!(Quadrant::try_from(255), Err(InvalidQuadrant(255)));
    }

    #[test]
    fn test_bits_are_distinct() {
        let all = Quadrant::ALL.iter().fold(0u8, |acc, q| acc | q.bit());
        assert_eq!(all, 0b1111);
    }
}
