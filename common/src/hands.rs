//! Hand angles and hand outlines.
//!
//! Angles are whole degrees, clockwise from twelve o'clock. Outlines are defined
//! pointing straight up around the origin and rotated into place about the screen
//! center before drawing.

use chrono::Timelike;
use embedded_graphics::prelude::Point;

use crate::config::{CENTER_X, CENTER_Y};

/// Screen center, the pivot of every hand.
pub const CENTER: Point = Point::new(CENTER_X, CENTER_Y);

/// Hour hand outline, pointing at twelve.
pub const HOUR_HAND_POINTS: [Point; 4] = [
    Point::new(-4, 15),
    Point::new(4, 15),
    Point::new(4, -50),
    Point::new(-4, -50),
];

/// Minute hand outline, pointing at twelve.
pub const MINUTE_HAND_POINTS: [Point; 4] = [
    Point::new(-4, 15),
    Point::new(4, 15),
    Point::new(4, -70),
    Point::new(-4, -70),
];

/// Second hand: a line from behind the pivot to near the dial edge.
pub const SECOND_HAND_TAIL: Point = Point::new(0, 20);
pub const SECOND_HAND_TIP: Point = Point::new(0, -70);

/// One of the three clock hands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    /// True angle of this hand for a wall-clock time.
    ///
    /// - hour: `(hour % 12) * 30 + minute / 2`
    /// - minute: `minute * 6 + second / 10`
    /// - second: `second * 6`
    pub fn angle<T: Timelike>(
        self,
        time: &T,
    ) -> u16 {
        let angle = match self {
            Self::Hour => (time.hour() % 12) * 30 + time.minute() / 2,
            Self::Minute => time.minute() * 6 + time.second() / 10,
            // Leap seconds report 60; pin them to the top of the dial
            Self::Second => (time.second() % 60) * 6,
        };
        angle as u16
    }
}

/// True angles of all three hands at one instant.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HandAngles {
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl HandAngles {
    pub fn at<T: Timelike>(time: &T) -> Self {
        Self {
            hour: Hand::Hour.angle(time),
            minute: Hand::Minute.angle(time),
            second: Hand::Second.angle(time),
        }
    }

    /// Angle of one hand.
    #[inline]
    pub const fn get(
        &self,
        hand: Hand,
    ) -> u16 {
        match hand {
            Hand::Hour => self.hour,
            Hand::Minute => self.minute,
            Hand::Second => self.second,
        }
    }
}

/// Rotate a point clockwise about the origin by `angle_deg` (screen coordinates, y down).
pub fn rotate(
    point: Point,
    angle_deg: u16,
) -> Point {
    let rad = f32::from(angle_deg % 360) * core::f32::consts::PI / 180.0;
    let sin = micromath::F32(rad).sin().0;
    let cos = micromath::F32(rad).cos().0;
    let x = point.x as f32;
    let y = point.y as f32;
    Point::new(
        micromath::F32(x * cos - y * sin).round().0 as i32,
        micromath::F32(x * sin + y * cos).round().0 as i32,
    )
}

/// Rotate a hand outline and move it onto the pivot.
pub fn place_outline<const N: usize>(
    points: &[Point; N],
    angle_deg: u16,
    pivot: Point,
) -> [Point; N] {
    points.map(|p| rotate(p, angle_deg) + pivot)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn assert_near(
        actual: Point,
        expected: Point,
    ) {
        let dx = (actual.x - expected.x).abs();
        let dy = (actual.y - expected.y).abs();
        assert!(dx <= 1 && dy <= 1, "expected ~{expected:?}, got {actual:?}");
    }

    // -------------------------------------------------------------------------
    // Angle Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_hour_angle() {
        assert_eq!(Hand::Hour.angle(&at(0, 0, 0)), 0);
        assert_eq!(Hand::Hour.angle(&at(3, 0, 0)), 90);
        assert_eq!(Hand::Hour.angle(&at(15, 30, 0)), 105);
        assert_eq!(Hand::Hour.angle(&at(23, 59, 59)), 359);
    }

    #[test]
    fn test_minute_angle() {
        assert_eq!(Hand::Minute.angle(&at(0, 0, 0)), 0);
        assert_eq!(Hand::Minute.angle(&at(0, 15, 0)), 90);
        assert_eq!(Hand::Minute.angle(&at(0, 59, 59)), 359);
    }

    #[test]
    fn test_second_angle() {
        assert_eq!(Hand::Second.angle(&at(0, 0, 30)), 180);
        assert_eq!(Hand::Second.angle(&at(0, 0, 59)), 354);
    }

    #[test]
    fn test_angles_below_full_turn() {
        for h in 0..24 {
            for m in 0..60 {
                let t = at(h, m, 59);
                for hand in [Hand::Hour, Hand::Minute, Hand::Second] {
                    assert!(hand.angle(&t) < 360, "{hand:?} at {t} out of range");
                }
            }
        }
    }

    #[test]
    fn test_hand_angles_at() {
        let angles = HandAngles::at(&at(2, 40, 30));
        assert_eq!(angles, HandAngles { hour: 80, minute: 243, second: 180 });
        assert_eq!(angles.get(Hand::Minute), 243, "get must index the minute field");
    }

    // -------------------------------------------------------------------------
    // Rotation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_rotate_quarter_turns() {
        let tip = Point::new(0, -70);
        assert_near(rotate(tip, 0), Point::new(0, -70));
        assert_near(rotate(tip, 90), Point::new(70, 0));
        assert_near(rotate(tip, 180), Point::new(0, 70));
        assert_near(rotate(tip, 270), Point::new(-70, 0));
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let p = Point::new(4, -50);
        assert_near(rotate(p, 360), p);
    }

    #[test]
    fn test_place_outline_moves_to_pivot() {
        let placed = place_outline(&HOUR_HAND_POINTS, 0, CENTER);
        assert_near(placed[2], Point::new(CENTER_X + 4, CENTER_Y - 50));
        assert_near(placed[0], Point::new(CENTER_X - 4, CENTER_Y + 15));
    }
}
