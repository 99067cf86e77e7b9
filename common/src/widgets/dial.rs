//! Dial background and centre cap.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, Rectangle};

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::hands::{CENTER, rotate};
use crate::styles::{ERASE_FILL, HAND_FILL, MAJOR_TICK_STROKE, TICK_STROKE};

/// Distance from the centre to the outer end of every tick.
const TICK_OUTER: i32 = 70;

/// Inner end of the hour ticks.
const TICK_INNER: i32 = 64;

/// Inner end of the 12/3/6/9 ticks.
const MAJOR_TICK_INNER: i32 = 58;

/// Centre cap: background ring (radius 4) under a foreground dot (radius 3).
const CAP_RING_DIAMETER: u32 = 9;
const CAP_DOT_DIAMETER: u32 = 7;

/// Clear the screen and draw the twelve hour ticks.
pub fn draw_dial<D>(display: &mut D)
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT))
        .into_styled(ERASE_FILL)
        .draw(display)
        .ok();

    for hour in 0..12u16 {
        let major = hour % 3 == 0;
        let (inner, style) = if major {
            (MAJOR_TICK_INNER, MAJOR_TICK_STROKE)
        } else {
            (TICK_INNER, TICK_STROKE)
        };
        let angle = hour * 30;
        Line::new(
            rotate(Point::new(0, -inner), angle) + CENTER,
            rotate(Point::new(0, -TICK_OUTER), angle) + CENTER,
        )
        .into_styled(style)
        .draw(display)
        .ok();
    }
}

/// Cap covering the hand pivots.
pub fn draw_center_cap<D>(display: &mut D)
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(CENTER, CAP_RING_DIAMETER)
        .into_styled(ERASE_FILL)
        .draw(display)
        .ok();
    Circle::with_center(CENTER, CAP_DOT_DIAMETER)
        .into_styled(HAND_FILL)
        .draw(display)
        .ok();
}
