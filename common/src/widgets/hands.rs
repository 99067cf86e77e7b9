//! Clock hand rendering.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, Triangle};

use crate::hands::{CENTER, SECOND_HAND_TAIL, SECOND_HAND_TIP, place_outline, rotate};
use crate::styles::{HAND_FILL, HAND_OUTLINE, SECOND_HAND_STROKE};

/// Draw a four-point hand outline at `angle` degrees.
///
/// The quad is filled as two triangles, then traced in the background color so
/// the hand stays readable where it crosses ticks or the other hand.
pub fn draw_hand<D>(
    display: &mut D,
    outline: &[Point; 4],
    angle: u16,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let [a, b, c, d] = place_outline(outline, angle, CENTER);

    Triangle::new(a, b, c)
        .into_styled(HAND_FILL)
        .draw(display)
        .ok();
    Triangle::new(a, c, d)
        .into_styled(HAND_FILL)
        .draw(display)
        .ok();

    for (from, to) in [(a, b), (b, c), (c, d), (d, a)] {
        Line::new(from, to)
            .into_styled(HAND_OUTLINE)
            .draw(display)
            .ok();
    }
}

/// Draw the 1px second hand at `angle` degrees.
pub fn draw_second_hand<D>(
    display: &mut D,
    angle: u16,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(rotate(SECOND_HAND_TAIL, angle) + CENTER, rotate(SECOND_HAND_TIP, angle) + CENTER)
        .into_styled(SECOND_HAND_STROKE)
        .draw(display)
        .ok();
}
