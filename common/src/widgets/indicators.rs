//! Battery and bluetooth icons of the status cluster.
//!
//! Both icons are drawn relative to the cluster frame chosen by the placement
//! engine, so they move together when the hands push the cluster to another
//! quadrant.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::config::{BATTERY_ICON, BLUETOOTH_ICON};
use crate::power::BatteryState;
use crate::styles::{ERASE_STROKE, ICON_FILL, ICON_STROKE};

/// Widest level bar, at 100%.
const LEVEL_BAR_MAX: u32 = 11;

/// Battery icon frame inside a cluster frame.
pub fn battery_icon_frame(cluster: Rectangle) -> Rectangle {
    let (x, y, w, h) = BATTERY_ICON;
    Rectangle::new(cluster.top_left + Point::new(x, y), Size::new(w, h))
}

/// Bluetooth icon frame inside a cluster frame.
pub fn bluetooth_icon_frame(cluster: Rectangle) -> Rectangle {
    let (x, y, w, h) = BLUETOOTH_ICON;
    Rectangle::new(cluster.top_left + Point::new(x, y), Size::new(w, h))
}

/// Level bar width for a charge percentage.
#[inline]
pub const fn level_bar_width(percent: u8) -> u32 {
    let pct = if percent > 100 { 100 } else { percent as u32 };
    pct * LEVEL_BAR_MAX / 100
}

/// Draw the battery icon into its 24x12 frame.
///
/// Unplugged shows the charge level bar; plugged shows a charge bolt instead.
pub fn draw_battery<D>(
    display: &mut D,
    frame: Rectangle,
    battery: BatteryState,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let origin = frame.top_left;

    // Body and terminal
    Rectangle::new(origin + Point::new(5, 2), Size::new(16, 8))
        .into_styled(ICON_STROKE)
        .draw(display)
        .ok();
    Rectangle::new(origin + Point::new(21, 4), Size::new(2, 4))
        .into_styled(ICON_FILL)
        .draw(display)
        .ok();

    if battery.plugged {
        let bolt = [Point::new(14, 3), Point::new(11, 6), Point::new(14, 6), Point::new(11, 8)];
        for pair in bolt.windows(2) {
            Line::new(origin + pair[0], origin + pair[1])
                .into_styled(ICON_STROKE)
                .draw(display)
                .ok();
        }
    } else {
        let width = level_bar_width(battery.percent);
        if width > 0 {
            Rectangle::new(origin + Point::new(7, 4), Size::new(width, 4))
                .into_styled(ICON_FILL)
                .draw(display)
                .ok();
        }
    }
}

/// Draw the bluetooth rune into its 9x12 frame.
///
/// Disconnected draws the same strokes in the background color, clearing the rune.
pub fn draw_bluetooth<D>(
    display: &mut D,
    frame: Rectangle,
    connected: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let style: PrimitiveStyle<BinaryColor> = if connected { ICON_STROKE } else { ERASE_STROKE };
    let origin = frame.top_left;
    let strokes = [
        (Point::new(4, 0), Point::new(4, 11)),
        (Point::new(4, 0), Point::new(7, 3)),
        (Point::new(7, 3), Point::new(1, 9)),
        (Point::new(4, 11), Point::new(7, 8)),
        (Point::new(7, 8), Point::new(1, 2)),
    ];
    for (from, to) in strokes {
        Line::new(origin + from, origin + to)
            .into_styled(style)
            .draw(display)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bar_width() {
        assert_eq!(level_bar_width(0), 0);
        assert_eq!(level_bar_width(50), 5);
        assert_eq!(level_bar_width(100), LEVEL_BAR_MAX);
        assert_eq!(level_bar_width(255), LEVEL_BAR_MAX, "over-range clamps to full");
    }

    #[test]
    fn test_icon_frames_follow_cluster() {
        let cluster = Rectangle::new(Point::new(41, 99), Size::new(24, 28));
        assert_eq!(battery_icon_frame(cluster), Rectangle::new(Point::new(41, 99), Size::new(24, 12)));
        assert_eq!(bluetooth_icon_frame(cluster), Rectangle::new(Point::new(49, 115), Size::new(9, 12)));
    }
}
