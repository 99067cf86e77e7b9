//! Date label: abbreviated weekday over the day of the month.

use chrono::{Datelike, Weekday};
use core::fmt::Write;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;

use crate::styles::{CENTERED_TOP, DATE_STYLE};

/// Capacity of a formatted label ("Wed\n13").
pub const DATE_LABEL_LEN: usize = 8;

/// Top padding of the first line inside the date box.
const FIRST_LINE_Y: i32 = 6;

/// Distance between line tops.
const LINE_PITCH: i32 = 18;

/// Formatted two-line date label.
pub type DateLabel = String<DATE_LABEL_LEN>;

const fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Format `date` as `"%a\n%d"`.
pub fn format_date<T: Datelike>(date: &T) -> DateLabel {
    let mut label = DateLabel::new();
    // 3 + 1 + 2 characters always fit
    write!(label, "{}\n{:02}", weekday_abbrev(date.weekday()), date.day()).ok();
    label
}

/// Draw the label centered in the date box, one text line per label line.
pub fn draw_date<D>(
    display: &mut D,
    frame: Rectangle,
    label: &str,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let x = frame.top_left.x + frame.size.width as i32 / 2;
    for (row, line) in label.split('\n').enumerate() {
        let y = frame.top_left.y + FIRST_LINE_Y + row as i32 * LINE_PITCH;
        Text::with_text_style(line, Point::new(x, y), DATE_STYLE, CENTERED_TOP)
            .draw(display)
            .ok();
    }
}
