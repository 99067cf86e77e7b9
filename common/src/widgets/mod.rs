//! Drawing routines for each face region.
//!
//! All widgets are generic over `DrawTarget<Color = BinaryColor>` for platform independence.

mod date;
mod dial;
mod hands;
mod indicators;

pub use date::{DATE_LABEL_LEN, DateLabel, draw_date, format_date};
pub use dial::{draw_center_cap, draw_dial};
pub use hands::{draw_hand, draw_second_hand};
pub use indicators::{battery_icon_frame, bluetooth_icon_frame, draw_battery, draw_bluetooth, level_bar_width};
