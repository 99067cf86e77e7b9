//! Pre-computed static styles to avoid per-frame object construction.
//!
//! Every style is a `const`, stored in read-only data and referenced directly by
//! the widgets.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    primitives::PrimitiveStyle,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_12_POINT;

use crate::colors::{BACKGROUND, FOREGROUND};

/// Centered text hanging from its top edge. Used for both date label lines.
pub const CENTERED_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

/// Date label font (`ProFont` 12pt, 8x15 glyph cell).
pub const DATE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_12_POINT, FOREGROUND);

/// Solid hand body.
pub const HAND_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(FOREGROUND);

/// Hand outline, separating the hand from whatever it crosses.
pub const HAND_OUTLINE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BACKGROUND, 1);

/// Thin second hand.
pub const SECOND_HAND_STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(FOREGROUND, 1);

/// Dial tick marks.
pub const TICK_STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(FOREGROUND, 1);

/// Major dial tick marks at 12, 3, 6 and 9.
pub const MAJOR_TICK_STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(FOREGROUND, 3);

/// Icon outlines.
pub const ICON_STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(FOREGROUND, 1);

/// Icon fills (battery level, charge bolt).
pub const ICON_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(FOREGROUND);

/// Erase fill, used to clear a box back to the dial color.
pub const ERASE_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BACKGROUND);

/// Erase stroke, for icons drawn in "clear" mode.
pub const ERASE_STROKE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BACKGROUND, 1);
