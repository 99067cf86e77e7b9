//! Color constants for the 1-bit watch display.
//!
//! The panel is monochrome, so every widget draws with [`BinaryColor`]. The default
//! face is light hands on a dark dial; the `inverse` feature swaps the two.

use embedded_graphics::pixelcolor::BinaryColor;

/// Dial background.
#[cfg(not(feature = "inverse"))]
pub const BACKGROUND: BinaryColor = BinaryColor::Off;

/// Hands, icons and text.
#[cfg(not(feature = "inverse"))]
pub const FOREGROUND: BinaryColor = BinaryColor::On;

/// Dial background.
#[cfg(feature = "inverse")]
pub const BACKGROUND: BinaryColor = BinaryColor::On;

/// Hands, icons and text.
#[cfg(feature = "inverse")]
pub const FOREGROUND: BinaryColor = BinaryColor::Off;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_differ() {
        assert_ne!(FOREGROUND, BACKGROUND, "Foreground must contrast with background");
    }
}
