//! In-memory 1bpp framebuffer for the 144x168 display.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use watchface_common::colors::FOREGROUND;
use watchface_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const WIDTH: usize = SCREEN_WIDTH as usize;
pub const HEIGHT: usize = SCREEN_HEIGHT as usize;
pub const LINE_BYTES: usize = WIDTH / 8;
pub const BUFFER_SIZE: usize = LINE_BYTES * HEIGHT;

const _: () = assert!(WIDTH % 8 == 0);

/// 1bpp framebuffer. A set bit is `BinaryColor::On`.
///
/// Bit mapping within one line byte: bit 7 is the first pixel in that byte.
#[derive(Clone)]
pub struct Framebuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Creates a framebuffer with every pixel off.
    pub const fn new() -> Self {
        Self { bytes: [0u8; BUFFER_SIZE] }
    }

    /// Sets a pixel state. Returns `false` when out of bounds.
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        on: bool,
    ) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));

        if on {
            self.bytes[byte_index] |= bit_mask;
        } else {
            self.bytes[byte_index] &= !bit_mask;
        }

        true
    }

    /// Reads a pixel state.
    pub fn pixel(
        &self,
        x: usize,
        y: usize,
    ) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));
        Some((self.bytes[byte_index] & bit_mask) != 0)
    }

    /// Number of pixels drawn in the foreground color.
    pub fn ink_count(&self) -> usize {
        let on: usize = self.bytes.iter().map(|b| b.count_ones() as usize).sum();
        if FOREGROUND == BinaryColor::On { on } else { WIDTH * HEIGHT - on }
    }

    /// Every pixel, row by row.
    #[cfg_attr(not(feature = "sdl"), allow(dead_code))]
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        (0..HEIGHT).flat_map(move |y| {
            (0..WIDTH).map(move |x| {
                let on = self.pixel(x, y).unwrap_or(false);
                Pixel(Point::new(x as i32, y as i32), BinaryColor::from(on))
            })
        })
    }

    /// Text rendering with half-block characters, two pixel rows per line.
    /// Foreground pixels are ink.
    pub fn to_ascii(&self) -> String {
        let ink = |x, y| self.pixel(x, y).is_some_and(|on| BinaryColor::from(on) == FOREGROUND);
        let mut out = String::with_capacity((WIDTH * 3 + 1) * HEIGHT / 2);
        for y in (0..HEIGHT).step_by(2) {
            for x in 0..WIDTH {
                out.push(match (ink(x, y), ink(x, y + 1)) {
                    (false, false) => ' ',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (true, true) => '█',
                });
            }
            out.push('\n');
        }
        out
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as usize, point.y as usize, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.bytes.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}
