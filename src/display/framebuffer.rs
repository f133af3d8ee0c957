//! Monochrome frame buffer in SSD1306 page layout.
//!
//! Pixels are packed eight to a byte, one byte per column per 8-row page,
//! LSB at the top of the page. That is the byte order the controller expects
//! on a full-frame write, so flushing is a single copy.
//!
//! Drawing goes through `embedded-graphics`; the buffer is a
//! [`DrawTarget`] with [`BinaryColor`] pixels.

use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size};
use std::fmt::Write as _;

/// Visible width in pixels.
pub const WIDTH: usize = 128;
/// Visible height in pixels.
pub const HEIGHT: usize = 64;

const PAGES: usize = HEIGHT / 8;
const BUFFER_LEN: usize = WIDTH * PAGES;

/// 128×64 one-bit frame
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit", &self.lit_count())
            .finish_non_exhaustive()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((index, mask)) = Self::locate(point) {
                if color.is_on() {
                    self.bytes[index] |= mask;
                } else {
                    self.bytes[index] &= !mask;
                }
            }
        }
        Ok(())
    }
}

impl FrameBuffer {
    /// Creates a blank frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
        }
    }

    /// Reads one pixel; anything off-panel reads as off.
    #[must_use]
    pub fn pixel(&self, point: Point) -> bool {
        Self::locate(point).is_some_and(|(index, mask)| self.bytes[index] & mask != 0)
    }

    /// Number of pixels that are on.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Raw page-packed bytes, ready for a full-frame display write.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Renders the frame as text, `#` for lit pixels.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((WIDTH + 1) * HEIGHT);
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                out.push(if self.pixel(Point::new(x, y)) { '#' } else { '.' });
            }
            let _ = writeln!(out);
        }
        out
    }

    /// Byte index and bit mask for an on-panel point.
    fn locate(point: Point) -> Option<(usize, u8)> {
        let x = usize::try_from(point.x).ok().filter(|&x| x < WIDTH)?;
        let y = usize::try_from(point.y).ok().filter(|&y| y < HEIGHT)?;
        Some(((y / 8) * WIDTH + x, 1u8 << (y % 8)))
    }
}
