//! # Display Tracker
//!
//! Keeps the joystick marker and the framed indicator on screen, redrawing
//! only the marker region each cycle.
//!
//! ## Coordinate Mapping
//!
//! ```text
//! disp_x = x * 120 / 4096 + 4
//! disp_y = (4096 - y) * 56 / 4096 + 4
//! ```
//!
//! Y is inverted: raw readings grow as the stick is pushed down, while the
//! marker should move up when the stick goes up. Results land in
//! [4, 124] × [4, 60] and are clamped there.
//!
//! ## Layering
//!
//! Marker and indicator share one buffer. Every redraw erases the previous
//! marker, restores the indicator (a marker erase can clip its border), then
//! paints the marker on top and flushes once. Over a filled indicator the
//! marker inverts what lies under it: dark inside the indicator, lit where it
//! sticks out past the frame.

use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use tracing::trace;

use super::framebuffer::FrameBuffer;
use crate::error::Result;
use crate::hal::DisplaySink;
use crate::joystick::{Position, ADC_MAX, ADC_SPAN};

/// Blank border around the marker's travel area.
pub const MARGIN: u16 = 4;
/// Horizontal travel of the marker's top-left corner.
pub const X_TRAVEL: u32 = 120;
/// Vertical travel of the marker's top-left corner.
pub const Y_TRAVEL: u32 = 56;
/// Marker edge length.
pub const MARKER_SIZE: u32 = 8;
/// Largest marker column after clamping.
pub const MARKER_MAX_X: u16 = 124;
/// Largest marker row after clamping.
pub const MARKER_MAX_Y: u16 = 60;

/// The framed indicator mirroring the secondary LED.
pub const INDICATOR: Rectangle = Rectangle::new(Point::new(3, 3), Size::new(122, 60));

/// Top-left corner of the marker in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPosition {
    pub x: u16,
    pub y: u16,
}

impl MarkerPosition {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Maps a raw joystick position onto the display.
    ///
    /// # Examples
    ///
    /// ```
    /// use joystick_panel::display::MarkerPosition;
    /// use joystick_panel::joystick::Position;
    ///
    /// assert_eq!(MarkerPosition::from_position(Position::CENTER), MarkerPosition::new(64, 32));
    /// ```
    #[must_use]
    pub fn from_position(position: Position) -> Self {
        let x = u32::from(position.x.min(ADC_MAX));
        let y = u32::from(position.y.min(ADC_MAX));

        let disp_x = x * X_TRAVEL / ADC_SPAN + u32::from(MARGIN);
        let disp_y = (ADC_SPAN - y) * Y_TRAVEL / ADC_SPAN + u32::from(MARGIN);

        Self {
            x: (disp_x as u16).clamp(MARGIN, MARKER_MAX_X),
            y: (disp_y as u16).clamp(MARGIN, MARKER_MAX_Y),
        }
    }

    /// Area covered by the marker square.
    #[must_use]
    pub fn rect(self) -> Rectangle {
        Rectangle::new(
            Point::new(i32::from(self.x), i32::from(self.y)),
            Size::new_equal(MARKER_SIZE),
        )
    }
}

/// Erase/draw pair produced by one marker update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerUpdate {
    pub erased: MarkerPosition,
    pub drawn: MarkerPosition,
}

/// Owns the frame buffer, the last drawn marker and the indicator fill.
#[derive(Debug, Clone)]
pub struct DisplayTracker {
    frame: FrameBuffer,
    last_marker: MarkerPosition,
    indicator_filled: bool,
}

impl Default for DisplayTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayTracker {
    /// Creates a tracker whose previous marker is the center position.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: FrameBuffer::new(),
            last_marker: MarkerPosition::from_position(Position::CENTER),
            indicator_filled: false,
        }
    }

    /// Clears the panel and shows the outlined indicator.
    pub fn init<D: DisplaySink + ?Sized>(&mut self, sink: &mut D) -> Result<()> {
        infallible(self.frame.clear(BinaryColor::Off));
        self.paint_indicator();
        sink.flush(&self.frame)
    }

    /// Moves the marker to `position` and flushes the frame.
    ///
    /// The erase always targets the coordinates of the previous draw, so no
    /// ghost pixels are left behind.
    pub fn update_marker<D: DisplaySink + ?Sized>(
        &mut self,
        position: Position,
        sink: &mut D,
    ) -> Result<MarkerUpdate> {
        let next = MarkerPosition::from_position(position);
        let update = MarkerUpdate {
            erased: self.last_marker,
            drawn: next,
        };

        self.fill(self.last_marker.rect(), BinaryColor::Off);
        self.paint_indicator();
        self.paint_marker(next);
        self.last_marker = next;

        trace!(?update, "Marker moved");
        sink.flush(&self.frame)?;
        Ok(update)
    }

    /// Redraws the indicator as filled (`true`) or outlined and flushes,
    /// keeping the current marker on top.
    pub fn redraw_indicator<D: DisplaySink + ?Sized>(&mut self, filled: bool, sink: &mut D) -> Result<()> {
        self.indicator_filled = filled;

        self.fill(INDICATOR, BinaryColor::Off);
        self.paint_indicator();
        self.paint_marker(self.last_marker);

        sink.flush(&self.frame)
    }

    /// Marker drawn by the last update.
    #[must_use]
    pub fn last_marker(&self) -> MarkerPosition {
        self.last_marker
    }

    /// Whether the indicator is currently filled.
    #[must_use]
    pub fn indicator_filled(&self) -> bool {
        self.indicator_filled
    }

    /// Current composited frame.
    #[must_use]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn paint_indicator(&mut self) {
        let style = if self.indicator_filled {
            PrimitiveStyle::with_fill(BinaryColor::On)
        } else {
            PrimitiveStyle::with_stroke(BinaryColor::On, 1)
        };
        infallible(INDICATOR.into_styled(style).draw(&mut self.frame));
    }

    fn paint_marker(&mut self, marker: MarkerPosition) {
        let filled = self.indicator_filled;
        let pixels = marker.rect().points().map(|point| {
            let color = if filled && INDICATOR.contains(point) {
                BinaryColor::Off
            } else {
                BinaryColor::On
            };
            Pixel(point, color)
        });
        infallible(self.frame.draw_iter(pixels));
    }

    fn fill(&mut self, area: Rectangle, color: BinaryColor) {
        infallible(area.into_styled(PrimitiveStyle::with_fill(color)).draw(&mut self.frame));
    }
}

/// Unwraps a draw into the frame buffer, which has no error case.
fn infallible(result: core::result::Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
