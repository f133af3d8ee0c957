//! # Joystick Module
//!
//! Two-axis analog joystick handling.
//!
//! This module handles:
//! - Reading both axes once per cycle ([`sampler`])
//! - Converting deflection into LED duty cycles with a dead zone ([`intensity`])
//!
//! ## Value Ranges
//!
//! - Raw ADC reading: 0-4095 (12-bit)
//! - Rest position: 2048 on both axes
//! - Neutral band: center ± 100

pub mod intensity;
pub mod sampler;

pub use intensity::{Duties, IntensityMapper};
pub use sampler::AnalogSampler;

/// Largest value a 12-bit conversion can return.
pub const ADC_MAX: u16 = 4095;

/// Span of the ADC range (exclusive upper bound), used by display scaling.
pub const ADC_SPAN: u32 = 4096;

/// Axis value at rest.
pub const DEFAULT_CENTER: u16 = 2048;

/// Half-width of the neutral band around center.
pub const DEFAULT_DEAD_ZONE: u16 = 100;

/// One raw axis reading (0-4095).
pub type AxisReading = u16;

/// Raw joystick position for one cycle.
///
/// # Examples
///
/// ```
/// use joystick_panel::joystick::Position;
///
/// let pos = Position::CENTER;
/// assert_eq!((pos.x, pos.y), (2048, 2048));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Horizontal axis (drives the red LED).
    pub x: AxisReading,
    /// Vertical axis (drives the blue LED). Raw value grows downward.
    pub y: AxisReading,
}

impl Position {
    /// Both axes at rest.
    pub const CENTER: Position = Position {
        x: DEFAULT_CENTER,
        y: DEFAULT_CENTER,
    };

    /// Creates a position from raw readings.
    #[must_use]
    pub const fn new(x: AxisReading, y: AxisReading) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Process-wide toggle state driven by the two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    /// PWM LEDs follow the joystick when set; both are dark otherwise.
    pub pwm_enabled: bool,
    /// Secondary (green) LED, mirrored by the display indicator fill.
    pub secondary_led_on: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            pwm_enabled: true,
            secondary_led_on: false,
        }
    }
}
