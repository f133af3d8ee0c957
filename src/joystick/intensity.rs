//! # Intensity Mapper
//!
//! Converts joystick deflection into LED duty cycles.
//!
//! ## Dead Zone
//!
//! Deflection is the distance of an axis from center, `|v - center|`. Any
//! deflection at or below the dead zone maps to 0, which keeps the LEDs dark
//! while the stick jitters around rest. Outside the dead zone the duty is the
//! deflection itself: duty and PWM period share the 0-4095 range, so there is
//! no scaling and no clamping (deflection never exceeds 2048).
//!
//! ## Usage
//!
//! ```
//! use joystick_panel::joystick::{IntensityMapper, ModeState, Position};
//!
//! let mapper = IntensityMapper::default();
//! let duties = mapper.map_intensity(Position::new(4095, 2100), &ModeState::default());
//!
//! assert_eq!(duties.red, 2047);
//! assert_eq!(duties.blue, 0); // 52 counts is inside the dead zone
//! ```

use super::{ModeState, Position, DEFAULT_CENTER, DEFAULT_DEAD_ZONE};
use crate::error::Result;
use crate::hal::{PwmChannel, PwmOutput};

/// Duty values for both PWM LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duties {
    /// Red LED, from X deflection.
    pub red: u16,
    /// Blue LED, from Y deflection.
    pub blue: u16,
}

impl Duties {
    /// Both LEDs dark.
    pub const OFF: Duties = Duties { red: 0, blue: 0 };
}

/// Symmetric dead-zone mapping from axis readings to duties.
#[derive(Debug, Clone, Copy)]
pub struct IntensityMapper {
    center: u16,
    dead_zone: u16,
}

impl Default for IntensityMapper {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_DEAD_ZONE)
    }
}

impl IntensityMapper {
    /// Creates a mapper around `center` with a half-width of `dead_zone`.
    #[must_use]
    pub fn new(center: u16, dead_zone: u16) -> Self {
        Self { center, dead_zone }
    }

    /// Distance of `value` from center.
    #[inline]
    #[must_use]
    pub fn deflection(&self, value: u16) -> u16 {
        value.abs_diff(self.center)
    }

    /// Duty for one axis: the deflection, or 0 inside the dead zone.
    #[inline]
    #[must_use]
    pub fn axis_duty(&self, value: u16) -> u16 {
        let deflection = self.deflection(value);
        if deflection > self.dead_zone {
            deflection
        } else {
            0
        }
    }

    /// True when both axes sit inside the neutral band.
    #[must_use]
    pub fn in_dead_zone(&self, position: Position) -> bool {
        self.deflection(position.x) <= self.dead_zone && self.deflection(position.y) <= self.dead_zone
    }

    /// Maps a position to duties, forcing both off while PWM is disabled.
    #[must_use]
    pub fn map_intensity(&self, position: Position, mode: &ModeState) -> Duties {
        if !mode.pwm_enabled {
            return Duties::OFF;
        }

        Duties {
            red: self.axis_duty(position.x),
            blue: self.axis_duty(position.y),
        }
    }

    /// Writes both duties to the PWM generator.
    pub fn apply<P: PwmOutput + ?Sized>(&self, duties: Duties, pwm: &mut P) -> Result<()> {
        pwm.set_duty(PwmChannel::Red, duties.red)?;
        pwm.set_duty(PwmChannel::Blue, duties.blue)?;
        Ok(())
    }
}
