//! # Input Controller
//!
//! Applies debounced button edges to the mode state and the hardware.
//!
//! | Button | Effect |
//! |--------|--------|
//! | Button A | Flip `pwm_enabled`, switch both PWM generators on/off |
//! | Joystick press | Flip `secondary_led_on`, drive the green LED, redraw the indicator |
//!
//! Hardware write failures are logged and do not undo the state change; the
//! next cycle rewrites the duties anyway.

use tracing::{debug, warn};

use super::debounce::Debouncer;
use super::events::{ButtonEvent, ButtonId};
use crate::hal::{DigitalOutput, PwmChannel, PwmOutput};
use crate::joystick::{Duties, IntensityMapper, ModeState, Position};

/// What an accepted edge changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// PWM output switched; carries the new `pwm_enabled`
    PwmToggled(bool),
    /// Secondary LED switched; carries the new `secondary_led_on`.
    /// The display indicator must be redrawn to match.
    IndicatorToggled(bool),
}

/// Debounce gate plus the two toggle handlers
#[derive(Debug, Clone)]
pub struct InputController {
    debouncer: Debouncer,
    mapper: IntensityMapper,
}

impl InputController {
    /// Creates a controller; `mapper` supplies the dead zone used when PWM is
    /// re-enabled.
    #[must_use]
    pub fn new(debouncer: Debouncer, mapper: IntensityMapper) -> Self {
        Self { debouncer, mapper }
    }

    /// Handles one queued edge.
    ///
    /// `position` is the joystick position at the time the edge is processed.
    /// Returns `None` when the edge is a bounce.
    pub fn handle_event<P, G>(
        &mut self,
        event: ButtonEvent,
        position: Position,
        mode: &mut ModeState,
        pwm: &mut P,
        led: &mut G,
    ) -> Option<ButtonAction>
    where
        P: PwmOutput + ?Sized,
        G: DigitalOutput + ?Sized,
    {
        if !self.debouncer.accept(&event) {
            return None;
        }

        let action = match event.id {
            ButtonId::ModeToggle => self.toggle_pwm(position, mode, pwm),
            ButtonId::IndicatorToggle => Self::toggle_indicator(mode, led),
        };
        debug!(?action, at = ?event.timestamp, "Accepted button edge");
        Some(action)
    }

    fn toggle_pwm<P: PwmOutput + ?Sized>(
        &self,
        position: Position,
        mode: &mut ModeState,
        pwm: &mut P,
    ) -> ButtonAction {
        mode.pwm_enabled = !mode.pwm_enabled;
        let enabled = mode.pwm_enabled;

        for channel in PwmChannel::ALL {
            if let Err(e) = pwm.set_enabled(channel, enabled) {
                warn!("Failed to switch {:?} PWM: {}", channel, e);
            }
        }

        // Going dark, or coming back with the stick at rest: clear stale duties
        if !enabled || self.mapper.in_dead_zone(position) {
            if let Err(e) = self.mapper.apply(Duties::OFF, pwm) {
                warn!("Failed to clear PWM duties: {}", e);
            }
        }

        ButtonAction::PwmToggled(enabled)
    }

    fn toggle_indicator<G: DigitalOutput + ?Sized>(mode: &mut ModeState, led: &mut G) -> ButtonAction {
        mode.secondary_led_on = !mode.secondary_led_on;
        let on = mode.secondary_led_on;

        if let Err(e) = led.set(on) {
            warn!("Failed to drive secondary LED: {}", e);
        } else if led.get() != on {
            warn!("Secondary LED reads back {} after writing {}", led.get(), on);
        }

        ButtonAction::IndicatorToggled(on)
    }
}
