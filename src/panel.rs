//! # Panel Module
//!
//! Composes sampler, intensity mapper, input controller and display tracker
//! into one control cycle.
//!
//! ## Cycle
//!
//! 1. Sample both axes (a sensor failure ends the loop)
//! 2. Drain queued button edges and apply them, using this cycle's sample as
//!    the joystick position at the time of the edge
//! 3. Map and write the LED duties
//! 4. Move the marker and flush the display
//!
//! Output and display failures are logged and the cycle carries on.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::display::{DisplayTracker, MarkerUpdate};
use crate::error::Result;
use crate::hal::{AnalogInput, DigitalOutput, DisplaySink, PwmChannel, PwmOutput};
use crate::input::{ButtonAction, ButtonEventQueue, Debouncer, InputController};
use crate::joystick::{AnalogSampler, Duties, IntensityMapper, ModeState, Position};

/// Cloneable handle to the mode state.
///
/// The control loop is the only writer; other tasks take snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedModeState {
    inner: Arc<Mutex<ModeState>>,
}

impl SharedModeState {
    #[must_use]
    pub fn new(mode: ModeState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(mode)),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ModeState {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, mode: ModeState) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }
}

/// Hardware handed to the panel
pub struct Peripherals<A, P, G, D> {
    pub adc: A,
    pub pwm: P,
    pub led: G,
    pub display: D,
}

/// What happened during one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub position: Position,
    pub actions: Vec<ButtonAction>,
    pub duties: Duties,
    /// `None` when the display flush failed
    pub marker: Option<MarkerUpdate>,
}

/// The whole control loop body
pub struct Panel<A, P, G, D> {
    sampler: AnalogSampler<A>,
    mapper: IntensityMapper,
    input: InputController,
    tracker: DisplayTracker,
    events: ButtonEventQueue,
    pwm: P,
    led: G,
    display: D,
    mode: SharedModeState,
    cycles: u64,
}

impl<A, P, G, D> std::fmt::Debug for Panel<A, P, G, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("mode", &self.mode.snapshot())
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}

impl<A, P, G, D> Panel<A, P, G, D>
where
    A: AnalogInput,
    P: PwmOutput,
    G: DigitalOutput,
    D: DisplaySink,
{
    /// Builds a panel from configuration, hardware and the edge queue.
    pub fn new(config: &Config, hw: Peripherals<A, P, G, D>, events: ButtonEventQueue) -> Self {
        let mapper = IntensityMapper::new(config.joystick.center, config.joystick.dead_zone);
        let debouncer = Debouncer::new(config.buttons.debounce, config.buttons.refractory());

        Self {
            sampler: AnalogSampler::new(hw.adc, config.joystick.x_channel, config.joystick.y_channel),
            mapper,
            input: InputController::new(debouncer, mapper),
            tracker: DisplayTracker::new(),
            events,
            pwm: hw.pwm,
            led: hw.led,
            display: hw.display,
            mode: SharedModeState::new(ModeState::default()),
            cycles: 0,
        }
    }

    /// Puts the hardware in its power-on state: both LEDs dark with their
    /// generators running, secondary LED off, display showing the outlined
    /// indicator.
    ///
    /// # Errors
    ///
    /// Any write failure here is returned; the loop should not start on
    /// half-configured hardware.
    pub fn start(&mut self) -> Result<()> {
        for channel in PwmChannel::ALL {
            self.pwm.set_duty(channel, 0)?;
            self.pwm.set_enabled(channel, true)?;
        }
        self.led.set(false)?;
        self.tracker.init(&mut self.display)?;

        self.mode.store(ModeState::default());
        info!("Panel started (PWM enabled, indicator outlined)");
        Ok(())
    }

    /// Runs one control cycle.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::SensorUnavailable`](crate::error::PanelError::SensorUnavailable)
    /// if the joystick cannot be read. Nothing else fails a cycle.
    pub fn run_cycle(&mut self) -> Result<CycleReport> {
        let position = self.sampler.sample()?;

        let mut mode = self.mode.snapshot();
        let mut actions = Vec::new();
        for event in self.events.drain() {
            let handled = self
                .input
                .handle_event(event, position, &mut mode, &mut self.pwm, &mut self.led);
            let Some(action) = handled else {
                continue;
            };

            if let ButtonAction::IndicatorToggled(filled) = action {
                if let Err(e) = self.tracker.redraw_indicator(filled, &mut self.display) {
                    warn!("Failed to redraw indicator: {}", e);
                }
            }
            actions.push(action);
        }
        if !actions.is_empty() {
            self.mode.store(mode);
            debug!(?mode, "Mode changed");
        }

        let duties = self.mapper.map_intensity(position, &mode);
        if let Err(e) = self.mapper.apply(duties, &mut self.pwm) {
            warn!("Failed to write LED duties: {}", e);
        }

        let marker = match self.tracker.update_marker(position, &mut self.display) {
            Ok(update) => Some(update),
            Err(e) => {
                warn!("Failed to update display: {}", e);
                None
            }
        };

        self.cycles += 1;
        Ok(CycleReport {
            position,
            actions,
            duties,
            marker,
        })
    }

    /// Handle for reading the mode state from other tasks.
    #[must_use]
    pub fn mode_handle(&self) -> SharedModeState {
        self.mode.clone()
    }

    /// Current mode state.
    #[must_use]
    pub fn mode(&self) -> ModeState {
        self.mode.snapshot()
    }

    /// Number of completed cycles.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Display state, for inspection.
    #[must_use]
    pub fn tracker(&self) -> &DisplayTracker {
        &self.tracker
    }
}
