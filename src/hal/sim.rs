//! Simulated peripherals for running the panel on a host.
//!
//! The joystick follows a deterministic Lissajous sweep with a rest period
//! at center each lap, so the dead zone, both LEDs and the full marker range
//! all get exercised without hardware.

use tracing::{debug, trace};

use super::{AnalogInput, DigitalOutput, DisplaySink, PwmChannel, PwmOutput, PWM_PERIOD};
use crate::display::FrameBuffer;
use crate::error::{PanelError, Result};
use crate::joystick::{ADC_MAX, DEFAULT_CENTER};

/// Conversions per sweep lap (one conversion pair per cycle).
const LAP_TICKS: u32 = 800;
/// Trailing part of each lap spent at rest.
const REST_TICKS: u32 = 150;
/// Sweep amplitude around center.
const AMPLITUDE: f32 = 2000.0;

/// Joystick that sweeps a fixed path
#[derive(Debug, Clone)]
pub struct SimulatedJoystick {
    x_channel: u8,
    y_channel: u8,
    tick: u32,
}

impl SimulatedJoystick {
    #[must_use]
    pub fn new(x_channel: u8, y_channel: u8) -> Self {
        Self {
            x_channel,
            y_channel,
            tick: 0,
        }
    }

    fn axis(&self, phase_scale: f32, offset: f32) -> u16 {
        let lap_tick = self.tick % LAP_TICKS;
        if lap_tick >= LAP_TICKS - REST_TICKS {
            return DEFAULT_CENTER;
        }

        let t = lap_tick as f32 / (LAP_TICKS - REST_TICKS) as f32 * std::f32::consts::TAU;
        let value = f32::from(DEFAULT_CENTER) + AMPLITUDE * (t * phase_scale + offset).sin();
        value.round().clamp(0.0, f32::from(ADC_MAX)) as u16
    }
}

impl AnalogInput for SimulatedJoystick {
    fn read_channel(&mut self, channel: u8) -> Result<u16> {
        if channel == self.x_channel {
            // X is read first each cycle, so it advances the sweep
            self.tick = self.tick.wrapping_add(1);
            Ok(self.axis(1.0, 0.0))
        } else if channel == self.y_channel {
            Ok(self.axis(2.0, std::f32::consts::FRAC_PI_2))
        } else {
            Err(PanelError::SensorUnavailable(format!(
                "simulated joystick has no channel {}",
                channel
            )))
        }
    }
}

/// PWM generator that keeps the last written state and traces changes
#[derive(Debug, Clone, Default)]
pub struct SimulatedPwm {
    duties: [u16; 2],
    enabled: [bool; 2],
}

impl SimulatedPwm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn duty(&self, channel: PwmChannel) -> u16 {
        self.duties[Self::slot(channel)]
    }

    #[must_use]
    pub fn is_enabled(&self, channel: PwmChannel) -> bool {
        self.enabled[Self::slot(channel)]
    }

    fn slot(channel: PwmChannel) -> usize {
        match channel {
            PwmChannel::Red => 0,
            PwmChannel::Blue => 1,
        }
    }
}

impl PwmOutput for SimulatedPwm {
    fn set_duty(&mut self, channel: PwmChannel, duty: u16) -> Result<()> {
        if duty > PWM_PERIOD {
            return Err(PanelError::Output(format!(
                "{:?} duty {} exceeds period {}",
                channel, duty, PWM_PERIOD
            )));
        }

        let slot = Self::slot(channel);
        if self.duties[slot] != duty {
            trace!(?channel, duty, "PWM duty");
            self.duties[slot] = duty;
        }
        Ok(())
    }

    fn set_enabled(&mut self, channel: PwmChannel, enabled: bool) -> Result<()> {
        let slot = Self::slot(channel);
        if self.enabled[slot] != enabled {
            debug!(?channel, enabled, "PWM generator");
            self.enabled[slot] = enabled;
        }
        Ok(())
    }
}

/// Digital LED that logs level changes
#[derive(Debug, Clone, Default)]
pub struct SimulatedLed {
    level: bool,
}

impl SimulatedLed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigitalOutput for SimulatedLed {
    fn set(&mut self, high: bool) -> Result<()> {
        if self.level != high {
            debug!(high, "Secondary LED");
        }
        self.level = high;
        Ok(())
    }

    fn get(&self) -> bool {
        self.level
    }
}

/// Display that dumps every Nth frame as text at debug level
///
/// Each flush is copied into a controller-side RAM image, the way a full
/// frame write lands in SSD1306 GDDRAM.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    render_every: u64,
    flushes: u64,
    gddram: Vec<u8>,
}

impl TerminalDisplay {
    /// `render_every` of 0 disables rendering.
    #[must_use]
    pub fn new(render_every: u64) -> Self {
        Self {
            render_every,
            flushes: 0,
            gddram: FrameBuffer::new().as_bytes().to_vec(),
        }
    }

    #[must_use]
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Page-packed image from the last flush.
    #[must_use]
    pub fn gddram(&self) -> &[u8] {
        &self.gddram
    }
}

impl DisplaySink for TerminalDisplay {
    fn flush(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.flushes += 1;
        self.gddram.clear();
        self.gddram.extend_from_slice(frame.as_bytes());

        if self.render_every > 0 && self.flushes % self.render_every == 0 {
            debug!("Frame {}:\n{}", self.flushes, frame.render_ascii());
        }
        Ok(())
    }
}
