//! # Hardware Capability Module
//!
//! Trait abstractions for the peripherals the panel drives, so the control
//! logic never touches registers directly and can be tested on the host.
//!
//! This module handles:
//! - Blocking analog reads (12-bit joystick axes)
//! - PWM duty and generator enable for the two dimmed LEDs
//! - The digital secondary LED
//! - Flushing a frame buffer to the monochrome display
//!
//! Simulated host backends live in [`sim`].

pub mod sim;

use crate::display::FrameBuffer;
use crate::error::Result;

/// PWM wrap value shared by both LED channels; duties use the same 0-4095 range.
pub const PWM_PERIOD: u16 = 4095;

/// The two PWM-dimmed LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PwmChannel {
    /// Follows X deflection
    Red,
    /// Follows Y deflection
    Blue,
}

impl PwmChannel {
    /// Both channels, in the order they are configured at startup.
    pub const ALL: [PwmChannel; 2] = [PwmChannel::Red, PwmChannel::Blue];
}

/// Trait for analog-to-digital reads
#[cfg_attr(test, mockall::automock)]
pub trait AnalogInput: Send {
    /// Select `channel` and perform a blocking conversion.
    ///
    /// Implementations return [`PanelError::SensorUnavailable`](crate::error::PanelError::SensorUnavailable)
    /// when the peripheral cannot produce a reading.
    fn read_channel(&mut self, channel: u8) -> Result<u16>;
}

/// Trait for PWM generator operations
pub trait PwmOutput: Send {
    /// Set the compare level for `channel` (0 to [`PWM_PERIOD`]).
    fn set_duty(&mut self, channel: PwmChannel, duty: u16) -> Result<()>;

    /// Enable or disable the generator behind `channel`.
    fn set_enabled(&mut self, channel: PwmChannel, enabled: bool) -> Result<()>;
}

/// Trait for a single push-pull digital output
pub trait DigitalOutput: Send {
    /// Drive the pin high (`true`) or low.
    fn set(&mut self, high: bool) -> Result<()>;

    /// Read back the level currently driven on the pin.
    fn get(&self) -> bool;
}

/// Trait for a display that can show a full frame buffer
pub trait DisplaySink: Send {
    /// Push the whole buffer to the panel.
    fn flush(&mut self, frame: &FrameBuffer) -> Result<()>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::error::PanelError;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock PWM generator recording every write
    #[derive(Clone, Default)]
    pub struct MockPwm {
        pub duties: Arc<Mutex<HashMap<PwmChannel, u16>>>,
        pub enabled: Arc<Mutex<HashMap<PwmChannel, bool>>>,
        pub duty_writes: Arc<Mutex<Vec<(PwmChannel, u16)>>>,
        pub fail_writes: Arc<Mutex<bool>>,
    }

    impl MockPwm {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn duty(&self, channel: PwmChannel) -> Option<u16> {
            self.duties.lock().unwrap().get(&channel).copied()
        }

        pub fn is_enabled(&self, channel: PwmChannel) -> Option<bool> {
            self.enabled.lock().unwrap().get(&channel).copied()
        }

        pub fn duty_writes(&self) -> Vec<(PwmChannel, u16)> {
            self.duty_writes.lock().unwrap().clone()
        }

        pub fn clear_writes(&self) {
            self.duty_writes.lock().unwrap().clear();
        }

        pub fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }
    }

    impl PwmOutput for MockPwm {
        fn set_duty(&mut self, channel: PwmChannel, duty: u16) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(PanelError::Output("Mock PWM write error".into()));
            }
            self.duties.lock().unwrap().insert(channel, duty);
            self.duty_writes.lock().unwrap().push((channel, duty));
            Ok(())
        }

        fn set_enabled(&mut self, channel: PwmChannel, enabled: bool) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(PanelError::Output("Mock PWM enable error".into()));
            }
            self.enabled.lock().unwrap().insert(channel, enabled);
            Ok(())
        }
    }

    /// Mock digital pin
    #[derive(Clone, Default)]
    pub struct MockPin {
        pub level: Arc<Mutex<bool>>,
        pub writes: Arc<Mutex<Vec<bool>>>,
    }

    impl MockPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn writes(&self) -> Vec<bool> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl DigitalOutput for MockPin {
        fn set(&mut self, high: bool) -> Result<()> {
            *self.level.lock().unwrap() = high;
            self.writes.lock().unwrap().push(high);
            Ok(())
        }

        fn get(&self) -> bool {
            *self.level.lock().unwrap()
        }
    }

    /// Mock display keeping every flushed frame
    #[derive(Clone, Default)]
    pub struct MockDisplay {
        pub frames: Arc<Mutex<Vec<FrameBuffer>>>,
        pub flush_error: Arc<Mutex<bool>>,
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn flush_count(&self) -> usize {
            self.frames.lock().unwrap().len()
        }

        pub fn last_frame(&self) -> Option<FrameBuffer> {
            self.frames.lock().unwrap().last().cloned()
        }

        pub fn set_flush_error(&self, fail: bool) {
            *self.flush_error.lock().unwrap() = fail;
        }
    }

    impl DisplaySink for MockDisplay {
        fn flush(&mut self, frame: &FrameBuffer) -> Result<()> {
            if *self.flush_error.lock().unwrap() {
                return Err(PanelError::Display("Mock flush error".into()));
            }
            self.frames.lock().unwrap().push(frame.clone());
            Ok(())
        }
    }

    /// Analog input replaying fixed readings per channel
    #[derive(Clone, Default)]
    pub struct FixedAnalog {
        pub readings: Arc<Mutex<HashMap<u8, u16>>>,
    }

    impl FixedAnalog {
        pub fn new(x_channel: u8, x: u16, y_channel: u8, y: u16) -> Self {
            let analog = Self::default();
            analog.set(x_channel, x);
            analog.set(y_channel, y);
            analog
        }

        pub fn set(&self, channel: u8, value: u16) {
            self.readings.lock().unwrap().insert(channel, value);
        }
    }

    impl AnalogInput for FixedAnalog {
        fn read_channel(&mut self, channel: u8) -> Result<u16> {
            self.readings
                .lock()
                .unwrap()
                .get(&channel)
                .copied()
                .ok_or_else(|| PanelError::SensorUnavailable(format!("channel {} not wired", channel)))
        }
    }
}
