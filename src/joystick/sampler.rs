//! # Analog Sampler
//!
//! Reads the X and Y channels in sequence and returns one [`Position`].

use tracing::{trace, warn};

use super::{Position, ADC_MAX};
use crate::error::{PanelError, Result};
use crate::hal::AnalogInput;

/// Reads both joystick axes from an [`AnalogInput`].
#[derive(Debug)]
pub struct AnalogSampler<A> {
    adc: A,
    x_channel: u8,
    y_channel: u8,
}

impl<A: AnalogInput> AnalogSampler<A> {
    /// Creates a sampler reading X from `x_channel` and Y from `y_channel`.
    pub fn new(adc: A, x_channel: u8, y_channel: u8) -> Self {
        Self {
            adc,
            x_channel,
            y_channel,
        }
    }

    /// Performs two blocking conversions, X first.
    ///
    /// # Errors
    ///
    /// Any read failure is reported as [`PanelError::SensorUnavailable`];
    /// the caller treats it as fatal.
    pub fn sample(&mut self) -> Result<Position> {
        let x = self.read_axis(self.x_channel)?;
        let y = self.read_axis(self.y_channel)?;
        trace!(x, y, "Sampled joystick");
        Ok(Position::new(x, y))
    }

    fn read_axis(&mut self, channel: u8) -> Result<u16> {
        let raw = self.adc.read_channel(channel).map_err(|e| match e {
            PanelError::SensorUnavailable(_) => e,
            other => PanelError::SensorUnavailable(format!("channel {}: {}", channel, other)),
        })?;

        if raw > ADC_MAX {
            warn!("ADC channel {} returned {} (above {}), clamping", channel, raw, ADC_MAX);
            return Ok(ADC_MAX);
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mocks::FixedAnalog;
    use crate::hal::MockAnalogInput;
    use mockall::predicate::eq;
    use mockall::Sequence;

    #[test]
    fn test_sample_reads_both_channels() {
        let adc = FixedAnalog::new(1, 300, 0, 3900);
        let mut sampler = AnalogSampler::new(adc, 1, 0);
        assert_eq!(sampler.sample().unwrap(), Position::new(300, 3900));
    }

    #[test]
    fn test_sample_reads_x_before_y() {
        let mut adc = MockAnalogInput::new();
        let mut seq = Sequence::new();
        adc.expect_read_channel()
            .with(eq(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(10));
        adc.expect_read_channel()
            .with(eq(0))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(20));

        let mut sampler = AnalogSampler::new(adc, 1, 0);
        assert_eq!(sampler.sample().unwrap(), Position::new(10, 20));
    }

    #[test]
    fn test_sensor_failure_is_fatal() {
        let mut adc = MockAnalogInput::new();
        adc.expect_read_channel()
            .returning(|ch| Err(PanelError::SensorUnavailable(format!("channel {} stuck", ch))));

        let mut sampler = AnalogSampler::new(adc, 1, 0);
        let err = sampler.sample().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_other_read_errors_become_sensor_unavailable() {
        let mut adc = MockAnalogInput::new();
        adc.expect_read_channel()
            .returning(|_| Err(PanelError::Output("bus fault".into())));

        let mut sampler = AnalogSampler::new(adc, 1, 0);
        match sampler.sample().unwrap_err() {
            PanelError::SensorUnavailable(msg) => assert!(msg.contains("bus fault")),
            other => panic!("Expected SensorUnavailable, got: {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_reading_is_clamped() {
        let adc = FixedAnalog::new(1, 5000, 0, 4095);
        let mut sampler = AnalogSampler::new(adc, 1, 0);
        assert_eq!(sampler.sample().unwrap(), Position::new(4095, 4095));
    }
}
