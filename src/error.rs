//! # Error Types
//!
//! Custom error types for the joystick panel using `thiserror`.

use thiserror::Error;

/// Main error type for the joystick panel
#[derive(Debug, Error)]
pub enum PanelError {
    /// Analog read failed; there is no safe default joystick position
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// PWM or digital output write failed
    #[error("Output error: {0}")]
    Output(String),

    /// Display flush failed
    #[error("Display error: {0}")]
    Display(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PanelError {
    /// Returns true if the control loop must stop on this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, PanelError::SensorUnavailable(_))
    }
}

/// Result type alias for the joystick panel
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sensor_errors_are_fatal() {
        assert!(PanelError::SensorUnavailable("adc".into()).is_fatal());
        assert!(!PanelError::Output("pwm".into()).is_fatal());
        assert!(!PanelError::Display("i2c nack".into()).is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = PanelError::SensorUnavailable("channel 1 timed out".into());
        assert_eq!(err.to_string(), "Sensor unavailable: channel 1 timed out");
    }
}
