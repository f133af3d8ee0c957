//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field has a built-in default, so an empty file (or no file at all)
//! yields the stock thresholds: 100-count dead zone, 300 ms refractory window,
//! 10 ms cycle.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{PanelError, Result};
use crate::joystick::{ADC_MAX, DEFAULT_CENTER, DEFAULT_DEAD_ZONE};

/// Default refractory window between accepted button edges.
pub const DEFAULT_REFRACTORY_MS: u64 = 300;

/// Default main loop period.
pub const DEFAULT_CYCLE_MS: u64 = 10;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub joystick: JoystickConfig,
    #[serde(default)]
    pub buttons: ButtonConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Analog joystick configuration
#[derive(Debug, Deserialize, Clone)]
pub struct JoystickConfig {
    #[serde(default = "default_x_channel")]
    pub x_channel: u8,

    #[serde(default = "default_y_channel")]
    pub y_channel: u8,

    #[serde(default = "default_center")]
    pub center: u16,

    #[serde(default = "default_dead_zone")]
    pub dead_zone: u16,
}

/// How the refractory clock is shared between buttons
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebounceMode {
    /// One clock gates both buttons
    #[default]
    Global,
    /// Each button has its own clock
    PerButton,
}

/// Push-button configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ButtonConfig {
    #[serde(default = "default_refractory_ms")]
    pub refractory_ms: u64,

    #[serde(default)]
    pub debounce: DebounceMode,
}

/// Main loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeConfig {
    #[serde(default = "default_cycle_ms")]
    pub cycle_ms: u64,

    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
}

// Default value functions
fn default_x_channel() -> u8 { 1 }
fn default_y_channel() -> u8 { 0 }
fn default_center() -> u16 { DEFAULT_CENTER }
fn default_dead_zone() -> u16 { DEFAULT_DEAD_ZONE }

fn default_refractory_ms() -> u64 { DEFAULT_REFRACTORY_MS }

fn default_cycle_ms() -> u64 { DEFAULT_CYCLE_MS }
fn default_status_interval_ms() -> u64 { 5000 }

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            x_channel: default_x_channel(),
            y_channel: default_y_channel(),
            center: default_center(),
            dead_zone: default_dead_zone(),
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            refractory_ms: default_refractory_ms(),
            debounce: DebounceMode::default(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cycle_ms: default_cycle_ms(),
            status_interval_ms: default_status_interval_ms(),
        }
    }
}

impl ButtonConfig {
    /// Refractory window as a [`Duration`].
    #[must_use]
    pub fn refractory(&self) -> Duration {
        Duration::from_millis(self.refractory_ms)
    }
}

impl RuntimeConfig {
    /// Main loop period as a [`Duration`].
    #[must_use]
    pub fn cycle(&self) -> Duration {
        Duration::from_millis(self.cycle_ms)
    }

    /// Status report period as a [`Duration`].
    #[must_use]
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joystick_panel::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    ///
    /// Any other read, parse or validation failure is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // RP2040-class ADCs expose five inputs (0-4)
        if self.joystick.x_channel > 4 || self.joystick.y_channel > 4 {
            return Err(invalid("joystick channels must be between 0 and 4"));
        }

        if self.joystick.x_channel == self.joystick.y_channel {
            return Err(invalid("x_channel and y_channel must differ"));
        }

        if self.joystick.center == 0 || self.joystick.center >= ADC_MAX {
            return Err(invalid("center must be between 1 and 4094"));
        }

        if self.joystick.dead_zone >= 2048 {
            return Err(invalid("dead_zone must be less than 2048"));
        }

        if self.buttons.refractory_ms == 0 || self.buttons.refractory_ms > 10000 {
            return Err(invalid("refractory_ms must be between 1 and 10000"));
        }

        if self.runtime.cycle_ms == 0 || self.runtime.cycle_ms > 1000 {
            return Err(invalid("cycle_ms must be between 1 and 1000"));
        }

        if self.runtime.status_interval_ms == 0 || self.runtime.status_interval_ms > 600000 {
            return Err(invalid("status_interval_ms must be between 1 and 600000"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> PanelError {
    PanelError::Config(toml::de::Error::custom(msg))
}
