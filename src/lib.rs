//! # Joystick Panel Library
//!
//! Drive two PWM LEDs and a 128×64 display from an analog joystick, with two
//! debounced toggle buttons.
//!
//! The control logic talks to hardware only through the capability traits in
//! [`hal`], so the same [`panel::Panel`] runs against real peripherals, the
//! host simulation in [`hal::sim`], or test mocks.

pub mod config;
pub mod display;
pub mod error;
pub mod hal;
pub mod input;
pub mod joystick;
pub mod panel;
