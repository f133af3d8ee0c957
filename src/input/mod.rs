//! # Input Module
//!
//! Push-button handling.
//!
//! This module handles:
//! - Carrying falling edges from the edge source to the loop ([`events`])
//! - Rejecting bounces with a refractory window ([`debounce`])
//! - Applying the mode and indicator toggles ([`controller`])

pub mod controller;
pub mod debounce;
pub mod events;

pub use controller::{ButtonAction, InputController};
pub use debounce::Debouncer;
pub use events::{event_queue, ButtonEvent, ButtonEventQueue, ButtonId, EdgeNotifier};
