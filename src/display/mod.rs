//! # Display Module
//!
//! 128×64 monochrome display output.
//!
//! This module handles:
//! - The page-packed frame buffer ([`framebuffer`])
//! - Marker tracking and the framed indicator ([`tracker`])

pub mod framebuffer;
pub mod tracker;

pub use framebuffer::{FrameBuffer, HEIGHT, WIDTH};
pub use tracker::{DisplayTracker, MarkerPosition, MarkerUpdate, INDICATOR};
