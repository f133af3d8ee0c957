//! # Debounce Module
//!
//! Time-gate debouncing for the push-buttons.
//!
//! There is no multi-state machine here: an edge is accepted only when more
//! than the refractory window has elapsed since the last accepted edge.
//!
//! In [`DebounceMode::Global`] a single clock gates both buttons, so a bounce
//! on one button also swallows a real press of the other inside the window.
//! Two presses on different buttons within 300 ms are deliberately treated as
//! one. [`DebounceMode::PerButton`] keeps an independent clock per button.
//!
//! Clocks start at boot (time zero), so edges during the first refractory
//! window after power-up are ignored.

use std::time::Duration;
use tracing::trace;

use super::events::{ButtonEvent, ButtonId};
use crate::config::DebounceMode;

const BUTTON_COUNT: usize = 2;

/// Refractory-window gate for button edges
#[derive(Debug, Clone)]
pub struct Debouncer {
    mode: DebounceMode,
    refractory: Duration,
    last_accepted: [Duration; BUTTON_COUNT],
}

impl Debouncer {
    /// Creates a debouncer with both clocks at boot time.
    #[must_use]
    pub fn new(mode: DebounceMode, refractory: Duration) -> Self {
        Self {
            mode,
            refractory,
            last_accepted: [Duration::ZERO; BUTTON_COUNT],
        }
    }

    /// Decides whether `event` is a real press, recording it if so.
    ///
    /// A timestamp earlier than the last accepted edge counts as zero
    /// elapsed time and is rejected.
    pub fn accept(&mut self, event: &ButtonEvent) -> bool {
        let slot = self.slot(event.id);
        let elapsed = event.timestamp.saturating_sub(self.last_accepted[slot]);

        if elapsed <= self.refractory {
            trace!(id = ?event.id, ?elapsed, "Edge inside refractory window");
            return false;
        }

        self.last_accepted[slot] = event.timestamp;
        true
    }

    fn slot(&self, id: ButtonId) -> usize {
        match self.mode {
            DebounceMode::Global => 0,
            DebounceMode::PerButton => id.index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn edge(id: ButtonId, at: u64) -> ButtonEvent {
        ButtonEvent::new(id, ms(at))
    }

    fn global() -> Debouncer {
        Debouncer::new(DebounceMode::Global, ms(300))
    }

    #[test]
    fn test_same_button_inside_window_ignored() {
        let mut debouncer = global();
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1000)));
        assert!(!debouncer.accept(&edge(ButtonId::ModeToggle, 1200)));
    }

    #[test]
    fn test_same_button_outside_window_accepted() {
        let mut debouncer = global();
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1000)));
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1301)));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let mut debouncer = global();
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1000)));
        assert!(!debouncer.accept(&edge(ButtonId::ModeToggle, 1300)));
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1301)));
    }

    #[test]
    fn test_rejected_edge_does_not_extend_window() {
        let mut debouncer = global();
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1000)));
        assert!(!debouncer.accept(&edge(ButtonId::ModeToggle, 1250)));
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1350)));
    }

    #[test]
    fn test_edges_right_after_boot_ignored() {
        let mut debouncer = global();
        assert!(!debouncer.accept(&edge(ButtonId::ModeToggle, 0)));
        assert!(!debouncer.accept(&edge(ButtonId::IndicatorToggle, 300)));
        assert!(debouncer.accept(&edge(ButtonId::IndicatorToggle, 301)));
    }

    #[test]
    fn test_global_clock_couples_buttons() {
        let mut debouncer = global();
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1000)));
        assert!(!debouncer.accept(&edge(ButtonId::IndicatorToggle, 1100)));
        // Rejected edges do not move the clock
        assert!(debouncer.accept(&edge(ButtonId::IndicatorToggle, 1301)));
    }

    #[test]
    fn test_per_button_clocks_are_independent() {
        let mut debouncer = Debouncer::new(DebounceMode::PerButton, ms(300));
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 1000)));
        assert!(debouncer.accept(&edge(ButtonId::IndicatorToggle, 1100)));
        assert!(!debouncer.accept(&edge(ButtonId::ModeToggle, 1200)));
        assert!(!debouncer.accept(&edge(ButtonId::IndicatorToggle, 1300)));
    }

    #[test]
    fn test_out_of_order_timestamp_rejected() {
        let mut debouncer = global();
        assert!(debouncer.accept(&edge(ButtonId::ModeToggle, 2000)));
        assert!(!debouncer.accept(&edge(ButtonId::ModeToggle, 500)));
    }
}
