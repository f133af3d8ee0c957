//! Button edge events and the queue carrying them from the edge source to
//! the control loop.
//!
//! The edge side only stamps and enqueues; all debounce and state transitions
//! happen when the loop drains the queue, so handlers never run concurrently
//! with the loop.

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// The two monitored push-buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    /// Button A: switches the PWM LEDs on and off
    ModeToggle,
    /// Joystick press: toggles the secondary LED and display indicator
    IndicatorToggle,
}

impl ButtonId {
    /// Slot used by per-button debounce tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ButtonId::ModeToggle => 0,
            ButtonId::IndicatorToggle => 1,
        }
    }
}

/// A falling edge on one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub id: ButtonId,
    /// Monotonic time since boot when the edge was seen
    pub timestamp: Duration,
}

impl ButtonEvent {
    #[must_use]
    pub const fn new(id: ButtonId, timestamp: Duration) -> Self {
        Self { id, timestamp }
    }
}

/// Creates a connected sender/queue pair.
#[must_use]
pub fn event_queue() -> (EdgeNotifier, ButtonEventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EdgeNotifier { tx }, ButtonEventQueue { rx })
}

/// Edge-source side of the queue; cheap to clone, never blocks.
#[derive(Debug, Clone)]
pub struct EdgeNotifier {
    tx: mpsc::UnboundedSender<ButtonEvent>,
}

impl EdgeNotifier {
    /// Enqueues an edge. Returns false once the loop has shut down.
    pub fn notify(&self, id: ButtonId, timestamp: Duration) -> bool {
        if self.tx.send(ButtonEvent::new(id, timestamp)).is_err() {
            warn!("Dropping {:?} edge, event queue closed", id);
            return false;
        }
        true
    }
}

/// Loop side of the queue.
#[derive(Debug)]
pub struct ButtonEventQueue {
    rx: mpsc::UnboundedReceiver<ButtonEvent>,
}

impl ButtonEventQueue {
    /// Takes every event queued so far, oldest first, without waiting.
    pub fn drain(&mut self) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (notifier, mut queue) = event_queue();
        notifier.notify(ButtonId::ModeToggle, Duration::from_millis(400));
        notifier.notify(ButtonId::IndicatorToggle, Duration::from_millis(900));

        let events = queue.drain();
        assert_eq!(
            events,
            vec![
                ButtonEvent::new(ButtonId::ModeToggle, Duration::from_millis(400)),
                ButtonEvent::new(ButtonId::IndicatorToggle, Duration::from_millis(900)),
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_notify_after_queue_dropped() {
        let (notifier, queue) = event_queue();
        drop(queue);
        assert!(!notifier.notify(ButtonId::ModeToggle, Duration::ZERO));
    }

    #[test]
    fn test_drain_from_cloned_notifier_thread() {
        let (notifier, mut queue) = event_queue();
        let edge_source = notifier.clone();
        drop(notifier);

        std::thread::spawn(move || {
            assert!(edge_source.notify(ButtonId::IndicatorToggle, Duration::from_secs(1)));
        })
        .join()
        .unwrap();

        let events = queue.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, ButtonId::IndicatorToggle);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_button_indices_are_distinct() {
        assert_ne!(ButtonId::ModeToggle.index(), ButtonId::IndicatorToggle.index());
    }
}
