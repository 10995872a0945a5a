//! One-shot events
//!
//! `Event<T>` yields its payload once; `EventCell<T>` is the "latest event"
//! slot an observer parks deliveries in until its screen reads them.

use std::sync::Mutex;

/// A payload that can be consumed at most once
///
/// Not `Clone`, so a pending payload cannot be duplicated and handled twice:
///
/// ```compile_fail
/// let event = photos::favorites::Event::new(1);
/// let _copy = event.clone();
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Event<T> {
    content: Option<T>,
}

impl<T> Event<T> {
    pub fn new(content: T) -> Self {
        Self {
            content: Some(content),
        }
    }

    /// Take the payload; `None` once it has been handled
    pub fn take(&mut self) -> Option<T> {
        self.content.take()
    }

    /// Look at the payload without handling it
    pub fn peek(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn is_handled(&self) -> bool {
        self.content.is_none()
    }
}

/// Holds the most recent event for one observer
///
/// A newer event replaces an unhandled older one. Reading the cell again
/// (e.g. after the screen is rebuilt) never replays a handled event.
#[derive(Debug)]
pub struct EventCell<T> {
    slot: Mutex<Option<Event<T>>>,
}

impl<T> EventCell<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Park a new event, replacing any previous one
    pub fn post(&self, event: Event<T>) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(event);
    }

    /// Park a new payload
    pub fn set(&self, content: T) {
        self.post(Event::new(content));
    }

    /// Consume the pending payload, if any
    pub fn take(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_mut()
            .and_then(Event::take)
    }

    /// Whether an unhandled event is waiting
    pub fn has_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|e| !e.is_handled())
    }
}

impl<T: Clone> EventCell<T> {
    /// Pending payload, left unhandled
    pub fn peek(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .and_then(|e| e.peek().cloned())
    }
}

impl<T> Default for EventCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
