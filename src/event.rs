//! Event system: navigation messages, dispatch queue, control bindings.
//!
//! Control activation is decoupled from the state machine by a FIFO message
//! queue: clicks push a [`Message`], and the widget drains and applies them
//! one at a time in arrival order.

use std::collections::{HashMap, VecDeque};

use crate::template::{ControlAction, Template};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A navigation message, converging on the slide selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Step to the previous slide (wraps from the first to the last).
    Previous,
    /// Step to the next slide (wraps from the last to the first).
    Next,
    /// Select a slide by index; out-of-range values are normalized.
    Select(i64),
}

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Queue-based message dispatcher.
///
/// Messages are enqueued via `push` and drained for processing via `drain`.
/// The dispatcher does not interpret messages; that belongs to the widget.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: VecDeque<Message>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message for later processing.
    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Drain all pending messages in arrival order.
    pub fn drain(&mut self) -> Vec<Message> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Registry of control bindings, mapping a control id to the message its
/// activation produces.
#[derive(Debug, Default)]
pub struct Controls {
    bindings: HashMap<String, Message>,
}

impl Controls {
    /// Create an empty registry. Unbound ids resolve to nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build bindings from a template's control declarations.
    pub fn from_template(template: &Template) -> Self {
        let mut controls = Self::new();
        for def in &template.controls {
            let message = match def.action {
                ControlAction::Previous => Message::Previous,
                ControlAction::Next => Message::Next,
            };
            controls.bind(&def.id, message);
        }
        controls
    }

    /// Register a binding. An existing binding for the id is replaced.
    pub fn bind(&mut self, id: &str, message: Message) {
        self.bindings.insert(id.to_string(), message);
    }

    /// Look up the message for a control id.
    pub fn resolve(&self, id: &str) -> Option<Message> {
        self.bindings.get(id).copied()
    }

    /// Number of bound controls.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no controls are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
