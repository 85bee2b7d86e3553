//! Completion detection: is the assistant turn over for a session?

use crate::session::{Message, Part};

use super::Event;

impl Event {
    /// True if this event indicates the assistant turn is complete for `session_id`.
    ///
    /// - `session.idle` for the session (recommended completion signal).
    /// - `session.status` with an `idle` status.
    /// - `message.part.updated` carrying a `step-finish` part.
    /// - `message.updated` with a completed assistant message.
    pub fn is_completion_for(&self, session_id: &str) -> bool {
        if !self.concerns(session_id) {
            return false;
        }
        match self {
            Event::SessionIdle(_) => true,
            Event::SessionStatus(ev) => ev.properties.status.is_idle(),
            Event::MessagePartUpdated(ev) => matches!(ev.properties.part, Part::StepFinish(_)),
            Event::MessageUpdated(ev) => match &ev.properties.info {
                Message::Assistant(m) => m.is_completed(),
                _ => false,
            },
            _ => false,
        }
    }
}
