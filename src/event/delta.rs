//! Text delta extraction for `message.part.updated` events.

use crate::session::Part;

use super::Event;

impl Event {
    /// Latest incremental text of a text part belonging to `session_id`.
    ///
    /// Prefers `properties.delta` (streaming increment), then the part's full
    /// `text`. Events of other sessions and non-text parts yield `None`.
    pub fn text_delta_for(&self, session_id: &str) -> Option<&str> {
        if !self.concerns(session_id) {
            return None;
        }
        let Event::MessagePartUpdated(ev) = self else {
            return None;
        };
        let Part::Text(part) = &ev.properties.part else {
            return None;
        };
        ev.properties
            .delta
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| Some(part.text.as_str()).filter(|t| !t.is_empty()))
    }
}
