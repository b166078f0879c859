//! Single "current lore" slot that ignores responses for superseded terrain.
//!
//! Only the most recent request for the current terrain may fill the slot;
//! replies to earlier requests are dropped whatever order they arrive in.

/// Identifies the terrain a lore request was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoreTicket {
    pub epoch: u64,
    /// Monotonic request number, never reused
    pub request: u64,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Default)]
pub struct LoreSlot {
    epoch: u64,
    latest_request: u64,
    dimensions: Option<(usize, usize)>,
    text: Option<String>,
    pending: bool,
}

impl LoreSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new terrain was published: forget old lore and start a new epoch.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.epoch += 1;
        self.dimensions = Some((width, height));
        self.text = None;
        self.pending = false;
    }

    /// Ticket for a request against the current terrain, `None` before any
    /// terrain exists.
    pub fn begin_request(&mut self) -> Option<LoreTicket> {
        let (width, height) = self.dimensions?;
        self.latest_request += 1;
        self.pending = true;
        Some(LoreTicket {
            epoch: self.epoch,
            request: self.latest_request,
            width,
            height,
        })
    }

    /// Store `text` if `ticket` is the latest request for the current terrain.
    /// Returns false and drops the text when it is stale.
    pub fn accept(&mut self, ticket: LoreTicket, text: String) -> bool {
        if !self.is_current(&ticket) || ticket.request != self.latest_request {
            return false;
        }
        self.text = Some(text);
        self.pending = false;
        true
    }

    pub fn is_current(&self, ticket: &LoreTicket) -> bool {
        ticket.epoch == self.epoch && self.dimensions == Some((ticket.width, ticket.height))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ticket_without_terrain() {
        let mut slot = LoreSlot::new();
        assert!(slot.begin_request().is_none());
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_current_response_is_stored() {
        let mut slot = LoreSlot::new();
        slot.reset(129, 129);
        let ticket = slot.begin_request().unwrap();
        assert!(slot.is_pending());

        assert!(slot.accept(ticket, "A quiet labyrinth.".to_string()));
        assert_eq!(slot.text(), Some("A quiet labyrinth."));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut slot = LoreSlot::new();
        slot.reset(129, 129);
        let old = slot.begin_request().unwrap();

        // Regenerated with the same size: still a different terrain.
        slot.reset(129, 129);
        assert!(!slot.accept(old, "old".to_string()));
        assert_eq!(slot.text(), None);

        slot.reset(200, 100);
        let fresh = slot.begin_request().unwrap();
        assert!(!slot.accept(old, "old".to_string()));
        assert!(slot.accept(fresh, "new".to_string()));
        assert_eq!(slot.text(), Some("new"));
    }

    #[test]
    fn test_latest_request_wins() {
        let mut slot = LoreSlot::new();
        slot.reset(50, 50);
        let first = slot.begin_request().unwrap();
        let second = slot.begin_request().unwrap();

        assert!(slot.accept(second, "second".to_string()));
        assert!(!slot.is_pending());
        // The earlier request answers late and must not overwrite.
        assert!(!slot.accept(first, "first".to_string()));
        assert_eq!(slot.text(), Some("second"));
    }

    #[test]
    fn test_older_reply_keeps_newer_request_pending() {
        let mut slot = LoreSlot::new();
        slot.reset(50, 50);
        let first = slot.begin_request().unwrap();
        let second = slot.begin_request().unwrap();

        assert!(!slot.accept(first, "first".to_string()));
        assert_eq!(slot.text(), None);
        assert!(slot.is_pending());

        assert!(slot.accept(second, "second".to_string()));
        assert_eq!(slot.text(), Some("second"));
        assert!(!slot.is_pending());
    }
}
