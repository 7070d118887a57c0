//! Document-level pointer events
//!
//! Components that need to hear every click (not just clicks on their own
//! widgets) register a listener here while they are mounted and remove it
//! when they unmount.

use log::debug;
use ratatui::layout::Position;

/// A pointer click in terminal cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub position: Position,
}

impl ClickEvent {
    pub fn new(column: u16, row: u16) -> Self {
        Self {
            position: Position::new(column, row),
        }
    }
}

/// Handle returned by [`Document::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ClickHandler = Box<dyn FnMut(&ClickEvent)>;

/// Registry of document-wide click listeners
#[derive(Default)]
pub struct Document {
    listeners: Vec<(ListenerId, ClickHandler)>,
    next_id: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click listener
    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&ClickEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(handler)));
        debug!("Click listener {:?} subscribed ({} active)", id, self.listeners.len());
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        let removed = self.listeners.len() != before;
        if removed {
            debug!("Click listener {:?} unsubscribed ({} active)", id, self.listeners.len());
        }
        removed
    }

    /// Deliver a click to every listener in registration order
    pub fn dispatch_click(&mut self, event: &ClickEvent) {
        for (_, handler) in self.listeners.iter_mut() {
            handler(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
