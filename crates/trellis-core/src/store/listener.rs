//! Listener registry (ListenerId -> callback), kept in registration order.

use std::cell::RefCell;
use std::rc::Rc;

use super::Snapshot;

/// Handle returned by [`ProjectStore::add_listener`](super::ProjectStore::add_listener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) type Listener = Rc<RefCell<dyn FnMut(&Snapshot)>>;

/// Append-only apart from explicit removal. No de-duplication: registering
/// the same closure twice yields two entries and two calls per notification.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn register(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Cheap copy of the current handles, so callbacks run without the
    /// registry borrowed.
    pub(crate) fn handles(&self) -> Vec<(ListenerId, Listener)> {
        self.entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
