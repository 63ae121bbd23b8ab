//! Store - the observable project store.
//!
//! One `ProjectStore` is built at start-up and shared by `Rc` with every
//! view. It is the only owner of project records and the only place their
//! status changes.
//!
//! # Invariants
//! 1. Listeners are called in registration order, each with the same
//!    full [`Snapshot`] (never a diff).
//! 2. `move_project` with an unknown id or an unchanged status does not
//!    notify.
//! 3. A notification round has finished (every listener returned) before the
//!    mutating call returns.
//! 4. A mutation made from inside a listener does not re-enter the listener
//!    list. It triggers one more full round after the current one.
//!    Mutations made during the same round are coalesced: however many
//!    there were, the next round runs once, with a snapshot that already
//!    holds all of them.

mod listener;
mod snapshot;

pub use listener::ListenerId;
pub use snapshot::{BoardCounts, Snapshot};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::domain::{ProjectId, ProjectRecord, ProjectStatus};
use crate::ports::{Clock, IdGenerator, SystemClock, UlidGenerator};
use listener::ListenerRegistry;

pub struct ProjectStore {
    projects: RefCell<Vec<ProjectRecord>>,
    listeners: RefCell<ListenerRegistry>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

impl ProjectStore {
    /// Store backed by the wall clock and ULID ids.
    pub fn new() -> Self {
        Self::with_ports(Box::new(UlidGenerator::new(SystemClock)), Box::new(SystemClock))
    }

    pub fn with_ports(ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Self {
            projects: RefCell::new(Vec::new()),
            listeners: RefCell::new(ListenerRegistry::default()),
            ids,
            clock,
            notifying: Cell::new(false),
            dirty: Cell::new(false),
        }
    }

    /// Registers `listener`. It is first called on the next mutation.
    pub fn add_listener(&self, listener: impl FnMut(&Snapshot) + 'static) -> ListenerId {
        let handle: Rc<RefCell<dyn FnMut(&Snapshot)>> = Rc::new(RefCell::new(listener));
        let id = self.listeners.borrow_mut().register(handle);
        trace!(listener = ?id, "listener registered");
        id
    }

    /// Returns whether the listener was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.listeners.borrow_mut().remove(id);
        trace!(listener = ?id, removed, "listener removed");
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Appends a new active project and notifies.
    ///
    /// Input is assumed to be validated already.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let id = self.ids.generate_project_id();
        let record = ProjectRecord::new(id, title, description, people, self.clock.now());
        debug!(project_id = %id, title = %record.title, people, "project added");
        self.projects.borrow_mut().push(record);
        self.notify();
        id
    }

    /// Moves a project to `status`.
    ///
    /// Returns `false` (and notifies nobody) when the id is unknown or the
    /// project already has that status.
    pub fn move_project(&self, id: &ProjectId, status: ProjectStatus) -> bool {
        {
            let mut projects = self.projects.borrow_mut();
            let Some(project) = projects.iter_mut().find(|p| p.id == *id) else {
                debug!(project_id = %id, "move ignored: unknown project");
                return false;
            };
            if project.status == status {
                trace!(project_id = %id, %status, "move ignored: status unchanged");
                return false;
            }
            debug!(project_id = %id, from = %project.status, to = %status, "project moved");
            project.status = status;
        }
        self.notify();
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.projects.borrow())
    }

    pub fn find(&self, id: &ProjectId) -> Option<ProjectRecord> {
        self.projects.borrow().iter().find(|p| p.id == *id).cloned()
    }

    pub fn counts(&self) -> BoardCounts {
        self.snapshot().counts()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    fn notify(&self) {
        if self.notifying.get() {
            // re-entrant mutation: the outer loop runs another round
            self.dirty.set(true);
            return;
        }
        let _guard = NotifyGuard::enter(&self.notifying);

        loop {
            self.dirty.set(false);
            let snapshot = self.snapshot();
            let handles = self.listeners.borrow().handles();
            trace!(listeners = handles.len(), projects = snapshot.len(), "notifying");

            for (id, listener) in handles {
                // removed by an earlier listener in this round
                if !self.listeners.borrow().contains(id) {
                    continue;
                }
                (&mut *listener.borrow_mut())(&snapshot);
            }

            if !self.dirty.get() {
                break;
            }
        }
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the notifying flag even if a listener panics.
struct NotifyGuard<'a>(&'a Cell<bool>);

impl<'a> NotifyGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
