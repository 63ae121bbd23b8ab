//! Drag - the drag-and-drop transfer protocol.
//!
//! A drag moves exactly one string (a project id) from a [`DragSource`] to a
//! [`DropTarget`] under the `text/plain` key:
//!
//! 1. drag start: the source writes the id and permits `Move`.
//! 2. drag over: the target checks the declared types and, only for
//!    `text/plain`, calls [`DragEvent::allow_drop`]. Without that call the
//!    drop is never delivered.
//! 3. drag leave: the target drops its hover affordance.
//! 4. drop: the target reads the id and asks the store to move the project.
//!
//! The payload is only an id. Targets always resolve it through the store.

mod session;

pub use session::{DragSession, DropOutcome};

use crate::ports::DataTransfer;

/// Payload key for project ids.
pub const TEXT_PLAIN: &str = "text/plain";

/// The `canAccept` predicate: only plain-text payloads are droppable.
pub fn accepts(types: &[String]) -> bool {
    types.iter().any(|ty| ty == TEXT_PLAIN)
}

/// One platform drag event, wrapping the shared transfer object.
pub struct DragEvent<'a> {
    transfer: &'a mut dyn DataTransfer,
    drop_allowed: bool,
}

impl<'a> DragEvent<'a> {
    pub fn new(transfer: &'a mut dyn DataTransfer) -> Self {
        Self {
            transfer,
            drop_allowed: false,
        }
    }

    pub fn transfer(&self) -> &dyn DataTransfer {
        &*self.transfer
    }

    pub fn transfer_mut(&mut self) -> &mut dyn DataTransfer {
        &mut *self.transfer
    }

    /// The platform's "allow drop" primitive (prevent-default on drag over).
    pub fn allow_drop(&mut self) {
        self.drop_allowed = true;
    }

    pub fn drop_allowed(&self) -> bool {
        self.drop_allowed
    }
}

/// Something that can be picked up.
pub trait DragSource {
    fn on_drag_start(&self, event: &mut DragEvent<'_>);

    fn on_drag_end(&self, _event: &mut DragEvent<'_>) {}
}

/// Something that can receive a drop.
pub trait DropTarget {
    /// Identity the platform arms between drag over and drop.
    fn target_id(&self) -> &str;

    fn accepts(&self, types: &[String]) -> bool {
        accepts(types)
    }

    fn on_drag_over(&self, event: &mut DragEvent<'_>);

    fn on_drag_leave(&self, event: &mut DragEvent<'_>);

    fn on_drop(&self, event: &mut DragEvent<'_>);
}
