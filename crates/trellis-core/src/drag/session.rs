//! DragSession - a headless stand-in for the platform's drag sequence.

use std::rc::Rc;

use tracing::debug;

use super::{DragEvent, DragSource, DropTarget};
use crate::impls::MemoryTransfer;
use crate::ports::DataTransfer;

/// What happened to a drop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The target's drop handler ran.
    Delivered,
    /// The target never allowed a drop (no drag over, or drag leave since).
    Rejected,
}

/// The target under the pointer, and whether its drag over allowed a drop.
struct Hover {
    target: Rc<dyn DropTarget>,
    armed: bool,
}

impl Hover {
    fn is(&self, target: &dyn DropTarget) -> bool {
        self.target.target_id() == target.target_id()
    }
}

/// One drag operation from pick-up to release.
///
/// Holds the transfer object and the one target the drag is currently over.
/// Moving over another target fires drag leave on the previous one, and so
/// does ending the drag while still over a target. A drop on a target that
/// is not the armed hover target is swallowed, the same way the native API
/// never fires it.
pub struct DragSession {
    transfer: Box<dyn DataTransfer>,
    hover: Option<Hover>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::with_transfer(Box::new(MemoryTransfer::new()))
    }

    pub fn with_transfer(transfer: Box<dyn DataTransfer>) -> Self {
        Self {
            transfer,
            hover: None,
        }
    }

    pub fn transfer(&self) -> &dyn DataTransfer {
        &*self.transfer
    }

    /// Runs drag start on `source`.
    pub fn start(&mut self, source: &dyn DragSource) {
        let mut event = DragEvent::new(&mut *self.transfer);
        source.on_drag_start(&mut event);
        debug!(types = ?self.transfer.types(), "drag started");
    }

    /// Runs drag over on `target`; returns whether the target is now armed.
    ///
    /// If the drag was over a different target, that one gets drag leave
    /// first and is disarmed.
    pub fn over(&mut self, target: Rc<dyn DropTarget>) -> bool {
        if let Some(previous) = self.hover.take_if(|hover| !hover.is(&*target)) {
            debug!(
                from = previous.target.target_id(),
                to = target.target_id(),
                "drag moved to another target"
            );
            self.fire_leave(&*previous.target);
        }
        let mut event = DragEvent::new(&mut *self.transfer);
        target.on_drag_over(&mut event);
        let armed = event.drop_allowed();
        self.hover = Some(Hover { target, armed });
        armed
    }

    pub fn leave(&mut self, target: &dyn DropTarget) {
        if self.hover.as_ref().is_some_and(|hover| hover.is(target)) {
            self.hover = None;
        }
        self.fire_leave(target);
    }

    /// Delivers the drop if `target` is the armed hover target.
    pub fn drop_on(&mut self, target: &dyn DropTarget) -> DropOutcome {
        let armed = self
            .hover
            .take_if(|hover| hover.is(target))
            .is_some_and(|hover| hover.armed);
        if !armed {
            debug!(target = target.target_id(), "drop rejected: target not armed");
            return DropOutcome::Rejected;
        }
        let mut event = DragEvent::new(&mut *self.transfer);
        target.on_drop(&mut event);
        DropOutcome::Delivered
    }

    /// Runs drag end on `source` and closes the session.
    ///
    /// A target still under the drag gets drag leave before the source hears
    /// about the end.
    pub fn end(mut self, source: &dyn DragSource) {
        if let Some(hover) = self.hover.take() {
            debug!(target = hover.target.target_id(), "drag ended over target");
            self.fire_leave(&*hover.target);
        }
        let mut event = DragEvent::new(&mut *self.transfer);
        source.on_drag_end(&mut event);
    }

    pub fn is_armed(&self, target: &dyn DropTarget) -> bool {
        self.hover
            .as_ref()
            .is_some_and(|hover| hover.armed && hover.is(target))
    }

    fn fire_leave(&mut self, target: &dyn DropTarget) {
        let mut event = DragEvent::new(&mut *self.transfer);
        target.on_drag_leave(&mut event);
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}
