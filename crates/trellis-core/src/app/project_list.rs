//! ProjectList - one status partition of the board.
//!
//! A list listens to the store, keeps the records whose status matches its
//! own, and rebuilds every card on each notification (no diffing). It is
//! also the drop target that moves a project into its partition.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use super::PROJECT_LIST_TEMPLATE;
use super::component::Component;
use super::project_item::ProjectItem;
use crate::domain::{ProjectId, ProjectRecord, ProjectStatus, TrackerError};
use crate::drag::{DragEvent, DropTarget, TEXT_PLAIN};
use crate::ports::{InsertPosition, SharedSurface};
use crate::store::{ListenerId, ProjectStore, Snapshot};

/// Hover affordance shown while a drop would be accepted.
pub const DROPPABLE_CLASS: &str = "droppable";

pub struct ProjectList {
    this: Weak<ProjectList>,
    status: ProjectStatus,
    element_id: String,
    host: String,
    store: Rc<ProjectStore>,
    surface: SharedSurface,
    assigned: RefCell<Vec<ProjectRecord>>,
    items: RefCell<Vec<ProjectItem>>,
    listener: Cell<Option<ListenerId>>,
}

impl ProjectList {
    /// Builds the list section inside `host` and subscribes it to `store`.
    ///
    /// The list starts empty; it fills on the first store notification.
    pub fn new(
        status: ProjectStatus,
        host: impl Into<String>,
        store: Rc<ProjectStore>,
        surface: SharedSurface,
    ) -> Result<Rc<Self>, TrackerError> {
        let list = Rc::new_cyclic(|this| Self {
            this: this.clone(),
            status,
            element_id: format!("{status}-projects"),
            host: host.into(),
            store,
            surface,
            assigned: RefCell::new(Vec::new()),
            items: RefCell::new(Vec::new()),
            listener: Cell::new(None),
        });
        list.attach(InsertPosition::AtEnd)?;
        list.configure();
        list.render_content()?;
        list.render_projects()?;
        Ok(list)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Records currently shown, in store order.
    pub fn projects(&self) -> Vec<ProjectRecord> {
        self.assigned.borrow().clone()
    }

    pub fn item(&self, id: &ProjectId) -> Option<ProjectItem> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.project().id == *id)
            .cloned()
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.get().is_some()
    }

    /// Unsubscribes from the store. The rendered items stay as they are.
    pub fn detach(&self) {
        if let Some(id) = self.listener.take() {
            self.store.remove_listener(id);
        }
    }

    fn assign(&self, snapshot: &Snapshot) {
        *self.assigned.borrow_mut() = snapshot.with_status(self.status);
        if let Err(err) = self.render_projects() {
            warn!(list = %self.element_id, error = %err, "failed to render projects");
        }
    }

    fn render_projects(&self) -> Result<(), TrackerError> {
        self.surface.borrow_mut().clear(&self.element_id)?;
        let assigned = self.assigned.borrow();
        let mut items = Vec::with_capacity(assigned.len());
        for project in assigned.iter() {
            items.push(ProjectItem::new(
                project.clone(),
                self.element_id.clone(),
                Rc::clone(&self.surface),
            )?);
        }
        *self.items.borrow_mut() = items;
        Ok(())
    }

    fn set_droppable(&self, on: bool) {
        if let Err(err) = self
            .surface
            .borrow_mut()
            .set_class(&self.element_id, DROPPABLE_CLASS, on)
        {
            warn!(list = %self.element_id, error = %err, "failed to toggle droppable");
        }
    }
}

impl Component for ProjectList {
    fn attach(&self, at: InsertPosition) -> Result<(), TrackerError> {
        let mut surface = self.surface.borrow_mut();
        let mut element = surface.instantiate(PROJECT_LIST_TEMPLATE)?;
        element.set_id(self.element_id.clone());
        element.set_attribute("data-status", self.status.as_str());
        surface.insert(&self.host, element, at)?;
        Ok(())
    }

    fn configure(&self) {
        let this = self.this.clone();
        let id = self.store.add_listener(move |snapshot| {
            if let Some(list) = this.upgrade() {
                list.assign(snapshot);
            }
        });
        self.listener.set(Some(id));
    }

    fn render_content(&self) -> Result<(), TrackerError> {
        let heading = format!("{} PROJECTS", self.status.as_str().to_uppercase());
        self.surface
            .borrow_mut()
            .set_text(&self.element_id, "h2", &heading)?;
        Ok(())
    }
}

impl DropTarget for ProjectList {
    fn target_id(&self) -> &str {
        &self.element_id
    }

    fn on_drag_over(&self, event: &mut DragEvent<'_>) {
        if self.accepts(&event.transfer().types()) {
            event.allow_drop();
            self.set_droppable(true);
        }
    }

    fn on_drag_leave(&self, _event: &mut DragEvent<'_>) {
        self.set_droppable(false);
    }

    fn on_drop(&self, event: &mut DragEvent<'_>) {
        self.set_droppable(false);
        let Some(raw) = event.transfer().get_data(TEXT_PLAIN) else {
            debug!(list = %self.element_id, "drop without payload");
            return;
        };
        match raw.parse::<ProjectId>() {
            Ok(id) => {
                self.store.move_project(&id, self.status);
            }
            Err(err) => debug!(list = %self.element_id, error = %err, "drop ignored"),
        }
    }
}

impl Drop for ProjectList {
    fn drop(&mut self) {
        self.detach();
    }
}
