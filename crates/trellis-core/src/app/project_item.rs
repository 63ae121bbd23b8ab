//! ProjectItem - one rendered card, and the drag source for its project.

use tracing::trace;

use super::SINGLE_PROJECT_TEMPLATE;
use super::component::Component;
use crate::domain::{ProjectRecord, TrackerError};
use crate::drag::{DragEvent, DragSource, TEXT_PLAIN};
use crate::ports::{DropEffect, InsertPosition, SharedSurface};

#[derive(Clone)]
pub struct ProjectItem {
    project: ProjectRecord,
    host: String,
    surface: SharedSurface,
}

impl ProjectItem {
    /// Renders `project` at the end of `host`.
    pub fn new(
        project: ProjectRecord,
        host: impl Into<String>,
        surface: SharedSurface,
    ) -> Result<Self, TrackerError> {
        let item = Self {
            project,
            host: host.into(),
            surface,
        };
        item.attach(InsertPosition::AtEnd)?;
        item.configure();
        item.render_content()?;
        Ok(item)
    }

    pub fn project(&self) -> &ProjectRecord {
        &self.project
    }

    pub fn element_id(&self) -> String {
        self.project.id.to_string()
    }
}

impl Component for ProjectItem {
    fn attach(&self, at: InsertPosition) -> Result<(), TrackerError> {
        let mut surface = self.surface.borrow_mut();
        let mut element = surface.instantiate(SINGLE_PROJECT_TEMPLATE)?;
        element.set_id(self.element_id());
        element.set_attribute("draggable", "true");
        surface.insert(&self.host, element, at)?;
        Ok(())
    }

    fn render_content(&self) -> Result<(), TrackerError> {
        let id = self.element_id();
        let mut surface = self.surface.borrow_mut();
        surface.set_text(&id, "h2", &self.project.title)?;
        surface.set_text(&id, "h3", &self.project.people_label())?;
        surface.set_text(&id, "p", &self.project.description)?;
        Ok(())
    }
}

impl DragSource for ProjectItem {
    fn on_drag_start(&self, event: &mut DragEvent<'_>) {
        let transfer = event.transfer_mut();
        transfer.set_data(TEXT_PLAIN, &self.project.id.to_string());
        transfer.set_effect_allowed(DropEffect::Move);
    }

    fn on_drag_end(&self, _event: &mut DragEvent<'_>) {
        trace!(project_id = %self.project.id, "drag ended");
    }
}
