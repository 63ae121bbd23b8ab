//! ProjectForm - the input form that feeds the store.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use super::PROJECT_INPUT_TEMPLATE;
use super::component::Component;
use crate::domain::{ProjectId, ProjectInput, TrackerError, ValidationError, ValidationRules};
use crate::ports::{InsertPosition, SharedSurface};
use crate::store::ProjectStore;

pub const FORM_ELEMENT_ID: &str = "user-input";

/// Holds the three raw fields and submits them to the store.
///
/// Invalid input never reaches the store; the caller gets the
/// `ValidationError` to show to the user.
pub struct ProjectForm {
    host: String,
    store: Rc<ProjectStore>,
    surface: SharedSurface,
    rules: ValidationRules,
    input: RefCell<ProjectInput>,
}

impl ProjectForm {
    pub fn new(
        host: impl Into<String>,
        store: Rc<ProjectStore>,
        surface: SharedSurface,
        rules: ValidationRules,
    ) -> Result<Self, TrackerError> {
        let form = Self {
            host: host.into(),
            store,
            surface,
            rules,
            input: RefCell::new(ProjectInput::default()),
        };
        form.attach(InsertPosition::AtStart)?;
        form.configure();
        form.render_content()?;
        Ok(form)
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn input(&self) -> ProjectInput {
        self.input.borrow().clone()
    }

    /// Replaces all three fields, as if the user had typed them.
    pub fn fill(&self, input: ProjectInput) -> Result<(), TrackerError> {
        *self.input.borrow_mut() = input;
        self.render_content()
    }

    /// Validates the current fields and, on success, adds the project and
    /// clears the form.
    pub fn submit(&self) -> Result<ProjectId, ValidationError> {
        let valid = match self.input.borrow().validate(&self.rules) {
            Ok(valid) => valid,
            Err(err) => {
                warn!(error = %err, "invalid project input");
                return Err(err);
            }
        };

        self.clear();
        let id = self
            .store
            .add_project(valid.title, valid.description, valid.people);
        info!(project_id = %id, "project created");
        Ok(id)
    }

    fn clear(&self) {
        *self.input.borrow_mut() = ProjectInput::default();
        if let Err(err) = self.render_content() {
            warn!(error = %err, "failed to clear form");
        }
    }
}

impl Component for ProjectForm {
    fn attach(&self, at: InsertPosition) -> Result<(), TrackerError> {
        let mut surface = self.surface.borrow_mut();
        let mut element = surface.instantiate(PROJECT_INPUT_TEMPLATE)?;
        element.set_id(FORM_ELEMENT_ID);
        surface.insert(&self.host, element, at)?;
        Ok(())
    }

    fn render_content(&self) -> Result<(), TrackerError> {
        let input = self.input.borrow();
        let mut surface = self.surface.borrow_mut();
        surface.set_text(FORM_ELEMENT_ID, "title", &input.title)?;
        surface.set_text(FORM_ELEMENT_ID, "description", &input.description)?;
        surface.set_text(FORM_ELEMENT_ID, "people", &input.people)?;
        Ok(())
    }
}
