//! Board - wiring of the store, the form and both lists.
//!
//! # Fail-fast
//! `BoardBuilder::build` checks that the surface knows every template the
//! views need before anything is rendered, and reports all missing ones at
//! once.

use std::cell::RefCell;
use std::rc::Rc;

use super::project_form::ProjectForm;
use super::project_item::ProjectItem;
use super::project_list::ProjectList;
use super::REQUIRED_TEMPLATES;
use crate::domain::{ProjectId, ProjectStatus, TrackerError, ValidationRules};
use crate::drag::{DragSession, DropOutcome};
use crate::impls::MemorySurface;
use crate::ports::{Clock, IdGenerator, SharedSurface, SystemClock, UlidGenerator};
use crate::store::ProjectStore;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing templates: {0:?}. The surface must provide these before the board is built.")]
    MissingTemplates(Vec<String>),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// BoardBuilder はボードを構築
///
/// ```ignore
/// let board = BoardBuilder::new()
///     .surface(surface)
///     .rules(ValidationRules::default())
///     .build()?;
/// ```
pub struct BoardBuilder {
    surface: Option<SharedSurface>,
    host: String,
    rules: ValidationRules,
    ids: Option<Box<dyn IdGenerator>>,
    clock: Option<Box<dyn Clock>>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self {
            surface: None,
            host: MemorySurface::ROOT.to_string(),
            rules: ValidationRules::default(),
            ids: None,
            clock: None,
        }
    }

    /// Defaults to a fresh [`MemorySurface`].
    pub fn surface(mut self, surface: SharedSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Host element the form and lists are inserted into.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Board, BuildError> {
        let surface: SharedSurface = match self.surface {
            Some(surface) => surface,
            None => Rc::new(RefCell::new(MemorySurface::new())),
        };

        let missing: Vec<String> = {
            let s = surface.borrow();
            REQUIRED_TEMPLATES
                .iter()
                .filter(|name| !s.has_template(name))
                .map(|name| name.to_string())
                .collect()
        };
        if !missing.is_empty() {
            return Err(BuildError::MissingTemplates(missing));
        }

        let ids = self
            .ids
            .unwrap_or_else(|| Box::new(UlidGenerator::new(SystemClock)));
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let store = Rc::new(ProjectStore::with_ports(ids, clock));

        let form = ProjectForm::new(
            self.host.clone(),
            Rc::clone(&store),
            Rc::clone(&surface),
            self.rules,
        )?;
        let active = ProjectList::new(
            ProjectStatus::Active,
            self.host.clone(),
            Rc::clone(&store),
            Rc::clone(&surface),
        )?;
        let finished = ProjectList::new(
            ProjectStatus::Finished,
            self.host,
            Rc::clone(&store),
            Rc::clone(&surface),
        )?;

        Ok(Board {
            store,
            surface,
            form,
            active,
            finished,
        })
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The running board: exactly one store, shared by every view.
pub struct Board {
    store: Rc<ProjectStore>,
    surface: SharedSurface,
    form: ProjectForm,
    active: Rc<ProjectList>,
    finished: Rc<ProjectList>,
}

impl Board {
    pub fn store(&self) -> &Rc<ProjectStore> {
        &self.store
    }

    pub fn surface(&self) -> &SharedSurface {
        &self.surface
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    pub fn list(&self, status: ProjectStatus) -> &Rc<ProjectList> {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// The rendered card for `id`, whichever list it is in.
    pub fn item(&self, id: &ProjectId) -> Option<ProjectItem> {
        ProjectStatus::ALL
            .iter()
            .find_map(|status| self.list(*status).item(id))
    }

    /// Runs a complete drag of `id` onto the `to` list: start, over, drop, end.
    ///
    /// Returns `None` when no card with that id is rendered.
    pub fn drag_project(&self, id: &ProjectId, to: ProjectStatus) -> Option<DropOutcome> {
        let item = self.item(id)?;
        let target = self.list(to);
        let mut session = DragSession::new();
        session.start(&item);
        session.over(target.clone());
        let outcome = session.drop_on(&**target);
        session.end(&item);
        Some(outcome)
    }
}
