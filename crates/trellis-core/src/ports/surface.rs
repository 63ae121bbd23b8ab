//! Surface port - the rendering collaborator.
//!
//! Views never build markup themselves. They ask the surface for a detached
//! element cloned from a named template, fill in its slots, and insert it
//! into a host container. Any inserted element that carries an id becomes a
//! host in its own right, which is how list sections receive their items.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use thiserror::Error;

/// Where an element lands inside its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    AtStart,
    AtEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("template not found: {0}")]
    UnknownTemplate(String),

    #[error("host element not found: {0}")]
    UnknownHost(String),

    #[error("element not found: {0}")]
    UnknownElement(String),
}

/// A detached element tree, as produced by [`Surface::instantiate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    template: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    slots: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Declares an empty text slot (e.g. "h2"). Used by template prototypes.
    pub fn with_slot(mut self, name: impl Into<String>) -> Self {
        self.slots.insert(name.into(), String::new());
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_slot(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.slots.insert(name.into(), text.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

/// Template instantiation and insertion primitives.
pub trait Surface {
    fn has_template(&self, name: &str) -> bool;

    /// Clones the named template into a detached element.
    fn instantiate(&self, template: &str) -> Result<Element, SurfaceError>;

    fn insert(&mut self, host: &str, element: Element, at: InsertPosition) -> Result<(), SurfaceError>;

    /// Drops every child of `host` (and any hosts they owned).
    fn clear(&mut self, host: &str) -> Result<(), SurfaceError>;

    /// Sets the text of a slot on an already inserted element.
    fn set_text(&mut self, element_id: &str, slot: &str, text: &str) -> Result<(), SurfaceError>;

    /// Toggles a class on an already inserted element.
    fn set_class(&mut self, element_id: &str, class: &str, on: bool) -> Result<(), SurfaceError>;

    /// Looks up an inserted element by id.
    fn element(&self, element_id: &str) -> Option<&Element>;

    /// Children of a host, in display order.
    fn children(&self, host: &str) -> Option<&[Element]>;
}

/// Views share one surface; the event loop is single-threaded.
pub type SharedSurface = Rc<RefCell<dyn Surface>>;
