//! In-memory element tree implementing [`Surface`].

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::app::{PROJECT_INPUT_TEMPLATE, PROJECT_LIST_TEMPLATE, SINGLE_PROJECT_TEMPLATE};
use crate::ports::{Element, InsertPosition, Surface, SurfaceError};

/// Headless stand-in for a document.
///
/// Holds template prototypes by name and a flat map of host id -> children.
/// The root host always exists.
#[derive(Debug)]
pub struct MemorySurface {
    templates: BTreeMap<String, Element>,
    hosts: HashMap<String, Vec<Element>>,
    root: String,
}

impl MemorySurface {
    pub const ROOT: &'static str = "app";

    /// A surface with no templates registered.
    pub fn empty() -> Self {
        let mut hosts = HashMap::new();
        hosts.insert(Self::ROOT.to_string(), Vec::new());
        Self {
            templates: BTreeMap::new(),
            hosts,
            root: Self::ROOT.to_string(),
        }
    }

    /// A surface carrying the three templates the board needs.
    pub fn new() -> Self {
        let mut surface = Self::empty();
        surface.register_template(
            PROJECT_INPUT_TEMPLATE,
            Element::new(PROJECT_INPUT_TEMPLATE)
                .with_slot("title")
                .with_slot("description")
                .with_slot("people"),
        );
        surface.register_template(
            PROJECT_LIST_TEMPLATE,
            Element::new(PROJECT_LIST_TEMPLATE).with_slot("h2"),
        );
        surface.register_template(
            SINGLE_PROJECT_TEMPLATE,
            Element::new(SINGLE_PROJECT_TEMPLATE)
                .with_slot("h2")
                .with_slot("h3")
                .with_slot("p"),
        );
        surface
    }

    pub fn register_template(&mut self, name: impl Into<String>, prototype: Element) {
        self.templates.insert(name.into(), prototype);
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Indented outline of the whole tree, one element per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.render_host(&self.root, 0, &mut out);
        out
    }

    fn render_host(&self, host: &str, depth: usize, out: &mut String) {
        let Some(children) = self.hosts.get(host) else {
            return;
        };
        for el in children {
            let _ = write!(out, "{:indent$}[{}", "", el.template(), indent = depth * 2);
            if let Some(id) = el.id() {
                let _ = write!(out, "#{id}");
            }
            for class in el.classes() {
                let _ = write!(out, ".{class}");
            }
            out.push(']');
            let texts: Vec<&str> = el.slots().map(|(_, v)| v).filter(|v| !v.is_empty()).collect();
            if !texts.is_empty() {
                let _ = write!(out, " {}", texts.join(" | "));
            }
            out.push('\n');
            if let Some(id) = el.id() {
                self.render_host(id, depth + 1, out);
            }
        }
    }

    fn element_mut(&mut self, element_id: &str) -> Result<&mut Element, SurfaceError> {
        self.hosts
            .values_mut()
            .flat_map(|children| children.iter_mut())
            .find(|el| el.id() == Some(element_id))
            .ok_or_else(|| SurfaceError::UnknownElement(element_id.to_string()))
    }

    fn drop_host(&mut self, host: &str) {
        if let Some(children) = self.hosts.remove(host) {
            for child in children {
                if let Some(id) = child.id() {
                    self.drop_host(id);
                }
            }
        }
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    fn instantiate(&self, template: &str) -> Result<Element, SurfaceError> {
        self.templates
            .get(template)
            .cloned()
            .ok_or_else(|| SurfaceError::UnknownTemplate(template.to_string()))
    }

    fn insert(&mut self, host: &str, element: Element, at: InsertPosition) -> Result<(), SurfaceError> {
        let new_host = element.id().map(str::to_string);
        let children = self
            .hosts
            .get_mut(host)
            .ok_or_else(|| SurfaceError::UnknownHost(host.to_string()))?;
        match at {
            InsertPosition::AtStart => children.insert(0, element),
            InsertPosition::AtEnd => children.push(element),
        }
        if let Some(id) = new_host {
            self.hosts.entry(id).or_default();
        }
        Ok(())
    }

    fn clear(&mut self, host: &str) -> Result<(), SurfaceError> {
        let children = self
            .hosts
            .get_mut(host)
            .map(std::mem::take)
            .ok_or_else(|| SurfaceError::UnknownHost(host.to_string()))?;
        for child in children {
            if let Some(id) = child.id() {
                self.drop_host(id);
            }
        }
        Ok(())
    }

    fn set_text(&mut self, element_id: &str, slot: &str, text: &str) -> Result<(), SurfaceError> {
        self.element_mut(element_id)?.set_slot(slot, text);
        Ok(())
    }

    fn set_class(&mut self, element_id: &str, class: &str, on: bool) -> Result<(), SurfaceError> {
        self.element_mut(element_id)?.set_class(class, on);
        Ok(())
    }

    fn element(&self, element_id: &str) -> Option<&Element> {
        self.hosts
            .values()
            .flat_map(|children| children.iter())
            .find(|el| el.id() == Some(element_id))
    }

    fn children(&self, host: &str) -> Option<&[Element]> {
        self.hosts.get(host).map(Vec::as_slice)
    }
}
