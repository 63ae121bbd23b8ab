//! In-memory [`DataTransfer`].

use crate::ports::{DataTransfer, DropEffect};

#[derive(Debug, Clone, Default)]
pub struct MemoryTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DropEffect,
}

impl MemoryTransfer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataTransfer for MemoryTransfer {
    fn set_data(&mut self, media_type: &str, value: &str) {
        match self.entries.iter_mut().find(|(ty, _)| ty == media_type) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((media_type.to_string(), value.to_string())),
        }
    }

    fn get_data(&self, media_type: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(ty, _)| ty == media_type)
            .map(|(_, v)| v.clone())
    }

    fn types(&self) -> Vec<String> {
        self.entries.iter().map(|(ty, _)| ty.clone()).collect()
    }

    fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }

    fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_data_overwrites_same_type() {
        let mut transfer = MemoryTransfer::new();
        transfer.set_data("text/plain", "a");
        transfer.set_data("text/html", "<b>a</b>");
        transfer.set_data("text/plain", "b");

        assert_eq!(transfer.get_data("text/plain").as_deref(), Some("b"));
        assert_eq!(transfer.types(), vec!["text/plain", "text/html"]);
    }

    #[test]
    fn empty_transfer_has_no_types() {
        let transfer = MemoryTransfer::new();
        assert!(transfer.types().is_empty());
        assert_eq!(transfer.get_data("text/plain"), None);
        assert_eq!(transfer.effect_allowed(), DropEffect::None);
    }
}
