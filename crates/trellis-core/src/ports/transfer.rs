//! DataTransfer port - the native drag transfer surface.

/// Effects a drag source may permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// Typed key/value payload carried by one drag operation.
///
/// Keys are media types ("text/plain"). Values are plain strings; nothing
/// structured travels through a transfer.
pub trait DataTransfer {
    fn set_data(&mut self, media_type: &str, value: &str);

    fn get_data(&self, media_type: &str) -> Option<String>;

    /// Declared media types, in the order they were first set.
    fn types(&self) -> Vec<String>;

    fn set_effect_allowed(&mut self, effect: DropEffect);

    fn effect_allowed(&self) -> DropEffect;
}
