//! The registered `(element type, property name) -> setter` map.
//!
//! This is the replacement for walking property metadata at runtime: toolkit
//! bindings register every localizable property once at startup and the
//! engine resolves item property names by exact match. Names that resolve to
//! nothing fall through to the action dispatch table.

use crate::element::LocalizedElement;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::any::TypeId;

/// A registered property write. Downcasts to its concrete element type and
/// stores the value; a type mismatch is a silent no-op.
pub type PropertySetter = Box<dyn Fn(&dyn LocalizedElement, &str) + Send + Sync>;

#[derive(Default)]
pub struct PropertyTable {
    setters: FxHashMap<TypeId, IndexMap<String, PropertySetter>>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a setter for `property` on elements of type `T`.
    ///
    /// A later registration for the same `(type, name)` pair replaces the
    /// earlier one.
    pub fn register<T, F>(&mut self, property: impl Into<String>, set: F)
    where
        T: LocalizedElement,
        F: Fn(&T, &str) + Send + Sync + 'static,
    {
        let setter: PropertySetter = Box::new(move |element, value| {
            if let Some(element) = element.downcast_ref::<T>() {
                set(element, value);
            }
        });
        self.setters
            .entry(TypeId::of::<T>())
            .or_default()
            .insert(property.into(), setter);
    }

    /// The setter registered under `(type_id, property)`, if any. The match
    /// is exact on both keys.
    pub fn resolve(&self, type_id: TypeId, property: &str) -> Option<&PropertySetter> {
        self.setters.get(&type_id)?.get(property)
    }

    /// Number of registered setters across all element types.
    pub fn len(&self) -> usize {
        self.setters.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}
