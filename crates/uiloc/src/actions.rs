//! Fallback appliers for values no registered property setter can place.
//!
//! Actions are keyed by the element's exact runtime type and run in the
//! order they were appended. Every matching action sees the value, so a
//! custom action stacks on top of a default one instead of replacing it.

use crate::element::LocalizedElement;
use std::any::{TypeId, type_name};

type ApplyFn = Box<dyn Fn(&dyn LocalizedElement, &str) -> anyhow::Result<()> + Send + Sync>;

/// One fallback applier, bound to a concrete element type.
///
/// The applier receives the raw localized value and decides where it lands:
/// a contained child, a window title, anything without a settable property.
/// Appliers may parse the value, so they are fallible.
pub struct LocalizationAction {
    target: TypeId,
    target_name: &'static str,
    apply: ApplyFn,
}

impl LocalizationAction {
    /// Creates an action applying values to elements of type `T`.
    pub fn new<T, F>(apply: F) -> Self
    where
        T: LocalizedElement,
        F: Fn(&T, &str) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            target: TypeId::of::<T>(),
            target_name: type_name::<T>(),
            apply: Box::new(move |element, value| match element.downcast_ref::<T>() {
                Some(element) => apply(element, value),
                None => Ok(()),
            }),
        }
    }

    /// The concrete type this action targets.
    pub fn target(&self) -> TypeId {
        self.target
    }

    pub fn target_name(&self) -> &'static str {
        self.target_name
    }
}

/// Append-only, insertion-ordered collection of [`LocalizationAction`]s.
#[derive(Default)]
pub struct ActionDispatchTable {
    entries: Vec<LocalizationAction>,
}

impl ActionDispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action. There is no removal.
    pub fn push(&mut self, action: LocalizationAction) {
        self.entries.push(action);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every action whose target is the element's exact runtime type,
    /// in insertion order, and returns how many matched.
    ///
    /// The first applier failure aborts the walk and surfaces the error.
    pub fn apply_all(
        &self,
        element: &dyn LocalizedElement,
        value: &str,
    ) -> anyhow::Result<usize> {
        let type_id = element.runtime_type();
        let mut matched = 0;
        for entry in &self.entries {
            if entry.target == type_id {
                (entry.apply)(element, value)?;
                matched += 1;
            }
        }
        Ok(matched)
    }
}
