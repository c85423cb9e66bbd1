use std::any::{Any, TypeId};

/// A live UI element the engine can localize.
///
/// The UI tree owns its elements through `Arc`; the engine only ever holds
/// `Weak` handles to them, so dropping an element from the tree is enough to
/// retire it from localization. The `Any` supertrait is what lets setters
/// and actions dispatch on the element's concrete type.
pub trait LocalizedElement: Any + Send + Sync {
    /// The attached identifier, if one has been set yet.
    fn uid(&self) -> Option<String>;

    /// Concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name_of_val(self)
    }
}

impl dyn LocalizedElement {
    /// The element's concrete runtime type.
    ///
    /// Goes through `Any` so the id is the implementor's, not the trait
    /// object's.
    pub fn runtime_type(&self) -> TypeId {
        (self as &dyn Any).type_id()
    }

    /// Downcasts to a concrete element type.
    pub fn downcast_ref<T: LocalizedElement>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
