use crate::element::LocalizedElement;
use crate::engine::LocalizationEngine;
use crate::error::LocalizationError;
use std::sync::{Arc, Weak};

/// Published after a language switch completes. Observers see it only once
/// every live element has been re-localized against the new dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    /// Tag that was active before the switch. Empty for the first switch,
    /// when the sentinel dictionary was still active.
    pub previous: String,
    /// Tag that is active now.
    pub current: String,
}

/// Inbound notification handle for the uid-attach surface.
///
/// The attach layer holds one of these and calls [`UidAttachHook::uid_attached`]
/// whenever it stores an identifier on an element. The hook keeps only a
/// weak engine reference: once the engine is gone, notifications degrade to
/// no-ops instead of keeping it alive.
#[derive(Clone)]
pub struct UidAttachHook {
    engine: Weak<LocalizationEngine>,
}

impl UidAttachHook {
    pub(crate) fn new(engine: Weak<LocalizationEngine>) -> Self {
        Self { engine }
    }

    /// Reports that `element` acquired a uid.
    ///
    /// Forwards to [`LocalizationEngine::register_element`]: the element is
    /// tracked and localized immediately against the current dictionary.
    pub fn uid_attached(
        &self,
        element: &Arc<dyn LocalizedElement>,
    ) -> Result<(), LocalizationError> {
        match self.engine.upgrade() {
            Some(engine) => engine.register_element(element),
            None => {
                tracing::debug!("uid attached after engine teardown, ignoring");
                Ok(())
            },
        }
    }
}
