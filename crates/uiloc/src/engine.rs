//! The engine: dictionary store, element registry, dispatch tables and the
//! language-switch protocol.
//!
//! One [`LocalizationEngine`] serves a whole UI tree. Hosts hold it behind
//! `Arc` and hand [`UidAttachHook`]s to the attach surface; elements are
//! only ever tracked weakly. The active dictionary sits behind an
//! [`ArcSwap`], so a language switch is a single atomic pointer assignment
//! and lookups never observe a half-switched state.

use arc_swap::ArcSwap;
use crate::actions::{ActionDispatchTable, LocalizationAction};
use crate::config::EngineConfig;
use crate::dictionary::LanguageDictionary;
use crate::element::LocalizedElement;
use crate::error::LocalizationError;
use crate::events::{LanguageChanged, UidAttachHook};
use crate::properties::PropertyTable;
use crate::registry::WeakElementRegistry;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Where the engine is in its lifecycle. Derived from the dictionary
/// collection and the active pointer, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum EngineState {
    /// No dictionaries yet; the sentinel empty dictionary is active.
    Uninitialized,
    /// Dictionaries registered, no language selected yet.
    Ready,
    /// A real language is active.
    LanguageActive,
}

type SharedDictionary = Arc<RwLock<LanguageDictionary>>;
type ChangeSubscriber = Arc<dyn Fn(&LanguageChanged) + Send + Sync>;

pub struct LocalizationEngine {
    config: EngineConfig,
    /// Registration-ordered collection, keyed by language tag. Entries are
    /// shared with `current`, so merging into the active language is
    /// observable without another switch.
    dictionaries: RwLock<IndexMap<String, SharedDictionary>>,
    current: ArcSwap<RwLock<LanguageDictionary>>,
    properties: RwLock<PropertyTable>,
    actions: RwLock<ActionDispatchTable>,
    registry: WeakElementRegistry,
    subscribers: Mutex<Vec<ChangeSubscriber>>,
}

impl LocalizationEngine {
    /// Creates an engine with no dictionaries and the sentinel active.
    pub fn new(config: EngineConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            dictionaries: RwLock::new(IndexMap::new()),
            current: ArcSwap::from_pointee(RwLock::new(LanguageDictionary::default())),
            properties: RwLock::new(PropertyTable::new()),
            actions: RwLock::new(ActionDispatchTable::new()),
            registry: WeakElementRegistry::new(),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The element registry, exposed for diagnostics and event sinks.
    pub fn registry(&self) -> &WeakElementRegistry {
        &self.registry
    }

    /// The handle the uid-attach surface uses to report new identifiers.
    /// Holds the engine weakly.
    pub fn attach_hook(self: &Arc<Self>) -> UidAttachHook {
        UidAttachHook::new(Arc::downgrade(self))
    }

    /// Registers an observer for completed language switches.
    ///
    /// Observers run synchronously on the switching task, in registration
    /// order, strictly after every live element has been re-localized.
    pub fn on_language_changed<F>(&self, subscriber: F)
    where
        F: Fn(&LanguageChanged) + Send + Sync + 'static,
    {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(subscriber));
    }

    /// Registers a property setter for elements of type `T`, see
    /// [`PropertyTable::register`].
    pub fn register_property<T, F>(&self, property: impl Into<String>, set: F)
    where
        T: LocalizedElement,
        F: Fn(&T, &str) + Send + Sync + 'static,
    {
        self.properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(property, set);
    }

    /// Appends a fallback action to the dispatch table.
    pub fn add_localization_action(&self, action: LocalizationAction) {
        let target = action.target_name();
        let mut actions = self.actions.write().unwrap_or_else(PoisonError::into_inner);
        actions.push(action);
        tracing::debug!(
            "localization action for {} appended ({} total)",
            target,
            actions.len()
        );
    }

    /// Adds `dictionary` to the collection, or merges it into the existing
    /// entry for the same language by appending every item.
    ///
    /// Merging never deduplicates: overlapping `(uid, property)` pairs
    /// accumulate and resolve through the last-wins lookup rule, so loading
    /// the same resource twice doubles its items. The before and after
    /// counts in the merge log are how to spot that. Merging into the
    /// active language is visible to lookups immediately.
    pub fn add_language_dictionary(&self, dictionary: LanguageDictionary) {
        let language = dictionary.language().to_string();
        if language.is_empty() {
            tracing::warn!("refusing dictionary with an empty language tag");
            return;
        }
        let mut dictionaries = self
            .dictionaries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match dictionaries.get(&language) {
            Some(existing) => {
                let mut existing = existing.write().unwrap_or_else(PoisonError::into_inner);
                let before = existing.item_count();
                let added = dictionary.item_count();
                existing.extend(dictionary);
                tracing::info!(
                    "merged {} items into language '{}' ({} -> {} items)",
                    added,
                    language,
                    before,
                    existing.item_count()
                );
            },
            None => {
                tracing::info!(
                    "registered language '{}' with {} items",
                    language,
                    dictionary.item_count()
                );
                dictionaries.insert(language, Arc::new(RwLock::new(dictionary)));
            },
        }
    }

    /// The registered language tags, in registration order.
    pub fn available_languages(&self) -> Result<Vec<String>, LocalizationError> {
        let dictionaries = self.dictionaries.read().map_err(|e| {
            let source = anyhow::anyhow!("language collection lock poisoned: {}", e);
            tracing::error!("available language query failed: {:#}", source);
            LocalizationError::Query { source }
        })?;
        Ok(dictionaries.keys().cloned().collect())
    }

    /// The active dictionary's language tag. Empty until the first
    /// successful switch.
    pub fn current_language(&self) -> String {
        self.current
            .load()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .language()
            .to_string()
    }

    /// Lifecycle state, derived on the fly.
    pub fn state(&self) -> EngineState {
        let has_dictionaries = !self
            .dictionaries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty();
        if !self.current_language().is_empty() {
            EngineState::LanguageActive
        } else if has_dictionaries {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    /// Last-wins single-value lookup in the current dictionary.
    ///
    /// An unknown uid is not an error: depending on
    /// [`EngineConfig::use_uid_when_not_found`] the uid itself or an empty
    /// string comes back.
    pub fn localized_string(&self, uid: &str) -> Result<String, LocalizationError> {
        let current = self.current.load();
        let dictionary = current.read().map_err(|e| {
            lookup_failure(
                uid,
                anyhow::anyhow!("current dictionary lock poisoned: {}", e),
            )
        })?;
        match dictionary.items(uid).and_then(|items| items.last()) {
            Some(item) => Ok(item.value().to_string()),
            None if self.config.use_uid_when_not_found => Ok(uid.to_string()),
            None => Ok(String::new()),
        }
    }

    /// Every value stored for `uid` in the current dictionary, in insertion
    /// order. The unknown-uid fallback mirrors [`Self::localized_string`]:
    /// a one-element vector carrying the uid, or an empty one.
    pub fn localized_strings(&self, uid: &str) -> Result<Vec<String>, LocalizationError> {
        let current = self.current.load();
        let dictionary = current.read().map_err(|e| {
            lookup_failure(
                uid,
                anyhow::anyhow!("current dictionary lock poisoned: {}", e),
            )
        })?;
        match dictionary.items(uid) {
            Some(items) => Ok(items.iter().map(|item| item.value().to_string()).collect()),
            None if self.config.use_uid_when_not_found => Ok(vec![uid.to_string()]),
            None => Ok(Vec::new()),
        }
    }

    /// Switches the active dictionary and re-localizes every live element.
    ///
    /// An unregistered tag completes as a no-op, so callers can probe
    /// languages speculatively. The switch itself is a single atomic
    /// assignment performed before any element is touched; on failure the
    /// engine stays wherever the protocol got to, elements already
    /// re-localized keep the new language and no event is published.
    pub async fn set_language(&self, language: &str) -> Result<(), LocalizationError> {
        let previous = self.current_language();

        let target = {
            let dictionaries = self.dictionaries.read().map_err(|e| {
                switch_failure(
                    &previous,
                    language,
                    anyhow::anyhow!("language collection lock poisoned: {}", e),
                )
            })?;
            match dictionaries.get(language) {
                Some(shared) => Arc::clone(shared),
                None => {
                    tracing::debug!(
                        "language '{}' is not registered, keeping '{}'",
                        language,
                        previous
                    );
                    return Ok(());
                },
            }
        };

        self.current.store(Arc::clone(&target));

        let elements = self.registry.snapshot().await;
        let relocalized = elements.len();
        {
            let dictionary = target.read().map_err(|e| {
                switch_failure(
                    &previous,
                    language,
                    anyhow::anyhow!("target dictionary lock poisoned: {}", e),
                )
            })?;
            for element in &elements {
                self.localize_element(element.as_ref(), &dictionary)
                    .map_err(|source| switch_failure(&previous, language, source))?;
            }
        }

        tracing::info!(
            "language changed '{}' -> '{}', {} elements re-localized",
            previous,
            language,
            relocalized
        );
        self.publish(&LanguageChanged {
            previous,
            current: language.to_string(),
        });
        Ok(())
    }

    /// Starts tracking `element` and localizes it immediately against the
    /// current dictionary, so elements constructed after a switch do not
    /// wait for the next one. The attach surface calls this once per
    /// element, through [`UidAttachHook`].
    pub fn register_element(
        &self,
        element: &Arc<dyn LocalizedElement>,
    ) -> Result<(), LocalizationError> {
        self.registry.add(element);
        let current = self.current.load();
        let dictionary = current.read().map_err(|e| {
            lookup_failure(
                &element.uid().unwrap_or_default(),
                anyhow::anyhow!("current dictionary lock poisoned: {}", e),
            )
        })?;
        self.localize_element(element.as_ref(), &dictionary)
            .map_err(|source| lookup_failure(&element.uid().unwrap_or_default(), source))
    }

    /// Applies every item stored under the element's uid: the registered
    /// setter when the property name resolves for the element's concrete
    /// type, otherwise every matching dispatch-table action.
    fn localize_element(
        &self,
        element: &dyn LocalizedElement,
        dictionary: &LanguageDictionary,
    ) -> anyhow::Result<()> {
        let Some(uid) = element.uid() else {
            return Ok(());
        };
        let Some(items) = dictionary.items(&uid) else {
            tracing::trace!(
                "no items for uid '{}' in language '{}'",
                uid,
                dictionary.language()
            );
            return Ok(());
        };
        let type_id = element.runtime_type();
        let properties = self
            .properties
            .read()
            .map_err(|e| anyhow::anyhow!("property table lock poisoned: {}", e))?;
        let actions = self
            .actions
            .read()
            .map_err(|e| anyhow::anyhow!("action table lock poisoned: {}", e))?;
        for item in items {
            match properties.resolve(type_id, item.property()) {
                Some(setter) => setter(element, item.value()),
                None => {
                    let matched = actions.apply_all(element, item.value())?;
                    if matched == 0 {
                        tracing::warn!(
                            "value for uid '{}' not applied: no property '{}' and no action for {}",
                            uid,
                            item.property(),
                            element.type_name()
                        );
                    }
                },
            }
        }
        Ok(())
    }

    fn publish(&self, event: &LanguageChanged) {
        // invoked outside the lock so an observer may register further
        // observers
        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in subscribers {
            (*subscriber)(event);
        }
    }
}

fn switch_failure(previous: &str, target: &str, source: anyhow::Error) -> LocalizationError {
    tracing::error!(
        "language switch '{}' -> '{}' failed: {:#}",
        previous,
        target,
        source
    );
    LocalizationError::SetLanguage {
        previous: previous.to_string(),
        target: target.to_string(),
        source,
    }
}

fn lookup_failure(uid: &str, source: anyhow::Error) -> LocalizationError {
    tracing::error!("lookup for uid '{}' failed: {:#}", uid, source);
    LocalizationError::Lookup {
        uid: uid.to_string(),
        source,
    }
}
