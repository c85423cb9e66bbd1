#![doc = include_str!("../README.md")]

pub mod actions;
pub mod config;
pub mod dictionary;
pub mod element;
pub mod engine;
pub mod error;
pub mod events;
pub mod properties;
pub mod registry;

pub use actions::{ActionDispatchTable, LocalizationAction};
pub use config::EngineConfig;
pub use dictionary::{LanguageDictionary, LocalizationItem};
pub use element::LocalizedElement;
pub use engine::{EngineState, LocalizationEngine};
pub use error::LocalizationError;
pub use events::{LanguageChanged, UidAttachHook};
pub use properties::{PropertySetter, PropertyTable};
pub use registry::{RegistryEvent, WeakElementRegistry};
