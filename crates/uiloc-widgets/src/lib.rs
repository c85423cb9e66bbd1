#![doc = include_str!("../README.md")]

mod elements;

pub use elements::{
    AppBarButton, ColumnHeader, HasUidSlot, IconButton, TextBlock, TextBox, TitleBar, UidSlot,
};

use std::sync::Arc;
use uiloc::{
    EngineConfig, LocalizationAction, LocalizationEngine, LocalizationError, LocalizedElement,
    UidAttachHook,
};

/// Registers the settable properties of the standard kinds on `engine`.
///
/// The names are the ones dictionary items carry in their `property` field.
/// `TitleBar` and `IconButton` register nothing here on purpose; they are
/// covered by [`default_actions`].
pub fn register_standard_properties(engine: &LocalizationEngine) {
    engine.register_property("Text", TextBlock::set_text);
    engine.register_property("Text", TextBox::set_text);
    engine.register_property("PlaceholderText", TextBox::set_placeholder);
    engine.register_property("Label", AppBarButton::set_label);
    engine.register_property("ToolTip", AppBarButton::set_tooltip);
    engine.register_property("Content", ColumnHeader::set_content);
}

/// The built-in fallback appliers, one per standard kind.
///
/// Each routes a value into the kind's primary text slot, which is what
/// makes items with unknown or empty property names land somewhere useful.
/// `IconButton` routes into its contained caption.
pub fn default_actions() -> Vec<LocalizationAction> {
    vec![
        LocalizationAction::new(|element: &TextBlock, value: &str| {
            element.set_text(value);
            Ok(())
        }),
        LocalizationAction::new(|element: &TextBox, value: &str| {
            element.set_text(value);
            Ok(())
        }),
        LocalizationAction::new(|element: &AppBarButton, value: &str| {
            element.set_label(value);
            Ok(())
        }),
        LocalizationAction::new(|element: &ColumnHeader, value: &str| {
            element.set_content(value);
            Ok(())
        }),
        LocalizationAction::new(|element: &TitleBar, value: &str| {
            element.set_title(value);
            Ok(())
        }),
        LocalizationAction::new(|element: &IconButton, value: &str| {
            element.caption().set_text(value);
            Ok(())
        }),
    ]
}

/// Builds an engine wired for the standard kinds: properties registered and,
/// unless [`EngineConfig::disable_default_actions`] is set, the default
/// action set appended.
pub fn localization_engine(config: EngineConfig) -> Arc<LocalizationEngine> {
    let skip_defaults = config.disable_default_actions;
    let engine = LocalizationEngine::new(config);
    register_standard_properties(&engine);
    if skip_defaults {
        tracing::debug!("default localization actions disabled by configuration");
    } else {
        for action in default_actions() {
            engine.add_localization_action(action);
        }
    }
    engine
}

/// Stores `uid` on `element` and reports it through `hook`, which tracks
/// the element and localizes it immediately.
///
/// Call it once per element, right after construction. Re-attaching replaces
/// the stored uid but is not reported again; the element keeps its single
/// registry entry and picks the new uid up on the next switch.
pub fn attach_uid<W>(
    element: &Arc<W>,
    uid: impl Into<String>,
    hook: &UidAttachHook,
) -> Result<(), LocalizationError>
where
    W: HasUidSlot + LocalizedElement,
{
    let uid = uid.into();
    if let Some(previous) = element.uid_slot().set(uid.clone()) {
        tracing::warn!("uid '{}' replaces '{}' on an attached element", uid, previous);
        return Ok(());
    }
    let element: Arc<dyn LocalizedElement> = element.clone();
    hook.uid_attached(&element)
}
