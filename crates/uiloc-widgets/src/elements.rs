//! The standard element kinds.
//!
//! Each kind keeps its localizable state behind `parking_lot` cells so
//! setters work through `&self`, the way the engine's dispatch reaches
//! elements. Constructors hand out `Arc`s because that is the ownership
//! shape the registry tracks.

use parking_lot::RwLock;
use std::sync::Arc;
use uiloc::LocalizedElement;

/// Shared uid slot embedded in every standard kind.
#[derive(Debug, Default)]
pub struct UidSlot(RwLock<Option<String>>);

impl UidSlot {
    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }

    /// Stores `uid`, returning the previously attached value if any.
    pub fn set(&self, uid: impl Into<String>) -> Option<String> {
        self.0.write().replace(uid.into())
    }
}

/// Element kinds that expose their uid slot to the attach surface.
pub trait HasUidSlot {
    fn uid_slot(&self) -> &UidSlot;
}

macro_rules! impl_localized {
    ($kind:ty) => {
        impl HasUidSlot for $kind {
            fn uid_slot(&self) -> &UidSlot {
                &self.uid
            }
        }

        impl LocalizedElement for $kind {
            fn uid(&self) -> Option<String> {
                self.uid.get()
            }
        }
    };
}

/// A plain run of display text.
#[derive(Debug, Default)]
pub struct TextBlock {
    uid: UidSlot,
    text: RwLock<String>,
}

impl TextBlock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn text(&self) -> String {
        self.text.read().clone()
    }

    pub fn set_text(&self, value: &str) {
        *self.text.write() = value.to_string();
    }
}

impl_localized!(TextBlock);

/// An editable text field with a placeholder shown while empty.
#[derive(Debug, Default)]
pub struct TextBox {
    uid: UidSlot,
    text: RwLock<String>,
    placeholder: RwLock<String>,
}

impl TextBox {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn text(&self) -> String {
        self.text.read().clone()
    }

    pub fn set_text(&self, value: &str) {
        *self.text.write() = value.to_string();
    }

    pub fn placeholder(&self) -> String {
        self.placeholder.read().clone()
    }

    pub fn set_placeholder(&self, value: &str) {
        *self.placeholder.write() = value.to_string();
    }
}

impl_localized!(TextBox);

/// A labelled command button with an optional tooltip.
#[derive(Debug, Default)]
pub struct AppBarButton {
    uid: UidSlot,
    label: RwLock<String>,
    tooltip: RwLock<String>,
}

impl AppBarButton {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn label(&self) -> String {
        self.label.read().clone()
    }

    pub fn set_label(&self, value: &str) {
        *self.label.write() = value.to_string();
    }

    pub fn tooltip(&self) -> String {
        self.tooltip.read().clone()
    }

    pub fn set_tooltip(&self, value: &str) {
        *self.tooltip.write() = value.to_string();
    }
}

impl_localized!(AppBarButton);

/// A list or table column heading.
#[derive(Debug, Default)]
pub struct ColumnHeader {
    uid: UidSlot,
    content: RwLock<String>,
}

impl ColumnHeader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn content(&self) -> String {
        self.content.read().clone()
    }

    pub fn set_content(&self, value: &str) {
        *self.content.write() = value.to_string();
    }
}

impl_localized!(ColumnHeader);

/// The window title strip. Deliberately has no registered properties; its
/// title is only reachable through the default action, which is how hosts
/// localize chrome the property system cannot address.
#[derive(Debug, Default)]
pub struct TitleBar {
    uid: UidSlot,
    title: RwLock<String>,
}

impl TitleBar {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn title(&self) -> String {
        self.title.read().clone()
    }

    pub fn set_title(&self, value: &str) {
        *self.title.write() = value.to_string();
    }
}

impl_localized!(TitleBar);

/// A glyph button whose visible caption lives in a contained [`TextBlock`].
///
/// The default action routes values into the caption child, not the button;
/// the glyph itself is never localized.
#[derive(Debug)]
pub struct IconButton {
    uid: UidSlot,
    glyph: RwLock<String>,
    caption: Arc<TextBlock>,
}

impl IconButton {
    pub fn new(glyph: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            uid: UidSlot::default(),
            glyph: RwLock::new(glyph.into()),
            caption: TextBlock::new(),
        })
    }

    pub fn glyph(&self) -> String {
        self.glyph.read().clone()
    }

    /// The contained caption element.
    pub fn caption(&self) -> &Arc<TextBlock> {
        &self.caption
    }
}

impl_localized!(IconButton);
