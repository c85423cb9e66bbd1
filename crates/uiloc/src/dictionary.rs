//! Per-language storage of localization items.
//!
//! A [`LanguageDictionary`] keys its items by uid and is append-only:
//! loading the same resource twice, or two overlapping resources, stacks
//! their items instead of replacing anything. Single-value lookups resolve
//! the stack with a last-wins rule, so later additions act as overrides.

use indexmap::IndexMap;

/// One localization entry: the uid it belongs to, the name of the property
/// it targets and the value to write.
///
/// An empty `property` is valid and simply never matches a registered
/// setter, which routes the item to the action dispatch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationItem {
    uid: String,
    property: String,
    value: String,
}

impl LocalizationItem {
    pub fn new(
        uid: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// All localization items for one language, grouped by uid.
///
/// The default instance is the sentinel dictionary: empty language tag, no
/// items. The engine keeps it active until the first successful language
/// switch so lookups never need a "no language yet" case.
#[derive(Debug, Clone, Default)]
pub struct LanguageDictionary {
    language: String,
    items: IndexMap<String, Vec<LocalizationItem>>,
}

impl LanguageDictionary {
    /// Creates an empty dictionary for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            items: IndexMap::new(),
        }
    }

    /// The language tag this dictionary belongs to.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Appends `item` under its own uid, creating the sequence when absent.
    /// Nothing is ever overwritten.
    pub fn add_item(&mut self, item: LocalizationItem) {
        self.items.entry(item.uid.clone()).or_default().push(item);
    }

    /// The items stored under `uid`, in insertion order.
    ///
    /// `None` means the uid is unknown here; a present uid always carries at
    /// least one item.
    pub fn items(&self, uid: &str) -> Option<&[LocalizationItem]> {
        self.items.get(uid).map(Vec::as_slice)
    }

    /// Uids known to this dictionary, in first-seen order.
    pub fn uids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Total item count across all uids. Used by merge diagnostics.
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends every item of `other`, in `other`'s order.
    ///
    /// Overlapping `(uid, property)` pairs accumulate rather than replace;
    /// the last-wins lookup rule is what resolves them. Merging the same
    /// source twice therefore doubles its items.
    pub fn extend(&mut self, other: LanguageDictionary) {
        for (_, items) in other.items {
            for item in items {
                self.add_item(item);
            }
        }
    }
}
