//! Ephemeral item values handed to the display adapter.

use chatlens_types::ResourceKey;
use snbt::Compound;

/// Canonical item kind as resolved by an [`crate::registry::ItemKindRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemKind(ResourceKey);

impl ItemKind {
    pub fn new(key: ResourceKey) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &ResourceKey {
        &self.0
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item reconstructed from a tooltip payload.
///
/// Exists only for the duration of one hover rewrite and is never written back except
/// through its `tag`.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub count: i32,
    pub tag: Option<Compound>,
}
