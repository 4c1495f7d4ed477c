//! Per-recipient display computation.

use crate::item::Item;
use chatlens_types::Recipient;
use snbt::Compound;

/// Computes how an item should be presented to a particular recipient.
///
/// `compute` receives the item by reference and returns a new value; the input is never
/// modified. Implementations may read recipient-specific state but are shared between
/// concurrent rewrites, so any such state must be safe for concurrent reads.
pub trait DisplayAdapter: Send + Sync {
    /// Identity of the player a message is personalised for. Opaque to the rewrite pipeline.
    type Recipient: ?Sized;

    fn compute(&self, item: &Item, recipient: &Self::Recipient) -> Item;
}

impl<T: DisplayAdapter + ?Sized> DisplayAdapter for &T {
    type Recipient = T::Recipient;

    fn compute(&self, item: &Item, recipient: &Self::Recipient) -> Item {
        (**self).compute(item, recipient)
    }
}

impl<T: DisplayAdapter + ?Sized> DisplayAdapter for std::sync::Arc<T> {
    type Recipient = T::Recipient;

    fn compute(&self, item: &Item, recipient: &Self::Recipient) -> Item {
        (**self).compute(item, recipient)
    }
}

/// Writes the recipient's name into the item tag under a fixed key.
///
/// An existing value under that key is replaced, so applying the adapter twice gives the
/// same tag as applying it once.
#[derive(Clone, Debug)]
pub struct StampAdapter {
    key: String,
}

impl StampAdapter {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl DisplayAdapter for StampAdapter {
    type Recipient = Recipient;

    fn compute(&self, item: &Item, recipient: &Recipient) -> Item {
        let mut displayed = item.clone();
        displayed
            .tag
            .get_or_insert_with(Compound::new)
            .insert(self.key.as_str(), recipient.name());
        displayed
    }
}
