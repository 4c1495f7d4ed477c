//! Fixtures shared by the unit tests of this crate.

use crate::display::DisplayAdapter;
use crate::item::Item;
use crate::registry::StaticItemRegistry;
use chat_component::{HoverEvent, ShowItem};
use chatlens_types::ResourceKey;
use snbt::Compound;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stamps `owner:<recipient>` into every tag and counts its invocations.
#[derive(Default)]
pub(crate) struct RecordingAdapter {
    calls: AtomicUsize,
}

impl RecordingAdapter {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DisplayAdapter for RecordingAdapter {
    type Recipient = str;

    fn compute(&self, item: &Item, recipient: &str) -> Item {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut displayed = item.clone();
        displayed
            .tag
            .get_or_insert_with(Compound::new)
            .insert("owner", recipient);
        displayed
    }
}

/// Drops the tag entirely.
pub(crate) struct StrippingAdapter;

impl DisplayAdapter for StrippingAdapter {
    type Recipient = str;

    fn compute(&self, item: &Item, _recipient: &str) -> Item {
        Item {
            tag: None,
            ..item.clone()
        }
    }
}

pub(crate) fn registry() -> StaticItemRegistry {
    StaticItemRegistry::new(
        ["stone", "diamond_sword"]
            .into_iter()
            .map(|k| ResourceKey::parse(k).expect("valid key")),
    )
}

pub(crate) fn show_item(item_id: &str, count: i32, tag: Option<&str>) -> HoverEvent {
    HoverEvent::ShowItem(ShowItem::new(item_id, count, tag.map(str::to_owned)))
}
