//! Item tooltip rewriting.
//!
//! A `show_item` hover payload is turned into an [`Item`], passed through the display adapter
//! for one recipient, and its tag is replaced with the adapter's result. Every other payload
//! passes through untouched.

use crate::constants::EMPTY_TAG;
use crate::display::DisplayAdapter;
use crate::item::Item;
use crate::registry::ItemKindRegistry;
use chat_component::{HoverEvent, ShowItem};
use snbt::{Snbt, SnbtError};

/// Why a `show_item` payload was left as it was.
#[derive(Debug, thiserror::Error)]
pub enum HoverSkip {
    #[error("item id {0:?} does not resolve to a known kind")]
    UnresolvedKind(String),
    #[error("payload has no tag")]
    MissingTag,
    #[error("payload tag is not valid SNBT: {0}")]
    MalformedTag(#[from] SnbtError),
}

/// Rewrites hover payloads for a single recipient using a registry and a display adapter.
pub struct HoverPayloadRewriter<'a, R: ?Sized, A: ?Sized> {
    registry: &'a R,
    adapter: &'a A,
}

impl<'a, R, A> HoverPayloadRewriter<'a, R, A>
where
    R: ItemKindRegistry + ?Sized,
    A: DisplayAdapter + ?Sized,
{
    pub fn new(registry: &'a R, adapter: &'a A) -> Self {
        Self { registry, adapter }
    }

    /// Returns the personalised payload, or a copy of `hover` if it is not an item preview or
    /// any step fails. Never fails itself.
    pub fn rewrite(&self, hover: &HoverEvent, recipient: &A::Recipient) -> HoverEvent {
        let HoverEvent::ShowItem(show_item) = hover else {
            return hover.clone();
        };

        match self.try_rewrite_show_item(show_item, recipient) {
            Ok(updated) => HoverEvent::ShowItem(updated),
            Err(skip) => {
                tracing::debug!(item_id = %show_item.item_id, "item tooltip left unchanged: {skip}");
                hover.clone()
            }
        }
    }

    /// The fallible core of [`Self::rewrite`]. `item_id` and `count` are copied unchanged;
    /// only `tag` is replaced.
    pub fn try_rewrite_show_item(
        &self,
        show_item: &ShowItem,
        recipient: &A::Recipient,
    ) -> Result<ShowItem, HoverSkip> {
        let kind = self
            .registry
            .resolve(&show_item.item_id)
            .ok_or_else(|| HoverSkip::UnresolvedKind(show_item.item_id.clone()))?;
        let tag_text = show_item.tag.as_deref().ok_or(HoverSkip::MissingTag)?;
        let tag = Snbt::parse(tag_text)?;

        let item = Item {
            kind,
            count: show_item.count,
            tag: Some(tag),
        };
        let displayed = self.adapter.compute(&item, recipient);

        let tag = displayed
            .tag
            .map_or_else(|| EMPTY_TAG.to_owned(), |tag| Snbt::render(&tag));

        Ok(ShowItem {
            item_id: show_item.item_id.clone(),
            count: show_item.count,
            tag: Some(tag),
        })
    }
}
