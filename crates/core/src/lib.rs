//! # Chatlens Core
//!
//! Per-recipient personalisation of chat messages.
//!
//! This crate walks a decoded text component tree and rewrites every item tooltip
//! (`show_item` hover payload) so that it shows the item as a given recipient would see it:
//! - [`ItemKindRegistry`] resolves the payload's item id to a known kind
//! - [`DisplayAdapter`] computes the per-recipient view of the item
//! - [`ComponentRewriter`] performs the depth-first, copy-on-rewrite traversal
//! - [`MessagePersonalizer`] wraps decode, rewrite and encode for whole messages
//!
//! **No transport concerns**: intercepting outgoing packets and delivering the rewritten
//! bytes belong to the host integration, not to this crate.

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod hover;
pub mod item;
pub mod personalizer;
pub mod registry;
pub mod rewrite;

#[cfg(test)]
mod test_support;

pub use config::{resolve_config_path, CoreConfig};
pub use display::{DisplayAdapter, StampAdapter};
pub use error::{CoreError, CoreResult};
pub use hover::{HoverPayloadRewriter, HoverSkip};
pub use item::{Item, ItemKind};
pub use personalizer::MessagePersonalizer;
pub use registry::{normalise_item_id, ItemKindRegistry, StaticItemRegistry};
pub use rewrite::ComponentRewriter;

pub use chat_component;
