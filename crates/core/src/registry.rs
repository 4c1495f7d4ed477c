//! Item kind resolution.

use crate::item::ItemKind;
use chatlens_types::ResourceKey;
use std::collections::HashSet;

/// Resolves the textual item identifier found in a tooltip to a canonical kind.
///
/// Implementations are shared between concurrent rewrites and must not require mutation.
pub trait ItemKindRegistry: Send + Sync {
    /// Returns `None` when the identifier does not name a known kind.
    fn resolve(&self, item_id: &str) -> Option<ItemKind>;
}

impl<T: ItemKindRegistry + ?Sized> ItemKindRegistry for &T {
    fn resolve(&self, item_id: &str) -> Option<ItemKind> {
        (**self).resolve(item_id)
    }
}

impl<T: ItemKindRegistry + ?Sized> ItemKindRegistry for std::sync::Arc<T> {
    fn resolve(&self, item_id: &str) -> Option<ItemKind> {
        (**self).resolve(item_id)
    }
}

/// Lenient form of an item identifier: trimmed, lowercased, whitespace runs replaced by `_`.
///
/// `"Minecraft:Diamond Sword"` becomes `"minecraft:diamond_sword"`.
pub fn normalise_item_id(item_id: &str) -> String {
    item_id
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// A fixed set of known item kinds.
#[derive(Clone, Debug, Default)]
pub struct StaticItemRegistry {
    kinds: HashSet<ResourceKey>,
}

impl StaticItemRegistry {
    pub fn new(kinds: impl IntoIterator<Item = ResourceKey>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl ItemKindRegistry for StaticItemRegistry {
    fn resolve(&self, item_id: &str) -> Option<ItemKind> {
        let key = ResourceKey::parse(normalise_item_id(item_id)).ok()?;
        self.kinds.contains(&key).then(|| ItemKind::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StaticItemRegistry {
        StaticItemRegistry::new(
            ["stone", "diamond_sword", "eco:talisman"]
                .into_iter()
                .map(|k| ResourceKey::parse(k).expect("valid key")),
        )
    }

    #[test]
    fn resolves_with_and_without_namespace() {
        let registry = registry();
        let kind = registry.resolve("minecraft:stone").expect("namespaced");
        assert_eq!(kind.to_string(), "minecraft:stone");
        assert_eq!(registry.resolve("stone"), Some(kind));
        assert!(registry.resolve("eco:talisman").is_some());
        assert!(registry.resolve("talisman").is_none());
    }

    #[test]
    fn resolution_is_lenient_about_case_and_spacing() {
        let registry = registry();
        assert_eq!(normalise_item_id("  Diamond   Sword "), "diamond_sword");
        assert!(registry.resolve("Minecraft:Diamond Sword").is_some());
        assert!(registry.resolve("STONE").is_some());
    }

    #[test]
    fn unknown_or_malformed_ids_do_not_resolve() {
        let registry = registry();
        assert!(registry.resolve("unknown_material").is_none());
        assert!(registry.resolve("").is_none());
        assert!(registry.resolve("stone!").is_none());
    }

    #[test]
    fn references_and_arcs_delegate() {
        fn resolves_stone(registry: impl ItemKindRegistry) -> bool {
            registry.resolve("stone").is_some()
        }

        let shared = std::sync::Arc::new(registry());
        assert!(resolves_stone(&*shared));
        assert!(resolves_stone(shared.clone()));
        assert_eq!(shared.len(), 3);
    }
}
