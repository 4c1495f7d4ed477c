//! Component tree traversal.

use crate::display::DisplayAdapter;
use crate::hover::HoverPayloadRewriter;
use crate::registry::ItemKindRegistry;
use chat_component::{Component, Content, Translatable};

/// Produces a personalised copy of a component tree.
///
/// The traversal is post-order and depth first: translation arguments, then children, then
/// the node's own hover payload. The input tree is only read, so one decoded message can be
/// rewritten for many recipients. Tree shape and ordering are always preserved.
pub struct ComponentRewriter<'a, R: ?Sized, A: ?Sized> {
    hover: HoverPayloadRewriter<'a, R, A>,
}

impl<'a, R, A> ComponentRewriter<'a, R, A>
where
    R: ItemKindRegistry + ?Sized,
    A: DisplayAdapter + ?Sized,
{
    pub fn new(registry: &'a R, adapter: &'a A) -> Self {
        Self {
            hover: HoverPayloadRewriter::new(registry, adapter),
        }
    }

    pub fn rewrite(&self, component: &Component, recipient: &A::Recipient) -> Component {
        let content = match &component.content {
            Content::Translatable(translatable) => Content::Translatable(Translatable {
                key: translatable.key.clone(),
                fallback: translatable.fallback.clone(),
                args: self.rewrite_all(&translatable.args, recipient),
            }),
            other => other.clone(),
        };
        let children = self.rewrite_all(&component.children, recipient);

        let mut style = component.style.clone();
        if let Some(hover) = &component.style.hover_event {
            style.hover_event = Some(self.hover.rewrite(hover, recipient));
        }

        Component {
            content,
            style,
            children,
        }
    }

    fn rewrite_all(&self, components: &[Component], recipient: &A::Recipient) -> Vec<Component> {
        components
            .iter()
            .map(|component| self.rewrite(component, recipient))
            .collect()
    }
}
