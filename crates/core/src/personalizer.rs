//! Whole-message personalisation: wire bytes in, wire bytes out.

use crate::config::CoreConfig;
use crate::display::{DisplayAdapter, StampAdapter};
use crate::registry::{ItemKindRegistry, StaticItemRegistry};
use crate::rewrite::ComponentRewriter;
use chat_component::{ChatComponent, ChatResult, Component};

/// Owns the collaborators needed to personalise outgoing chat messages.
///
/// A personaliser holds no per-message state and can be shared between threads; every call
/// decodes (or reads) its own tree and returns a fresh copy.
#[derive(Clone, Debug)]
pub struct MessagePersonalizer<R, A> {
    registry: R,
    adapter: A,
}

impl<R, A> MessagePersonalizer<R, A>
where
    R: ItemKindRegistry,
    A: DisplayAdapter,
{
    pub fn new(registry: R, adapter: A) -> Self {
        Self { registry, adapter }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Rewrite an already decoded tree for one recipient.
    pub fn personalize_component(
        &self,
        component: &Component,
        recipient: &A::Recipient,
    ) -> Component {
        ComponentRewriter::new(&self.registry, &self.adapter).rewrite(component, recipient)
    }

    /// Decode, rewrite and re-encode a message.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `bytes` is not a valid component; nothing is rewritten in
    /// that case.
    pub fn try_personalize(&self, bytes: &[u8], recipient: &A::Recipient) -> ChatResult<Vec<u8>> {
        let component = ChatComponent::decode(bytes)?;
        let rewritten = self.personalize_component(&component, recipient);
        Ok(ChatComponent::encode(&rewritten))
    }

    /// Like [`Self::try_personalize`], but a message that cannot be decoded is returned
    /// exactly as given.
    pub fn personalize(&self, bytes: &[u8], recipient: &A::Recipient) -> Vec<u8> {
        match self.try_personalize(bytes, recipient) {
            Ok(rewritten) => rewritten,
            Err(err) => {
                tracing::warn!("chat message left unmodified: {}", err);
                bytes.to_vec()
            }
        }
    }
}

impl MessagePersonalizer<StaticItemRegistry, StampAdapter> {
    /// Build the configured registry and stamping adapter.
    pub fn from_config(config: &CoreConfig) -> Self {
        let registry = StaticItemRegistry::new(config.item_kinds().iter().cloned());
        tracing::debug!(
            "personaliser ready with {} item kinds, stamp key {:?}",
            registry.len(),
            config.stamp_key()
        );
        Self::new(registry, StampAdapter::new(config.stamp_key()))
    }
}
