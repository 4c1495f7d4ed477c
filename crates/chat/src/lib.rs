//! Chat wire/boundary support.
//!
//! This crate translates between the JSON text-component wire format used by the host chat
//! protocol and an owned, acyclic component tree ([`Component`]).
//!
//! This crate focuses on:
//! - the domain tree (content, style, hover payloads)
//! - decoding with path-annotated errors
//! - infallible encoding in the modern `contents` hover form
//!
//! Round trips are semantic rather than byte-identical: arrays and primitive shorthands are
//! normalised to objects, and legacy hover `value` payloads are re-emitted as `contents`.
//! Hovers that cannot be interpreted are carried through as [`HoverEvent::Opaque`] in the
//! field they arrived in.

pub mod component;
mod legacy;
mod wire;

pub use component::{
    ClickEvent, Component, Content, HoverEvent, HoverPayload, NbtContent, NbtSource,
    OpaqueHover, Score, ShowEntity, ShowItem, Style, Translatable,
};

/// Errors returned by the `chat-component` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("component schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("invalid component at {path}: {reason}")]
    InvalidComponent { path: String, reason: String },

    #[error("empty component array at {path}")]
    EmptyArray { path: String },

    #[error("invalid hover event at {path}: {reason}")]
    InvalidHover { path: String, reason: String },
}

/// Type alias for Results that can fail with a [`ChatError`].
pub type ChatResult<T> = Result<T, ChatError>;

/// Text component codec operations.
///
/// This is a zero-sized type used for namespacing. All methods are associated functions.
pub struct ChatComponent;

impl ChatComponent {
    /// Decode a component from wire bytes.
    ///
    /// Schema problems are reported with a best-effort path (for example
    /// `$.extra[2].hoverEvent.contents`) to the failing element.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if:
    /// - the bytes are not a single JSON document,
    /// - any element cannot be read as a component,
    /// - a modern `show_item`, `show_entity` or `show_text` payload is malformed.
    ///
    /// Unknown hover actions and unreadable legacy item/entity payloads are not errors; they
    /// decode to [`HoverEvent::Opaque`].
    pub fn decode(bytes: &[u8]) -> ChatResult<Component> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let wire: wire::ComponentWire = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                let path = err.path().to_string();
                let source = err.into_inner();
                if source.is_syntax() || source.is_eof() {
                    return ChatError::InvalidJson(source);
                }
                ChatError::Schema {
                    path: wire::join_path(wire::ROOT, &path),
                    message: source.to_string(),
                }
            })?;
        deserializer.end()?;

        wire::wire_to_domain(wire, wire::ROOT)
    }

    /// Encode a component to wire bytes. Never fails.
    pub fn encode(component: &Component) -> Vec<u8> {
        Self::render(component).into_bytes()
    }

    /// Decode a component from JSON text.
    pub fn parse(json: &str) -> ChatResult<Component> {
        Self::decode(json.as_bytes())
    }

    /// Render a component as JSON text.
    pub fn render(component: &Component) -> String {
        wire::domain_to_wire(component).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "translate": "chat.type.text",
        "with": [
            {"text": "Steve", "color": "gold", "clickEvent": {"action": "suggest_command", "value": "/msg Steve "}},
            {
                "text": "[Blade]",
                "hoverEvent": {
                    "action": "show_item",
                    "contents": {"id": "minecraft:diamond_sword", "count": 1, "tag": "{Damage:3}"}
                }
            }
        ],
        "extra": [
            {"text": " look", "italic": true, "hoverEvent": {"action": "show_text", "contents": "hi"}},
            {"selector": "@p", "separator": {"text": ", "}},
            {"keybind": "key.jump"},
            {"score": {"name": "Steve", "objective": "kills"}},
            {"text": "", "hoverEvent": {"action": "show_entity", "contents": {"type": "minecraft:pig", "id": "0-0-0-0-1", "name": "Babe"}}}
        ]
    }"#;

    #[test]
    fn round_trips_sample_message() {
        let component = ChatComponent::parse(SAMPLE).expect("parse message");
        let encoded = ChatComponent::encode(&component);
        let reparsed = ChatComponent::decode(&encoded).expect("reparse message");
        assert_eq!(component, reparsed);
        assert_eq!(component.node_count(), 8);
    }

    #[test]
    fn legacy_and_modern_hover_decode_identically() {
        let legacy = r#"{"text": "x", "hoverEvent": {"action": "show_item",
            "value": {"text": "{id:\"minecraft:stone\",Count:2b,tag:{Damage:1}}"}}}"#;
        let modern = r#"{"text": "x", "hoverEvent": {"action": "show_item",
            "contents": {"id": "minecraft:stone", "count": 2, "tag": "{Damage:1}"}}}"#;

        let legacy = ChatComponent::parse(legacy).expect("legacy");
        let modern = ChatComponent::parse(modern).expect("modern");
        assert_eq!(legacy, modern);
        assert!(ChatComponent::render(&legacy).contains("\"contents\""));
    }

    #[test]
    fn malformed_json_is_reported_as_json_error() {
        let err = ChatComponent::decode(b"{\"text\": ").expect_err("truncated");
        assert!(matches!(err, ChatError::InvalidJson(_)));

        let err = ChatComponent::decode(b"\"a\" \"b\"").expect_err("trailing document");
        assert!(matches!(err, ChatError::InvalidJson(_)));
    }

    #[test]
    fn schema_error_paths_start_at_root() {
        let err = ChatComponent::parse(r#"{"text": "a", "extra": [{"text": 5}]}"#)
            .expect_err("text must be a string");
        match err {
            ChatError::Schema { path, .. } => assert_eq!(path, "$.extra[0].text"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
