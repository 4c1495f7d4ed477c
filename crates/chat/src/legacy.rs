//! Legacy (`value`) hover event payloads.
//!
//! Before `contents` existed, item and entity tooltips were sent as a text component whose
//! literal text is SNBT, e.g. `{id:"minecraft:stone",Count:1b,tag:{Damage:2}}`. Readable
//! payloads decode into the same domain types as modern ones and are re-encoded as `contents`.
//! Anything else is kept as an opaque `value` hover so it reaches the client untouched.

use crate::component::{Component, HoverEvent, HoverPayload, OpaqueHover, ShowEntity, ShowItem};
use crate::wire::{from_value, wire_to_domain, ComponentWire};
use crate::{ChatComponent, ChatError, ChatResult};
use serde_json::Value;
use snbt::{Compound, Snbt};

/// Only a malformed `show_text` component is an error; the client drops unreadable item and
/// entity payloads without failing the message.
pub(crate) fn hover_from_value(action: &str, raw: Value, path: &str) -> ChatResult<HoverEvent> {
    let read = match action {
        "show_text" => {
            let wire: ComponentWire = from_value(raw, path)?;
            return Ok(HoverEvent::ShowText(Box::new(wire_to_domain(wire, path)?)));
        }
        "show_item" => payload_compound(raw.clone(), path)
            .and_then(|compound| show_item_from_compound(&compound, path))
            .map(HoverEvent::ShowItem),
        "show_entity" => payload_compound(raw.clone(), path)
            .and_then(|compound| show_entity_from_compound(&compound, path))
            .map(HoverEvent::ShowEntity),
        _ => return Ok(opaque(action, raw)),
    };
    Ok(read.unwrap_or_else(|_| opaque(action, raw)))
}

fn opaque(action: &str, raw: Value) -> HoverEvent {
    HoverEvent::Opaque(OpaqueHover {
        action: action.to_owned(),
        payload: HoverPayload::Value(raw),
    })
}

fn payload_compound(raw: Value, path: &str) -> ChatResult<Compound> {
    let wire: ComponentWire = from_value(raw, path)?;
    let text = wire_to_domain(wire, path)?.plain_text();
    Snbt::parse(&text).map_err(|err| ChatError::InvalidHover {
        path: path.to_owned(),
        reason: err.to_string(),
    })
}

fn required_string<'a>(compound: &'a Compound, key: &str, path: &str) -> ChatResult<&'a str> {
    compound
        .get(key)
        .and_then(|tag| tag.as_str())
        .ok_or_else(|| ChatError::InvalidHover {
            path: path.to_owned(),
            reason: format!("legacy payload is missing string field {key:?}"),
        })
}

fn show_item_from_compound(compound: &Compound, path: &str) -> ChatResult<ShowItem> {
    let item_id = required_string(compound, "id", path)?;
    let count = compound
        .get("Count")
        .and_then(|tag| tag.as_i64())
        .map_or(1, |count| {
            i32::try_from(count).unwrap_or(if count < 0 { i32::MIN } else { i32::MAX })
        });
    let tag = compound.get_compound("tag").map(Snbt::render);

    Ok(ShowItem::new(item_id, count, tag))
}

fn show_entity_from_compound(compound: &Compound, path: &str) -> ChatResult<ShowEntity> {
    let entity_type = required_string(compound, "type", path)?;
    let id = required_string(compound, "id", path)?;
    let name = compound
        .get("name")
        .and_then(|tag| tag.as_str())
        .map(|json| ChatComponent::parse(json).map(Box::new))
        .transpose()?;

    Ok(ShowEntity {
        entity_type: entity_type.to_owned(),
        id: id.to_owned(),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_opaque(hover: &HoverEvent, action: &str, raw: &Value) {
        match hover {
            HoverEvent::Opaque(OpaqueHover {
                action: kept_action,
                payload: HoverPayload::Value(kept),
            }) => {
                assert_eq!(kept_action, action);
                assert_eq!(kept, raw);
            }
            other => panic!("expected opaque value hover, got {other:?}"),
        }
    }

    #[test]
    fn legacy_item_payload() {
        let raw = json!({"text": r#"{id:"minecraft:stone",Count:5b,tag:{Damage:2}}"#});
        let hover = hover_from_value("show_item", raw, "$").expect("legacy item");
        assert_eq!(
            hover,
            HoverEvent::ShowItem(ShowItem::new(
                "minecraft:stone",
                5,
                Some("{Damage:2}".into())
            ))
        );
    }

    #[test]
    fn legacy_item_text_may_be_split_across_children() {
        let raw = json!([r#"{id:"minecraft:"#, r#"dirt"}"#]);
        let hover = hover_from_value("show_item", raw, "$").expect("split legacy item");
        assert_eq!(
            hover,
            HoverEvent::ShowItem(ShowItem::new("minecraft:dirt", 1, None))
        );
    }

    #[test]
    fn legacy_item_without_id_is_kept_opaque() {
        let raw = json!("{Count:1b}");
        let hover = hover_from_value("show_item", raw.clone(), "$").expect("missing id");
        assert_opaque(&hover, "show_item", &raw);
    }

    #[test]
    fn legacy_item_with_bad_snbt_is_kept_opaque() {
        let raw = json!({"text": r#"{id:"stone",tag:{Damage:"#});
        let hover =
            hover_from_value("show_item", raw.clone(), "$.hoverEvent.value").expect("bad snbt");
        assert_opaque(&hover, "show_item", &raw);
    }

    #[test]
    fn unknown_legacy_action_is_kept_opaque() {
        let raw = json!("achievement.openInventory");
        let hover = hover_from_value("show_achievement", raw.clone(), "$").expect("achievement");
        assert_opaque(&hover, "show_achievement", &raw);
        assert_eq!(hover.action(), "show_achievement");
    }

    #[test]
    fn malformed_legacy_text_is_rejected() {
        let err = hover_from_value("show_text", json!([]), "$.hoverEvent.value")
            .expect_err("empty array");
        match err {
            ChatError::EmptyArray { path } => assert_eq!(path, "$.hoverEvent.value"),
            other => panic!("expected EmptyArray error, got {other:?}"),
        }
    }

    #[test]
    fn legacy_entity_payload_parses_json_name() {
        let raw = json!(r#"{type:"minecraft:pig",id:"0-0-0-0-1",name:'{"text":"Babe"}'}"#);
        let hover = hover_from_value("show_entity", raw, "$").expect("legacy entity");
        assert_eq!(
            hover,
            HoverEvent::ShowEntity(ShowEntity {
                entity_type: "minecraft:pig".into(),
                id: "0-0-0-0-1".into(),
                name: Some(Box::new(Component::text("Babe"))),
            })
        );
    }
}
