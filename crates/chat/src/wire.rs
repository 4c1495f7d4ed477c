//! Wire types and translation helpers for JSON text components.
//!
//! Decoding goes through serde-derived wire structs so that `serde_path_to_error` can report
//! where a document stopped matching. Encoding builds a `serde_json::Value` directly, which
//! keeps it infallible.

use crate::component::{
    ClickEvent, Component, Content, HoverEvent, HoverPayload, NbtContent, NbtSource,
    OpaqueHover, Score, ShowEntity, ShowItem, Style, Translatable,
};
use crate::{legacy, ChatError, ChatResult};
use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Path label used for the document root.
pub(crate) const ROOT: &str = "$";

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Any JSON shape the client accepts as a component.
#[derive(Debug)]
pub(crate) enum ComponentWire {
    /// Strings, numbers and booleans all become literal text.
    Text(String),
    /// First element is the parent; the rest are appended to its children.
    Array(Vec<ComponentWire>),
    Object(Box<ObjectWire>),
}

impl<'de> Deserialize<'de> for ComponentWire {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ComponentWireVisitor)
    }
}

struct ComponentWireVisitor;

impl<'de> Visitor<'de> for ComponentWireVisitor {
    type Value = ComponentWire;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a text component (string, array or object)")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ComponentWire::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ComponentWire::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ComponentWire::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ComponentWire::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ComponentWire::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ComponentWire::Text(v.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ComponentWire::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        ObjectWire::deserialize(de::value::MapAccessDeserializer::new(map))
            .map(|object| ComponentWire::Object(Box::new(object)))
    }
}

/// Object form of a component. Unknown keys are ignored, as the client does.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ObjectWire {
    text: Option<String>,
    translate: Option<String>,
    fallback: Option<String>,
    with: Option<Vec<ComponentWire>>,
    keybind: Option<String>,
    score: Option<ScoreWire>,
    selector: Option<String>,
    separator: Option<ComponentWire>,
    nbt: Option<String>,
    interpret: Option<bool>,
    block: Option<String>,
    entity: Option<String>,
    storage: Option<String>,
    extra: Option<Vec<ComponentWire>>,

    color: Option<String>,
    font: Option<String>,
    bold: Option<bool>,
    italic: Option<bool>,
    underlined: Option<bool>,
    strikethrough: Option<bool>,
    obfuscated: Option<bool>,
    insertion: Option<String>,
    #[serde(rename = "clickEvent")]
    click_event: Option<ClickEventWire>,
    #[serde(rename = "hoverEvent")]
    hover_event: Option<HoverEventWire>,
}

#[derive(Debug, Deserialize)]
struct ScoreWire {
    name: String,
    objective: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClickEventWire {
    action: String,
    value: String,
}

/// Hover events carry either modern `contents` or a legacy `value` component.
///
/// Both are kept as raw JSON until the action is known.
#[derive(Debug, Deserialize)]
struct HoverEventWire {
    action: String,
    #[serde(default)]
    contents: Option<Value>,
    #[serde(default)]
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ShowItemWire {
    id: String,
    #[serde(default = "default_count")]
    count: i32,
    #[serde(default)]
    tag: Option<String>,
}

fn default_count() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
struct ShowEntityWire {
    #[serde(rename = "type")]
    entity_type: String,
    id: String,
    #[serde(default)]
    name: Option<ComponentWire>,
}

// ============================================================================
// Wire -> domain
// ============================================================================

pub(crate) fn join_path(base: &str, suffix: &str) -> String {
    if suffix.is_empty() || suffix == "." {
        base.to_owned()
    } else if suffix.starts_with('[') {
        format!("{base}{suffix}")
    } else {
        format!("{base}.{suffix}")
    }
}

/// Deserialize a raw JSON value, reporting failures relative to `path`.
pub(crate) fn from_value<T: DeserializeOwned>(value: Value, path: &str) -> ChatResult<T> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let inner_path = err.path().to_string();
        ChatError::Schema {
            path: join_path(path, &inner_path),
            message: err.into_inner().to_string(),
        }
    })
}

pub(crate) fn wire_to_domain(wire: ComponentWire, path: &str) -> ChatResult<Component> {
    match wire {
        ComponentWire::Text(text) => Ok(Component::text(text)),
        ComponentWire::Array(items) => {
            let mut items = items.into_iter().enumerate();
            let (_, first) = items.next().ok_or_else(|| ChatError::EmptyArray {
                path: path.to_owned(),
            })?;
            let mut parent = wire_to_domain(first, &format!("{path}[0]"))?;
            for (i, item) in items {
                parent
                    .children
                    .push(wire_to_domain(item, &format!("{path}[{i}]"))?);
            }
            Ok(parent)
        }
        ComponentWire::Object(object) => object_to_domain(*object, path),
    }
}

fn object_to_domain(wire: ObjectWire, path: &str) -> ChatResult<Component> {
    let ObjectWire {
        text,
        translate,
        fallback,
        with,
        keybind,
        score,
        selector,
        separator,
        nbt,
        interpret,
        block,
        entity,
        storage,
        extra,
        color,
        font,
        bold,
        italic,
        underlined,
        strikethrough,
        obfuscated,
        insertion,
        click_event,
        hover_event,
    } = wire;

    let separator = separator
        .map(|s| wire_to_domain(s, &format!("{path}.separator")).map(Box::new))
        .transpose()?;

    // Precedence follows the client: the first content key present wins.
    let content = if let Some(text) = text {
        Content::Text { text }
    } else if let Some(key) = translate {
        let args = with
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, arg)| wire_to_domain(arg, &format!("{path}.with[{i}]")))
            .collect::<ChatResult<Vec<_>>>()?;
        Content::Translatable(Translatable {
            key,
            fallback,
            args,
        })
    } else if let Some(score) = score {
        Content::Score(Score {
            name: score.name,
            objective: score.objective,
            value: score.value,
        })
    } else if let Some(selector) = selector {
        Content::Selector {
            selector,
            separator,
        }
    } else if let Some(keybind) = keybind {
        Content::Keybind { keybind }
    } else if let Some(nbt_path) = nbt {
        let source = match (block, entity, storage) {
            (Some(block), _, _) => NbtSource::Block(block),
            (None, Some(entity), _) => NbtSource::Entity(entity),
            (None, None, Some(storage)) => NbtSource::Storage(storage),
            (None, None, None) => {
                return Err(ChatError::InvalidComponent {
                    path: path.to_owned(),
                    reason: "nbt component needs a block, entity or storage source".into(),
                })
            }
        };
        Content::Nbt(NbtContent {
            path: nbt_path,
            interpret,
            separator,
            source,
        })
    } else {
        return Err(ChatError::InvalidComponent {
            path: path.to_owned(),
            reason: "object has no text, translate, score, selector, keybind or nbt key".into(),
        });
    };

    let children = extra
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, child)| wire_to_domain(child, &format!("{path}.extra[{i}]")))
        .collect::<ChatResult<Vec<_>>>()?;

    let hover_event = hover_event
        .map(|h| hover_to_domain(h, &format!("{path}.hoverEvent")))
        .transpose()?;

    Ok(Component {
        content,
        style: Style {
            color,
            font,
            bold,
            italic,
            underlined,
            strikethrough,
            obfuscated,
            insertion,
            click_event: click_event.map(|c| ClickEvent {
                action: c.action,
                value: c.value,
            }),
            hover_event,
        },
        children,
    })
}

fn hover_to_domain(wire: HoverEventWire, path: &str) -> ChatResult<HoverEvent> {
    match (wire.contents, wire.value) {
        (Some(contents), _) => {
            contents_to_domain(&wire.action, contents, &format!("{path}.contents"))
        }
        (None, Some(value)) => {
            legacy::hover_from_value(&wire.action, value, &format!("{path}.value"))
        }
        (None, None) => Err(ChatError::InvalidHover {
            path: path.to_owned(),
            reason: "hover event has neither contents nor value".into(),
        }),
    }
}

fn contents_to_domain(action: &str, contents: Value, path: &str) -> ChatResult<HoverEvent> {
    match action {
        "show_text" => {
            let wire: ComponentWire = from_value(contents, path)?;
            Ok(HoverEvent::ShowText(Box::new(wire_to_domain(wire, path)?)))
        }
        "show_item" => {
            if let Value::String(item_id) = contents {
                return Ok(HoverEvent::ShowItem(ShowItem::new(item_id, 1, None)));
            }
            let wire: ShowItemWire = from_value(contents, path)?;
            Ok(HoverEvent::ShowItem(ShowItem::new(
                wire.id, wire.count, wire.tag,
            )))
        }
        "show_entity" => {
            let wire: ShowEntityWire = from_value(contents, path)?;
            let name = wire
                .name
                .map(|n| wire_to_domain(n, &format!("{path}.name")).map(Box::new))
                .transpose()?;
            Ok(HoverEvent::ShowEntity(ShowEntity {
                entity_type: wire.entity_type,
                id: wire.id,
                name,
            }))
        }
        other => Ok(HoverEvent::Opaque(OpaqueHover {
            action: other.to_owned(),
            payload: HoverPayload::Contents(contents),
        })),
    }
}

// ============================================================================
// Domain -> wire
// ============================================================================

pub(crate) fn domain_to_wire(component: &Component) -> Value {
    let mut object = Map::new();

    match &component.content {
        Content::Text { text } => {
            object.insert("text".into(), Value::from(text.as_str()));
        }
        Content::Translatable(t) => {
            object.insert("translate".into(), Value::from(t.key.as_str()));
            if let Some(fallback) = &t.fallback {
                object.insert("fallback".into(), Value::from(fallback.as_str()));
            }
            if !t.args.is_empty() {
                object.insert("with".into(), components_to_wire(&t.args));
            }
        }
        Content::Keybind { keybind } => {
            object.insert("keybind".into(), Value::from(keybind.as_str()));
        }
        Content::Score(score) => {
            let mut inner = Map::new();
            inner.insert("name".into(), Value::from(score.name.as_str()));
            inner.insert("objective".into(), Value::from(score.objective.as_str()));
            if let Some(value) = &score.value {
                inner.insert("value".into(), Value::from(value.as_str()));
            }
            object.insert("score".into(), Value::Object(inner));
        }
        Content::Selector {
            selector,
            separator,
        } => {
            object.insert("selector".into(), Value::from(selector.as_str()));
            if let Some(separator) = separator {
                object.insert("separator".into(), domain_to_wire(separator));
            }
        }
        Content::Nbt(nbt) => {
            object.insert("nbt".into(), Value::from(nbt.path.as_str()));
            if let Some(interpret) = nbt.interpret {
                object.insert("interpret".into(), Value::from(interpret));
            }
            if let Some(separator) = &nbt.separator {
                object.insert("separator".into(), domain_to_wire(separator));
            }
            let (key, source) = match &nbt.source {
                NbtSource::Block(s) => ("block", s),
                NbtSource::Entity(s) => ("entity", s),
                NbtSource::Storage(s) => ("storage", s),
            };
            object.insert(key.into(), Value::from(source.as_str()));
        }
    }

    style_to_wire(&component.style, &mut object);

    if !component.children.is_empty() {
        object.insert("extra".into(), components_to_wire(&component.children));
    }

    Value::Object(object)
}

fn components_to_wire(components: &[Component]) -> Value {
    Value::Array(components.iter().map(domain_to_wire).collect())
}

fn style_to_wire(style: &Style, object: &mut Map<String, Value>) {
    let strings = [
        ("color", &style.color),
        ("font", &style.font),
        ("insertion", &style.insertion),
    ];
    for (key, value) in strings {
        if let Some(value) = value {
            object.insert(key.into(), Value::from(value.as_str()));
        }
    }

    let flags = [
        ("bold", style.bold),
        ("italic", style.italic),
        ("underlined", style.underlined),
        ("strikethrough", style.strikethrough),
        ("obfuscated", style.obfuscated),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            object.insert(key.into(), Value::from(value));
        }
    }

    if let Some(click) = &style.click_event {
        let mut inner = Map::new();
        inner.insert("action".into(), Value::from(click.action.as_str()));
        inner.insert("value".into(), Value::from(click.value.as_str()));
        object.insert("clickEvent".into(), Value::Object(inner));
    }

    if let Some(hover) = &style.hover_event {
        object.insert("hoverEvent".into(), hover_to_wire(hover));
    }
}

fn hover_to_wire(hover: &HoverEvent) -> Value {
    let (field, payload) = match hover {
        HoverEvent::ShowText(text) => ("contents", domain_to_wire(text)),
        HoverEvent::ShowItem(item) => {
            let mut inner = Map::new();
            inner.insert("id".into(), Value::from(item.item_id.as_str()));
            inner.insert("count".into(), Value::from(item.count));
            if let Some(tag) = &item.tag {
                inner.insert("tag".into(), Value::from(tag.as_str()));
            }
            ("contents", Value::Object(inner))
        }
        HoverEvent::ShowEntity(entity) => {
            let mut inner = Map::new();
            inner.insert("type".into(), Value::from(entity.entity_type.as_str()));
            inner.insert("id".into(), Value::from(entity.id.as_str()));
            if let Some(name) = &entity.name {
                inner.insert("name".into(), domain_to_wire(name));
            }
            ("contents", Value::Object(inner))
        }
        HoverEvent::Opaque(opaque) => match &opaque.payload {
            HoverPayload::Contents(raw) => ("contents", raw.clone()),
            HoverPayload::Value(raw) => ("value", raw.clone()),
        },
    };

    let mut object = Map::new();
    object.insert("action".into(), Value::from(hover.action()));
    object.insert(field.into(), payload);
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_value(value: Value) -> ChatResult<Component> {
        let wire: ComponentWire = from_value(value, ROOT)?;
        wire_to_domain(wire, ROOT)
    }

    #[test]
    fn primitives_become_text() {
        assert_eq!(decode_value(json!("hi")).expect("string"), Component::text("hi"));
        assert_eq!(decode_value(json!(12)).expect("number"), Component::text("12"));
        assert_eq!(decode_value(json!(true)).expect("bool"), Component::text("true"));
    }

    #[test]
    fn array_tail_becomes_children_of_head() {
        let component = decode_value(json!([{"text": "a", "extra": ["b"]}, "c", {"text": "d"}]))
            .expect("array");
        let children: Vec<String> = component.children.iter().map(|c| c.plain_text()).collect();
        assert_eq!(component.plain_text(), "abcd");
        assert_eq!(children, vec!["b", "c", "d"]);
    }

    #[test]
    fn text_takes_precedence_over_translate() {
        let component =
            decode_value(json!({"text": "t", "translate": "k"})).expect("both content keys");
        assert_eq!(component.content, Content::Text { text: "t".into() });
    }

    #[test]
    fn rejects_objects_without_content() {
        let err = decode_value(json!({"extra": [{"color": "red"}], "text": "ok"}))
            .expect_err("child without content");
        match err {
            ChatError::InvalidComponent { path, .. } => assert_eq!(path, "$.extra[0]"),
            other => panic!("expected InvalidComponent error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_arrays_and_null() {
        let err = decode_value(json!({"translate": "k", "with": [[]]})).expect_err("empty array");
        match err {
            ChatError::EmptyArray { path } => assert_eq!(path, "$.with[0]"),
            other => panic!("expected EmptyArray error, got {other:?}"),
        }

        let err = decode_value(json!(null)).expect_err("null");
        assert!(matches!(err, ChatError::Schema { .. }));
    }

    #[test]
    fn schema_errors_report_nested_paths() {
        let err = decode_value(json!({"text": "", "extra": [{"text": "x", "bold": "yes"}]}))
            .expect_err("bad bold");
        match err {
            ChatError::Schema { path, .. } => assert_eq!(path, "$.extra[0].bold"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn show_item_contents_forms() {
        let bare = decode_value(json!({"text": "", "hoverEvent": {
            "action": "show_item", "contents": "minecraft:stone"
        }}))
        .expect("bare id");
        assert_eq!(
            bare.hover_event(),
            Some(&HoverEvent::ShowItem(ShowItem::new("minecraft:stone", 1, None)))
        );

        let full = decode_value(json!({"text": "", "hoverEvent": {
            "action": "show_item",
            "contents": {"id": "minecraft:diamond", "count": 3, "tag": "{Damage:1}"}
        }}))
        .expect("object");
        assert_eq!(
            full.hover_event(),
            Some(&HoverEvent::ShowItem(ShowItem::new(
                "minecraft:diamond",
                3,
                Some("{Damage:1}".into())
            )))
        );
    }

    #[test]
    fn show_item_contents_errors_carry_paths() {
        let err = decode_value(json!({"text": "", "hoverEvent": {
            "action": "show_item", "contents": {"count": 3}
        }}))
        .expect_err("missing id");
        match err {
            ChatError::Schema { path, message } => {
                assert_eq!(path, "$.hoverEvent.contents");
                assert!(message.contains("id"));
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_hover_actions_round_trip_in_their_own_field() {
        for field in ["contents", "value"] {
            let input = json!({"text": "", "hoverEvent": {
                "action": "show_achievement", field: {"id": "openInventory", "extra": [1, 2]}
            }});
            let component = decode_value(input.clone()).expect("unknown action");
            let hover = component.hover_event().expect("hover kept");
            assert_eq!(hover.action(), "show_achievement");
            assert!(matches!(hover, HoverEvent::Opaque(_)));
            assert_eq!(domain_to_wire(&component), input);
        }
    }

    #[test]
    fn unreadable_legacy_item_is_reencoded_as_value() {
        let input = json!({"text": "", "hoverEvent": {
            "action": "show_item", "value": {"text": "{id:\"stone\",tag:{Damage:"}
        }});
        let component = decode_value(input.clone()).expect("bad legacy payload");
        assert!(matches!(
            component.hover_event(),
            Some(HoverEvent::Opaque(OpaqueHover {
                payload: HoverPayload::Value(_),
                ..
            }))
        ));
        assert_eq!(domain_to_wire(&component), input);
    }

    #[test]
    fn readable_legacy_item_is_reencoded_as_contents() {
        let component = decode_value(json!({"text": "", "hoverEvent": {
            "action": "show_item", "value": "{id:\"minecraft:stone\",Count:2b}"
        }}))
        .expect("legacy item");
        assert_eq!(
            domain_to_wire(&component),
            json!({"text": "", "hoverEvent": {
                "action": "show_item", "contents": {"id": "minecraft:stone", "count": 2}
            }})
        );
    }

    #[test]
    fn encoding_omits_empty_fields() {
        let value = domain_to_wire(&Component::translatable("k", vec![]));
        assert_eq!(value, json!({"translate": "k"}));

        let value = domain_to_wire(
            &Component::text("x").with_hover(HoverEvent::ShowItem(ShowItem::new("stone", 2, None))),
        );
        assert_eq!(
            value,
            json!({"text": "x", "hoverEvent": {
                "action": "show_item", "contents": {"id": "stone", "count": 2}
            }})
        );
    }

    #[test]
    fn nbt_component_requires_source() {
        let component = decode_value(json!({"nbt": "Items[0]", "storage": "eco:data"}))
            .expect("storage nbt");
        assert!(matches!(
            component.content,
            Content::Nbt(NbtContent {
                source: NbtSource::Storage(_),
                ..
            })
        ));

        let err = decode_value(json!({"nbt": "Items[0]"})).expect_err("no source");
        assert!(matches!(err, ChatError::InvalidComponent { .. }));
    }
}
