//! Domain-level text component tree.
//!
//! These types are independent of the JSON wire shape; see [`crate::ChatComponent`] for
//! decoding and encoding.

// ============================================================================
// Component tree
// ============================================================================

/// A node of the rich-text tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// What this node displays.
    pub content: Content,

    /// Formatting and interactivity; inherited by children on the client.
    pub style: Style,

    /// Sibling components rendered after this one (`extra` on the wire).
    pub children: Vec<Component>,
}

/// Content of a component node.
///
/// Only [`Content::Translatable`] carries nested components that the rewriter visits; every
/// other variant is a leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Text {
        text: String,
    },
    Translatable(Translatable),
    Keybind {
        keybind: String,
    },
    Score(Score),
    Selector {
        selector: String,
        separator: Option<Box<Component>>,
    },
    Nbt(NbtContent),
}

/// A localisation key with ordered substitution arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translatable {
    pub key: String,
    pub fallback: Option<String>,
    pub args: Vec<Component>,
}

/// Scoreboard value lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub name: String,
    pub objective: String,
    pub value: Option<String>,
}

/// NBT path lookup against a block, entity or storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NbtContent {
    pub path: String,
    pub interpret: Option<bool>,
    pub separator: Option<Box<Component>>,
    pub source: NbtSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NbtSource {
    Block(String),
    Entity(String),
    Storage(String),
}

// ============================================================================
// Style and events
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<String>,
    pub font: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underlined: Option<bool>,
    pub strikethrough: Option<bool>,
    pub obfuscated: Option<bool>,
    pub insertion: Option<String>,
    pub click_event: Option<ClickEvent>,
    pub hover_event: Option<HoverEvent>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

/// Click action, carried through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    pub action: String,
    pub value: String,
}

/// Tooltip shown when the component is hovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    ShowText(Box<Component>),
    ShowItem(ShowItem),
    ShowEntity(ShowEntity),
    /// A hover this crate does not interpret: an unknown action, or a legacy payload whose
    /// SNBT could not be read. Re-encoded exactly as it was received.
    Opaque(OpaqueHover),
}

impl HoverEvent {
    /// Wire name of the hover action.
    pub fn action(&self) -> &str {
        match self {
            HoverEvent::ShowText(_) => "show_text",
            HoverEvent::ShowItem(_) => "show_item",
            HoverEvent::ShowEntity(_) => "show_entity",
            HoverEvent::Opaque(opaque) => &opaque.action,
        }
    }
}

/// Raw hover payload, kept in the field it arrived in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueHover {
    pub action: String,
    pub payload: HoverPayload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverPayload {
    /// Modern `contents` field.
    Contents(serde_json::Value),
    /// Legacy `value` field.
    Value(serde_json::Value),
}

/// Item preview payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowItem {
    /// Item identifier exactly as it appeared on the wire.
    pub item_id: String,

    pub count: i32,

    /// SNBT text of the item tag, kept verbatim.
    pub tag: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowEntity {
    pub entity_type: String,
    pub id: String,
    pub name: Option<Box<Component>>,
}

// ============================================================================
// Construction helpers
// ============================================================================

impl Component {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Content::Text { text: text.into() })
    }

    pub fn translatable(key: impl Into<String>, args: Vec<Component>) -> Self {
        Self::new(Content::Translatable(Translatable {
            key: key.into(),
            fallback: None,
            args,
        }))
    }

    pub fn with_children(mut self, children: Vec<Component>) -> Self {
        self.children = children;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_hover(mut self, hover: HoverEvent) -> Self {
        self.style.hover_event = Some(hover);
        self
    }

    pub fn hover_event(&self) -> Option<&HoverEvent> {
        self.style.hover_event.as_ref()
    }

    /// Translation arguments, or an empty slice for non-translatable content.
    pub fn args(&self) -> &[Component] {
        match &self.content {
            Content::Translatable(t) => &t.args,
            _ => &[],
        }
    }

    /// Number of nodes in this tree, counting translation arguments and children.
    pub fn node_count(&self) -> usize {
        1 + self.args().iter().map(Component::node_count).sum::<usize>()
            + self.children.iter().map(Component::node_count).sum::<usize>()
    }

    /// Concatenated literal text of this node and its children, depth first.
    ///
    /// Non-text content contributes nothing; no translation or resolution happens here.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Content::Text { text } = &self.content {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

impl ShowItem {
    pub fn new(item_id: impl Into<String>, count: i32, tag: Option<String>) -> Self {
        Self {
            item_id: item_id.into(),
            count,
            tag,
        }
    }
}
