//! Shared primitives used across the chatlens crates.
//!
//! - [`ResourceKey`]: a validated `namespace:path` identifier (item kinds, entity types)
//! - [`Recipient`]: the player a message copy is being personalised for

use uuid::Uuid;

/// Namespace assumed when a key is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    /// The input text was empty or contained only whitespace
    #[error("key cannot be empty")]
    Empty,

    #[error("invalid character {ch:?} in namespace of {key:?}")]
    InvalidNamespace { key: String, ch: char },

    #[error("invalid character {ch:?} in path of {key:?}")]
    InvalidPath { key: String, ch: char },

    #[error("recipient name cannot be empty")]
    EmptyRecipientName,
}

/// A namespaced identifier such as `minecraft:stone`.
///
/// Namespaces allow `[a-z0-9_.-]`, paths additionally allow `/`. A key written without a
/// namespace is placed in [`DEFAULT_NAMESPACE`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    namespace: String,
    path: String,
}

impl ResourceKey {
    /// Parses `namespace:path` or a bare `path`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if the input is empty or either part contains a character outside
    /// its allowed set. No case folding is applied; callers that want lenient matching should
    /// normalise first.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, KeyError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(KeyError::Empty);
        }

        let (namespace, path) = match input.split_once(':') {
            Some((namespace, path)) if !namespace.is_empty() => (namespace, path),
            Some((_, path)) => (DEFAULT_NAMESPACE, path),
            None => (DEFAULT_NAMESPACE, input),
        };

        if path.is_empty() {
            return Err(KeyError::Empty);
        }

        if let Some(ch) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(KeyError::InvalidNamespace {
                key: input.to_owned(),
                ch,
            });
        }

        if let Some(ch) = path.chars().find(|c| !is_path_char(*c)) {
            return Err(KeyError::InvalidPath {
                key: input.to_owned(),
                ch,
            });
        }

        Ok(Self {
            namespace: namespace.to_owned(),
            path: path.to_owned(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl std::str::FromStr for ResourceKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ResourceKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ResourceKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ResourceKey::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// The player a message copy is being personalised for.
///
/// The rewrite pipeline never looks inside this value; it is only forwarded to the display
/// adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipient {
    id: Uuid,
    name: String,
}

impl Recipient {
    /// Creates a recipient. The name is trimmed and must not be empty.
    pub fn new(id: Uuid, name: impl AsRef<str>) -> Result<Self, KeyError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(KeyError::EmptyRecipientName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
