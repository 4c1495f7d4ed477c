//! Stringified NBT support.
//!
//! Item metadata travels inside chat tooltips as SNBT text, for example
//! `{display:{Name:'{"text":"Blade"}'},Damage:3}`. This crate provides:
//! - a value model ([`Tag`], [`Compound`])
//! - parsing through `quartz_nbt`, behind a structural pre-check that bounds nesting depth
//!   and enforces exact typed-array elements
//! - a deterministic renderer (compound keys are emitted in sorted order)
//!
//! It does not read or write binary NBT.

mod convert;
mod scan;
pub mod tag;
mod writer;

pub use tag::{Compound, Tag, TagKind};

/// Errors returned by the `snbt` crate.
///
/// Positions are byte offsets into the input text.
#[derive(Debug, thiserror::Error)]
pub enum SnbtError {
    #[error("invalid SNBT: {source}")]
    Syntax {
        #[source]
        source: quartz_nbt::snbt::SnbtError,
    },

    #[error("expected '{expected}' at {at}")]
    Expected { expected: char, at: usize },

    #[error("unterminated quoted string starting at {at}")]
    UnterminatedString { at: usize },

    #[error("can't insert {found} into list of {expected}")]
    MixedList { found: TagKind, expected: TagKind },

    #[error("can't insert {element:?} into {array} at {at}")]
    ArrayElement {
        element: String,
        array: TagKind,
        at: usize,
    },

    #[error("unexpected trailing data at {at}")]
    TrailingData { at: usize },

    #[error("tag nesting exceeds {max} levels at {at}")]
    TooDeep { max: usize, at: usize },
}

/// Type alias for Results that can fail with an [`SnbtError`].
pub type SnbtResult<T> = Result<T, SnbtError>;

/// SNBT codec operations.
///
/// This is a zero-sized type used for namespacing. All methods are associated functions.
pub struct Snbt;

impl Snbt {
    /// Parse a tag document. The root must be a compound and nothing but whitespace may
    /// follow it.
    ///
    /// # Errors
    ///
    /// Returns [`SnbtError`] if:
    /// - nesting is deeper than 512 levels,
    /// - a typed array holds an element of another type,
    /// - a list mixes element types,
    /// - the text is not valid SNBT.
    pub fn parse(text: &str) -> SnbtResult<Compound> {
        let text = text.trim();
        scan::check_document(text)?;
        let nbt =
            quartz_nbt::snbt::parse(text).map_err(|source| SnbtError::Syntax { source })?;
        convert::compound_from_nbt(&nbt)
    }

    /// Render a tag document to its canonical text.
    pub fn render(compound: &Compound) -> String {
        let mut out = String::new();
        writer::write_compound(&mut out, compound);
        out
    }

    /// Render any single value.
    pub fn render_value(tag: &Tag) -> String {
        let mut out = String::new();
        writer::write_tag(&mut out, tag);
        out
    }
}

impl std::fmt::Display for Compound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&Snbt::render(self))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&Snbt::render_value(self))
    }
}

impl std::str::FromStr for Compound {
    type Err = SnbtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snbt::parse(s)
    }
}
