//! Translation from `quartz_nbt` values into the crate's own [`Tag`] model.

use crate::tag::{Compound, Tag};
use crate::{SnbtError, SnbtResult};
use quartz_nbt::{NbtCompound, NbtTag};

pub(crate) fn compound_from_nbt(nbt: &NbtCompound) -> SnbtResult<Compound> {
    nbt.inner()
        .iter()
        .map(|(key, value)| Ok((key.clone(), tag_from_nbt(value)?)))
        .collect()
}

/// Lists must hold a single element type.
pub(crate) fn tag_from_nbt(nbt: &NbtTag) -> SnbtResult<Tag> {
    let tag = match nbt {
        NbtTag::Byte(v) => Tag::Byte(*v),
        NbtTag::Short(v) => Tag::Short(*v),
        NbtTag::Int(v) => Tag::Int(*v),
        NbtTag::Long(v) => Tag::Long(*v),
        NbtTag::Float(v) => Tag::Float(*v),
        NbtTag::Double(v) => Tag::Double(*v),
        NbtTag::String(v) => Tag::String(v.clone()),
        NbtTag::ByteArray(v) => Tag::ByteArray(v.clone()),
        NbtTag::IntArray(v) => Tag::IntArray(v.clone()),
        NbtTag::LongArray(v) => Tag::LongArray(v.clone()),
        NbtTag::Compound(v) => Tag::Compound(compound_from_nbt(v)?),
        NbtTag::List(list) => {
            let items = list
                .iter()
                .map(tag_from_nbt)
                .collect::<SnbtResult<Vec<_>>>()?;
            if let Some(first) = items.first() {
                if let Some(other) = items.iter().find(|item| item.kind() != first.kind()) {
                    return Err(SnbtError::MixedList {
                        found: other.kind(),
                        expected: first.kind(),
                    });
                }
            }
            Tag::List(items)
        }
    };
    Ok(tag)
}
