use crate::tag::{Compound, Tag};
use std::fmt::Write;

/// Characters allowed in an unquoted key.
fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

/// NBT has no encoding for NaN or infinities; they are written as the nearest finite value.
fn finite_f32(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(f32::MIN, f32::MAX)
    }
}

fn finite_f64(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(f64::MIN, f64::MAX)
    }
}

pub(crate) fn write_compound(out: &mut String, compound: &Compound) {
    out.push('{');
    for (i, (key, value)) in compound.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_key(out, key);
        out.push(':');
        write_tag(out, value);
    }
    out.push('}');
}

pub(crate) fn write_tag(out: &mut String, tag: &Tag) {
    // Writing into a String cannot fail.
    let _ = match tag {
        Tag::Byte(v) => write!(out, "{v}b"),
        Tag::Short(v) => write!(out, "{v}s"),
        Tag::Int(v) => write!(out, "{v}"),
        Tag::Long(v) => write!(out, "{v}L"),
        Tag::Float(v) => write!(out, "{}f", finite_f32(*v)),
        Tag::Double(v) => write!(out, "{}d", finite_f64(*v)),
        Tag::String(s) => {
            write_quoted(out, s);
            Ok(())
        }
        Tag::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_tag(out, item);
            }
            out.push(']');
            Ok(())
        }
        Tag::Compound(compound) => {
            write_compound(out, compound);
            Ok(())
        }
        Tag::ByteArray(items) => write_array(out, 'B', items.iter().map(|v| format!("{v}b"))),
        Tag::IntArray(items) => write_array(out, 'I', items.iter().map(|v| v.to_string())),
        Tag::LongArray(items) => write_array(out, 'L', items.iter().map(|v| format!("{v}L"))),
    };
}

fn write_array(
    out: &mut String,
    prefix: char,
    items: impl Iterator<Item = String>,
) -> std::fmt::Result {
    write!(out, "[{prefix};")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&item);
    }
    out.push(']');
    Ok(())
}

fn write_key(out: &mut String, key: &str) {
    if !key.is_empty() && key.chars().all(is_unquoted_char) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

/// Quotes with `"` unless the first quote character inside the string is `"`, in which case
/// `'` is used. Backslashes and the chosen quote are escaped.
fn write_quoted(out: &mut String, s: &str) {
    let quote = s
        .chars()
        .find(|c| matches!(c, '"' | '\''))
        .map_or('"', |first| if first == '"' { '\'' } else { '"' });

    out.push(quote);
    for c in s.chars() {
        if c == '\\' || c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
}
