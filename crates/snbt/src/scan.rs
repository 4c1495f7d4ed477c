//! Structural checks run over raw SNBT text before it is handed to the tag parser.
//!
//! The scan is a single, non-recursive pass. It bounds nesting depth, requires a single root
//! compound, and enforces the exact element type of typed arrays (`[B;`, `[I;`, `[L;`).

use crate::tag::TagKind;
use crate::{SnbtError, SnbtResult};
use regex::Regex;
use std::sync::LazyLock;

/// Deepest compound/list/array nesting accepted.
pub(crate) const MAX_DEPTH: usize = 512;

static BYTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[-+]?(?:0|[1-9][0-9]*)b$").unwrap());
static LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[-+]?(?:0|[1-9][0-9]*)l$").unwrap());
static INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").unwrap());

pub(crate) fn check_document(text: &str) -> SnbtResult<()> {
    if !text.starts_with('{') {
        return Err(SnbtError::Expected {
            expected: '{',
            at: 0,
        });
    }

    let mut depth = 0usize;
    let mut chars = text.char_indices();
    while let Some((at, c)) = chars.next() {
        match c {
            '"' | '\'' => skip_quoted(&mut chars, c, at)?,
            '{' | '[' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(SnbtError::TooDeep {
                        max: MAX_DEPTH,
                        at,
                    });
                }
                if c == '[' {
                    if let Some(array) = typed_array_kind(&text[at + 1..]) {
                        check_typed_array(&text[at + 3..], array, at)?;
                    }
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let rest = &text[at + 1..];
                    if !rest.trim().is_empty() {
                        return Err(SnbtError::TrailingData { at: at + 1 });
                    }
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn skip_quoted(chars: &mut std::str::CharIndices<'_>, quote: char, start: usize) -> SnbtResult<()> {
    let mut escaped = false;
    for (_, c) in chars.by_ref() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok(());
        }
    }
    Err(SnbtError::UnterminatedString { at: start })
}

/// `text` starts just after a `[`.
fn typed_array_kind(text: &str) -> Option<TagKind> {
    let mut chars = text.chars();
    let kind = match chars.next()? {
        'B' => TagKind::ByteArray,
        'I' => TagKind::IntArray,
        'L' => TagKind::LongArray,
        _ => return None,
    };
    (chars.next()? == ';').then_some(kind)
}

/// `body` starts just after the `;`. Elements run up to the first `]`.
fn check_typed_array(body: &str, array: TagKind, at: usize) -> SnbtResult<()> {
    let body = body.split(']').next().unwrap_or_default();
    let elements: Vec<&str> = body.split(',').map(str::trim).collect();
    let last = elements.len() - 1;

    for (i, element) in elements.iter().enumerate() {
        if element.is_empty() && i == last {
            continue;
        }
        if !element_fits(element, array) {
            return Err(SnbtError::ArrayElement {
                element: (*element).to_owned(),
                array,
                at,
            });
        }
    }
    Ok(())
}

fn element_fits(token: &str, array: TagKind) -> bool {
    let without_suffix = token.get(..token.len().saturating_sub(1)).unwrap_or_default();
    match array {
        TagKind::ByteArray => {
            token.eq_ignore_ascii_case("true")
                || token.eq_ignore_ascii_case("false")
                || (BYTE.is_match(token) && without_suffix.parse::<i8>().is_ok())
        }
        TagKind::IntArray => INT.is_match(token) && token.parse::<i32>().is_ok(),
        TagKind::LongArray => LONG.is_match(token) && without_suffix.parse::<i64>().is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_documents() {
        check_document("{}").expect("empty");
        check_document(r#"{a:"[[[[",b:'}}',c:"x\"["}"#).expect("brackets inside strings");
        check_document("{a:[B;1b,true],b:[I;1,-2,3],c:[L;1L,2l],d:[I;],e:[I;1,]}")
            .expect("typed arrays");
    }

    #[test]
    fn root_must_be_a_single_compound() {
        let err = check_document("[1,2]").expect_err("list root");
        assert!(matches!(err, SnbtError::Expected { expected: '{', at: 0 }));

        let err = check_document("{a:1} x").expect_err("trailing data");
        assert!(matches!(err, SnbtError::TrailingData { at: 5 }));
    }

    #[test]
    fn typed_array_elements_must_match_exactly() {
        let cases = [
            ("{a:[I;1b]}", TagKind::IntArray, "1b"),
            ("{a:[I;2s]}", TagKind::IntArray, "2s"),
            ("{a:[L;1L,2]}", TagKind::LongArray, "2"),
            ("{a:[B;300b]}", TagKind::ByteArray, "300b"),
            ("{a:[I;2147483648]}", TagKind::IntArray, "2147483648"),
            ("{a:[B;1]}", TagKind::ByteArray, "1"),
            ("{a:[I;1,,2]}", TagKind::IntArray, ""),
        ];
        for (input, expected_array, expected_element) in cases {
            match check_document(input).expect_err(input) {
                SnbtError::ArrayElement { element, array, .. } => {
                    assert_eq!(array, expected_array);
                    assert_eq!(element, expected_element);
                }
                other => panic!("expected ArrayElement error, got {other:?}"),
            }
        }
    }

    #[test]
    fn nested_typed_arrays_fail_without_recursing() {
        let deep = format!("{{a:{}}}", "[I;".repeat(200_000));
        let err = check_document(&deep).expect_err("nested typed arrays");
        assert!(matches!(
            err,
            SnbtError::ArrayElement {
                array: TagKind::IntArray,
                ..
            }
        ));
    }

    #[test]
    fn nesting_is_bounded() {
        let lists = format!("{{a:{}{}}}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        let err = check_document(&lists).expect_err("too deep");
        assert!(matches!(err, SnbtError::TooDeep { max: MAX_DEPTH, .. }));

        let compounds = "{a:".repeat(200_000);
        let err = check_document(&compounds).expect_err("too deep");
        assert!(matches!(err, SnbtError::TooDeep { .. }));

        let fits = format!(
            "{{a:{}{}}}",
            "[".repeat(MAX_DEPTH - 1),
            "]".repeat(MAX_DEPTH - 1)
        );
        check_document(&fits).expect("at the limit");
    }

    #[test]
    fn unterminated_strings_are_reported() {
        let err = check_document(r#"{a:"open}"#).expect_err("unterminated");
        assert!(matches!(err, SnbtError::UnterminatedString { at: 3 }));
    }
}
