//! JSON encoding for the file helpers
//!
//! The default [`JsonStyle::Spaced`] output matches files produced by the
//! Python tooling these helpers replace: `", "` between items, `": "` between
//! key and value, no indentation, and non-ASCII characters left unescaped.
//! Object keys are written in insertion order, not sorted.
//!
//! Non-finite floats (`NaN`, `inf`) are written as `null`. JSON has no literal
//! for them; the Python writer emitted a non-standard `NaN` token instead.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::{CompactFormatter, Formatter};
use std::io;

/// Separator style used when encoding JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonStyle {
    /// `{"a": 1, "b": [1, 2]}`
    #[default]
    Spaced,
    /// `{"a":1,"b":[1,2]}`
    Compact,
}

/// Single-line formatter with a space after `,` and `:`
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Appends the JSON encoding of `value` to `buf`.
pub fn encode_into<T>(buf: &mut Vec<u8>, value: &T, style: JsonStyle) -> Result<()>
where
    T: Serialize + ?Sized,
{
    match style {
        JsonStyle::Spaced => {
            let mut ser = serde_json::Serializer::with_formatter(&mut *buf, SpacedFormatter);
            value.serialize(&mut ser)?;
        }
        JsonStyle::Compact => {
            let mut ser = serde_json::Serializer::with_formatter(&mut *buf, CompactFormatter);
            value.serialize(&mut ser)?;
        }
    }
    Ok(())
}

/// Encodes `value` as a single JSON document.
pub fn to_json<T>(value: &T, style: JsonStyle) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    encode_into(&mut buf, value, style)?;
    Ok(buf)
}

/// Encodes each record on its own `\n`-terminated line.
pub fn to_json_lines<T>(records: &[T], style: JsonStyle) -> Result<Vec<u8>>
where
    T: Serialize,
{
    let mut buf = Vec::new();
    for record in records {
        encode_into(&mut buf, record, style)?;
        buf.push(b'\n');
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &serde_json::Value, style: JsonStyle) -> String {
        String::from_utf8(to_json(value, style).unwrap()).unwrap()
    }

    #[test]
    fn test_spaced_style_separators() {
        let value = json!([{"a": 1, "b": [1, 2]}, {}]);
        assert_eq!(
            encode(&value, JsonStyle::Spaced),
            r#"[{"a": 1, "b": [1, 2]}, {}]"#
        );
    }

    #[test]
    fn test_compact_style_separators() {
        let value = json!({"a": 1, "b": [1, 2]});
        assert_eq!(encode(&value, JsonStyle::Compact), r#"{"a":1,"b":[1,2]}"#);
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let value = json!({"name": "東京"});
        assert_eq!(encode(&value, JsonStyle::Spaced), r#"{"name": "東京"}"#);
    }

    #[test]
    fn test_json_lines_one_record_per_line() {
        let records = vec![json!({"a": 1}), json!({"b": 2})];
        let text = String::from_utf8(to_json_lines(&records, JsonStyle::Spaced).unwrap()).unwrap();
        assert_eq!(text, "{\"a\": 1}\n{\"b\": 2}\n");
    }

    #[test]
    fn test_object_keys_keep_insertion_order() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": {"b": 1, "a": 2}});
        assert_eq!(
            encode(&value, JsonStyle::Spaced),
            r#"{"zeta": 1, "alpha": 2, "mid": {"b": 1, "a": 2}}"#
        );
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        let values = [f64::NAN, f64::INFINITY, 1.5];
        let text = String::from_utf8(to_json(&values, JsonStyle::Spaced).unwrap()).unwrap();
        assert_eq!(text, "[null, null, 1.5]");
    }

    #[test]
    fn test_json_lines_empty_input_is_empty() {
        let records: Vec<serde_json::Value> = Vec::new();
        assert!(to_json_lines(&records, JsonStyle::Compact).unwrap().is_empty());
    }

    #[test]
    fn test_style_deserializes_snake_case() {
        let style: JsonStyle = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(style, JsonStyle::Compact);
        assert_eq!(JsonStyle::default(), JsonStyle::Spaced);
    }
}
