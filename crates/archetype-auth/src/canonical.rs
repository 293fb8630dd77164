//! Canonical JSON encoding for signed request bodies
//!
//! The server recomputes the signature from the body it receives, so the
//! client has to produce the exact same bytes for the same logical payload
//! every time. The encoding:
//!
//! - sorts object keys at every nesting level (arrays keep their order)
//! - separates items with `", "` and keys from values with `": "`
//! - escapes every character outside printable ASCII as `\uXXXX`
//!   (UTF-16 surrogate pairs above the BMP)
//! - writes floats in shortest round-trip form, switching to exponent
//!   notation below `1e-4` and from `1e16` upwards (`1e-05`, `1e+16`)
//!
//! This is the byte format of Python's `json.dumps(obj, sort_keys=True)`,
//! which the archetype service uses on its side.

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

/// Encode a JSON value canonically
///
/// Logically equal values always produce byte-identical output, regardless
/// of the insertion order of their object keys.
pub fn to_canonical_string(value: &Value) -> serde_json::Result<String> {
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    SortedKeys(value).serialize(&mut serializer)?;

    String::from_utf8(out).map_err(serde_json::Error::custom)
}

/// Canonical encoding of an optional request body
///
/// `null`, `{}`, and `[]` count as no body: they are neither signed nor sent.
pub fn canonical_body(body: Option<&Value>) -> serde_json::Result<Option<String>> {
    match body {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(value) => to_canonical_string(value).map(Some),
    }
}

/// Serializes a [`Value`] with object keys in lexicographic order
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&SortedKeys(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

                let mut object = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    object.serialize_entry(key, &SortedKeys(value))?;
                }
                object.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_repr(value).as_bytes())
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    // Quotes, backslashes, and control characters never reach this method;
    // serde_json escapes those itself.
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;

            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Shortest round-trip float text in the canonical layout
fn float_repr(value: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. "-3.5e-1"
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // Position of the decimal point relative to the first digit
    let point = exponent + 1;
    if point > -4 && point <= 16 {
        if point <= 0 {
            format!("{}0.{}{}", sign, "0".repeat(point.unsigned_abs() as usize), digits)
        } else if point as usize >= digits.len() {
            let zeros = "0".repeat(point as usize - digits.len());
            format!("{}{}{}.0", sign, digits, zeros)
        } else {
            let (int, frac) = digits.split_at(point as usize);
            format!("{}{}.{}", sign, int, frac)
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}{}e{}{:02}", sign, lead, exp_sign, exponent.unsigned_abs())
        } else {
            format!("{}{}.{}e{}{:02}", sign, lead, rest, exp_sign, exponent.unsigned_abs())
        }
    }
}
