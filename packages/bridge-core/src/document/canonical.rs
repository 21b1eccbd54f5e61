//! Canonical JSON text.
//!
//! Counterpart signers hash the output of Go's `json.Marshal`, so the bytes
//! written here follow its rules rather than serde_json's defaults:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CANONICAL FORM                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Strings   < > & U+2028 U+2029  →  \u003c \u003e \u0026 \u2028 \u2029   │
//! │            other non-ASCII      →  raw UTF-8                            │
//! │                                                                         │
//! │  Floats    1e-6 ≤ |x| < 1e21    →  0.000001, 100000000000000000000      │
//! │            otherwise            →  1e-7, 1e+21                          │
//! │            integral             →  2 (no fractional part)               │
//! │                                                                         │
//! │  Layout    compact, no whitespace                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::{Error, Result};

/// Compact formatter with Go-compatible string and float output
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_f64(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Shortest round-trip digits, plain decimal inside [1e-6, 1e21)
fn format_f64(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let text = format!("{:e}", value);
        // Rust omits the sign of a positive exponent.
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        };
    }
    value.to_string()
}

/// Serialize `value` to canonical JSON bytes
pub(crate) fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Serialize `value` to a canonical JSON string
pub(crate) fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    String::from_utf8(to_vec(value)?)
        .map_err(|e| Error::SerializationError(format!("non UTF-8 JSON output: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================
