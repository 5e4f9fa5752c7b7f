//! Compact JSON serializer.
//!
//! Emits no insignificant whitespace. Object members keep insertion order.
//! Strings and member names go through the escape table:
//!
//! | character                  | output        |
//! |----------------------------|---------------|
//! | `"`                        | `\"`          |
//! | `\`                        | `\\`          |
//! | newline                    | `\n`          |
//! | carriage return            | `\r`          |
//! | tab                        | `\t`          |
//! | other U+0000..U+001F       | `\u00XX`      |
//! | everything else            | passed through |
//!
//! # Example
//! ```
//! use jsontree::Value;
//!
//! let mut v = Value::default();
//! v["name"] = Value::from("full\nplak");
//! v["ratio"] = Value::from(1.0);
//! assert_eq!(v.dump(), r#"{"name":"full\nplak","ratio":1.0}"#);
//! ```

use crate::value::Value;
use std::fmt;
use std::fmt::Write as _;

impl Value {
    /// Serialize to compact JSON text.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        write_value(self, &mut out);
        out
    }

    /// Append the compact JSON text to `out`.
    pub fn dump_into(&self, out: &mut String) {
        write_value(self, out);
    }
}

/// Same text as [`Value::dump`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) => write_float(*f, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(member.name(), out);
                out.push(':');
                write_value(member.value(), out);
            }
            out.push('}');
        }
    }
}

/// Shortest text that parses back to the same `f64` and still reads as a
/// float: `Debug` keeps a `.0` on integral values and switches to exponent
/// form for very large or small magnitudes. JSON has no NaN or infinity,
/// so those become `null`.
fn write_float(f: f64, out: &mut String) {
    if f.is_finite() {
        let _ = write!(out, "{f:?}");
    } else {
        out.push_str("null");
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    // Push unescaped runs as slices; only escapes are written char by char.
    let mut run_start = 0;
    for (i, ch) in s.char_indices() {
        let escaped = match ch {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            c if c < '\u{20}' => "",
            _ => continue,
        };
        out.push_str(&s[run_start..i]);
        if escaped.is_empty() {
            let _ = write!(out, "\\u{:04x}", ch as u32);
        } else {
            out.push_str(escaped);
        }
        run_start = i + ch.len_utf8();
    }
    out.push_str(&s[run_start..]);
    out.push('"');
}
