//! JSON Pointer (RFC 6901) addressing.
//!
//! # Pointer syntax
//!
//! - `""` -- the whole document
//! - `"/server/port"` -- member `port` of member `server`
//! - `"/options/0"` -- first element of array `options`
//! - `"/a~1b"` -- member named `a/b` (`~1` is `/`, `~0` is `~`)

use crate::error::{JsonError, Result};
use crate::value::{Value, ValueType};

/// How far past the end of an array a single pointer segment may create an
/// entry. Larger gaps are rejected with [`JsonError::IndexOutOfRange`].
pub const MAX_POINTER_GAP: usize = 1 << 16;

/// A parsed pointer, split on `/` with escapes resolved.
#[derive(Debug, Clone)]
struct Pointer {
    segments: Vec<String>,
}

impl Pointer {
    fn parse(pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Ok(Self {
                segments: Vec::new(),
            });
        }
        let rest = pointer
            .strip_prefix('/')
            .ok_or_else(|| JsonError::InvalidPointer(pointer.to_owned()))?;
        let segments = rest
            .split('/')
            .map(|raw| unescape_segment(raw).ok_or_else(|| JsonError::InvalidPointer(pointer.to_owned())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }
}

/// Resolve `~1` and `~0`; any other `~` sequence is malformed.
fn unescape_segment(raw: &str) -> Option<String> {
    if !raw.contains('~') {
        return Some(raw.to_owned());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Array index in canonical form: decimal digits without leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    let canonical = segment == "0"
        || (!segment.is_empty()
            && !segment.starts_with('0')
            && segment.bytes().all(|b| b.is_ascii_digit()));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

fn step<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(_) => value.search(segment),
        Value::Array(items) => items.get(parse_index(segment)?),
        _ => None,
    }
}

fn step_mut<'v>(value: &'v mut Value, segment: &str) -> Option<&'v mut Value> {
    match value {
        Value::Object(_) => value.search_mut(segment),
        Value::Array(items) => items.get_mut(parse_index(segment)?),
        _ => None,
    }
}

fn step_or_create<'v>(value: &'v mut Value, segment: &str) -> Result<&'v mut Value> {
    match value {
        Value::Object(_) => value.at_or_create(segment),
        Value::Array(_) | Value::Null => match parse_index(segment) {
            Some(idx) => {
                let len = value.size();
                if idx.saturating_sub(len) > MAX_POINTER_GAP {
                    return Err(JsonError::IndexOutOfRange { index: idx, len });
                }
                value.at_or_create(idx)
            }
            None if value.is_null() => value.at_or_create(segment),
            None => Err(JsonError::type_mismatch("object or null", ValueType::Array)),
        },
        other => Err(JsonError::type_mismatch(
            "array, object or null",
            other.value_type(),
        )),
    }
}

impl Value {
    /// Look up a node by JSON Pointer. Malformed pointers and missing nodes
    /// both yield `None`.
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// let v = Value::parse(r#"{"options":["norepeat"],"a/b":1}"#)?;
    /// assert_eq!(v.pointer("/options/0").and_then(Value::as_str), Some("norepeat"));
    /// assert_eq!(v.pointer("/a~1b"), Some(&Value::Int(1)));
    /// assert!(v.pointer("/options/1").is_none());
    /// # Ok::<(), jsontree::JsonError>(())
    /// ```
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let parsed = Pointer::parse(pointer).ok()?;
        parsed
            .segments
            .iter()
            .try_fold(self, |node, segment| step(node, segment))
    }

    pub fn pointer_mut(&mut self, pointer: &str) -> Option<&mut Value> {
        let parsed = Pointer::parse(pointer).ok()?;
        parsed
            .segments
            .iter()
            .try_fold(self, |node, segment| step_mut(node, segment))
    }

    /// Walk a pointer with [`Value::at_or_create`] semantics.
    ///
    /// A `null` on the way becomes an array when the next segment is a
    /// canonical index and an object otherwise. A digit-only segment too large
    /// for `usize` is not an index, so on `null` it becomes a member name.
    /// A non-index segment against an existing array and scalars on the way
    /// are a [`JsonError::TypeMismatch`]. An index more than
    /// [`MAX_POINTER_GAP`] entries past the end of its array is a
    /// [`JsonError::IndexOutOfRange`].
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// let mut v = Value::default();
    /// v.pointer_or_create("/servers/1/port")?.assign(443)?;
    /// assert_eq!(v.dump(), r#"{"servers":[null,{"port":443}]}"#);
    /// # Ok::<(), jsontree::JsonError>(())
    /// ```
    pub fn pointer_or_create(&mut self, pointer: &str) -> Result<&mut Value> {
        let parsed = Pointer::parse(pointer)?;
        let mut node = self;
        for segment in &parsed.segments {
            node = step_or_create(node, segment)?;
        }
        Ok(node)
    }
}
