//! The `Value` tree node and its assignment rules.
//!
//! A [`Value`] holds exactly one alternative at a time. Ownership is strictly
//! tree-shaped: arrays own their elements and objects own their [`Member`]s, so
//! dropping a node drops the whole subtree and cloning a node deep-copies it.
//!
//! # The touch policy
//!
//! Mutating accessors are allowed to change a value's alternative only out of
//! `null`. A fresh tree can therefore be populated path by path:
//!
//! ```
//! use jsontree::Value;
//!
//! let mut config = Value::default();
//! config.at_or_create("server")?.at_or_create("port")?.assign(8080)?;
//! config.at_or_create("server")?.at_or_create("host")?.assign("0.0.0.0")?;
//! assert_eq!(config.dump(), r#"{"server":{"port":8080,"host":"0.0.0.0"}}"#);
//!
//! // An existing string is never silently replaced by a number.
//! assert!(config["server"]["host"].clone().assign(1).is_err());
//! # Ok::<(), jsontree::JsonError>(())
//! ```
//!
//! The only exception is between the two numeric alternatives, which are
//! mutually coercible. Whole-subtree replacement (`assign(Value)`, plain
//! `=` or [`Value::replace`]) is always allowed.

use crate::error::{JsonError, Result};
use std::fmt;
use std::mem;

/// The tag of the alternative a [`Value`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named entry of an object. Names are unique within one object; the
/// accessor layer enforces this, so the name cannot be changed in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: String,
    value: Value,
}

impl Member {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

/// A JSON document node.
///
/// Integers and floats are separate alternatives so that `1` and `1.0`
/// round-trip as written. Objects keep their members in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Members in insertion order, looked up linearly by name.
    Object(Vec<Member>),
}

impl Value {
    /// Empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Empty object.
    pub fn object() -> Self {
        Value::Object(Vec::new())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Element count of an array or member count of an object; `0` for
    /// every other alternative.
    pub fn size(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Move the payload out, leaving `null` behind.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    /// Install `value` as the whole subtree and return the previous one.
    pub fn replace(&mut self, value: Value) -> Value {
        mem::replace(self, value)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Integer payload. Floats are not converted here; use [`Value::get`]
    /// for the coercing read.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Numeric payload of either numeric alternative.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(n as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Member]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Mutable view of the members. Names stay read-only, so uniqueness
    /// holds as long as members are only added through the accessors.
    pub fn as_object_mut(&mut self) -> Option<&mut [Member]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Assign a scalar, a string or a whole subtree following the touch policy.
    ///
    /// | assigned      | accepted when currently             |
    /// |---------------|-------------------------------------|
    /// | `bool`        | `null`, `boolean`                   |
    /// | integer/float | `null`, `integer`, `float`          |
    /// | string        | `null`, `string`                    |
    /// | `Value`       | anything (whole replacement)        |
    ///
    /// On failure the value is left untouched.
    ///
    /// ```
    /// use jsontree::{JsonError, Value};
    ///
    /// let mut v = Value::default();
    /// v.assign(30)?;
    /// v.assign(30.5)?; // numeric alternatives coerce
    /// assert!(v.is_float());
    ///
    /// let mut s = Value::from("text");
    /// assert!(matches!(s.assign(1), Err(JsonError::TypeMismatch { .. })));
    /// # Ok::<(), JsonError>(())
    /// ```
    pub fn assign<T: Assign>(&mut self, value: T) -> Result<()> {
        value.assign_to(self)
    }

    /// Read the payload converted to `T`.
    ///
    /// Numeric alternatives convert into every numeric `T` (floats are
    /// truncated toward zero for integer targets); narrowing that loses the
    /// value fails with [`JsonError::NumberOutOfRange`]. Booleans and strings
    /// require their own alternative.
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// let v = Value::from(25005);
    /// assert_eq!(v.get::<u16>()?, 25005);
    /// assert_eq!(v.get::<f64>()?, 25005.0);
    /// assert!(v.get::<u8>().is_err());
    /// assert!(v.get::<String>().is_err());
    /// # Ok::<(), jsontree::JsonError>(())
    /// ```
    pub fn get<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    pub(crate) fn set_bool(&mut self, b: bool) -> Result<()> {
        match self {
            Value::Null | Value::Bool(_) => {
                *self = Value::Bool(b);
                Ok(())
            }
            other => Err(JsonError::type_mismatch("boolean or null", other.value_type())),
        }
    }

    pub(crate) fn set_int(&mut self, n: i64) -> Result<()> {
        match self {
            Value::Null | Value::Int(_) | Value::Float(_) => {
                *self = Value::Int(n);
                Ok(())
            }
            other => Err(JsonError::type_mismatch("number or null", other.value_type())),
        }
    }

    pub(crate) fn set_float(&mut self, f: f64) -> Result<()> {
        match self {
            Value::Null | Value::Int(_) | Value::Float(_) => {
                *self = Value::Float(f);
                Ok(())
            }
            other => Err(JsonError::type_mismatch("number or null", other.value_type())),
        }
    }

    pub(crate) fn set_str(&mut self, s: &str) -> Result<()> {
        match self {
            Value::String(current) => {
                current.clear();
                current.push_str(s);
                Ok(())
            }
            Value::Null => {
                *self = Value::String(s.to_owned());
                Ok(())
            }
            other => Err(JsonError::type_mismatch("string or null", other.value_type())),
        }
    }

    pub(crate) fn set_string(&mut self, s: String) -> Result<()> {
        match self {
            Value::String(_) | Value::Null => {
                *self = Value::String(s);
                Ok(())
            }
            other => Err(JsonError::type_mismatch("string or null", other.value_type())),
        }
    }

    /// Promote `null` to an empty array, or borrow the existing one.
    pub(crate) fn touch_array(&mut self) -> Result<&mut Vec<Value>> {
        if self.is_null() {
            *self = Value::array();
        }
        match self {
            Value::Array(items) => Ok(items),
            other => Err(JsonError::type_mismatch("array or null", other.value_type())),
        }
    }

    /// Promote `null` to an empty object, or borrow the existing one.
    pub(crate) fn touch_object(&mut self) -> Result<&mut Vec<Member>> {
        if self.is_null() {
            *self = Value::object();
        }
        match self {
            Value::Object(members) => Ok(members),
            other => Err(JsonError::type_mismatch("object or null", other.value_type())),
        }
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Types that can be written into an existing [`Value`] with
/// [`Value::assign`].
pub trait Assign {
    fn assign_to(self, target: &mut Value) -> Result<()>;
}

impl Assign for Value {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        *target = self;
        Ok(())
    }
}

impl Assign for &Value {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.clone_from(self);
        Ok(())
    }
}

impl Assign for bool {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_bool(self)
    }
}

impl Assign for f64 {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_float(self)
    }
}

impl Assign for f32 {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_float(f64::from(self))
    }
}

impl Assign for &str {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_str(self)
    }
}

impl Assign for &String {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_str(self)
    }
}

impl Assign for String {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_string(self)
    }
}

impl Assign for char {
    fn assign_to(self, target: &mut Value) -> Result<()> {
        target.set_str(self.encode_utf8(&mut [0; 4]))
    }
}

macro_rules! integer_into_value {
    ($($t:ty)*) => {$(
        impl Assign for $t {
            fn assign_to(self, target: &mut Value) -> Result<()> {
                target.set_int(self as i64)
            }
        }

        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(n as i64)
            }
        }
    )*};
}

integer_into_value!(i8 i16 i32 i64 isize u8 u16 u32);

// Unsigned values beyond `i64::MAX` fall back to the float alternative, the
// same way the parser treats oversized integer literals.
macro_rules! wide_unsigned_into_value {
    ($($t:ty)*) => {$(
        impl Assign for $t {
            fn assign_to(self, target: &mut Value) -> Result<()> {
                match i64::try_from(self) {
                    Ok(n) => target.set_int(n),
                    Err(_) => target.set_float(self as f64),
                }
            }
        }

        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                match i64::try_from(n) {
                    Ok(n) => Value::Int(n),
                    Err(_) => Value::Float(n as f64),
                }
            }
        }
    )*};
}

wide_unsigned_into_value!(u64 usize);

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Builds an object. A repeated name keeps its first position and takes the
/// last value, so the result never holds duplicate names.
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut members: Vec<Member> = Vec::new();
        for (name, value) in iter {
            insert_member(&mut members, name.into(), value.into());
        }
        Value::Object(members)
    }
}

/// Insert or overwrite by name; used wherever an object is built from pairs.
pub(crate) fn insert_member(members: &mut Vec<Member>, name: String, value: Value) {
    match members.iter_mut().find(|m| m.name == name) {
        Some(existing) => existing.value = value,
        None => members.push(Member { name, value }),
    }
}

// ---------------------------------------------------------------------------
// Typed reads
// ---------------------------------------------------------------------------

/// Types that can be read out of a [`Value`] with [`Value::get`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match *value {
            Value::Bool(b) => Ok(b),
            ref other => Err(JsonError::type_mismatch("boolean", other.value_type())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(JsonError::type_mismatch("string", other.value_type())),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match *value {
            Value::Int(n) => Ok(n as f64),
            Value::Float(f) => Ok(f),
            ref other => Err(JsonError::type_mismatch("number", other.value_type())),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        let f = f64::from_value(value)?;
        if f.is_finite() && f.abs() > f64::from(f32::MAX) {
            return Err(JsonError::NumberOutOfRange {
                value: f.to_string(),
                target: "f32",
            });
        }
        Ok(f as f32)
    }
}

macro_rules! integer_from_value {
    ($($t:ty)*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Result<Self> {
                let out_of_range = |shown: String| JsonError::NumberOutOfRange {
                    value: shown,
                    target: stringify!($t),
                };
                match *value {
                    Value::Int(n) => <$t>::try_from(n).map_err(|_| out_of_range(n.to_string())),
                    Value::Float(f) => {
                        if !f.is_finite() {
                            return Err(out_of_range(f.to_string()));
                        }
                        // Saturating cast; anything clamped is rejected by try_from.
                        <$t>::try_from(f.trunc() as i128).map_err(|_| out_of_range(f.to_string()))
                    }
                    ref other => Err(JsonError::type_mismatch("number", other.value_type())),
                }
            }
        }
    )*};
}

integer_from_value!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);
