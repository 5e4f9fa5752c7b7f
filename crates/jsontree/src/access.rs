//! Keyed and indexed access into a [`Value`] tree.
//!
//! Every accessor takes a [`Locator`], which is either an object member name
//! (`&str`, `String`) or an array position (`usize`). Three lookup flavours
//! exist:
//!
//! - [`Value::at_or_create`]: lookup-or-create. Promotes `null` to the
//!   container the locator needs and creates the entry as `null` if missing.
//! - [`Value::at`] / [`Value::at_mut`]: lookup-or-fail. Never creates.
//! - [`Value::search`] / [`Value::search_mut`]: lookup-or-`None`. Never fails.
//!
//! The `value["key"]` and `value[3]` operators are sugar over the first two
//! and panic where those return an error.

use crate::error::{JsonError, Result};
use crate::value::{Member, Value};
use std::ops;

/// A key or index usable by the accessor layer.
///
/// Implemented for `usize`, `str`, `String` and references to them. This
/// trait is sealed.
pub trait Locator: private::Sealed {
    #[doc(hidden)]
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value>;

    #[doc(hidden)]
    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value>;

    #[doc(hidden)]
    fn locate_or_create<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value>;
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

impl Locator for usize {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        match value {
            Value::Array(items) => items.get(*self).ok_or(JsonError::IndexOutOfRange {
                index: *self,
                len: items.len(),
            }),
            Value::Null => Err(JsonError::IndexOutOfRange { index: *self, len: 0 }),
            other => Err(JsonError::type_mismatch("array", other.value_type())),
        }
    }

    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        match value {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(*self)
                    .ok_or(JsonError::IndexOutOfRange { index: *self, len })
            }
            Value::Null => Err(JsonError::IndexOutOfRange { index: *self, len: 0 }),
            other => Err(JsonError::type_mismatch("array", other.value_type())),
        }
    }

    fn locate_or_create<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        match value {
            Value::Array(items) => grow_to_include(items, *self)?,
            Value::Null => {
                let mut items = Vec::new();
                grow_to_include(&mut items, *self)?;
                *value = Value::Array(items);
            }
            _ => {}
        }
        let items = value.touch_array()?;
        Ok(&mut items[*self])
    }
}

/// Pad `items` with nulls so that `index` is in bounds. Fails without
/// touching `items` when the new length cannot be allocated.
fn grow_to_include(items: &mut Vec<Value>, index: usize) -> Result<()> {
    let len = items.len();
    if index < len {
        return Ok(());
    }
    let out_of_range = JsonError::IndexOutOfRange { index, len };
    let new_len = index.checked_add(1).ok_or_else(|| out_of_range.clone())?;
    items
        .try_reserve_exact(new_len - len)
        .map_err(|_| out_of_range)?;
    items.resize(new_len, Value::Null);
    Ok(())
}

impl Locator for str {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        match value {
            Value::Object(members) => members
                .iter()
                .find(|m| m.name() == self)
                .map(Member::value)
                .ok_or_else(|| JsonError::KeyNotFound(self.to_owned())),
            other => Err(JsonError::type_mismatch("object", other.value_type())),
        }
    }

    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        match value {
            Value::Object(members) => members
                .iter_mut()
                .find(|m| m.name() == self)
                .map(Member::value_mut)
                .ok_or_else(|| JsonError::KeyNotFound(self.to_owned())),
            other => Err(JsonError::type_mismatch("object", other.value_type())),
        }
    }

    fn locate_or_create<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        let members = value.touch_object()?;
        let idx = match members.iter().position(|m| m.name() == self) {
            Some(idx) => idx,
            None => {
                members.push(Member::new(self, Value::Null));
                members.len() - 1
            }
        };
        Ok(members[idx].value_mut())
    }
}

impl Locator for String {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        self.as_str().locate(value)
    }

    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        self.as_str().locate_mut(value)
    }

    fn locate_or_create<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        self.as_str().locate_or_create(value)
    }
}

impl<T: Locator + ?Sized> Locator for &T {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        (**self).locate(value)
    }

    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        (**self).locate_mut(value)
    }

    fn locate_or_create<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        (**self).locate_or_create(value)
    }
}

impl Value {
    /// Return the entry at `at`, creating it (and the container) as needed.
    ///
    /// - A key promotes `null` to an object; a missing member is appended as
    ///   `null`. An existing member is reused, so names stay unique.
    /// - An index promotes `null` to an array; an index past the end grows
    ///   the array with `null` entries up to and including that index.
    ///
    /// Any other current alternative fails with
    /// [`JsonError::TypeMismatch`] before the tree is touched. An index whose
    /// array cannot be allocated fails with [`JsonError::IndexOutOfRange`],
    /// also leaving the tree as it was.
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// let mut v = Value::default();
    /// v.at_or_create(2)?.assign("third")?;
    /// assert_eq!(v.dump(), r#"[null,null,"third"]"#);
    /// assert!(v.at_or_create("key").is_err());
    /// # Ok::<(), jsontree::JsonError>(())
    /// ```
    pub fn at_or_create<L: Locator>(&mut self, at: L) -> Result<&mut Value> {
        at.locate_or_create(self)
    }

    /// Return the existing entry at `at` without creating anything.
    ///
    /// Fails with [`JsonError::KeyNotFound`] for a missing member,
    /// [`JsonError::IndexOutOfRange`] for a position past the end (a `null`
    /// counts as an empty array), and [`JsonError::TypeMismatch`] when the
    /// value is not the container the locator needs.
    pub fn at<L: Locator>(&self, at: L) -> Result<&Value> {
        at.locate(self)
    }

    /// Mutable flavour of [`Value::at`].
    pub fn at_mut<L: Locator>(&mut self, at: L) -> Result<&mut Value> {
        at.locate_mut(self)
    }

    /// Member lookup that reports absence as `None`, including when this is
    /// not an object at all.
    pub fn search(&self, key: &str) -> Option<&Value> {
        key.locate(self).ok()
    }

    pub fn search_mut(&mut self, key: &str) -> Option<&mut Value> {
        key.locate_mut(self).ok()
    }

    /// Append a `null` element and return it, promoting `null` to an array.
    pub fn push_back(&mut self) -> Result<&mut Value> {
        let items = self.touch_array()?;
        items.push(Value::Null);
        let last = items.len() - 1;
        Ok(&mut items[last])
    }

    /// Append `value`, promoting `null` to an array.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        self.touch_array()?.push(value.into());
        Ok(())
    }

    /// Remove a member by name, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let members = match self {
            Value::Object(members) => members,
            _ => return None,
        };
        let idx = members.iter().position(|m| m.name() == key)?;
        let (_, value) = members.remove(idx).into_parts();
        Some(value)
    }
}

/// Lookup-or-fail.
///
/// # Panics
///
/// Panics with the error message of [`Value::at`] when the entry does not
/// exist or the value is not the right container.
impl<L: Locator> ops::Index<L> for Value {
    type Output = Value;

    fn index(&self, at: L) -> &Value {
        match at.locate(self) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Lookup-or-create.
///
/// # Panics
///
/// Panics when the value holds an alternative that cannot be promoted to
/// the container the locator needs.
impl<L: Locator> ops::IndexMut<L> for Value {
    fn index_mut(&mut self, at: L) -> &mut Value {
        match at.locate_or_create(self) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
