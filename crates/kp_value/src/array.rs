use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use crate::builtins::{self, ARRAY_METHODS};
use crate::{Slots, SlotsMut, Value, parse_index};

// -----------------------------------------------------------------------------
// Array

/// An indexed container.
///
/// Own slots are every index below [`len`](Array::len) plus `length`.
/// Only canonical index keys (see [`parse_index`]) address elements.
/// The built-in methods (`slice`, `concat`, `join`, `indexOf`, `includes`)
/// are inherited slots, so they are visible to path traversal but are not
/// own properties of any array.
///
/// Writing past the end pads the gap with [`Value::Undefined`], up to
/// [`MAX_LEN`](Array::MAX_LEN) elements.
///
/// # Examples
///
/// ```
/// use kp_value::{Array, Slots, Value};
///
/// let arr = Array::from_iter([Value::from(1), Value::from(2)]);
///
/// assert_eq!(arr.own_slot("1"), Some(Value::from(2)));
/// assert_eq!(arr.own_slot("length"), Some(Value::from(2)));
/// assert!(!arr.has_own_slot("slice"));
/// assert!(arr.visible_slot("slice").unwrap().is_callable());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    /// The largest length an array may reach, `2^32 - 1` as for JS arrays.
    pub const MAX_LEN: usize = u32::MAX as usize;

    /// Writes `value` at `index`, padding any gap with `Undefined`.
    ///
    /// Returns the value back when `index` is not below [`MAX_LEN`](Array::MAX_LEN)
    /// or the padding cannot be allocated.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), Value> {
        if index >= Self::MAX_LEN {
            return Err(value);
        }
        let len = self.items.len();
        if index >= len {
            if self.items.try_reserve(index + 1 - len).is_err() {
                return Err(value);
            }
            self.items.resize(index + 1, Value::Undefined);
        }
        self.items[index] = value;
        Ok(())
    }

    /// Returns a copy of `self` with the element at `index` replaced.
    ///
    /// All other elements keep their position and identity.
    /// Fails like [`set`](Array::set).
    pub fn with_item(&self, index: usize, value: Value) -> Result<Self, Value> {
        let mut copy = self.clone();
        copy.set(index, value)?;
        Ok(copy)
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl Deref for Array {
    type Target = [Value];

    #[inline]
    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl Slots for Array {
    fn own_slot(&self, key: &str) -> Option<Value> {
        if key == "length" {
            return Some(Value::from(self.items.len()));
        }
        self.items.get(parse_index(key)?).cloned()
    }

    fn own_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = (0..self.items.len()).map(|i| i.to_string()).collect();
        keys.push(String::from("length"));
        keys
    }

    #[inline]
    fn inherited_slot(&self, key: &str) -> Option<Value> {
        builtins::array_method(key).map(Value::Function)
    }

    fn inherited_keys(&self) -> Vec<String> {
        ARRAY_METHODS.iter().map(|name| String::from(*name)).collect()
    }

    #[inline]
    fn slot_at(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }
}

impl SlotsMut for Array {
    /// Only index keys can be written; any other key is handed back.
    fn set_slot(&mut self, key: &str, value: Value) -> Result<(), Value> {
        match parse_index(key) {
            Some(index) => self.set(index, value),
            None => Err(value),
        }
    }
}

impl From<Vec<Value>> for Array {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    #[inline]
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Array;
    use crate::{Slots, SlotsMut, Value};

    #[test]
    fn padding_writes() {
        let mut arr = Array::new();
        assert_eq!(arr.set(2, Value::from("c")), Ok(()));
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0], Value::Undefined);
        assert!(arr.has_own_slot("0"));
        assert_eq!(arr.own_slot("2"), Some(Value::from("c")));
    }

    #[test]
    fn only_index_keys_are_writable() {
        let mut arr = Array::from_iter([1, 2]);
        assert_eq!(arr.set_slot("1", Value::from(9)), Ok(()));
        assert_eq!(arr.set_slot("01", Value::from(9)), Err(Value::from(9)));
        assert_eq!(arr.set_slot("name", Value::Null), Err(Value::Null));
        assert_eq!(arr[1], Value::from(9));
    }

    #[test]
    fn with_item_keeps_other_elements() {
        let shared = Value::from(Array::from_iter([0]));
        let arr = Array::from_iter([shared.clone(), Value::from(1), Value::from(2)]);
        let copy = arr.with_item(1, Value::from("x")).unwrap();

        assert!(copy[0].ptr_eq(&shared));
        assert_eq!(copy[1], Value::from("x"));
        assert_eq!(copy[2], Value::from(2));
        assert_eq!(arr[1], Value::from(1));
    }

    #[test]
    fn writes_beyond_the_max_length_are_refused() {
        let mut arr = Array::from_iter([1]);
        assert_eq!(arr.set(usize::MAX, Value::Null), Err(Value::Null));
        assert_eq!(arr.set(Array::MAX_LEN, Value::Null), Err(Value::Null));
        assert_eq!(arr.set_slot("4294967296", Value::Null), Err(Value::Null));
        assert_eq!(arr.with_item(usize::MAX, Value::Null), Err(Value::Null));
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn methods_are_inherited() {
        let arr = Array::from_iter([1]);
        assert!(arr.own_slot("join").is_none());
        assert!(arr.inherited_slot("join").is_some());
        assert!(arr.visible_keys().iter().any(|k| k == "includes"));
        assert!(arr.inherited_slot("sort").is_none());
    }
}
