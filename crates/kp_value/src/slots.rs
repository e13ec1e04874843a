//! Provide the slot capability shared by every addressable node.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::Value;

// -----------------------------------------------------------------------------
// Index keys

/// Parses `key` as a canonical array index.
///
/// Only ASCII digits are accepted, without sign and without leading zeros
/// (except for `"0"` itself), so `"01"` and `"+1"` stay ordinary keys.
///
/// # Examples
///
/// ```
/// use kp_value::parse_index;
///
/// assert_eq!(parse_index("0"), Some(0));
/// assert_eq!(parse_index("42"), Some(42));
/// assert_eq!(parse_index("042"), None);
/// assert_eq!(parse_index("-1"), None);
/// assert_eq!(parse_index(""), None);
/// ```
pub fn parse_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => key.parse().ok(),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Read capability

/// Read access to the named slots of a node.
///
/// A slot is either *own* (held by the node itself) or *inherited* (made
/// visible by something the node derives from, such as an object prototype
/// or the built-in array methods). Path traversal reads through
/// [`visible_slot`](Slots::visible_slot), while own-property tests use
/// [`has_own_slot`](Slots::has_own_slot).
///
/// An own slot holding [`Value::Undefined`] is still present.
pub trait Slots {
    /// Returns the value of the own slot `key`, if present.
    fn own_slot(&self, key: &str) -> Option<Value>;

    /// Returns the keys of all own slots.
    fn own_keys(&self) -> Vec<String>;

    /// Returns the value of `key` contributed by the node's ancestors.
    ///
    /// Own slots are not consulted.
    #[inline]
    fn inherited_slot(&self, key: &str) -> Option<Value> {
        let _ = key;
        None
    }

    /// Returns the keys contributed by the node's ancestors.
    #[inline]
    fn inherited_keys(&self) -> Vec<String> {
        Vec::new()
    }

    #[inline]
    fn has_own_slot(&self, key: &str) -> bool {
        self.own_slot(key).is_some()
    }

    /// Returns the own slot `key`, falling back to the inherited one.
    #[inline]
    fn visible_slot(&self, key: &str) -> Option<Value> {
        self.own_slot(key).or_else(|| self.inherited_slot(key))
    }

    #[inline]
    fn has_visible_slot(&self, key: &str) -> bool {
        self.has_own_slot(key) || self.inherited_slot(key).is_some()
    }

    /// Returns own keys followed by inherited keys not shadowed by them.
    fn visible_keys(&self) -> Vec<String> {
        let mut keys = self.own_keys();
        for key in self.inherited_keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Returns the visible slot addressed by a numeric index.
    ///
    /// Keyed nodes look the index up as its decimal key;
    /// indexed nodes override this with direct element access.
    #[inline]
    fn slot_at(&self, index: usize) -> Option<Value> {
        self.visible_slot(&index.to_string())
    }
}

// -----------------------------------------------------------------------------
// Write capability

/// Write access to the slots of a container.
pub trait SlotsMut: Slots + Clone {
    /// Writes `value` into the own slot `key`.
    ///
    /// Returns the value back when this container cannot hold `key`,
    /// e.g. a non-index key written to an array.
    fn set_slot(&mut self, key: &str, value: Value) -> Result<(), Value>;

    /// Returns a shallow copy of `self` with the slot `key` replaced.
    ///
    /// Slots other than `key` keep sharing their values with `self`.
    fn with_slot(&self, key: &str, value: Value) -> Result<Self, Value> {
        let mut copy = self.clone();
        copy.set_slot(key, value)?;
        Ok(copy)
    }
}

// -----------------------------------------------------------------------------
// Strings

/// Strings expose their `length` and one slot per character.
impl Slots for String {
    fn own_slot(&self, key: &str) -> Option<Value> {
        if key == "length" {
            return Some(Value::from(self.chars().count()));
        }
        self.slot_at(parse_index(key)?)
    }

    fn own_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = (0..self.chars().count()).map(|i| i.to_string()).collect();
        keys.push(String::from("length"));
        keys
    }

    #[inline]
    fn slot_at(&self, index: usize) -> Option<Value> {
        self.chars().nth(index).map(|c| Value::String(c.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{Slots, parse_index};
    use crate::Value;

    #[test]
    fn index_keys_are_canonical() {
        assert_eq!(parse_index("7"), Some(7));
        assert_eq!(parse_index("10"), Some(10));
        assert_eq!(parse_index("00"), None);
        assert_eq!(parse_index("1.0"), None);
        assert_eq!(parse_index("a1"), None);
        assert_eq!(parse_index("99999999999999999999999999"), None);
    }

    #[test]
    fn string_slots() {
        let s = String::from("héllo");
        assert_eq!(s.own_slot("length"), Some(Value::from(5)));
        assert_eq!(s.own_slot("1"), Some(Value::from("é")));
        assert_eq!(s.own_slot("5"), None);
        assert_eq!(s.own_slot("upper"), None);
        assert!(s.has_visible_slot("0"));
        assert_eq!(
            String::from("ab").own_keys(),
            vec![String::from("0"), String::from("1"), String::from("length")]
        );
    }
}
