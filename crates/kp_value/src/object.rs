use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kp_utils::hash::HashMap;

use crate::{Slots, SlotsMut, Value};

// -----------------------------------------------------------------------------
// Object

/// A keyed container with an optional prototype.
///
/// Own properties live in the object itself. The prototype chain contributes
/// *inherited* properties: they are visible through [`Slots::visible_slot`]
/// but not through [`Slots::own_slot`], which is what separates an own-property
/// test from an in-chain test.
///
/// # Key order
///
/// Properties are kept in a hash map with a fixed seed, so
/// [`keys`](Object::keys), [`iter`](Object::iter) and serialization follow
/// the map's order, **not** insertion order. The order is reproducible:
/// the same sequence of insertions always yields the same order, across
/// runs and platforms.
///
/// # Examples
///
/// ```
/// use kp_value::{Object, Slots, Value};
///
/// let mut proto = Object::new();
/// proto.insert("kind", "base");
///
/// let mut obj = Object::create(proto.into());
/// obj.insert("id", 7);
///
/// assert_eq!(obj.own_slot("id"), Some(Value::from(7)));
/// assert_eq!(obj.own_slot("kind"), None);
/// assert_eq!(obj.visible_slot("kind"), Some(Value::from("base")));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Object {
    props: HashMap<String, Value>,
    proto: Option<Arc<Object>>,
}

impl Object {
    /// Creates an empty object without prototype.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object inheriting from `proto`.
    #[inline]
    pub fn create(proto: Arc<Object>) -> Self {
        Self {
            props: HashMap::default(),
            proto: Some(proto),
        }
    }

    /// Returns the prototype of this object.
    #[inline]
    pub fn proto(&self) -> Option<&Arc<Object>> {
        self.proto.as_ref()
    }

    /// Replaces the prototype of this object.
    #[inline]
    pub fn set_proto(&mut self, proto: Option<Arc<Object>>) {
        self.proto = proto;
    }

    /// Inserts an own property, returning the previous own value.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.props.insert(key.into(), value.into())
    }

    /// Returns a reference to an own property.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.props.remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    /// Returns the number of own properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Iterates over own property names.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    /// Iterates over own properties.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walks the prototype chain, nearest ancestor first.
    fn ancestors(&self) -> impl Iterator<Item = &Object> {
        let mut next = self.proto.as_deref();
        core::iter::from_fn(move || {
            let current = next?;
            next = current.proto.as_deref();
            Some(current)
        })
    }
}

impl Slots for Object {
    #[inline]
    fn own_slot(&self, key: &str) -> Option<Value> {
        self.props.get(key).cloned()
    }

    fn own_keys(&self) -> Vec<String> {
        self.props.keys().cloned().collect()
    }

    fn inherited_slot(&self, key: &str) -> Option<Value> {
        self.ancestors().find_map(|proto| proto.props.get(key).cloned())
    }

    fn inherited_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for proto in self.ancestors() {
            for key in proto.props.keys() {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }

    #[inline]
    fn has_own_slot(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }
}

impl SlotsMut for Object {
    #[inline]
    fn set_slot(&mut self, key: &str, value: Value) -> Result<(), Value> {
        self.props.insert(String::from(key), value);
        Ok(())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            props: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            proto: None,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.props.iter()).finish()
    }
}
