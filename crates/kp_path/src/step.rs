//! Provide single-step path accessing support

use alloc::string::String;
use core::fmt;

use kp_value::{Slots, Value};

// -----------------------------------------------------------------------------
// Single step

/// A **singular** traversal unit within a path.
///
/// A step reads the slot `key` of the current node. When `index` is present,
/// the value found at `key` is indexed in turn, so `a[0]` is one step that
/// reads `a` and then its element `0`.
///
/// # Examples
///
/// ```
/// use kp_path::PathStep;
/// use kp_value::Value;
///
/// let root: Value = serde_json::from_str(r#"{"a": [10, 20]}"#).unwrap();
///
/// let step = PathStep::indexed("a", 1);
/// assert_eq!(step.read(&root), Some(Value::from(20)));
/// assert_eq!(step.to_string(), "a[1]");
///
/// assert_eq!(PathStep::new("b").read(&root), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathStep {
    key: String,
    index: Option<usize>,
}

impl PathStep {
    /// Creates a step reading the slot `key`.
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
        }
    }

    /// Creates a step reading the slot `key`, then its element `index`.
    #[inline]
    pub fn indexed(key: impl Into<String>, index: usize) -> Self {
        Self {
            key: key.into(),
            index: Some(index),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Reads the slot `key` of `node` through its visible slots.
    ///
    /// A missing slot and a slot holding `Undefined` both yield `None`.
    #[inline]
    pub fn container(&self, node: &Value) -> Option<Value> {
        node.slots()?.visible_slot(&self.key)?.defined()
    }

    /// Resolves this step against `node`.
    ///
    /// Returns `None` when the target is missing or `Undefined`,
    /// which ends the traversal of the enclosing path.
    pub fn read(&self, node: &Value) -> Option<Value> {
        let child = self.container(node)?;
        match self.index {
            None => Some(child),
            Some(index) => child.slots()?.slot_at(index)?.defined(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.key),
            None => f.write_str(&self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::PathStep;
    use kp_value::Value;

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn plain_and_indexed_reads() {
        let root = json(r#"{"a": [{"b": 1}, null], "n": null, "s": "xyz"}"#);
        assert_eq!(PathStep::new("n").read(&root), Some(Value::Null));
        assert_eq!(PathStep::indexed("a", 1).read(&root), Some(Value::Null));
        assert_eq!(PathStep::indexed("a", 2).read(&root), None);
        assert_eq!(PathStep::indexed("s", 1).read(&root), Some(Value::from("y")));
        assert_eq!(PathStep::indexed("n", 0).read(&root), None);
    }

    #[test]
    fn keyed_nodes_index_by_decimal_key() {
        let root = json(r#"{"a": {"0": "zero"}}"#);
        assert_eq!(PathStep::indexed("a", 0).read(&root), Some(Value::from("zero")));
    }

    #[test]
    fn primitives_have_no_slots() {
        assert_eq!(PathStep::new("x").read(&Value::from(1)), None);
        assert_eq!(PathStep::new("x").read(&Value::Undefined), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", PathStep::new("key")), "key");
        assert_eq!(format!("{}", PathStep::indexed("key", 3)), "key[3]");
    }
}
