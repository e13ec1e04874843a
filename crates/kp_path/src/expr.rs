//! Provide reusable multi-step path expressions.

use alloc::boxed::Box;
use core::fmt;

use kp_utils::vec::FastVec;
use kp_value::{CallError, Value};

use crate::resolve::{self, Visibility};
use crate::{PathError, PathSpec, PathStep, mutate};

// -----------------------------------------------------------------------------
// Reusable path expression

/// A parsed path, a thin wrapper over `Box<[PathStep]>`.
///
/// The free functions ([`get`](crate::get), [`set`](crate::set), ...) parse
/// their path on every call. A `PathExpr` is parsed once and can then be
/// applied to any number of roots; it holds no reference to any data.
///
/// # Examples
///
/// ```
/// use kp_path::PathExpr;
/// use kp_value::Value;
///
/// let expr = PathExpr::parse("a[0].b").unwrap();
/// assert_eq!(expr.len(), 2);
///
/// let mut root = Value::object();
/// expr.set(&mut root, 1);
/// assert_eq!(expr.get(&root), Value::from(1));
///
/// expr.set(&mut root, "x");
/// assert_eq!(expr.get(&root), Value::from("x"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct PathExpr(Box<[PathStep]>);

impl From<Box<[PathStep]>> for PathExpr {
    #[inline]
    fn from(value: Box<[PathStep]>) -> Self {
        Self(value)
    }
}

impl PathExpr {
    /// Parses any [`PathSpec`] into a canonical expression.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kp_path::PathExpr;
    /// let a = PathExpr::parse("x[0].y").unwrap();
    /// let b = PathExpr::parse(["x", "0", "y"]).unwrap();
    /// assert_eq!(a, b);
    /// ```
    #[inline]
    pub fn parse(spec: impl PathSpec) -> Result<Self, PathError> {
        spec.to_path()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, PathStep> {
        self.0.iter()
    }

    /// Returns the last step and the steps leading to it.
    #[inline]
    pub fn split_last(&self) -> Option<(&PathStep, &[PathStep])> {
        self.0.split_last()
    }

    /// Concat two `PathExpr`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kp_path::PathExpr;
    /// let a = PathExpr::parse("a[0]").unwrap();
    /// let b = PathExpr::parse("b.c").unwrap();
    /// assert_eq!(a.concat(b).to_string(), "a[0].b.c");
    /// ```
    pub fn concat(self, other: PathExpr) -> Self {
        let mut vec: FastVec<PathStep, 12> = FastVec::new();
        let data = vec.get();
        data.extend(self.0);
        data.extend(other.0);
        Self(vec.into_boxed_slice())
    }

    /// Returns the value at this path, or `None` if it is missing or `Undefined`.
    #[inline]
    pub fn resolve(&self, root: &Value) -> Option<Value> {
        resolve::resolve(root, &self.0)
    }

    /// Returns the value at this path, `Undefined` when missing.
    #[inline]
    pub fn get(&self, root: &Value) -> Value {
        self.resolve(root).unwrap_or_default()
    }

    /// Returns the value at this path, or `default` when missing.
    ///
    /// A resolved `Null` is returned as is.
    #[inline]
    pub fn get_or(&self, root: &Value, default: impl Into<Value>) -> Value {
        self.resolve(root).unwrap_or_else(|| default.into())
    }

    /// Returns `true` if the last step names an own slot of its node.
    #[inline]
    pub fn has(&self, root: &Value) -> bool {
        resolve::probe(root, &self.0, Visibility::Own)
    }

    /// Returns `true` if the last step names an own or inherited slot of its node.
    #[inline]
    pub fn has_in(&self, root: &Value) -> bool {
        resolve::probe(root, &self.0, Visibility::Visible)
    }

    /// Calls the function at this path with the node holding it as receiver.
    ///
    /// Returns `Undefined` when nothing callable is there.
    /// Errors raised by the function are returned unchanged.
    #[inline]
    pub fn invoke(&self, root: &Value, args: &[Value]) -> Result<Value, CallError> {
        resolve::invoke(root, &self.0, args)
    }

    /// Writes `value` at this path, creating missing containers.
    ///
    /// See [`set`](crate::set) for the copy-on-write rules.
    #[inline]
    pub fn set<'r>(&self, root: &'r mut Value, value: impl Into<Value>) -> &'r mut Value {
        mutate::assign(root, &self.0, value.into());
        root
    }
}

impl<'a> IntoIterator for &'a PathExpr {
    type Item = &'a PathStep;
    type IntoIter = core::slice::Iter<'a, PathStep>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(step, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::PathExpr;
    use crate::PathStep;
    use kp_value::Value;

    #[test]
    fn display_round_trips_through_the_parser() {
        let expr = PathExpr::parse(["a", "0", "b", "1", "c"]).unwrap();
        assert_eq!(expr.to_string(), "a[0].b[1].c");
        assert_eq!(PathExpr::parse(expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn split_last() {
        let expr = PathExpr::parse("a.b[2]").unwrap();
        let (last, init) = expr.split_last().unwrap();
        assert_eq!(last, &PathStep::indexed("b", 2));
        assert_eq!(init, &[PathStep::new("a")]);
        assert!(PathExpr::default().split_last().is_none());
    }

    #[test]
    fn reuse_across_roots() {
        let expr = PathExpr::parse("k").unwrap();
        let a: Value = serde_json::from_str(r#"{"k": 1}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"k": null}"#).unwrap();
        assert_eq!(expr.get(&a), Value::from(1));
        assert_eq!(expr.get_or(&b, 5), Value::Null);
        assert_eq!(expr.get_or(&Value::object(), 5), Value::from(5));
        assert_eq!(expr.iter().count(), 1);
    }

    #[test]
    fn empty_expression() {
        let expr = PathExpr::parse("").unwrap();
        let mut root: Value = serde_json::from_str(r#"{"k": 1}"#).unwrap();
        assert_eq!(expr.get(&root), root);
        assert!(!expr.has(&root));
        expr.set(&mut root, 2);
        assert_eq!(root, serde_json::from_str::<Value>(r#"{"k": 1}"#).unwrap());
    }
}
