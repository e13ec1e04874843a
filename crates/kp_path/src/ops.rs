//! The public path operations.
//!
//! Each operation parses its path, then reads, tests, calls or writes the
//! location it names. A path that does not exist in the data is never an
//! error: reads yield [`Value::Undefined`] and tests yield `false`. Errors
//! are limited to path specs that cannot describe a path, and to failures
//! raised by a function called through [`invoke`].

use alloc::string::ToString;
use alloc::vec::Vec;

use kp_value::{Object, Slots, Value};

use crate::{InvokeError, PathError, PathSpec};

// -----------------------------------------------------------------------------
// Reads

/// Returns the value at `path`, or `Undefined` if it does not exist.
///
/// # Examples
///
/// ```
/// use kp_value::Value;
///
/// let root: Value = serde_json::from_str(r#"{"a": [{"b": {"c": 3}}]}"#).unwrap();
///
/// assert_eq!(kp_path::get(&root, "a[0].b.c").unwrap(), Value::from(3));
/// assert_eq!(kp_path::get(&root, ["a", "0", "b", "c"]).unwrap(), Value::from(3));
/// assert_eq!(kp_path::get(&root, "a.b.c").unwrap(), Value::Undefined);
/// ```
#[inline]
pub fn get(root: &Value, path: impl PathSpec) -> Result<Value, PathError> {
    Ok(path.to_path()?.get(root))
}

/// Returns the value at `path`, or `default` if it does not exist or is
/// `Undefined`. A `Null` found at `path` is returned unchanged.
///
/// # Examples
///
/// ```
/// use kp_value::Value;
///
/// let root: Value = serde_json::from_str(r#"{"a": null}"#).unwrap();
///
/// assert_eq!(kp_path::get_or(&root, "a", "default").unwrap(), Value::Null);
/// assert_eq!(kp_path::get_or(&root, "b", "default").unwrap(), Value::from("default"));
/// ```
#[inline]
pub fn get_or(root: &Value, path: impl PathSpec, default: impl Into<Value>) -> Result<Value, PathError> {
    Ok(path.to_path()?.get_or(root, default))
}

/// Returns `true` if `path` names an own slot of the node it ends on.
///
/// The slot may hold `Undefined`. Slots inherited from a prototype, and the
/// built-in array methods, are not own slots.
#[inline]
pub fn has(root: &Value, path: impl PathSpec) -> Result<bool, PathError> {
    Ok(path.to_path()?.has(root))
}

/// Returns `true` if `path` names an own or inherited slot of the node it
/// ends on.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use kp_value::{Object, Value};
///
/// let proto = Arc::new(Object::from_iter([("shared", 1)]));
/// let root = Value::from(Object::from_iter([("o", Value::from(Object::create(proto)))]));
///
/// assert!(kp_path::has_in(&root, "o.shared").unwrap());
/// assert!(!kp_path::has(&root, "o.shared").unwrap());
/// ```
#[inline]
pub fn has_in(root: &Value, path: impl PathSpec) -> Result<bool, PathError> {
    Ok(path.to_path()?.has_in(root))
}

/// Resolves every path of `paths`, in order.
///
/// Missing locations yield `Undefined` in their position.
///
/// # Examples
///
/// ```
/// use kp_value::Value;
///
/// let root: Value = serde_json::from_str(r#"{"a": [{"b": {"c": 3}}, 4]}"#).unwrap();
///
/// let values = kp_path::at(&root, ["a[0].b.c", "a[1]", "z"]).unwrap();
/// assert_eq!(values, [Value::from(3), Value::from(4), Value::Undefined]);
/// ```
pub fn at<I>(root: &Value, paths: I) -> Result<Vec<Value>, PathError>
where
    I: IntoIterator,
    I::Item: PathSpec,
{
    paths.into_iter().map(|path| get(root, path)).collect()
}

/// Resolves a dynamic collection of paths.
///
/// - An array is a list of path specs.
/// - An array-like object (an own integral `length`, and neither `sort` nor
///   `splice` visible) is read as the specs at keys `0` to `length - 1`.
/// - Any other value is a single path spec.
pub fn at_value(root: &Value, paths: &Value) -> Result<Vec<Value>, PathError> {
    match paths {
        Value::Array(arr) => at(root, arr.iter()),
        Value::Object(obj) => match array_like_len(obj) {
            Some(len) => {
                let specs: Vec<Value> = (0..len)
                    .map(|i| obj.own_slot(&i.to_string()).unwrap_or_default())
                    .collect();
                at(root, &specs)
            }
            None => at(root, [paths]),
        },
        spec => at(root, [spec]),
    }
}

fn array_like_len(obj: &Object) -> Option<usize> {
    if obj.has_visible_slot("sort") || obj.has_visible_slot("splice") {
        return None;
    }
    obj.own_slot("length")?.as_index()
}

// -----------------------------------------------------------------------------
// Calls

/// Calls the function at `path` with `args`, bound to the node holding it.
///
/// For a plain last step the receiver is the node the step is read from.
/// For an indexed last step such as `fs[0]` it is the indexed container
/// `fs`. When nothing callable is found the result is `Undefined` and
/// nothing is called.
///
/// # Examples
///
/// ```
/// use kp_value::Value;
///
/// let root: Value = serde_json::from_str(r#"{"a": [{"b": {"c": [1, 2, 3, 4]}}]}"#).unwrap();
///
/// let res = kp_path::invoke(&root, "a[0].b.c.slice", &[1.into(), 3.into()]).unwrap();
/// assert_eq!(res, Value::from(vec![Value::from(2), Value::from(3)]));
///
/// let res = kp_path::invoke(&root, "a[0].b.missing", &[]).unwrap();
/// assert_eq!(res, Value::Undefined);
/// ```
#[inline]
pub fn invoke(root: &Value, path: impl PathSpec, args: &[Value]) -> Result<Value, InvokeError> {
    Ok(path.to_path()?.invoke(root, args)?)
}

// -----------------------------------------------------------------------------
// Writes

/// Writes `value` at `path` and returns `root`.
///
/// Missing containers are created: an array when the step that creates it is
/// indexed (`a[0]`) or its key is an index, an object otherwise. Non-container
/// values in the way are overwritten. An array written with a named key, or
/// with an index of [`Array::MAX_LEN`](kp_value::Array::MAX_LEN) or more,
/// becomes an object holding its elements under their decimal keys.
///
/// The root container is updated in place. Every container below it along
/// `path` is replaced by a shallow copy, so values shared elsewhere are never
/// modified and siblings of the path keep their identity. An empty path
/// leaves `root` unchanged.
///
/// # Examples
///
/// ```
/// use kp_value::Value;
///
/// let mut root: Value = serde_json::from_str(r#"{"a": [{"b": {"c": 3}}]}"#).unwrap();
///
/// kp_path::set(&mut root, "a[0].b.c", 4).unwrap();
/// assert_eq!(kp_path::get(&root, "a[0].b.c").unwrap(), Value::from(4));
///
/// kp_path::set(&mut root, ["x", "0", "y", "z"], 5).unwrap();
/// assert_eq!(kp_path::get(&root, "x[0].y.z").unwrap(), Value::from(5));
/// ```
#[inline]
pub fn set<'r>(
    root: &'r mut Value,
    path: impl PathSpec,
    value: impl Into<Value>,
) -> Result<&'r mut Value, PathError> {
    Ok(path.to_path()?.set(root, value))
}

// -----------------------------------------------------------------------------
// Method-call style

/// Method-call style access to the path operations.
///
/// # Examples
///
/// ```
/// use kp_path::PathAccess;
/// use kp_value::Value;
///
/// let mut root = Value::object();
/// root.set_path("a.b", 1).unwrap();
///
/// assert!(root.has_path("a.b").unwrap());
/// assert_eq!(root.get_path("a.b").unwrap(), Value::from(1));
/// ```
pub trait PathAccess {
    /// See [`get`].
    fn get_path(&self, path: impl PathSpec) -> Result<Value, PathError>;

    /// See [`get_or`].
    fn get_path_or(&self, path: impl PathSpec, default: impl Into<Value>) -> Result<Value, PathError>;

    /// See [`has`].
    fn has_path(&self, path: impl PathSpec) -> Result<bool, PathError>;

    /// See [`has_in`].
    fn has_path_in(&self, path: impl PathSpec) -> Result<bool, PathError>;

    /// See [`at`].
    fn at_paths<I>(&self, paths: I) -> Result<Vec<Value>, PathError>
    where
        I: IntoIterator,
        I::Item: PathSpec;

    /// See [`invoke`].
    fn invoke_path(&self, path: impl PathSpec, args: &[Value]) -> Result<Value, InvokeError>;

    /// See [`set`].
    fn set_path(&mut self, path: impl PathSpec, value: impl Into<Value>) -> Result<&mut Self, PathError>;
}

impl PathAccess for Value {
    #[inline]
    fn get_path(&self, path: impl PathSpec) -> Result<Value, PathError> {
        get(self, path)
    }

    #[inline]
    fn get_path_or(&self, path: impl PathSpec, default: impl Into<Value>) -> Result<Value, PathError> {
        get_or(self, path, default)
    }

    #[inline]
    fn has_path(&self, path: impl PathSpec) -> Result<bool, PathError> {
        has(self, path)
    }

    #[inline]
    fn has_path_in(&self, path: impl PathSpec) -> Result<bool, PathError> {
        has_in(self, path)
    }

    #[inline]
    fn at_paths<I>(&self, paths: I) -> Result<Vec<Value>, PathError>
    where
        I: IntoIterator,
        I::Item: PathSpec,
    {
        at(self, paths)
    }

    #[inline]
    fn invoke_path(&self, path: impl PathSpec, args: &[Value]) -> Result<Value, InvokeError> {
        invoke(self, path, args)
    }

    #[inline]
    fn set_path(&mut self, path: impl PathSpec, value: impl Into<Value>) -> Result<&mut Self, PathError> {
        set(self, path, value)
    }
}
