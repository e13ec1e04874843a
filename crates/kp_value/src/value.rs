use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{Array, Function, Object, Slots, ValueKind};

// -----------------------------------------------------------------------------
// Value

/// A dynamically shaped value addressed by path expressions.
///
/// Containers are reference counted: cloning a `Value` never deep-copies,
/// and [`ptr_eq`](Value::ptr_eq) tells whether two values are the same
/// container. Path mutation relies on this to replace only the containers
/// along a written path while siblings keep their identity.
///
/// [`Value::Undefined`] is a storable value distinct from [`Value::Null`]:
/// path resolution treats a stored `Undefined` as missing, but the slot
/// holding it is still an own slot.
///
/// # Examples
///
/// ```
/// use kp_value::{Array, Value, ValueKind};
///
/// let list = Value::from(Array::from_iter([Value::from(1), Value::from("two")]));
/// assert_eq!(list.kind(), ValueKind::Array);
///
/// let alias = list.clone();
/// assert!(alias.ptr_eq(&list));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Arc<Array>),
    Object(Arc<Object>),
    Function(Function),
}

impl Value {
    /// Returns the [`ValueKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Function(_) => ValueKind::Function,
        }
    }

    /// Creates an empty keyed container.
    #[inline]
    pub fn object() -> Self {
        Self::Object(Arc::new(Object::new()))
    }

    /// Creates an empty indexed container.
    #[inline]
    pub fn array() -> Self {
        Self::Array(Arc::new(Array::new()))
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    #[inline]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an index if it is a non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 && *n == (*n as usize) as f64 => {
                Some(*n as usize)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&Arc<Array>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&Arc<Object>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the slot capability of this node, if it has any.
    ///
    /// Objects, arrays and strings have slots; other primitives do not.
    #[inline]
    pub fn slots(&self) -> Option<&dyn Slots> {
        match self {
            Self::Object(o) => Some(&**o),
            Self::Array(a) => Some(&**a),
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if both values are the same container or function.
    ///
    /// Primitives are never pointer-equal.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Converts `Undefined` into `None`, keeping every other value.
    #[inline]
    pub fn defined(self) -> Option<Value> {
        match self {
            Self::Undefined => None,
            value => Some(value),
        }
    }
}

// -----------------------------------------------------------------------------
// Number text

/// Formats a number the way keys and joined strings spell it:
/// integral values without a fractional part.
///
/// # Examples
///
/// ```
/// assert_eq!(kp_value::format_number(2.0), "2");
/// assert_eq!(kp_value::format_number(-0.5), "-0.5");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n == (n as i64) as f64 {
        (n as i64).to_string()
    } else if n.is_nan() {
        String::from("NaN")
    } else if n.is_infinite() {
        String::from(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        n.to_string()
    }
}

// -----------------------------------------------------------------------------
// Equality

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Debug::fmt(b, f),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => fmt::Debug::fmt(s, f),
            Self::Array(a) => fmt::Debug::fmt(&**a, f),
            Self::Object(o) => fmt::Debug::fmt(&**o, f),
            Self::Function(func) => fmt::Debug::fmt(func, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Array(Arc::new(Array::from(value)))
    }
}

impl From<Array> for Value {
    #[inline]
    fn from(value: Array) -> Self {
        Self::Array(Arc::new(value))
    }
}

impl From<Object> for Value {
    #[inline]
    fn from(value: Object) -> Self {
        Self::Object(Arc::new(value))
    }
}

impl From<Function> for Value {
    #[inline]
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes [`Value::Null`].
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(Array::from_iter(iter))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from(Object::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Value, format_number};
    use crate::{Object, ValueKind};

    #[test]
    fn null_and_undefined_differ() {
        assert_ne!(Value::Null, Value::Undefined);
        assert_eq!(Value::default(), Value::Undefined);
        assert_eq!(Value::Null.defined(), Some(Value::Null));
        assert_eq!(Value::Undefined.defined(), None);
    }

    #[test]
    fn index_conversion() {
        assert_eq!(Value::from(3).as_index(), Some(3));
        assert_eq!(Value::from(0.0).as_index(), Some(0));
        assert_eq!(Value::from(-1).as_index(), None);
        assert_eq!(Value::from(1.5).as_index(), None);
        assert_eq!(Value::from(f64::NAN).as_index(), None);
        assert_eq!(Value::from("1").as_index(), None);
    }

    #[test]
    fn number_text() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn structural_equality_and_identity() {
        let a = Value::from(vec![Value::from(1), Value::from("x")]);
        let b = Value::from(vec![Value::from(1), Value::from("x")]);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
        assert!(!Value::from(1).ptr_eq(&Value::from(1)));

        let o: Value = [("k", Value::Null)].into_iter().collect();
        assert_eq!(o.kind(), ValueKind::Object);
        assert_eq!(o, Value::from(Object::from_iter([("k", Value::Null)])));
    }
}
