use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use core::error::Error;
use core::fmt;

use crate::Value;

// -----------------------------------------------------------------------------
// Error

/// An error raised by a [`Function`] while it runs.
///
/// The original error is kept as-is, so callers of path invocation can
/// recover it with [`downcast_ref`](CallError::downcast_ref).
///
/// # Examples
///
/// ```
/// use kp_value::CallError;
///
/// let err = CallError::new(core::fmt::Error);
/// assert!(err.downcast_ref::<core::fmt::Error>().is_some());
///
/// let err = CallError::msg("boom");
/// assert_eq!(err.to_string(), "boom");
/// ```
pub struct CallError(Box<dyn Error + Send + Sync + 'static>);

#[derive(Debug)]
struct Message(Cow<'static, str>);

impl fmt::Display for Message {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Message {}

impl CallError {
    /// Wraps an arbitrary error raised by a callable.
    #[inline]
    pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self(Box::new(error))
    }

    /// Creates an error carrying only a message.
    #[inline]
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self(Box::new(Message(message.into())))
    }

    /// Returns the wrapped error if it is of type `E`.
    #[inline]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    #[inline]
    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for CallError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for CallError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for CallError {
    #[inline]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

// -----------------------------------------------------------------------------
// Function

/// The signature of a callable: the bound receiver, then the arguments.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, CallError> + Send + Sync;

/// A callable value.
///
/// The receiver passed to [`call`](Function::call) is the node the function
/// was read from, so methods can inspect the container that owns them.
///
/// Two functions are equal only if they share the same underlying closure.
///
/// # Examples
///
/// ```
/// use kp_value::{Function, Slots, Value};
///
/// let len = Function::new("len", |this, _args| {
///     Ok(this.slots().and_then(|s| s.own_slot("length")).unwrap_or_default())
/// });
///
/// let res = len.call(&Value::from("abc"), &[]).unwrap();
/// assert_eq!(res, Value::from(3));
/// ```
#[derive(Clone)]
pub struct Function {
    name: Cow<'static, str>,
    call: Arc<NativeFn>,
}

impl Function {
    /// Creates a named function from a closure.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, call: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(call),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with `this` bound as receiver.
    ///
    /// Errors raised by the closure are returned unchanged.
    #[inline]
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, CallError> {
        (self.call)(this, args)
    }

    /// Returns `true` if both functions share the same closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::{CallError, Function};
    use crate::Value;

    #[derive(Debug, PartialEq)]
    struct Custom(u8);

    impl core::fmt::Display for Custom {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "custom {}", self.0)
        }
    }

    impl core::error::Error for Custom {}

    #[test]
    fn errors_keep_their_type() {
        let fail = Function::new("fail", |_, _| Err(CallError::new(Custom(7))));
        let err = fail.call(&Value::Null, &[]).unwrap_err();
        assert_eq!(err.downcast_ref::<Custom>(), Some(&Custom(7)));
        assert_eq!(format!("{err}"), "custom 7");
    }

    #[test]
    fn identity() {
        let f = Function::new("id", |this, _| Ok(this.clone()));
        let g = f.clone();
        let h = Function::new("id", |this, _| Ok(this.clone()));
        assert!(f.ptr_eq(&g));
        assert!(!f.ptr_eq(&h));
        assert_eq!(format!("{f:?}"), "[Function: id]");
    }
}
