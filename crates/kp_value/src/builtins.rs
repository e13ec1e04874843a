//! Built-in methods inherited by every [`Array`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Array, CallError, Function, Value, format_number};

/// Names of the inherited array methods.
pub(crate) const ARRAY_METHODS: &[&str] = &["slice", "concat", "join", "indexOf", "includes"];

type ArrayMethod = fn(&Array, &[Value]) -> Value;

/// Returns the built-in method `name`, bound to no receiver yet.
pub(crate) fn array_method(name: &str) -> Option<Function> {
    let name: &'static str = ARRAY_METHODS.iter().copied().find(|m| *m == name)?;
    let method: ArrayMethod = match name {
        "slice" => slice,
        "concat" => concat,
        "join" => join,
        "indexOf" => index_of,
        _ => includes,
    };

    Some(Function::new(name, move |this, args| match this {
        Value::Array(arr) => Ok(method(arr, args)),
        other => Err(CallError::msg(format!(
            "Array method `{name}` called on a receiver of kind {}",
            other.kind()
        ))),
    }))
}

// -----------------------------------------------------------------------------
// Argument helpers

/// Resolves a relative position argument against `len`.
///
/// Negative positions count from the end, `NaN` and non-numbers count as 0,
/// and a missing argument falls back to `default`.
fn relative(arg: Option<&Value>, len: usize, default: usize) -> usize {
    let n = match arg {
        None | Some(Value::Undefined) => return default,
        // `as` truncates toward zero and saturates.
        Some(value) => value.as_f64().filter(|n| !n.is_nan()).unwrap_or(0.0) as i64 as f64,
    };
    let len = len as f64;
    let pos = if n < 0.0 { (len + n).max(0.0) } else { n.min(len) };
    pos as usize
}

/// Identity for containers and functions, value equality for primitives.
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_), _) | (Value::Object(_), _) | (Value::Function(_), _) => a.ptr_eq(b),
        _ => a == b,
    }
}

/// Like [`strict_eq`], but `NaN` equals `NaN`.
fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_nan() && y.is_nan() => true,
        _ => strict_eq(a, b),
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null => String::new(),
        Value::Bool(b) => String::from(if *b { "true" } else { "false" }),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Array(arr) => join_with(arr, ","),
        Value::Object(_) => String::from("[object Object]"),
        Value::Function(f) => String::from(f.name()),
    }
}

fn join_with(arr: &Array, sep: &str) -> String {
    let parts: Vec<String> = arr.iter().map(to_text).collect();
    parts.join(sep)
}

// -----------------------------------------------------------------------------
// Methods

fn slice(arr: &Array, args: &[Value]) -> Value {
    let len = arr.len();
    let start = relative(args.first(), len, 0);
    let end = relative(args.get(1), len, len);
    if start >= end {
        return Value::array();
    }
    Value::from(arr[start..end].to_vec())
}

fn concat(arr: &Array, args: &[Value]) -> Value {
    let mut items = arr.to_vec();
    for arg in args {
        match arg {
            Value::Array(other) => items.extend(other.iter().cloned()),
            other => items.push(other.clone()),
        }
    }
    Value::from(items)
}

fn join(arr: &Array, args: &[Value]) -> Value {
    let sep = match args.first() {
        None | Some(Value::Undefined) => String::from(","),
        Some(sep) => to_text(sep),
    };
    Value::String(join_with(arr, &sep))
}

fn index_of(arr: &Array, args: &[Value]) -> Value {
    let needle = args.first().unwrap_or(&Value::Undefined);
    let from = relative(args.get(1), arr.len(), 0);
    match arr[from..].iter().position(|item| strict_eq(item, needle)) {
        Some(pos) => Value::from(from + pos),
        None => Value::from(-1),
    }
}

fn includes(arr: &Array, args: &[Value]) -> Value {
    let needle = args.first().unwrap_or(&Value::Undefined);
    let from = relative(args.get(1), arr.len(), 0);
    Value::Bool(arr[from..].iter().any(|item| same_value_zero(item, needle)))
}
