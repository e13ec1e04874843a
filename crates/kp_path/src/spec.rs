//! Provide the `PathSpec` interface and the path grammar.

use alloc::string::String;
use alloc::vec::Vec;

use kp_utils::vec::FastVec;
use kp_value::Value;

use crate::segment::{AsSegment, integer_key};
use crate::{PathError, PathExpr, PathStep};

// -----------------------------------------------------------------------------
// PathSpec

/// An interface where the type implementing this trait
/// can be considered as a raw path spec.
///
/// # Syntax
///
/// A string is split on `.`, and each token is one step:
///
/// - Key: `name`, e.g. `a`, `0`, or the empty key between `a..b`
/// - Indexed key: `name[Number]`, e.g. `a[0]`
///
/// Any token that is not exactly `name[Number]` with a non-empty, bracket-free
/// `name` is kept whole as a literal key, so `[0]` and `a[0][1]` are keys.
/// The empty string is the empty path.
///
/// A list of segments (strings or numbers) is scanned left to right. An
/// integer segment following a key that has no index yet becomes that key's
/// index; any other segment is a key of its own, with its full text.
///
/// # Examples
///
/// ```
/// use kp_path::PathSpec;
///
/// let a = "a[0].b".to_path().unwrap();
/// let b = ["a", "0", "b"].to_path().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b.to_string(), "a[0].b");
/// ```
pub trait PathSpec {
    /// Parses this spec into a canonical [`PathExpr`].
    fn to_path(&self) -> Result<PathExpr, PathError>;
}

impl PathSpec for str {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        Ok(parse_str(self))
    }
}

impl PathSpec for String {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        Ok(parse_str(self))
    }
}

impl<T: PathSpec + ?Sized> PathSpec for &T {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        (**self).to_path()
    }
}

impl<S: AsSegment> PathSpec for [S] {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        parse_segments(self)
    }
}

impl<S: AsSegment, const N: usize> PathSpec for [S; N] {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        parse_segments(self.as_slice())
    }
}

impl<S: AsSegment> PathSpec for Vec<S> {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        parse_segments(self.as_slice())
    }
}

impl PathSpec for PathExpr {
    #[inline]
    fn to_path(&self) -> Result<PathExpr, PathError> {
        Ok(self.clone())
    }
}

/// A string value is a string spec, a number is a single segment and an
/// array is a list of segments. Other kinds are rejected.
impl PathSpec for Value {
    fn to_path(&self) -> Result<PathExpr, PathError> {
        match self {
            Value::String(s) => Ok(parse_str(s)),
            Value::Number(_) => parse_segments(core::slice::from_ref(self)),
            Value::Array(arr) => parse_segments(&arr[..]),
            other => Err(PathError::InvalidPathSpec(other.kind())),
        }
    }
}

// -----------------------------------------------------------------------------
// Grammar

fn parse_str(path: &str) -> PathExpr {
    if path.is_empty() {
        return PathExpr::default();
    }

    let mut vec: FastVec<PathStep, 8> = FastVec::new();
    let data = vec.get();

    for token in path.split('.') {
        data.push(parse_token(token));
    }

    PathExpr::from(vec.into_boxed_slice())
}

fn parse_token(token: &str) -> PathStep {
    if let Some(head) = token.strip_suffix(']')
        && let Some((key, digits)) = head.split_once('[')
        && !key.is_empty()
        && !key.contains(']')
        && let Some(index) = integer_key(digits)
    {
        return PathStep::indexed(key, index);
    }
    PathStep::new(token)
}

fn parse_segments<S: AsSegment>(segments: &[S]) -> Result<PathExpr, PathError> {
    let mut vec: FastVec<PathStep, 8> = FastVec::new();
    let data = vec.get();

    // The last key that may still take an index.
    let mut open: Option<String> = None;

    for (position, raw) in segments.iter().enumerate() {
        let segment = raw
            .as_segment()
            .map_err(|kind| PathError::InvalidSegment { position, kind })?;

        match (segment.as_index(), open.take()) {
            (Some(index), Some(key)) => data.push(PathStep::indexed(key, index)),
            (index, prev) => {
                if let Some(key) = prev {
                    data.push(PathStep::new(key));
                }
                let key = segment.into_key();
                if index.is_some() {
                    // Nothing to index into: the numeral is a key.
                    data.push(PathStep::new(key));
                } else {
                    open = Some(key);
                }
            }
        }
    }

    if let Some(key) = open {
        data.push(PathStep::new(key));
    }

    Ok(PathExpr::from(vec.into_boxed_slice()))
}
