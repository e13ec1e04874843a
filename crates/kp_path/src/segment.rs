//! Provide raw segments of list-shaped path specs.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};

use kp_value::{Value, ValueKind, format_number};

// -----------------------------------------------------------------------------
// Segment

/// One raw segment of a list-shaped path spec, before canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A textual segment. It still counts as an integer segment
    /// when it is made only of ASCII digits.
    Key(Cow<'a, str>),
    /// A non-negative integer segment.
    Index(usize),
}

impl Segment<'_> {
    /// Returns the integer this segment denotes, if it is an integer segment.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => integer_key(key),
        }
    }

    /// Returns the full text of this segment.
    pub fn into_key(self) -> String {
        match self {
            Self::Key(key) => key.into_owned(),
            Self::Index(index) => index.to_string(),
        }
    }
}

/// Parses a segment made only of ASCII digits.
///
/// Unlike array index keys, leading zeros are allowed here: `"01"` folds
/// into the preceding step as index `1`.
pub(crate) fn integer_key(key: &str) -> Option<usize> {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        key.parse().ok()
    } else {
        None
    }
}

fn number_segment(n: f64) -> Segment<'static> {
    match Value::Number(n).as_index() {
        Some(index) => Segment::Index(index),
        None => Segment::Key(Cow::Owned(format_number(n))),
    }
}

// -----------------------------------------------------------------------------
// AsSegment

/// Types usable as one segment of a list-shaped path spec.
///
/// Strings and numbers are segments. Negative or fractional numbers become
/// literal keys in their shortest spelling (`-1`, `1.5`).
///
/// On failure the kind of the offending value is returned.
pub trait AsSegment {
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind>;
}

impl AsSegment for str {
    #[inline]
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
        Ok(Segment::Key(Cow::Borrowed(self)))
    }
}

impl AsSegment for String {
    #[inline]
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
        Ok(Segment::Key(Cow::Borrowed(self.as_str())))
    }
}

impl<T: AsSegment + ?Sized> AsSegment for &T {
    #[inline]
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
        (**self).as_segment()
    }
}

impl AsSegment for Segment<'_> {
    #[inline]
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
        Ok(match self {
            Self::Key(key) => Segment::Key(Cow::Borrowed(key.as_ref())),
            Self::Index(index) => Segment::Index(*index),
        })
    }
}

macro_rules! impl_unsigned_segment {
    ($($ty:ty),*) => {
        $(
            impl AsSegment for $ty {
                #[inline]
                fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
                    Ok(Segment::Index(*self as usize))
                }
            }
        )*
    };
}

macro_rules! impl_signed_segment {
    ($($ty:ty),*) => {
        $(
            impl AsSegment for $ty {
                #[inline]
                fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
                    Ok(match usize::try_from(*self) {
                        Ok(index) => Segment::Index(index),
                        Err(_) => Segment::Key(Cow::Owned(self.to_string())),
                    })
                }
            }
        )*
    };
}

impl_unsigned_segment!(u8, u16, u32, usize);
impl_signed_segment!(i8, i16, i32, i64, isize);

impl AsSegment for f64 {
    #[inline]
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
        Ok(number_segment(*self))
    }
}

/// Only strings and numbers are segments.
impl AsSegment for Value {
    fn as_segment(&self) -> Result<Segment<'_>, ValueKind> {
        match self {
            Value::String(s) => Ok(Segment::Key(Cow::Borrowed(s.as_str()))),
            Value::Number(n) => Ok(number_segment(*n)),
            other => Err(other.kind()),
        }
    }
}
