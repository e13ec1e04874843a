use core::fmt;

/// The variant of a [`Value`](crate::Value), used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Function,
}

impl ValueKind {
    /// Returns `true` for the kinds that can hold slots written by path mutation.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.pad("Undefined"),
            Self::Null => f.pad("Null"),
            Self::Bool => f.pad("Bool"),
            Self::Number => f.pad("Number"),
            Self::String => f.pad("String"),
            Self::Array => f.pad("Array"),
            Self::Object => f.pad("Object"),
            Self::Function => f.pad("Function"),
        }
    }
}
