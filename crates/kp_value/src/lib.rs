#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod builtins;
mod function;
mod kind;
mod object;
mod serde;
mod slots;
mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use array::Array;
pub use function::{CallError, Function, NativeFn};
pub use kind::ValueKind;
pub use object::Object;
pub use slots::{Slots, SlotsMut, parse_index};
pub use value::{Value, format_number};
