#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

//! # Syntax
//!
//! A path is written either as a string or as a list of segments.
//!
//! - String: `.` separates steps, and a step may end with one bracketed
//!   index, e.g. `a[0].b.c`.
//! - Segments: strings or numbers, e.g. `["a", 0, "b", "c"]`. An integer
//!   segment right after a key becomes that key's index.
//!
//! Both forms parse into the same [`PathExpr`], a sequence of [`PathStep`]s.
//! See [`PathSpec`] for the exact grammar.
//!
//! # Examples
//!
//! ```
//! use kp_path::PathAccess;
//! use kp_value::Value;
//!
//! let mut root: Value = serde_json::from_str(r#"{"a": [{"b": {"c": 3}}]}"#).unwrap();
//!
//! assert_eq!(root.get_path("a[0].b.c").unwrap(), Value::from(3));
//! assert!(root.has_path(["a", "0", "b"]).unwrap());
//!
//! root.set_path("a[0].b.c", 4).unwrap();
//! assert_eq!(root.get_path("a[0].b.c").unwrap(), Value::from(4));
//! ```

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod expr;
mod mutate;
mod ops;
mod resolve;
mod segment;
mod spec;
mod step;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{InvokeError, PathError};
pub use expr::PathExpr;
pub use ops::{PathAccess, at, at_value, get, get_or, has, has_in, invoke, set};
pub use segment::{AsSegment, Segment};
pub use spec::PathSpec;
pub use step::PathStep;
