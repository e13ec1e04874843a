#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use kp_path as path;
pub use kp_utils as utils;
pub use kp_value as value;

pub use kp_path::{
    InvokeError, PathAccess, PathError, PathExpr, PathSpec, PathStep, at, at_value, get, get_or,
    has, has_in, invoke, set,
};
pub use kp_value::{Array, CallError, Function, Object, Value, ValueKind};
