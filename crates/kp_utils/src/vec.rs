//! Re-exports [`fastvec`]'s containers.
//!
//! Path expressions are short, so parsing collects steps on the stack first
//! and only spills to the heap for unusually deep paths.

// -----------------------------------------------------------------------------
// Data Process

pub use fastvec::FastVec;
