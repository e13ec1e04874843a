//! Provide hash containers, re-exports *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
///
/// # Examples
///
/// ```
/// use kp_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, u32> = HashMap::default();
/// map.insert("a", 1);
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
