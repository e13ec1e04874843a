//! Provide `FixedHasher`.
//!
//! `FixedHasher` based on `foldhash` crate,
//! Provide stable hash results through a fixed hash seed.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6B65_7970_6174_6821);

/// A fixed hasher provided hash results that only related on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`] .
///
/// Which can be created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed Hash State based upon a random but fixed seed.
///
/// Keyed containers use it so that two maps holding the same keys
/// iterate in the same order, independent of process or platform.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher, BuildHasher};
/// use kp_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// let mut b = FixedHashState.build_hasher();
/// "key".hash(&mut a);
/// "key".hash(&mut b);
///
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::FixedHashState;

    #[test]
    fn fixed_state_is_stable() {
        assert_eq!(
            FixedHashState.hash_one("slice"),
            FixedHashState.hash_one("slice")
        );
        assert_ne!(FixedHashState.hash_one("a"), FixedHashState.hash_one("b"));
    }
}
