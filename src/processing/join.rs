//! Left join of two row sequences.

use std::collections::HashMap;
use std::hash::Hash;

/// A left row paired with its matching right row, if any.
///
/// Fields present on both sides are read from `left`; right-only fields are reachable through
/// `right` and are simply absent when nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined<L, R> {
    /// The row from the left input, unchanged.
    pub left: L,
    /// The matched right row.
    pub right: Option<R>,
}

impl<L, R> Joined<L, R> {
    /// Returns `true` if a right row matched.
    pub fn is_matched(&self) -> bool {
        self.right.is_some()
    }

    /// Read a right-only field, if a right row matched.
    pub fn right_field<'a, T: ?Sized>(&'a self, f: impl FnOnce(&'a R) -> &'a T) -> Option<&'a T> {
        self.right.as_ref().map(f)
    }
}

/// Join every row of `left` to the row of `right` with the same key.
///
/// - Output length and order always equal `left`'s.
/// - If `right` holds several rows with one key, the last one wins.
/// - Unmatched left rows are passed through with `right: None`.
pub fn left_join<L, R, K, FL, FR>(
    left: impl IntoIterator<Item = L>,
    right: &[R],
    mut left_key: FL,
    mut right_key: FR,
) -> Vec<Joined<L, R>>
where
    R: Clone,
    K: Eq + Hash,
    FL: FnMut(&L) -> K,
    FR: FnMut(&R) -> K,
{
    let mut index: HashMap<K, &R> = HashMap::with_capacity(right.len());
    for r in right {
        index.insert(right_key(r), r);
    }

    left.into_iter()
        .map(|l| {
            let right = index.get(&left_key(&l)).map(|r| (*r).clone());
            Joined { left: l, right }
        })
        .collect()
}
