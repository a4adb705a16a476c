//! Trait-based API for double-ended linked sequences.

use crate::error::Result;

/// Ordered, mutable collection built from individually owned nodes.
///
/// - `pop_*` on an empty sequence is not an error and returns `None`.
/// - `front`/`back` on an empty sequence fail with `EmptyContainer`.
/// - `reverse` and `swap` accept empty sequences.
pub trait Sequence: Sized {
    type Value;

    /// Equal iff positioned at the same node; exhausted iterators are all
    /// equal (the end sentinel).
    type Iter<'a>: ExactSizeIterator<Item = &'a Self::Value> + Clone + PartialEq
    where
        Self: 'a;

    type IterMut<'a>: ExactSizeIterator<Item = &'a mut Self::Value> + PartialEq
    where
        Self: 'a;

    fn new() -> Self;

    fn len(&self) -> usize;

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_front(&mut self, value: Self::Value);
    fn push_back(&mut self, value: Self::Value);

    fn pop_front(&mut self) -> Option<Self::Value>;
    fn pop_back(&mut self) -> Option<Self::Value>;

    fn front(&self) -> Result<&Self::Value>;
    fn back(&self) -> Result<&Self::Value>;
    fn front_mut(&mut self) -> Result<&mut Self::Value>;
    fn back_mut(&mut self) -> Result<&mut Self::Value>;

    /// Drop every element. No-op on an empty sequence.
    fn clear(&mut self);

    /// Reverse the element order by swapping values from both ends inward.
    ///
    /// Nodes keep their positions; only `len / 2` value swaps happen.
    fn reverse(&mut self);

    /// Exchange the whole contents with `other` in O(1).
    ///
    /// No element is moved or copied.
    fn swap(&mut self, other: &mut Self);

    fn iter(&self) -> Self::Iter<'_>;
    fn iter_mut(&mut self) -> Self::IterMut<'_>;
}
