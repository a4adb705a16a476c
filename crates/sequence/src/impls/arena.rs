use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::{EmptyContainer, Result};
use crate::traits::Sequence;

type Id = u32;
const NIL: Id = Id::MAX;

#[inline(always)]
fn idx(x: Id) -> usize {
    x as usize
}

/// Id for a slot appended at `len`. `NIL` is reserved, so an arena holds at
/// most `u32::MAX` slots.
fn next_id(len: usize) -> Id {
    Id::try_from(len)
        .ok()
        .filter(|&id| id != NIL)
        .expect("arena full: slot ids exhausted")
}

struct Slot<T> {
    value: Option<T>,
    prev: Id,
    next: Id,
}

/// Doubly linked sequence whose nodes live in a single arena and link to
/// each other by index.
///
/// Released slots are recycled through a free list. A slot is vacant iff
/// its value is `None`, and a vacant slot has both links set to `NIL`.
pub struct ArenaSequence<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Id>,
    head: Id,
    tail: Id,
    len: usize,
}

impl<T> ArenaSequence<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    fn alloc_slot(&mut self, value: T, prev: Id, next: Id) -> Id {
        let slot = Slot {
            value: Some(value),
            prev,
            next,
        };
        if let Some(id) = self.free.pop() {
            self.slots[idx(id)] = slot;
            id
        } else {
            let id = next_id(self.slots.len());
            self.slots.push(slot);
            id
        }
    }

    fn release_slot(&mut self, id: Id) -> T {
        let slot = &mut self.slots[idx(id)];
        slot.prev = NIL;
        slot.next = NIL;
        let value = slot.value.take().expect("release of a vacant slot");
        if self.len == 0 {
            // Nothing is linked anymore, so the whole arena can be reused.
            self.slots.clear();
            self.free.clear();
        } else {
            self.free.push(id);
        }
        value
    }

    fn value(&self, id: Id) -> &T {
        self.slots[idx(id)]
            .value
            .as_ref()
            .expect("linked slot holds a value")
    }

    fn value_mut(&mut self, id: Id) -> &mut T {
        self.slots[idx(id)]
            .value
            .as_mut()
            .expect("linked slot holds a value")
    }

    /// Log every element together with the arena slot it occupies.
    pub fn dump(&self)
    where
        T: fmt::Debug,
    {
        if self.head == NIL {
            tracing::debug!("nothing to dump, sequence is empty");
            return;
        }
        let mut cur = self.head;
        while cur != NIL {
            tracing::debug!(slot = cur, value = ?self.value(cur), "sequence element");
            cur = self.slots[idx(cur)].next;
        }
    }
}

impl<T> Default for ArenaSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sequence for ArenaSequence<T> {
    type Value = T;

    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a;

    type IterMut<'a>
        = IterMut<'a, T>
    where
        Self: 'a;

    fn new() -> Self {
        ArenaSequence::new()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_front(&mut self, value: T) {
        let id = self.alloc_slot(value, NIL, self.head);
        if self.head == NIL {
            self.tail = id;
        } else {
            self.slots[idx(self.head)].prev = id;
        }
        self.head = id;
        self.len += 1;
    }

    fn push_back(&mut self, value: T) {
        let id = self.alloc_slot(value, self.tail, NIL);
        if self.tail == NIL {
            self.head = id;
        } else {
            self.slots[idx(self.tail)].next = id;
        }
        self.tail = id;
        self.len += 1;
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.head == NIL {
            return None;
        }
        let id = self.head;
        let next = self.slots[idx(id)].next;
        if next == NIL {
            self.tail = NIL;
        } else {
            self.slots[idx(next)].prev = NIL;
        }
        self.head = next;
        self.len -= 1;
        Some(self.release_slot(id))
    }

    fn pop_back(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        let id = self.tail;
        let prev = self.slots[idx(id)].prev;
        if prev == NIL {
            self.head = NIL;
        } else {
            self.slots[idx(prev)].next = NIL;
        }
        self.tail = prev;
        self.len -= 1;
        Some(self.release_slot(id))
    }

    fn front(&self) -> Result<&T> {
        if self.head == NIL {
            return Err(EmptyContainer::new("front"));
        }
        Ok(self.value(self.head))
    }

    fn back(&self) -> Result<&T> {
        if self.tail == NIL {
            return Err(EmptyContainer::new("back"));
        }
        Ok(self.value(self.tail))
    }

    fn front_mut(&mut self) -> Result<&mut T> {
        if self.head == NIL {
            return Err(EmptyContainer::new("front"));
        }
        Ok(self.value_mut(self.head))
    }

    fn back_mut(&mut self) -> Result<&mut T> {
        if self.tail == NIL {
            return Err(EmptyContainer::new("back"));
        }
        Ok(self.value_mut(self.tail))
    }

    fn clear(&mut self) {
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
        self.slots.clear();
        self.free.clear();
    }

    fn reverse(&mut self) {
        let mut front = self.head;
        let mut back = self.tail;
        for _ in 0..self.len / 2 {
            let moved = self.slots[idx(front)].value.take();
            let moved = std::mem::replace(&mut self.slots[idx(back)].value, moved);
            self.slots[idx(front)].value = moved;
            front = self.slots[idx(front)].next;
            back = self.slots[idx(back)].prev;
        }
    }

    fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.slots, &mut other.slots);
        std::mem::swap(&mut self.free, &mut other.free);
        std::mem::swap(&mut self.head, &mut other.head);
        std::mem::swap(&mut self.tail, &mut other.tail);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            cur: self.head,
            remaining: self.len,
        }
    }

    fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            slots: self.slots.as_mut_ptr(),
            slots_len: self.slots.len(),
            cur: self.head,
            remaining: self.len,
            marker: PhantomData,
        }
    }
}

/// Forward iterator over shared references.
///
/// Two iterators are equal when they sit on the same slot of the same
/// arena; all exhausted iterators are equal to each other.
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    cur: Id,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            cur: self.cur,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cur == NIL {
            return None;
        }
        let slot = &self.slots[idx(self.cur)];
        self.cur = slot.next;
        self.remaining -= 1;
        slot.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cur == other.cur
            && (self.cur == NIL || std::ptr::eq(self.slots.as_ptr(), other.slots.as_ptr()))
    }
}

impl<T> Eq for Iter<'_, T> {}

/// Forward iterator over mutable references.
///
/// Walks the arena through a raw pointer; the links are acyclic, so every
/// slot is handed out at most once.
pub struct IterMut<'a, T> {
    slots: *mut Slot<T>,
    slots_len: usize,
    cur: Id,
    remaining: usize,
    marker: PhantomData<&'a mut [Slot<T>]>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.cur == NIL {
            return None;
        }
        assert!(idx(self.cur) < self.slots_len);
        let slot = unsafe { &mut *self.slots.add(idx(self.cur)) };
        self.cur = slot.next;
        self.remaining -= 1;
        slot.value.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> PartialEq for IterMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cur == other.cur && (self.cur == NIL || std::ptr::eq(self.slots, other.slots))
    }
}

impl<T> Eq for IterMut<'_, T> {}

pub struct IntoIter<T>(ArenaSequence<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for ArenaSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a ArenaSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArenaSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Extend<T> for ArenaSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for ArenaSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut seq = Self::with_capacity(iter.size_hint().0);
        seq.extend(iter);
        seq
    }
}

impl<T: Clone> Clone for ArenaSequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArenaSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<T> crate::tests::CheckLinks for ArenaSequence<T> {
    fn check_links(&self) {
        assert_eq!(self.head == NIL, self.len == 0);
        assert_eq!(self.tail == NIL, self.len == 0);
        assert_eq!(self.slots.len(), self.len + self.free.len());

        let mut prev = NIL;
        let mut cur = self.head;
        let mut count = 0;
        while cur != NIL {
            let slot = &self.slots[idx(cur)];
            assert!(slot.value.is_some(), "vacant slot {cur} is linked");
            assert_eq!(slot.prev, prev, "stale back-link at position {count}");
            prev = cur;
            cur = slot.next;
            count += 1;
        }
        assert_eq!(prev, self.tail, "forward walk does not end at tail");
        assert_eq!(count, self.len);

        for &id in &self.free {
            let slot = &self.slots[idx(id)];
            assert!(slot.value.is_none());
            assert_eq!((slot.prev, slot.next), (NIL, NIL));
        }
    }
}
