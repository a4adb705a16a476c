use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{EmptyContainer, Result};
use crate::traits::Sequence;

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    prev: Link<T>,
    next: Link<T>,
}

/// Doubly linked sequence over individually boxed nodes.
///
/// `head` and every `next` link own the node they point to; `prev` is a
/// back-link and never frees anything.
pub struct LinkedSequence<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedSequence<T> {
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            marker: PhantomData,
        }
    }

    fn alloc_node(value: T, prev: Link<T>, next: Link<T>) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { value, prev, next })))
    }

    /// `ptr` must come from `alloc_node` and be unreachable from the sequence.
    unsafe fn dealloc_node_take_value(ptr: NonNull<Node<T>>) -> T {
        let node = unsafe { Box::from_raw(ptr.as_ptr()) };
        node.value
    }

    /// Log every element together with its node address.
    pub fn dump(&self)
    where
        T: fmt::Debug,
    {
        if self.head.is_none() {
            tracing::debug!("nothing to dump, sequence is empty");
            return;
        }
        let mut cur = self.head;
        while let Some(ptr) = cur {
            let node = unsafe { ptr.as_ref() };
            tracing::debug!(node = ?ptr.as_ptr(), value = ?node.value, "sequence element");
            cur = node.next;
        }
    }
}

impl<T> Drop for LinkedSequence<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sequence for LinkedSequence<T> {
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
        LinkedSequence::new()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_front(&mut self, value: T) {
        let node = Self::alloc_node(value, None, self.head);
        match self.head {
            Some(old) => unsafe { (*old.as_ptr()).prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    fn push_back(&mut self, value: T) {
        let node = Self::alloc_node(value, self.tail, None);
        match self.tail {
            Some(old) => unsafe { (*old.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    fn pop_front(&mut self) -> Option<T> {
        let ptr = self.head?;
        let next = unsafe { (*ptr.as_ptr()).next };
        match next {
            // The new head must not keep pointing at the freed node.
            Some(new_head) => unsafe { (*new_head.as_ptr()).prev = None },
            None => self.tail = None,
        }
        self.head = next;
        self.len -= 1;
        Some(unsafe { Self::dealloc_node_take_value(ptr) })
    }

    fn pop_back(&mut self) -> Option<T> {
        let ptr = self.tail?;
        let prev = unsafe { (*ptr.as_ptr()).prev };
        match prev {
            Some(new_tail) => unsafe { (*new_tail.as_ptr()).next = None },
            None => self.head = None,
        }
        self.tail = prev;
        self.len -= 1;
        Some(unsafe { Self::dealloc_node_take_value(ptr) })
    }

    fn front(&self) -> Result<&T> {
        match self.head {
            Some(ptr) => Ok(unsafe { &(*ptr.as_ptr()).value }),
            None => Err(EmptyContainer::new("front")),
        }
    }

    fn back(&self) -> Result<&T> {
        match self.tail {
            Some(ptr) => Ok(unsafe { &(*ptr.as_ptr()).value }),
            None => Err(EmptyContainer::new("back")),
        }
    }

    fn front_mut(&mut self) -> Result<&mut T> {
        match self.head {
            Some(ptr) => Ok(unsafe { &mut (*ptr.as_ptr()).value }),
            None => Err(EmptyContainer::new("front")),
        }
    }

    fn back_mut(&mut self) -> Result<&mut T> {
        match self.tail {
            Some(ptr) => Ok(unsafe { &mut (*ptr.as_ptr()).value }),
            None => Err(EmptyContainer::new("back")),
        }
    }

    fn clear(&mut self) {
        let mut cur = self.head.take();
        self.tail = None;
        self.len = 0;
        while let Some(ptr) = cur {
            unsafe {
                cur = (*ptr.as_ptr()).next;
                drop(Box::from_raw(ptr.as_ptr()));
            }
        }
    }

    fn reverse(&mut self) {
        let mut front = self.head;
        let mut back = self.tail;
        for _ in 0..self.len / 2 {
            let (Some(f), Some(b)) = (front, back) else {
                break;
            };
            unsafe {
                std::ptr::swap(
                    std::ptr::addr_of_mut!((*f.as_ptr()).value),
                    std::ptr::addr_of_mut!((*b.as_ptr()).value),
                );
                front = (*f.as_ptr()).next;
                back = (*b.as_ptr()).prev;
            }
        }
    }

    fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.head, &mut other.head);
        std::mem::swap(&mut self.tail, &mut other.tail);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    fn iter(&self) -> Iter<'_, T> {
        Iter {
            cur: self.head,
            remaining: self.len,
            marker: PhantomData,
        }
    }

    fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            cur: self.head,
            remaining: self.len,
            marker: PhantomData,
        }
    }
}

/// Forward iterator over shared references.
///
/// Two iterators are equal when they sit on the same node; all exhausted
/// iterators are equal to each other.
pub struct Iter<'a, T> {
    cur: Link<T>,
    remaining: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cur: self.cur,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let ptr = self.cur?;
        let node = unsafe { &*ptr.as_ptr() };
        self.cur = node.next;
        self.remaining -= 1;
        Some(&node.value)
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
    }
}

impl<T> Eq for Iter<'_, T> {}

/// Forward iterator over mutable references.
pub struct IterMut<'a, T> {
    cur: Link<T>,
    remaining: usize,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let ptr = self.cur?;
        let node = unsafe { &mut *ptr.as_ptr() };
        self.cur = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> PartialEq for IterMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cur == other.cur
    }
}

impl<T> Eq for IterMut<'_, T> {}

pub struct IntoIter<T>(LinkedSequence<T>);

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

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<T> crate::tests::CheckLinks for LinkedSequence<T> {
    fn check_links(&self) {
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);

        let mut prev: Link<T> = None;
        let mut cur = self.head;
        let mut count = 0;
        while let Some(ptr) = cur {
            let node = unsafe { ptr.as_ref() };
            assert!(node.prev == prev, "stale back-link at position {count}");
            prev = cur;
            cur = node.next;
            count += 1;
        }
        assert!(prev == self.tail, "forward walk does not end at tail");
        assert_eq!(count, self.len);
    }
}
