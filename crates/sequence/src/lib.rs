mod error;
mod traits;

pub mod impls;

pub use error::{EmptyContainer, Result};
pub use impls::{ArenaSequence, LinkedSequence};
pub use traits::Sequence;

#[cfg(test)]
mod tests {
    use super::{ArenaSequence, EmptyContainer, LinkedSequence, Sequence};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::fmt::Debug;
    use std::rc::Rc;

    /// Walks the raw links and asserts every structural invariant.
    pub(crate) trait CheckLinks {
        fn check_links(&self);
    }

    fn contents<S: Sequence<Value = u64>>(seq: &S) -> Vec<u64> {
        seq.iter().copied().collect()
    }

    fn filled<S: Sequence<Value = u64>>(values: &[u64]) -> S {
        let mut seq = S::new();
        for &v in values {
            seq.push_back(v);
        }
        seq
    }

    fn check_empty<S: Sequence<Value = u64> + CheckLinks>() {
        let mut seq = S::new();
        seq.check_links();
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        assert_eq!(seq.front(), Err(EmptyContainer { op: "front" }));
        assert_eq!(
            seq.back().unwrap_err().to_string(),
            "method: back, error: empty container"
        );
        assert!(seq.front_mut().is_err());
        assert!(seq.back_mut().is_err());
        assert_eq!(seq.pop_front(), None);
        assert_eq!(seq.pop_back(), None);

        seq.clear();
        seq.reverse();
        seq.check_links();
        assert!(seq.is_empty());

        let mut it = seq.iter();
        assert_eq!(it.len(), 0);
        let begin = it.clone();
        assert!(it.next().is_none());
        assert!(begin == it);
    }

    fn check_scenario<S: Sequence<Value = u64> + CheckLinks>() {
        let mut seq = S::new();
        seq.push_back(1);
        seq.push_back(2);
        seq.push_back(3);
        seq.check_links();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.front().copied(), Ok(1));
        assert_eq!(seq.back().copied(), Ok(3));
        assert_eq!(contents(&seq), [1, 2, 3]);

        seq.reverse();
        seq.check_links();
        assert_eq!(contents(&seq), [3, 2, 1]);

        assert_eq!(seq.pop_front(), Some(3));
        seq.check_links();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.front().copied(), Ok(2));

        assert_eq!(seq.pop_back(), Some(1));
        seq.check_links();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.front().copied(), Ok(2));
        assert_eq!(seq.back().copied(), Ok(2));

        assert_eq!(seq.pop_front(), Some(2));
        seq.check_links();
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        assert_eq!(seq.front(), Err(EmptyContainer { op: "front" }));
    }

    fn check_push_both_ends<S: Sequence<Value = u64> + CheckLinks>() {
        let mut seq = S::new();
        seq.push_front(1);
        seq.check_links();
        assert_eq!(seq.front(), seq.back());

        seq.push_front(0);
        seq.push_back(2);
        seq.push_front(u64::MAX);
        seq.push_back(3);
        seq.check_links();
        assert_eq!(contents(&seq), [u64::MAX, 0, 1, 2, 3]);
        assert_eq!(seq.iter().len(), 5);
    }

    fn check_pop_restores_end_links<S: Sequence<Value = u64> + CheckLinks>() {
        let mut seq: S = filled(&[1, 2, 3, 4, 5, 6]);

        assert_eq!(seq.pop_front(), Some(1));
        seq.check_links();
        assert_eq!(seq.iter().count(), 5);
        assert_eq!(seq.front().copied(), Ok(2));

        assert_eq!(seq.pop_back(), Some(6));
        seq.check_links();
        assert_eq!(seq.iter().count(), 4);
        assert_eq!(seq.back().copied(), Ok(5));

        let mut expect_front = 2;
        while let Some(v) = seq.pop_front() {
            assert_eq!(v, expect_front);
            expect_front += 1;
            seq.check_links();
            assert_eq!(seq.iter().count(), seq.len());
        }
        assert_eq!(expect_front, 6);
    }

    fn check_reverse<S: Sequence<Value = u64> + CheckLinks>() {
        for n in 0..10_u64 {
            let values: Vec<u64> = (0..n).collect();
            let mut seq: S = filled(&values);

            seq.reverse();
            seq.check_links();
            let reversed: Vec<u64> = values.iter().rev().copied().collect();
            assert_eq!(contents(&seq), reversed, "n={n}");

            seq.reverse();
            seq.check_links();
            assert_eq!(contents(&seq), values, "n={n}");
        }
    }

    fn check_swap<S: Sequence<Value = u64> + CheckLinks>() {
        let mut a: S = filled(&[1, 2, 3]);
        let mut b: S = filled(&[7, 8]);

        a.swap(&mut b);
        a.check_links();
        b.check_links();
        assert_eq!(contents(&a), [7, 8]);
        assert_eq!(contents(&b), [1, 2, 3]);
        assert_eq!((a.len(), b.len()), (2, 3));

        let mut empty = S::new();
        a.swap(&mut empty);
        a.check_links();
        empty.check_links();
        assert!(a.is_empty());
        assert_eq!(contents(&empty), [7, 8]);

        a.swap(&mut empty);
        assert_eq!(contents(&a), [7, 8]);
        assert!(empty.is_empty());

        let mut other_empty = S::new();
        empty.swap(&mut other_empty);
        assert!(empty.is_empty());
        assert!(other_empty.is_empty());
    }

    fn check_clear<S: Sequence<Value = u64> + CheckLinks>() {
        let mut seq: S = filled(&[4, 5, 6]);
        seq.clear();
        seq.check_links();
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        seq.clear();
        assert!(seq.is_empty());

        seq.push_back(9);
        seq.check_links();
        assert_eq!(contents(&seq), [9]);
    }

    fn check_mutable_access<S: Sequence<Value = u64> + CheckLinks>() {
        let mut seq: S = filled(&[1, 2, 3]);
        *seq.front_mut().unwrap() = 10;
        *seq.back_mut().unwrap() += 5;
        assert_eq!(contents(&seq), [10, 2, 8]);

        for v in seq.iter_mut() {
            *v *= 2;
        }
        assert_eq!(contents(&seq), [20, 4, 16]);
        assert_eq!(seq.iter_mut().len(), 3);
        seq.check_links();
    }

    fn check_iter_positions<S: Sequence<Value = u64> + CheckLinks>() {
        // Declared first: comparing its iterator with `b` ties both borrows
        // to one lifetime.
        let empty = S::new();
        let seq: S = filled(&[1, 2, 3]);
        let a = seq.iter();
        let mut b = seq.iter();
        assert!(a == b);

        b.next();
        assert!(a != b);
        let mut c = a.clone();
        c.next();
        assert!(c == b);
        assert_eq!(b.len(), 2);

        while b.next().is_some() {}
        while c.next().is_some() {}
        assert!(b == c);

        assert!(empty.iter() == b);
    }

    fn check_random<S: Sequence<Value = u64> + CheckLinks>() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut seq = S::new();
        let mut oracle = VecDeque::new();

        const OPS: usize = 20_000;
        for step in 0..OPS {
            let roll = rng.random_range(0..100);
            if roll < 25 {
                let v: u64 = rng.random();
                seq.push_back(v);
                oracle.push_back(v);
            } else if roll < 45 {
                let v: u64 = rng.random();
                seq.push_front(v);
                oracle.push_front(v);
            } else if roll < 65 {
                assert_eq!(seq.pop_front(), oracle.pop_front());
            } else if roll < 85 {
                assert_eq!(seq.pop_back(), oracle.pop_back());
            } else if roll < 95 {
                seq.reverse();
                oracle.make_contiguous().reverse();
            } else if roll < 99 {
                let mut other = S::new();
                seq.swap(&mut other);
                assert!(seq.is_empty());
                assert_eq!(other.len(), oracle.len());
                seq.swap(&mut other);
            } else {
                seq.clear();
                oracle.clear();
            }

            seq.check_links();
            assert_eq!(seq.len(), oracle.len());
            assert_eq!(seq.is_empty(), oracle.is_empty());
            assert_eq!(seq.front().ok(), oracle.front());
            assert_eq!(seq.back().ok(), oracle.back());
            if step % 97 == 0 {
                assert!(seq.iter().eq(oracle.iter()), "step={step}");
            }
        }
    }

    fn check_conversions<S>()
    where
        S: Sequence<Value = u64>
            + FromIterator<u64>
            + IntoIterator<Item = u64>
            + Extend<u64>
            + Clone
            + Debug,
    {
        let mut seq: S = (1..=4).collect();
        seq.extend([5, 6]);
        assert_eq!(format!("{seq:?}"), "[1, 2, 3, 4, 5, 6]");

        let copy = seq.clone();
        seq.push_front(0);
        assert_eq!(contents(&copy), [1, 2, 3, 4, 5, 6]);

        let mut owned = seq.into_iter();
        assert_eq!(owned.size_hint(), (7, Some(7)));
        assert_eq!(owned.next(), Some(0));
        assert_eq!(owned.collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    }

    #[derive(Default)]
    struct Counters {
        drops: Cell<usize>,
        clones: Cell<usize>,
    }

    struct Tracked {
        id: u64,
        counters: Rc<Counters>,
    }

    impl Tracked {
        fn new(counters: &Rc<Counters>, id: u64) -> Self {
            Self {
                id,
                counters: Rc::clone(counters),
            }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            self.counters.clones.set(self.counters.clones.get() + 1);
            Self::new(&self.counters, self.id)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.counters.drops.set(self.counters.drops.get() + 1);
        }
    }

    fn ids<S: Sequence<Value = Tracked>>(seq: &S) -> Vec<u64> {
        seq.iter().map(|t| t.id).collect()
    }

    fn check_drops_once<S: Sequence<Value = Tracked> + CheckLinks>() {
        let counters = Rc::new(Counters::default());
        {
            let mut seq = S::new();
            for id in 0..10 {
                seq.push_back(Tracked::new(&counters, id));
            }
            assert_eq!(counters.drops.get(), 0);

            drop(seq.pop_front());
            assert_eq!(counters.drops.get(), 1);
            drop(seq.pop_back());
            assert_eq!(counters.drops.get(), 2);

            seq.clear();
            assert_eq!(counters.drops.get(), 10);
            seq.clear();
            assert_eq!(counters.drops.get(), 10);

            for id in 0..5 {
                seq.push_front(Tracked::new(&counters, id));
            }
            seq.reverse();
            seq.check_links();
            assert_eq!(ids(&seq), [0, 1, 2, 3, 4]);
            assert_eq!(counters.drops.get(), 10);
        }
        assert_eq!(counters.drops.get(), 15);
        assert_eq!(counters.clones.get(), 0);
    }

    fn check_swap_moves_nothing<S: Sequence<Value = Tracked> + CheckLinks>() {
        let counters = Rc::new(Counters::default());
        let mut a = S::new();
        let mut b = S::new();
        for id in 0..3 {
            a.push_back(Tracked::new(&counters, id));
        }
        for id in 10..12 {
            b.push_back(Tracked::new(&counters, id));
        }
        let a_front = a.front().unwrap() as *const Tracked;
        let b_back = b.back().unwrap() as *const Tracked;

        a.swap(&mut b);
        a.check_links();
        b.check_links();
        assert_eq!(ids(&a), [10, 11]);
        assert_eq!(ids(&b), [0, 1, 2]);
        assert!(std::ptr::eq(b.front().unwrap(), a_front));
        assert!(std::ptr::eq(a.back().unwrap(), b_back));
        assert_eq!(counters.clones.get(), 0);
        assert_eq!(counters.drops.get(), 0);

        drop(a);
        drop(b);
        assert_eq!(counters.drops.get(), 5);
    }

    macro_rules! test_all {
        ($name:ident, $func:ident, $value:ty) => {
            #[test]
            fn $name() {
                $func::<LinkedSequence<$value>>();
                $func::<ArenaSequence<$value>>();
            }
        };
    }

    test_all!(empty_all_impls, check_empty, u64);
    test_all!(scenario_all_impls, check_scenario, u64);
    test_all!(push_both_ends_all_impls, check_push_both_ends, u64);
    test_all!(pop_end_links_all_impls, check_pop_restores_end_links, u64);
    test_all!(reverse_all_impls, check_reverse, u64);
    test_all!(swap_all_impls, check_swap, u64);
    test_all!(clear_all_impls, check_clear, u64);
    test_all!(mutable_access_all_impls, check_mutable_access, u64);
    test_all!(iter_positions_all_impls, check_iter_positions, u64);
    test_all!(random_all_impls, check_random, u64);
    test_all!(conversions_all_impls, check_conversions, u64);
    test_all!(drops_once_all_impls, check_drops_once, Tracked);
    test_all!(swap_moves_nothing_all_impls, check_swap_moves_nothing, Tracked);

    #[test]
    fn dump_leaves_contents_alone() {
        let mut linked = LinkedSequence::<u64>::new();
        linked.dump();
        linked.extend([1, 2, 3]);
        linked.dump();
        assert_eq!(contents(&linked), [1, 2, 3]);

        let mut arena = ArenaSequence::<u64>::new();
        arena.dump();
        arena.extend([1, 2, 3]);
        arena.dump();
        assert_eq!(contents(&arena), [1, 2, 3]);
    }

    #[test]
    fn arena_reuses_released_slots() {
        let mut seq: ArenaSequence<u64> = filled(&[1, 2, 3, 4]);
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.pop_back(), Some(4));
        seq.push_back(5);
        seq.push_front(0);
        seq.check_links();
        assert_eq!(contents(&seq), [0, 2, 3, 5]);
    }
}
