//! Lazy lists built from thunks, plus the `range` producer and the `take`
//! consumer.

use std::fmt::Display;
use std::iter::FusedIterator;
use std::rc::Rc;

use crate::lazy_list_impl::thunk::Thunk;

/// Errors raised when a lazy list is used past its end.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LazyListError {
    EmptyList { operation: &'static str },
    DrainLimitExceeded { limit: usize },
}

/// Display trait implementation for LazyListError.
impl Display for LazyListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyList { operation } => {
                return write!(f, "Cannot take {} of an empty list.", operation);
            }

            Self::DrainLimitExceeded { limit } => {
                return write!(
                    f,
                    "List has more than {} elements. Refusing to drain it.",
                    limit
                );
            }
        }
    }
}

/// A forced list cell: a lazy element and the (still lazy) rest of the list.
pub struct LazyNode<T> {
    pub head: Thunk<T>,
    pub tail: LazyList<T>,
}

impl<T> Clone for LazyNode<T> {
    fn clone(&self) -> Self {
        return LazyNode {
            head: self.head.clone(),
            tail: self.tail.clone(),
        };
    }
}

/// A possibly infinite list. Holding a `LazyList` never means holding a
/// value; forcing it yields `None` at the end of the sequence or the next
/// `LazyNode` otherwise.
pub struct LazyList<T> {
    node: Thunk<Option<LazyNode<T>>>,
}

impl<T> Clone for LazyList<T> {
    fn clone(&self) -> Self {
        return LazyList {
            node: self.node.clone(),
        };
    }
}

impl<T> std::fmt::Debug for LazyList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "LazyList(<deferred>)");
    }
}

impl<T: 'static> LazyList<T> {
    /// Wraps a closure that produces the first node on demand.
    pub fn new<F>(produce_node: F) -> Self
    where
        F: Fn() -> Option<LazyNode<T>> + 'static,
    {
        return LazyList {
            node: Thunk::new(produce_node),
        };
    }

    /// The list that forces straight to end-of-sequence.
    pub fn empty() -> Self {
        return LazyList::new(|| None);
    }

    /// Prepends a lazy element to a lazy list.
    pub fn cons(head: Thunk<T>, tail: LazyList<T>) -> Self {
        return LazyList::new(move || {
            Some(LazyNode {
                head: head.clone(),
                tail: tail.clone(),
            })
        });
    }

    /// Builds a finite list whose elements are the given thunks, in order.
    /// None of the thunks is forced.
    pub fn from_thunks(heads: Vec<Thunk<T>>) -> Self {
        let mut out = LazyList::empty();

        for head in heads.into_iter().rev() {
            out = LazyList::cons(head, out);
        }

        return out;
    }

    /// Forces the outer thunk, discovering whether the list has another node.
    pub fn force(&self) -> Option<LazyNode<T>> {
        return self.node.force();
    }

    /// The (unforced) first element of the list.
    pub fn head(&self) -> Result<Thunk<T>, LazyListError> {
        match self.force() {
            Some(node) => return Ok(node.head),
            None => return Err(LazyListError::EmptyList { operation: "head" }),
        }
    }

    /// Everything after the first element of the list.
    pub fn tail(&self) -> Result<LazyList<T>, LazyListError> {
        match self.force() {
            Some(node) => return Ok(node.tail),
            None => return Err(LazyListError::EmptyList { operation: "tail" }),
        }
    }

    /// Applies `f` to every element as it is forced. Nothing is mapped
    /// ahead of demand.
    pub fn map<U, F>(&self, f: F) -> LazyList<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        return map_list(self.clone(), Rc::new(f));
    }

    /// Pull-based iterator that forces one node (and its head) per `next`.
    pub fn iter(&self) -> LazyListIter<T> {
        return LazyListIter {
            remaining: Some(self.clone()),
        };
    }

    /// Forces every element into a vector. Never returns on an infinite
    /// list; bound the list with `take` first.
    pub fn to_vec(&self) -> Vec<T> {
        return self.iter().collect();
    }

    /// Like `to_vec`, but gives up with `DrainLimitExceeded` once the list
    /// turns out to hold more than `limit` elements. The element past the
    /// limit is discovered but its head is never forced.
    pub fn to_vec_bounded(&self, limit: usize) -> Result<Vec<T>, LazyListError> {
        let mut out = Vec::new();
        let mut remaining = self.clone();

        loop {
            match remaining.force() {
                None => return Ok(out),

                Some(node) => {
                    if out.len() == limit {
                        return Err(LazyListError::DrainLimitExceeded { limit });
                    }

                    out.push(node.head.force());
                    remaining = node.tail;
                }
            }
        }
    }
}

/// Iterator over the elements of a `LazyList`.
pub struct LazyListIter<T> {
    remaining: Option<LazyList<T>>,
}

impl<T: 'static> Iterator for LazyListIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.remaining.take()?.force()?;
        self.remaining = Some(node.tail);

        return Some(node.head.force());
    }
}

impl<T: 'static> FusedIterator for LazyListIter<T> {}

/// The infinite sequence `start, start + 1, start + 2, ...`. Building it does
/// constant work; successors only appear as the list is forced.
///
/// `i64::MAX` has no successor, so the sequence ends there.
pub fn range(start: i64) -> LazyList<i64> {
    return LazyList::new(move || {
        let tail = match start.checked_add(1) {
            Some(next) => range(next),
            None => LazyList::empty(),
        };

        return Some(LazyNode {
            head: Thunk::new(move || start),
            tail,
        });
    });
}

/// At most the first `n` elements of `xs`, in order.
///
/// `take(0, xs)` never forces `xs`. For `n > 0`, forcing the result forces
/// `xs` once and passes its head through unforced. If `xs` runs out before
/// `n` elements, the result ends there too.
pub fn take<T: 'static>(n: usize, xs: LazyList<T>) -> LazyList<T> {
    return LazyList::new(move || {
        if n == 0 {
            return None;
        }

        let node = xs.force()?;

        return Some(LazyNode {
            head: node.head,
            tail: take(n - 1, node.tail),
        });
    });
}

// Lazy list of `f` applied to each element of `xs`.
fn map_list<T: 'static, U: 'static>(xs: LazyList<T>, f: Rc<dyn Fn(T) -> U>) -> LazyList<U> {
    return LazyList::new(move || {
        let node = xs.force()?;
        let head = node.head;
        let head_f = Rc::clone(&f);

        return Some(LazyNode {
            head: Thunk::new(move || head_f(head.force())),
            tail: map_list(node.tail, Rc::clone(&f)),
        });
    });
}

/// A finite lazy list over the given elements.
pub fn to_lazy_list<T: Clone + 'static>(elements: Vec<T>) -> LazyList<T> {
    return lazy_list_from_index(Rc::new(elements), 0);
}

// Lazy view of `elements[start_idx..]`.
fn lazy_list_from_index<T: Clone + 'static>(
    elements: Rc<Vec<T>>,
    start_idx: usize,
) -> LazyList<T> {
    return LazyList::new(move || {
        if start_idx >= elements.len() {
            return None;
        }

        let head_elements = Rc::clone(&elements);

        return Some(LazyNode {
            head: Thunk::new(move || head_elements[start_idx].clone()),
            tail: lazy_list_from_index(Rc::clone(&elements), start_idx + 1),
        });
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rand::Rng;

    use super::*;

    // A list that panics as soon as anything forces it.
    fn bottom() -> LazyList<i64> {
        return LazyList::new(|| panic!("bottom was forced"));
    }

    // range(start), except that every head force bumps `counter`.
    fn counted_range(start: i64, counter: Rc<Cell<usize>>) -> LazyList<i64> {
        return LazyList::new(move || {
            let head_counter = Rc::clone(&counter);

            Some(LazyNode {
                head: Thunk::new(move || {
                    head_counter.set(head_counter.get() + 1);
                    start
                }),
                tail: counted_range(start + 1, Rc::clone(&counter)),
            })
        });
    }

    // Test that the head of range(start) is start, for random starts.
    #[test]
    fn test_range_head_is_start() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let start: i64 = rng.gen_range(-1_000_000..1_000_000);
            let head = range(start).head().expect("range must never be empty");
            assert_eq!(head.force(), start);
        }
    }

    // Test that descending k tails of range(start) lands on start + k.
    #[test]
    fn test_range_descend_tails() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let start: i64 = rng.gen_range(-1_000..1_000);
            let k: usize = rng.gen_range(0..200);

            let mut list = range(start);
            for _ in 0..k {
                list = list.tail().expect("range must never be empty");
            }

            let head = list.head().expect("range must never be empty");
            assert_eq!(head.force(), start + k as i64);
        }
    }

    // Test that take(0, xs) ends immediately without touching xs.
    #[test]
    fn test_take_zero_does_not_force() {
        assert!(take(0, bottom()).force().is_none());
        assert_eq!(take(0, bottom()).to_vec(), Vec::<i64>::new());
        assert_eq!(take(0, range(0)).to_vec(), Vec::<i64>::new());
    }

    #[test]
    fn test_take_from_range() {
        assert_eq!(take(5, range(0)).to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(take(3, range(100)).to_vec(), vec![100, 101, 102]);
    }

    // Test that take stops at the end of a list shorter than n.
    #[test]
    fn test_take_past_end_of_finite_list() {
        assert_eq!(take(10, to_lazy_list(vec![1, 2, 3])).to_vec(), vec![1, 2, 3]);
        assert_eq!(take(4, LazyList::<i64>::empty()).to_vec(), Vec::<i64>::new());
    }

    // Test that take(n, xs) drains to the first min(n, len) elements of xs.
    #[test]
    fn test_take_length_matches_min() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let len: usize = rng.gen_range(0..20);
            let elements: Vec<i64> = (0..len).map(|_| rng.gen_range(-100..100)).collect();

            for n in 0..len + 3 {
                let drained = take(n, to_lazy_list(elements.clone())).to_vec();
                let expected_len = n.min(len);

                assert_eq!(drained.len(), expected_len);
                assert_eq!(drained.as_slice(), &elements[..expected_len]);
            }
        }
    }

    // Test that draining take(5, ...) forces exactly five heads.
    #[test]
    fn test_take_forces_at_most_n_heads() {
        let counter = Rc::new(Cell::new(0));
        let taken = take(5, counted_range(0, Rc::clone(&counter)));

        assert_eq!(counter.get(), 0);
        assert_eq!(taken.to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(counter.get(), 5);
    }

    // Test that take never forces the list past its n-th node.
    #[test]
    fn test_take_stops_before_bottom() {
        let heads: Vec<Thunk<i64>> = (1..=5).map(Thunk::value).collect();

        let mut list = bottom();
        for head in heads.into_iter().rev() {
            list = LazyList::cons(head, list);
        }

        assert_eq!(take(5, list).to_vec(), vec![1, 2, 3, 4, 5]);
    }

    // Test that range stops at the largest i64 instead of overflowing.
    #[test]
    fn test_range_ends_at_max() {
        assert_eq!(take(3, range(i64::MAX)).to_vec(), vec![i64::MAX]);
        assert_eq!(
            take(5, range(i64::MAX - 1)).to_vec(),
            vec![i64::MAX - 1, i64::MAX]
        );
    }

    // Test that map only runs on the elements that are forced.
    #[test]
    fn test_map_is_lazy() {
        let counter = Rc::new(Cell::new(0));
        let map_counter = Rc::clone(&counter);
        let doubled = range(1).map(move |value| {
            map_counter.set(map_counter.get() + 1);
            value * 2
        });

        assert_eq!(counter.get(), 0);
        assert_eq!(take(3, doubled.clone()).to_vec(), vec![2, 4, 6]);
        assert_eq!(counter.get(), 3);
        assert_eq!(take(0, doubled).to_vec(), Vec::<i64>::new());
        assert_eq!(counter.get(), 3);

        let incremented = to_lazy_list(vec![1, 2]).map(|value| value + 1);
        assert_eq!(take(4, incremented).to_vec(), vec![2, 3]);
    }

    // Test that head and tail report an empty list instead of panicking.
    #[test]
    fn test_head_and_tail_of_empty_list() {
        let empty: LazyList<i64> = LazyList::empty();

        assert_eq!(
            empty.head().unwrap_err(),
            LazyListError::EmptyList { operation: "head" }
        );
        assert_eq!(
            empty.tail().unwrap_err(),
            LazyListError::EmptyList { operation: "tail" }
        );
        assert_eq!(
            format!("{}", empty.head().unwrap_err()),
            "Cannot take head of an empty list."
        );
    }

    // Test that an infinite list can be consumed through the iterator.
    #[test]
    fn test_iter_over_infinite_list() {
        let firsts: Vec<i64> = range(10).iter().take(3).collect();
        assert_eq!(firsts, vec![10, 11, 12]);

        let mut iter = to_lazy_list(vec![1]).iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_to_vec_bounded() {
        assert_eq!(take(3, range(0)).to_vec_bounded(3), Ok(vec![0, 1, 2]));
        assert_eq!(
            range(0).to_vec_bounded(100),
            Err(LazyListError::DrainLimitExceeded { limit: 100 })
        );
        assert_eq!(LazyList::<i64>::empty().to_vec_bounded(0), Ok(vec![]));
    }

    // Test that from_thunks keeps element order and leaves elements unforced.
    #[test]
    fn test_from_thunks() {
        let counter = Rc::new(Cell::new(0));
        let heads: Vec<Thunk<i64>> = (0..3)
            .map(|value| {
                let counter = Rc::clone(&counter);
                Thunk::new(move || {
                    counter.set(counter.get() + 1);
                    value * 10
                })
            })
            .collect();

        let list = LazyList::from_thunks(heads);
        let second = list.tail().and_then(|rest| rest.head());

        assert_eq!(counter.get(), 0);
        assert_eq!(second.map(|head| head.force()), Ok(10));
        assert_eq!(list.to_vec(), vec![0, 10, 20]);
        assert_eq!(counter.get(), 4);
    }

    // Test that forcing the same list twice recomputes but yields equal values.
    #[test]
    fn test_reforcing_is_repeatable() {
        let counter = Rc::new(Cell::new(0));
        let taken = take(3, counted_range(7, Rc::clone(&counter)));

        assert_eq!(taken.to_vec(), vec![7, 8, 9]);
        assert_eq!(taken.to_vec(), vec![7, 8, 9]);
        assert_eq!(counter.get(), 6);
    }
}
