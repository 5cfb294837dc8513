//! Deferred zero-argument computations.

use std::cell::OnceCell;
use std::rc::Rc;

/// A deferred computation producing a `T`. Nothing runs until `force` is
/// called, and every call to `force` runs the computation again unless the
/// thunk was built with `memoized`.
///
/// Cloning a thunk is cheap: clones share the same closure.
pub struct Thunk<T> {
    compute: Rc<dyn Fn() -> T>,
}

impl<T: 'static> Thunk<T> {
    /// Wraps a closure without running it.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        return Thunk {
            compute: Rc::new(compute),
        };
    }

    /// A thunk that hands out clones of an already known value.
    pub fn value(value: T) -> Self
    where
        T: Clone,
    {
        return Thunk::new(move || value.clone());
    }

    /// Runs the deferred computation and returns its result.
    pub fn force(&self) -> T {
        return (self.compute)();
    }

    /// Returns a thunk that runs this computation at most once and hands out
    /// clones of the cached result afterwards.
    pub fn memoized(self) -> Thunk<T>
    where
        T: Clone,
    {
        let cache: OnceCell<T> = OnceCell::new();

        return Thunk::new(move || cache.get_or_init(|| self.force()).clone());
    }
}

impl<T> Clone for Thunk<T> {
    fn clone(&self) -> Self {
        return Thunk {
            compute: Rc::clone(&self.compute),
        };
    }
}

impl<T> std::fmt::Debug for Thunk<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "Thunk(<deferred>)");
    }
}

/// The lazy sum of two numbers: neither operand is forced until the sum is.
/// Forces to `None` when the sum does not fit in an `i64`.
pub fn lazy_add(lhs: Thunk<i64>, rhs: Thunk<i64>) -> Thunk<Option<i64>> {
    return Thunk::new(move || lhs.force().checked_add(rhs.force()));
}
