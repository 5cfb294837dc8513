//! This crate demonstrates lazy evaluation with thunks: an infinite lazy list,
//! the `range` and `take` operations on it, and a tiny interpreter for
//! playing with them.

pub mod end_to_end;
pub mod lazy_list_impl;
pub mod lexical_analysis;

pub use lazy_list_impl::lazy_list::{range, take, to_lazy_list, LazyList, LazyListError, LazyNode};
pub use lazy_list_impl::thunk::{lazy_add, Thunk};
