//! Lazy lists built from manually-wrapped thunks, and a small language for
//! building and printing them.

pub mod lazy_list;
pub mod lazy_list_ast;
pub mod lazy_list_execution;
pub mod lazy_list_recursive_descent_parsing;
pub mod thunk;
