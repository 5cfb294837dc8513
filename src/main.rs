//! Run a given lazy-list program and print the result of each eval statement
//! to standard output.
//!
//! Example usage:
//!
//!     cargo run -- \
//!         --src-filepath demo_programs/take_range.lzl
//!
//!     cargo run -- --expr "eval take(5, range(0));"

use clap::Parser;
use rust_lazy_list::end_to_end::{run_interpreter, RunConfig};

fn main() {
    let run_config = RunConfig::parse();

    let interpreter_result = run_interpreter(&run_config);

    match interpreter_result {
        Ok(execution_result) => {
            println!("{}", execution_result);
        }

        Err(run_error) => {
            println!("{}", run_error);
        }
    }
}
