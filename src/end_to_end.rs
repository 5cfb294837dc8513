//! Code to configure and run the interpreter on a lazy-list program.

use std::fs;

use clap::Parser;

use crate::lazy_list_impl::lazy_list_execution::{
    execute_program, execution_result_to_string, ExecutionError,
};
use crate::lazy_list_impl::lazy_list_recursive_descent_parsing::{
    parse_recursive_descent, ParseError,
};
use crate::lexical_analysis::run_lexical_analysis;

/// Config for the interpreter. Instantiate via `RunConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct RunConfig {
    /// The input filepath to run on.
    #[arg(short, long)]
    pub src_filepath: Option<String>,

    /// Program text to run instead of a file.
    #[arg(short, long)]
    pub expr: Option<String>,

    /// Most elements printed for a single list before giving up.
    #[arg(short, long, default_value_t = 10_000)]
    pub drain_limit: usize,

    /// Drain lists without a limit. Printing an infinite list never returns.
    #[arg(long)]
    pub unbounded: bool,

    /// Trace evaluation to stdout.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunConfig {
    /// The drain limit to run with, or None when running unbounded.
    pub fn effective_drain_limit(&self) -> Option<usize> {
        if self.unbounded {
            return None;
        }

        return Some(self.drain_limit);
    }
}

/// Errors that may be thrown when running the interpreter.
#[derive(Debug)]
pub enum RunError {
    ConfigError(String),
    InputFileError(std::io::Error),
    ParseError(ParseError),
    ExecutionError(ExecutionError),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(config_err_string) => {
                return write!(f, "Interpreter configuration error: {}", config_err_string);
            }

            Self::InputFileError(io_err) => {
                return write!(f, "Input file error: {}", io_err);
            }

            Self::ParseError(parse_error) => {
                return write!(f, "Parse error: {}", parse_error);
            }

            Self::ExecutionError(execution_error) => {
                return write!(f, "Execution error: {}", execution_error);
            }
        }
    }
}

/// Type conversions for errors.
impl From<std::io::Error> for RunError {
    fn from(value: std::io::Error) -> Self {
        return Self::InputFileError(value);
    }
}

impl From<ParseError> for RunError {
    fn from(value: ParseError) -> Self {
        return Self::ParseError(value);
    }
}

impl From<ExecutionError> for RunError {
    fn from(value: ExecutionError) -> Self {
        return Self::ExecutionError(value);
    }
}

/// Lex, parse and execute the given program text, returning one output line
/// per eval statement.
pub fn run_program_string(
    program_string: &str,
    drain_limit: Option<usize>,
    verbose: bool,
) -> Result<String, RunError> {
    // Run lexer.
    let tokens = run_lexical_analysis(program_string, true);

    // Run parser.
    let program = parse_recursive_descent(&tokens)?;

    // Execute the program.
    let execution_result = execute_program(program, drain_limit, verbose)?;

    // Return the result.
    return Ok(execution_result_to_string(&execution_result));
}

/// Run the interpreter (i.e. the lexer, parser, and code execution) given a
/// run config.
pub fn run_interpreter(config: &RunConfig) -> Result<String, RunError> {
    let program_string = match (&config.src_filepath, &config.expr) {
        (Some(src_filepath), None) => fs::read_to_string(src_filepath)?,
        (None, Some(expr)) => expr.clone(),
        (Some(_), Some(_)) => {
            return Err(RunError::ConfigError(String::from(
                "Pass either --src-filepath or --expr, not both.",
            )));
        }
        (None, None) => {
            return Err(RunError::ConfigError(String::from(
                "Nothing to run. Pass --src-filepath or --expr.",
            )));
        }
    };

    return run_program_string(
        program_string.as_str(),
        config.effective_drain_limit(),
        config.verbose,
    );
}

#[cfg(test)]
mod tests {
    use crate::lazy_list_impl::lazy_list::LazyListError;

    use super::*;

    fn parse_config(args: &[&str]) -> RunConfig {
        let mut full_args = vec!["rust-lazy-list"];
        full_args.extend_from_slice(args);

        return RunConfig::try_parse_from(full_args).expect("Unable to parse arguments.");
    }

    #[test]
    fn test_config_defaults() {
        let config = parse_config(&["--expr", "eval 1;"]);

        assert_eq!(config.src_filepath, None);
        assert_eq!(config.expr.as_deref(), Some("eval 1;"));
        assert_eq!(config.effective_drain_limit(), Some(10_000));
        assert!(!config.verbose);
    }

    #[test]
    fn test_config_drain_limit_flags() {
        let config = parse_config(&["-e", "eval 1;", "-d", "3", "-v"]);
        assert_eq!(config.effective_drain_limit(), Some(3));
        assert!(config.verbose);

        let config = parse_config(&["-e", "eval 1;", "--unbounded"]);
        assert_eq!(config.effective_drain_limit(), None);
    }

    // Test the whole pipeline on an inline program.
    #[test]
    fn test_run_inline_program() {
        let config = parse_config(&[
            "--expr",
            "eval take(5, range(0)); eval take(3, range(100)); eval add(1, 2);",
        ]);

        let output = run_interpreter(&config).expect("Unable to run inline program.");

        assert_eq!(output, "[0, 1, 2, 3, 4]\n[100, 101, 102]\n3");
    }

    // Test the whole pipeline on the bundled demo program.
    #[test]
    fn test_run_demo_program_file() {
        let src_filepath = concat!(env!("CARGO_MANIFEST_DIR"), "/demo_programs/take_range.lzl");
        let config = parse_config(&["--src-filepath", src_filepath]);

        let output = run_interpreter(&config).expect("Unable to run demo program.");

        assert_eq!(
            output,
            "[0, 1, 2, 3, 4]\n[100, 101, 102]\n[1, 2, 3]\n42\n[5, 6, 7]"
        );
    }

    #[test]
    fn test_missing_input() {
        let config = parse_config(&[]);

        assert!(matches!(
            run_interpreter(&config),
            Err(RunError::ConfigError(_))
        ));
    }

    #[test]
    fn test_both_inputs() {
        let config = parse_config(&["-s", "program.lzl", "-e", "eval 1;"]);

        assert!(matches!(
            run_interpreter(&config),
            Err(RunError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let config = parse_config(&["-s", "/definitely/not/a/real/program.lzl"]);

        assert!(matches!(
            run_interpreter(&config),
            Err(RunError::InputFileError(_))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let run_error = run_program_string("eval take(1, range(0))", Some(10), false)
            .expect_err("A missing semicolon should fail to parse.");

        assert!(matches!(
            run_error,
            RunError::ParseError(ParseError::UnexpectedEndOfInput)
        ));
        assert_eq!(
            format!("{}", run_error),
            "Parse error: Unexpected end of input."
        );
    }

    // Test that a zero-length take of a failing list prints an empty list.
    #[test]
    fn test_take_zero_of_empty_tail() {
        assert_eq!(
            run_program_string("eval take(0, tail([]));", Some(10), false).ok(),
            Some(String::from("[]"))
        );
    }

    // Test that integer overflow is reported as an execution error.
    #[test]
    fn test_overflow_is_reported() {
        let run_error = run_program_string("eval add(9223372036854775807, 1);", Some(10), false)
            .expect_err("Overflowing add should fail.");

        assert!(matches!(
            run_error,
            RunError::ExecutionError(ExecutionError::Overflow { .. })
        ));

        assert_eq!(
            run_program_string("eval take(2, range(9223372036854775807));", Some(10), false).ok(),
            Some(String::from("[9223372036854775807]"))
        );
    }

    // Test that printing an infinite list hits the drain limit instead of
    // hanging.
    #[test]
    fn test_infinite_list_hits_drain_limit() {
        let run_error = run_program_string("eval range(0);", Some(25), false)
            .expect_err("Draining range(0) should hit the drain limit.");

        assert!(matches!(
            run_error,
            RunError::ExecutionError(ExecutionError::ListError(
                LazyListError::DrainLimitExceeded { limit: 25 }
            ))
        ));
    }
}
