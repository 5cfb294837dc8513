//! Executes lazy-list programs. Evaluating an expression only wires thunks and
//! lazy lists together. Lists are drained, and errors surface, when an `eval`
//! statement renders its result.

use std::collections::HashMap;
use std::fmt::Display;

use crate::lazy_list_impl::lazy_list::{range, take, LazyList, LazyListError};
use crate::lazy_list_impl::lazy_list_ast::{ExprNode, Program, Statement};
use crate::lazy_list_impl::thunk::Thunk;

/// A number whose computation may fail once it is forced.
pub type Number = Result<i64, ExecutionError>;

/// The value of an expression. Neither variant has been forced yet.
#[derive(Debug, Clone)]
pub enum Value {
    Number(Thunk<Number>),
    List(LazyList<Number>),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => return "number",
            Value::List(_) => return "list",
        }
    }
}

/// Errors that may be thrown while executing a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ExecutionError {
    UndefinedName {
        name: String,
    },
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        expr: String,
    },
    NegativeTakeCount {
        count: i64,
    },
    Overflow {
        lhs: i64,
        rhs: i64,
    },
    ListError(LazyListError),
}

/// Display trait implementation for ExecutionError.
impl Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedName { name } => {
                return write!(f, "Name {} is not defined.", name);
            }

            Self::TypeMismatch {
                expected,
                found,
                expr,
            } => {
                return write!(f, "Expected a {} in {}, found a {}.", expected, expr, found);
            }

            Self::NegativeTakeCount { count } => {
                return write!(f, "Cannot take a negative number ({}) of elements.", count);
            }

            Self::Overflow { lhs, rhs } => {
                return write!(f, "Adding {} and {} overflows a 64-bit integer.", lhs, rhs);
            }

            Self::ListError(list_error) => {
                return write!(f, "{}", list_error);
            }
        }
    }
}

impl From<LazyListError> for ExecutionError {
    fn from(value: LazyListError) -> Self {
        return Self::ListError(value);
    }
}

/// One rendered line per eval statement.
pub type ExecutionResult = Vec<String>;

/// Converts an ExecutionResult to a String.
pub fn execution_result_to_string(execution_result: &ExecutionResult) -> String {
    return execution_result.join("\n");
}

// Unwraps a number value, reporting `expr_node` on a type mismatch.
fn expect_number(value: Value, expr_node: &ExprNode) -> Result<Thunk<Number>, ExecutionError> {
    match value {
        Value::Number(thunk) => return Ok(thunk),
        other => {
            return Err(ExecutionError::TypeMismatch {
                expected: "number",
                found: other.type_name(),
                expr: expr_node.to_string(),
            });
        }
    }
}

// Unwraps a list value, reporting `expr_node` on a type mismatch.
fn expect_list(value: Value, expr_node: &ExprNode) -> Result<LazyList<Number>, ExecutionError> {
    match value {
        Value::List(list) => return Ok(list),
        other => {
            return Err(ExecutionError::TypeMismatch {
                expected: "list",
                found: other.type_name(),
                expr: expr_node.to_string(),
            });
        }
    }
}

// A one-element list whose only element is `error`, so draining it fails.
fn failed_list(error: ExecutionError) -> LazyList<Number> {
    return LazyList::cons(Thunk::value(Err(error)), LazyList::empty());
}

// A list that runs `build` only when it is forced. If `build` fails, the
// list turns into `failed_list` of that error.
fn deferred_list<F>(build: F) -> LazyList<Number>
where
    F: Fn() -> Result<LazyList<Number>, ExecutionError> + 'static,
{
    return LazyList::new(move || match build() {
        Ok(list) => list.force(),
        Err(error) => failed_list(error).force(),
    });
}

/// Evaluates an expression into a value without forcing anything.
///
/// Only name lookups and type checks happen here. Numeric arguments, empty
/// lists and overflow are dealt with when the value is forced, so
/// `take(0, xs)` succeeds for any list `xs`.
fn eval_expr(
    expr_node: &ExprNode,
    env: &HashMap<String, Value>,
    verbose: bool,
) -> Result<Value, ExecutionError> {
    if verbose {
        println!("In eval_expr, expr_node is {}", expr_node);
    }

    match expr_node {
        ExprNode::Number { value } => {
            return Ok(Value::Number(Thunk::value(Ok(*value))));
        }

        ExprNode::Var { var_name } => {
            return env
                .get(var_name)
                .cloned()
                .ok_or_else(|| ExecutionError::UndefinedName {
                    name: var_name.clone(),
                });
        }

        ExprNode::Range { start } => {
            let start_thunk = expect_number(eval_expr(start, env, verbose)?, expr_node)?;

            return Ok(Value::List(deferred_list(move || {
                return Ok(range(start_thunk.force()?).map(Ok));
            })));
        }

        ExprNode::Take { count, list } => {
            let count_thunk = expect_number(eval_expr(count, env, verbose)?, expr_node)?;
            let list_value = expect_list(eval_expr(list, env, verbose)?, expr_node)?;

            return Ok(Value::List(deferred_list(move || {
                let count_value = count_thunk.force()?;
                let count_value = usize::try_from(count_value).map_err(|_| {
                    ExecutionError::NegativeTakeCount { count: count_value }
                })?;

                return Ok(take(count_value, list_value.clone()));
            })));
        }

        ExprNode::Add { lhs, rhs } => {
            let lhs_thunk = expect_number(eval_expr(lhs, env, verbose)?, expr_node)?;
            let rhs_thunk = expect_number(eval_expr(rhs, env, verbose)?, expr_node)?;

            return Ok(Value::Number(Thunk::new(move || {
                let lhs_value = lhs_thunk.force()?;
                let rhs_value = rhs_thunk.force()?;

                return lhs_value
                    .checked_add(rhs_value)
                    .ok_or(ExecutionError::Overflow {
                        lhs: lhs_value,
                        rhs: rhs_value,
                    });
            })));
        }

        ExprNode::Head { list } => {
            let list_value = expect_list(eval_expr(list, env, verbose)?, expr_node)?;

            return Ok(Value::Number(Thunk::new(move || {
                return list_value.head()?.force();
            })));
        }

        ExprNode::Tail { list } => {
            let list_value = expect_list(eval_expr(list, env, verbose)?, expr_node)?;

            return Ok(Value::List(deferred_list(move || {
                return Ok(list_value.tail()?);
            })));
        }

        ExprNode::ListLiteral { elements } => {
            let mut heads = Vec::new();

            for element in elements {
                heads.push(expect_number(eval_expr(element, env, verbose)?, expr_node)?);
            }

            return Ok(Value::List(LazyList::from_thunks(heads)));
        }
    };
}

/// Forces a value into its printed form. Lists are drained, giving up after
/// `drain_limit` elements when a limit is set. The first element that fails
/// to compute fails the whole rendering.
pub fn render_value(value: &Value, drain_limit: Option<usize>) -> Result<String, ExecutionError> {
    match value {
        Value::Number(thunk) => {
            return Ok(thunk.force()?.to_string());
        }

        Value::List(list) => {
            let elements = match drain_limit {
                Some(limit) => list.to_vec_bounded(limit)?,
                None => list.to_vec(),
            };

            let mut element_strings = Vec::new();

            for element in elements {
                element_strings.push(element?.to_string());
            }

            return Ok(format!("[{}]", element_strings.join(", ")));
        }
    }
}

/// Execute a lazy-list program, returning the rendered value of each eval
/// statement in order.
pub fn execute_program(
    program: Program,
    drain_limit: Option<usize>,
    verbose: bool,
) -> Result<ExecutionResult, ExecutionError> {
    let mut env: HashMap<String, Value> = HashMap::new();
    let mut exec_result: ExecutionResult = Vec::new();

    for statement in program.statements {
        match statement {
            Statement::Def(def_statement) => {
                let def_value = eval_expr(&def_statement.def_body, &env, verbose)?;

                if verbose {
                    println!(
                        "Defined {} as a {}.",
                        def_statement.def_name,
                        def_value.type_name()
                    );
                }

                env.insert(def_statement.def_name, def_value);
            }

            Statement::Eval(eval_statement) => {
                let eval_value = eval_expr(&eval_statement.eval_body, &env, verbose)?;
                let rendered = render_value(&eval_value, drain_limit)?;

                if verbose {
                    println!("{} evaluated to {}", eval_statement.eval_body, rendered);
                }

                exec_result.push(rendered);
            }
        }
    }

    return Ok(exec_result);
}
