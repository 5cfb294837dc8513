//! Recursive descent parser that constructs lazy-list programs given a vector
//! of tokens.

use std::fmt::Display;

use crate::lazy_list_impl::lazy_list_ast::{
    DefStatement, EvalStatement, ExprNode, Program, Statement,
};
use crate::lexical_analysis::{Token, TokenClass};

/// Represents a parsing error.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedTokenClass {
        expected_token_class: TokenClass,
        found_token_class: TokenClass,
        line_num: usize,
    },
    UnexpectedTokenString {
        expected_token_string: String,
        found_token_string: String,
        line_num: usize,
    },
    InvalidNumberLiteral {
        literal: String,
        line_num: usize,
    },
    UnexpectedEndOfInput,
}

/// Display trait implementation for ParseError.
impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTokenClass {
                expected_token_class,
                found_token_class,
                line_num,
            } => {
                return write!(
                    f,
                    "Unexpected token class at line {}. Expected: {:?}, found: {:?}.",
                    line_num, expected_token_class, found_token_class
                );
            }

            Self::UnexpectedTokenString {
                expected_token_string,
                found_token_string,
                line_num,
            } => {
                return write!(
                    f,
                    "Unexpected token string at line {}. Expected: {:?}, found: {:?}.",
                    line_num, expected_token_string, found_token_string
                );
            }

            Self::InvalidNumberLiteral { literal, line_num } => {
                return write!(
                    f,
                    "Number literal {} at line {} does not fit in a 64-bit integer.",
                    literal, line_num
                );
            }

            Self::UnexpectedEndOfInput => {
                return write!(f, "Unexpected end of input.");
            }
        }
    }
}

/// Tries to parse a token of the requested class at tokens[start_idx].
fn try_token_class(
    tokens: &[Token],
    start_idx: usize,
    token_class: TokenClass,
) -> Result<(&Token, usize), ParseError> {
    if start_idx >= tokens.len() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    match tokens[start_idx].token_class == token_class {
        true => return Ok((&tokens[start_idx], start_idx + 1)),
        false => {
            return Err(ParseError::UnexpectedTokenClass {
                expected_token_class: token_class,
                found_token_class: tokens[start_idx].token_class,
                line_num: tokens[start_idx].line_num,
            })
        }
    };
}

/// Tries to parse a token containing the requested text at tokens[start_idx].
fn try_token_text<'a>(
    tokens: &[Token],
    start_idx: usize,
    token_text: &'a str,
) -> Result<(&'a str, usize), ParseError> {
    if start_idx >= tokens.len() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    match tokens[start_idx].token_text == token_text {
        true => return Ok((token_text, start_idx + 1)),
        false => {
            return Err(ParseError::UnexpectedTokenString {
                expected_token_string: String::from(token_text),
                found_token_string: tokens[start_idx].token_text.clone(),
                line_num: tokens[start_idx].line_num,
            });
        }
    };
}

/// Tries to parse a comma-separated argument list `([EXPR], [EXPR], ...)`
/// with exactly `arg_count` arguments.
fn try_call_args_rule(
    tokens: &[Token],
    start_idx: usize,
    arg_count: usize,
) -> Result<(Vec<Box<ExprNode>>, usize), ParseError> {
    let (_, mut start_idx) = try_token_text(tokens, start_idx, "(")?;
    let mut args = Vec::new();

    for arg_idx in 0..arg_count {
        if arg_idx > 0 {
            let (_, new_start_idx) = try_token_class(tokens, start_idx, TokenClass::Comma)?;
            start_idx = new_start_idx;
        }

        let (arg, new_start_idx) = try_expr_rule(tokens, start_idx)?;
        args.push(arg);
        start_idx = new_start_idx;
    }

    let (_, start_idx) = try_token_text(tokens, start_idx, ")")?;

    return Ok((args, start_idx));
}

/// Tries to parse a call to one of the builtin list operations, e.g.
/// `take([EXPR], [EXPR])`.
fn try_builtin_call_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(Box<ExprNode>, usize), ParseError> {
    let (name_token, start_idx) = try_token_class(tokens, start_idx, TokenClass::Identifier)?;

    let arg_count = match name_token.token_text.as_str() {
        "range" | "head" | "tail" => 1,
        "take" | "add" => 2,
        _ => {
            return Err(ParseError::UnexpectedTokenString {
                expected_token_string: String::from("range, take, add, head or tail"),
                found_token_string: name_token.token_text.clone(),
                line_num: name_token.line_num,
            });
        }
    };

    let (mut args, start_idx) = try_call_args_rule(tokens, start_idx, arg_count)?;

    // Arguments come off the back, so pop them in reverse order.
    let expr_node = match name_token.token_text.as_str() {
        "range" => ExprNode::Range {
            start: pop_arg(&mut args)?,
        },
        "head" => ExprNode::Head {
            list: pop_arg(&mut args)?,
        },
        "tail" => ExprNode::Tail {
            list: pop_arg(&mut args)?,
        },
        "take" => {
            let list = pop_arg(&mut args)?;
            ExprNode::Take {
                count: pop_arg(&mut args)?,
                list,
            }
        }
        _ => {
            let rhs = pop_arg(&mut args)?;
            ExprNode::Add {
                lhs: pop_arg(&mut args)?,
                rhs,
            }
        }
    };

    return Ok((Box::new(expr_node), start_idx));
}

// Takes the last parsed argument.
fn pop_arg(args: &mut Vec<Box<ExprNode>>) -> Result<Box<ExprNode>, ParseError> {
    return args.pop().ok_or(ParseError::UnexpectedEndOfInput);
}

/// Tries to parse a list literal like `[[EXPR], [EXPR], ...]`.
fn try_list_literal_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(Box<ExprNode>, usize), ParseError> {
    let (_, mut start_idx) = try_token_text(tokens, start_idx, "[")?;
    let mut elements = Vec::new();

    // Empty list.
    if let Ok((_, new_start_idx)) = try_token_text(tokens, start_idx, "]") {
        return Ok((Box::new(ExprNode::ListLiteral { elements }), new_start_idx));
    }

    loop {
        let (element, new_start_idx) = try_expr_rule(tokens, start_idx)?;
        elements.push(*element);
        start_idx = new_start_idx;

        match try_token_class(tokens, start_idx, TokenClass::Comma) {
            Ok((_, new_start_idx)) => {
                start_idx = new_start_idx;
            }
            Err(_) => {
                break;
            }
        }
    }

    let (_, start_idx) = try_token_text(tokens, start_idx, "]")?;

    return Ok((Box::new(ExprNode::ListLiteral { elements }), start_idx));
}

/// Tries to parse an expression that looks like `([EXPR])`.
fn try_parenthesis_expr_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(Box<ExprNode>, usize), ParseError> {
    let (_, start_idx) = try_token_text(tokens, start_idx, "(")?;
    let (expr_node, start_idx) = try_expr_rule(tokens, start_idx)?;
    let (_, start_idx) = try_token_text(tokens, start_idx, ")")?;

    return Ok((expr_node, start_idx));
}

/// Tries to parse a number literal.
fn try_number_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(Box<ExprNode>, usize), ParseError> {
    let (number_token, start_idx) = try_token_class(tokens, start_idx, TokenClass::Number)?;

    let value = number_token.token_text.parse::<i64>().map_err(|_| {
        ParseError::InvalidNumberLiteral {
            literal: number_token.token_text.clone(),
            line_num: number_token.line_num,
        }
    })?;

    return Ok((Box::new(ExprNode::Number { value }), start_idx));
}

/// Tries to parse an expression that looks like `[IDENTIFIER]`.
fn try_var_expr_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(Box<ExprNode>, usize), ParseError> {
    let (var_token, start_idx) = try_token_class(tokens, start_idx, TokenClass::Identifier)?;

    return Ok((
        Box::new(ExprNode::Var {
            var_name: var_token.token_text.clone(),
        }),
        start_idx,
    ));
}

/// Tries to parse according to the production
/// `e -> n | call | [list] | (e) | v`.
fn try_expr_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(Box<ExprNode>, usize), ParseError> {
    if start_idx >= tokens.len() {
        return Err(ParseError::UnexpectedEndOfInput);
    }

    match tokens[start_idx].token_class {
        TokenClass::Number => return try_number_rule(tokens, start_idx),
        TokenClass::Brackets => return try_list_literal_rule(tokens, start_idx),
        TokenClass::Parentheses => return try_parenthesis_expr_rule(tokens, start_idx),
        _ => {}
    };

    // An identifier followed by `(` is a builtin call, anything else is a
    // variable.
    let followed_by_paren = tokens
        .get(start_idx + 1)
        .is_some_and(|next_token| next_token.token_text == "(");

    if followed_by_paren {
        return try_builtin_call_rule(tokens, start_idx);
    }

    return try_var_expr_rule(tokens, start_idx);
}

/// Tries to parse a `def` statement.
fn try_def_statement_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(DefStatement, usize), ParseError> {
    let (_, start_idx) = try_token_class(tokens, start_idx, TokenClass::Def)?;
    let (def_name_token, start_idx) = try_token_class(tokens, start_idx, TokenClass::Identifier)?;
    let (_, start_idx) = try_token_class(tokens, start_idx, TokenClass::Equals)?;
    let (def_body, start_idx) = try_expr_rule(tokens, start_idx)?;
    let (_, start_idx) = try_token_class(tokens, start_idx, TokenClass::Semicolon)?;

    return Ok((
        DefStatement {
            def_name: def_name_token.token_text.clone(),
            def_body,
        },
        start_idx,
    ));
}

/// Tries to parse an `eval` statement.
fn try_eval_statement_rule(
    tokens: &[Token],
    start_idx: usize,
) -> Result<(EvalStatement, usize), ParseError> {
    let (_, start_idx) = try_token_class(tokens, start_idx, TokenClass::Eval)?;
    let (eval_body, start_idx) = try_expr_rule(tokens, start_idx)?;
    let (_, start_idx) = try_token_class(tokens, start_idx, TokenClass::Semicolon)?;

    return Ok((
        EvalStatement {
            eval_body,
        },
        start_idx,
    ));
}

/// Uses recursive descent to parse the given tokens into a `Program`.
///
/// Assumes that the input tokens have discarded whitespace and comments
/// (i.e. they were produced via run_lexical_analysis with
/// `discard_uninteresting = true`).
pub fn parse_recursive_descent(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut statements = Vec::new();
    let mut start_idx = 0;

    while start_idx < tokens.len() {
        if tokens[start_idx].token_class == TokenClass::Def {
            let (def_statement, new_start_idx) = try_def_statement_rule(tokens, start_idx)?;
            statements.push(Statement::Def(def_statement));
            start_idx = new_start_idx;
            continue;
        }

        let (eval_statement, new_start_idx) = try_eval_statement_rule(tokens, start_idx)?;
        statements.push(Statement::Eval(eval_statement));
        start_idx = new_start_idx;
    }

    return Ok(Program {
        statements,
    });
}
