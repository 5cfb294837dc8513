//! Data structures to represent lazy-list programs, and their string forms.

/// Represents an expression that evaluates to a number or a lazy list.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ExprNode {
    Number {
        value: i64,
    },
    Var {
        var_name: String,
    },
    Range {
        start: Box<ExprNode>,
    },
    Take {
        count: Box<ExprNode>,
        list: Box<ExprNode>,
    },
    Add {
        lhs: Box<ExprNode>,
        rhs: Box<ExprNode>,
    },
    Head {
        list: Box<ExprNode>,
    },
    Tail {
        list: Box<ExprNode>,
    },
    ListLiteral {
        elements: Vec<ExprNode>,
    },
}

/// Represents a 'def' statement.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DefStatement {
    pub def_name: String,
    pub def_body: Box<ExprNode>,
}

/// Represents an 'eval' statement.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EvalStatement {
    pub eval_body: Box<ExprNode>,
}

/// Represents a 'def' or 'eval' statement.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Statement {
    Def(DefStatement),
    Eval(EvalStatement),
}

/// A whole program. Statements run in source order, so a def is only
/// visible to the statements after it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

// Helper function to produce a string representation of an ExprNode.
fn expr_node_to_string_helper(expr_node: &ExprNode, string_so_far: &mut String) {
    match expr_node {
        ExprNode::Number { value } => {
            string_so_far.push_str(value.to_string().as_str());
        }
        ExprNode::Var { var_name } => {
            string_so_far.push_str(var_name.as_str());
        }
        ExprNode::Range { start } => {
            push_call("range", &[start], string_so_far);
        }
        ExprNode::Take { count, list } => {
            push_call("take", &[count, list], string_so_far);
        }
        ExprNode::Add { lhs, rhs } => {
            push_call("add", &[lhs, rhs], string_so_far);
        }
        ExprNode::Head { list } => {
            push_call("head", &[list], string_so_far);
        }
        ExprNode::Tail { list } => {
            push_call("tail", &[list], string_so_far);
        }
        ExprNode::ListLiteral { elements } => {
            string_so_far.push('[');

            for (idx, element) in elements.iter().enumerate() {
                if idx > 0 {
                    string_so_far.push_str(", ");
                }
                expr_node_to_string_helper(element, string_so_far);
            }

            string_so_far.push(']');
        }
    };
}

// Writes `name(arg1, arg2, ...)`.
fn push_call(name: &str, args: &[&Box<ExprNode>], string_so_far: &mut String) {
    string_so_far.push_str(name);
    string_so_far.push('(');

    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            string_so_far.push_str(", ");
        }
        expr_node_to_string_helper(arg, string_so_far);
    }

    string_so_far.push(')');
}

// Converts an expr node to a string.
pub fn expr_node_to_string(expr_node: &ExprNode) -> String {
    let mut out_string = String::new();
    expr_node_to_string_helper(expr_node, &mut out_string);
    return out_string;
}

// Display trait implementation for ExprNode using expr_node_to_string function.
impl std::fmt::Display for ExprNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", expr_node_to_string(self).as_str());
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Def(DefStatement { def_name, def_body }) => {
                return write!(f, "def {} = {};", def_name, def_body);
            }
            Statement::Eval(EvalStatement { eval_body }) => {
                return write!(f, "eval {};", eval_body);
            }
        }
    }
}
