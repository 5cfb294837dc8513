//! Splits lazy-list program text into tokens.

use lazy_static::lazy_static;
use regex::Regex;

/// The different classes of tokens that compose the language.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenClass {
    Def,
    Eval,
    Identifier,
    Number,
    Equals,
    Comma,
    Semicolon,
    Parentheses,
    Brackets,
    Comment,
    Whitespace,
    Error,
}

/// Represents a single token of the language.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub token_class: TokenClass,
    pub token_text: String,
    pub line_num: usize,
}

// Represents how to recognize a token class.
#[derive(Debug)]
struct TokenRule {
    token_class: TokenClass,
    regex: Regex,
}

// Vector of regex patterns that correspond to each token class. Every pattern
// is anchored at the start of the remaining input. When two rules match the
// same number of characters, the earlier rule wins.
lazy_static! {
    static ref token_rules: Vec<TokenRule> = vec![
        TokenRule {
            token_class: TokenClass::Def,
            regex: Regex::new(r"^def\b").expect("Unable to compile Def rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Eval,
            regex: Regex::new(r"^eval\b").expect("Unable to compile Eval rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Identifier,
            regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*")
                .expect("Unable to compile Identifier rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Number,
            regex: Regex::new(r"^-?[0-9]+").expect("Unable to compile Number rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Equals,
            regex: Regex::new(r"^=").expect("Unable to compile Equals rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Comma,
            regex: Regex::new(r"^,").expect("Unable to compile Comma rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Semicolon,
            regex: Regex::new(r"^;").expect("Unable to compile Semicolon rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Parentheses,
            regex: Regex::new(r"^[()]").expect("Unable to compile Parentheses rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Brackets,
            regex: Regex::new(r"^[\[\]]").expect("Unable to compile Brackets rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Comment,
            regex: Regex::new(r"^//[^\n]*").expect("Unable to compile Comment rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Whitespace,
            regex: Regex::new(r"^\s+").expect("Unable to compile Whitespace rule regex."),
        },
        TokenRule {
            token_class: TokenClass::Error,
            regex: Regex::new(r"(?s)^.").expect("Unable to compile Error rule regex."),
        },
    ];
}

// Gets the rule for a specific token class.
fn get_rule_for_token_class(token_class: TokenClass) -> Option<&'static TokenRule> {
    token_rules
        .iter()
        .find(|token_rule| token_rule.token_class == token_class)
}

// Finds the rule that matches the most characters from the start of the input
// string.
fn get_longest_matching_rule(input_str: &str) -> (&'static TokenRule, usize) {
    let mut longest_match_len: usize = 0;
    let mut longest_token_rule = get_rule_for_token_class(TokenClass::Error)
        .expect("Unable to find token rule for Error token class.");

    for token_rule in token_rules.iter() {
        match token_rule.regex.find(input_str) {
            None => continue,
            Some(match_obj) => {
                if match_obj.len() > longest_match_len {
                    longest_match_len = match_obj.len();
                    longest_token_rule = token_rule;
                }
            }
        };
    }

    (longest_token_rule, longest_match_len)
}

// Given a string, returns a vector of all tokens that comprise that string.
fn make_token_stream(program_str: &str) -> Vec<Token> {
    let mut curr_idx: usize = 0;
    let mut line_num: usize = 1;
    let mut out = Vec::new();

    while curr_idx < program_str.len() {
        let (token_rule, match_len) = get_longest_matching_rule(&program_str[curr_idx..]);
        let token_text = &program_str[curr_idx..curr_idx + match_len];

        out.push(Token {
            token_class: token_rule.token_class,
            token_text: String::from(token_text),
            line_num,
        });

        line_num += token_text.matches('\n').count();
        curr_idx += match_len;
    }

    out
}

/// Turns program text into tokens. With `discard_uninteresting`, whitespace
/// and comment tokens are dropped, which is what the parser expects.
pub fn run_lexical_analysis(program_str: &str, discard_uninteresting: bool) -> Vec<Token> {
    let tokens = make_token_stream(program_str);

    if !discard_uninteresting {
        return tokens;
    }

    return tokens
        .into_iter()
        .filter(|token| {
            token.token_class != TokenClass::Whitespace && token.token_class != TokenClass::Comment
        })
        .collect();
}
