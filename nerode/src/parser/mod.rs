//! # nerode parser
//! This module contains the parser for regular expressions: the surface pattern is lexed into
//! tokens, implicit concatenation is made explicit, and the resulting infix sequence is
//! converted to postfix form with the shunting-yard algorithm. All regexes that are
//! successfully parsed by this module are guaranteed to be well formed, so the Thompson
//! construction on a parsed [Regex] cannot fail.
//!
//! ## Format
//! There are seven operator characters: `(`, `)`, `|`, `*`, `+`, `?` and `.` (explicit
//! concatenation). The empty string is written as `ε`. Any other non-whitespace character is
//! a literal symbol of the input alphabet; whitespace is discarded. Concatenation is implicit
//! in the surface syntax: a `.` is inserted between two neighboring tokens whenever the left
//! one is a literal, `ε`, `)` or a postfix operator, and the right one is a literal, `ε`
//! or `(`.
//!
//! - `(ab)+c` accepts strings starting with "ab" repeated 1 or many times, followed by "c"
//! - `c(a|b)*c` accepts all strings starting with a `c`, then any amount of `a`s and `b`s,
//!   and then a `c`
//!
//! ## Errors
//! Parsing rejects malformed patterns up front:
//!
//! ```
//! use nerode::parser;
//! use nerode::parser::RegexParseError;
//!
//! assert_eq!(parser::regex("(a|b"), Err(RegexParseError::UnmatchedOpenParen));
//! assert_eq!(parser::regex("a)"), Err(RegexParseError::UnmatchedCloseParen));
//! assert_eq!(parser::regex("a()b"), Err(RegexParseError::EmptyGroup));
//! assert_eq!(parser::regex("a|"), Err(RegexParseError::MissingOperand('|')));
//! assert_eq!(parser::regex(""), Err(RegexParseError::EmptyPattern));
//! ```

mod regex;

use crate::regex::{Regex, Token};
use nom::combinator::all_consuming;
use nom::Finish;
use thiserror::Error;

/// Errors for patterns rejected by [regex()]. Every variant describes a malformed pattern;
/// a pattern that parses is guaranteed to compile to a NFA.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegexParseError {
    #[error("The pattern is empty")]
    EmptyPattern,
    #[error("The pattern contains an empty group '()'")]
    EmptyGroup,
    #[error("There is an unmatched '(' in the pattern")]
    UnmatchedOpenParen,
    #[error("There is an unmatched ')' in the pattern")]
    UnmatchedCloseParen,
    #[error("Operator '{0}' is missing an operand")]
    MissingOperand(char),
    #[error("The pattern does not reduce to a single expression")]
    MissingOperator,
}

/// Parses a regular expression according to the format above, producing its normalized and
/// postfix forms. The whole string must be parsable, otherwise this function errors.
pub fn regex(input: &str) -> Result<Regex, RegexParseError> {
    let (_, tokens) = all_consuming(regex::tokens)(input)
        .finish()
        .expect("the lexer accepts any character");

    if tokens.is_empty() {
        return Err(RegexParseError::EmptyPattern);
    }
    if tokens
        .windows(2)
        .any(|pair| pair[0] == Token::LParen && pair[1] == Token::RParen)
    {
        return Err(RegexParseError::EmptyGroup);
    }

    let normalized = insert_concatenation(tokens);
    let postfix = to_postfix(&normalized)?;
    check_arity(&postfix)?;

    Ok(Regex {
        pattern: input.trim().to_string(),
        normalized,
        postfix,
    })
}

/// Inserts the explicit concatenation operator between every pair of neighboring tokens
/// where the left one ends an expression and the right one begins a new one
fn insert_concatenation(tokens: Vec<Token>) -> Vec<Token> {
    let mut normalized = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        if let Some(previous) = normalized.last() {
            let left = matches!(
                previous,
                Token::Literal(_)
                    | Token::Epsilon
                    | Token::RParen
                    | Token::Star
                    | Token::Plus
                    | Token::Question
            );
            let right = matches!(token, Token::Literal(_) | Token::Epsilon | Token::LParen);
            if left && right {
                normalized.push(Token::Concat);
            }
        }
        normalized.push(token);
    }
    normalized
}

/// Shunting-yard conversion from the normalized infix sequence to postfix. Postfix unary
/// operators go straight to the output; binary operators and `(` are stacked; a literal
/// flushes the stack top once when the following operator binds at least as loosely.
/// No full precedence-pop loop is needed, since a binary operator is only pushed after the
/// preceding literal has already triggered a flush.
fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, RegexParseError> {
    let mut stack: Vec<Token> = Vec::new();
    let mut postfix = Vec::with_capacity(tokens.len());

    for (i, &token) in tokens.iter().enumerate() {
        match token {
            Token::RParen => loop {
                match stack.pop() {
                    None => return Err(RegexParseError::UnmatchedCloseParen),
                    Some(Token::LParen) => break,
                    Some(operator) => postfix.push(operator),
                }
            },
            Token::Star | Token::Plus | Token::Question => postfix.push(token),
            Token::LParen | Token::Concat | Token::Alternation => stack.push(token),
            Token::Literal(_) | Token::Epsilon => {
                postfix.push(token);
                if let Some(&top) = stack.last() {
                    if top != Token::LParen {
                        let flush = match tokens.get(i + 1) {
                            None => true,
                            Some(next) => {
                                next.is_operator() && next.precedence() >= top.precedence()
                            }
                        };
                        if flush {
                            postfix.push(stack.pop().expect("stack top was just inspected"));
                        }
                    }
                }
            }
        }
    }

    while let Some(operator) = stack.pop() {
        if operator == Token::LParen {
            return Err(RegexParseError::UnmatchedOpenParen);
        }
        postfix.push(operator);
    }
    Ok(postfix)
}

/// Walks the postfix sequence with a virtual operand count, rejecting operators that would
/// underflow the Thompson builder's stack
fn check_arity(postfix: &[Token]) -> Result<(), RegexParseError> {
    let mut operands: usize = 0;
    for &token in postfix {
        match token {
            Token::Literal(_) | Token::Epsilon => operands += 1,
            Token::Star | Token::Plus | Token::Question => {
                if operands == 0 {
                    return Err(RegexParseError::MissingOperand(token.to_char()));
                }
            }
            Token::Concat | Token::Alternation => {
                if operands < 2 {
                    return Err(RegexParseError::MissingOperand(token.to_char()));
                }
                operands -= 1;
            }
            Token::LParen | Token::RParen => {
                unreachable!("parentheses are consumed by the postfix conversion")
            }
        }
    }
    match operands {
        0 => Err(RegexParseError::EmptyPattern),
        1 => Ok(()),
        _ => Err(RegexParseError::MissingOperator),
    }
}
