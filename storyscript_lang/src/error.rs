use thiserror::Error;

use crate::token::TokenKind;

/// Structural parse failure: a required token kind was absent where the
/// grammar demanded one. Everything else in the parser is tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected} but found {actual} at line {line}, column {column}")]
pub struct ParseError {
    pub expected: TokenKind,
    pub actual: TokenKind,
    pub line: u32,
    pub column: u32,
}
