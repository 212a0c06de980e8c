use super::span::Span;
use super::token::TokenKind;

use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum ParserErrorType {
    /// A required token was missing: (expected, actual).
    ExpectedToken(TokenKind, TokenKind),
    /// No expression starts with this token. The construct is dropped
    /// without a diagnostic.
    NoPrefixParse(TokenKind),
    /// Integer literal outside the i64 range. Dropped without a diagnostic.
    IntegerOutOfRange(String),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ParserError {
    pub span: Span,
    pub error: ParserErrorType,
}

pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    /// Whether the error is reported to the caller or only drops the
    /// malformed construct.
    pub fn is_reported(&self) -> bool {
        matches!(self.error, ParserErrorType::ExpectedToken(..))
    }

    /// Message prefixed with the source location.
    pub fn render(&self) -> String {
        format!("[line {}] {}", self.span.start_pos, self)
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error {
            ParserErrorType::ExpectedToken(expected, got) => write!(
                f,
                "expected next token to be {} got {} instead",
                expected, got
            ),
            ParserErrorType::NoPrefixParse(kind) => {
                write!(f, "no prefix parse function for {} found", kind)
            }
            ParserErrorType::IntegerOutOfRange(literal) => {
                write!(f, "could not parse {} as integer", literal)
            }
        }
    }
}
