use super::span::Span;

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Single-character tokens.
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    LeftAngle,
    RightAngle,
    Comma,
    Semicolon,
    Colon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Two character tokens.
    DoubleEq,
    BangEq,

    // Literals.
    Identifier,
    Integer,
    String,

    // Keywords.
    Let,
    If,
    Else,
    Return,
    FnStart,
    FnEnd,
    True,
    False,

    Illegal,
    EndOfFile,
}

/// A lexeme and its category. `literal` holds the raw text, without the
/// quotes for strings.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl TokenKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::LeftAngle => "<",
            TokenKind::RightAngle => ">",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::DoubleEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::Identifier => "IDENT",
            TokenKind::Integer => "INT",
            TokenKind::String => "STRING",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::FnStart => "FNSTART",
            TokenKind::FnEnd => "FNEND",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EndOfFile => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<8} {:?} @ {}", self.kind, self.literal, self.span.start_pos)
    }
}
