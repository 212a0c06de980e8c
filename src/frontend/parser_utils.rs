use super::grammar::{InfixOperator, PrefixOperator};
use super::token::TokenKind;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    // Lowest precedence
    Lowest,
    Equality,
    Comparison,
    Addition,
    Multiplication,
    Prefix,
    Call,
    Index, // Highest precedence
}

impl Precedence {
    /// Binding power of a token in infix position. Tokens that cannot
    /// continue an expression get `Lowest`.
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::DoubleEq | TokenKind::BangEq => Precedence::Equality,
            TokenKind::LeftAngle | TokenKind::RightAngle => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Addition,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Multiplication,
            TokenKind::LeftParen => Precedence::Call,
            TokenKind::LeftBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

impl PrefixOperator {
    pub fn from_token(kind: TokenKind) -> Option<PrefixOperator> {
        let op = match kind {
            TokenKind::Minus => PrefixOperator::Negate,
            TokenKind::Bang => PrefixOperator::LogicalNot,
            _ => return None,
        };

        Some(op)
    }
}

impl InfixOperator {
    pub fn from_token(kind: TokenKind) -> Option<InfixOperator> {
        let op = match kind {
            TokenKind::Plus => InfixOperator::Add,
            TokenKind::Minus => InfixOperator::Subtract,
            TokenKind::Asterisk => InfixOperator::Multiply,
            TokenKind::Slash => InfixOperator::Divide,
            TokenKind::DoubleEq => InfixOperator::EqualTo,
            TokenKind::BangEq => InfixOperator::NotEqualTo,
            TokenKind::RightAngle => InfixOperator::GreaterThan,
            TokenKind::LeftAngle => InfixOperator::LessThan,
            _ => return None,
        };

        Some(op)
    }
}
