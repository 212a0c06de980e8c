use super::errors::{ParserError, ParserErrorType, ParserResult};
use super::grammar::{
    BlockStatement, Expression, FunctionLiteral, Identifier, IfExpression, InfixOperator,
    PrefixOperator, Program, Statement,
};
use super::lexer::Lexer;
use super::parser_utils::Precedence;
use super::token::{Token, TokenKind};

use log::{debug, trace};

type PrefixParseFn<'s> = fn(&mut Parser<'s>) -> ParserResult<Expression>;
type InfixParseFn<'s> = fn(&mut Parser<'s>, Expression) -> ParserResult<Expression>;

pub struct Parser<'s> {
    lexer: Lexer<'s>,
    current: Token,
    peek: Token,
    errors: Vec<ParserError>,
}

impl<'s> Parser<'s> {
    pub fn new(mut lexer: Lexer<'s>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Parser {
            lexer,
            current,
            peek,
            errors: vec![],
        }
    }

    /// Diagnostics collected so far.
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    /// Parses the whole input, failing with every collected diagnostic if
    /// there was at least one.
    pub fn parse(mut self) -> Result<Program, Vec<ParserError>> {
        let program = self.parse_program();

        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors)
        }
    }

    /// Parses statements up to end of file. Malformed statements are left
    /// out of the program; see `errors` for what was reported.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current.is(TokenKind::EndOfFile) {
            if let Some(stmt) = self.parse_statement_with_recovery() {
                statements.push(stmt);
            }
            self.bump();
        }

        Program { statements }
    }

    /// Advances the stream.
    fn bump(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances only if the next token has the expected kind.
    fn expect_peek(&mut self, kind: TokenKind) -> ParserResult<()> {
        if self.peek.is(kind) {
            self.bump();
            Ok(())
        } else {
            Err(ParserError {
                span: self.peek.span,
                error: ParserErrorType::ExpectedToken(kind, self.peek.kind),
            })
        }
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek.is(TokenKind::Semicolon) {
            self.bump();
        }
    }

    fn parse_statement_with_recovery(&mut self) -> Option<Statement> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) if err.is_reported() => {
                self.errors.push(err);
                None
            }
            Err(err) => {
                debug!("dropping statement at {}: {}", err.span.start_pos, err);
                None
            }
        }
    }

    fn parse_statement(&mut self) -> ParserResult<Statement> {
        trace!("statement starting at {}", self.current);

        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => {
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.skip_optional_semicolon();
                Ok(Statement::Expression(expr))
            }
        }
    }

    fn parse_let_statement(&mut self) -> ParserResult<Statement> {
        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier::new(self.current.literal.clone());

        self.expect_peek(TokenKind::Assign)?;
        self.bump();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Let(name, value))
    }

    fn parse_return_statement(&mut self) -> ParserResult<Statement> {
        self.bump();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Return(value))
    }

    /// Parses statements after the current token until `terminator`, which
    /// is left as the current token.
    fn parse_block_statement(&mut self, terminator: TokenKind) -> ParserResult<BlockStatement> {
        let mut statements = vec![];
        self.bump();

        while !self.current.is(terminator) && !self.current.is(TokenKind::EndOfFile) {
            if let Some(stmt) = self.parse_statement_with_recovery() {
                statements.push(stmt);
            }
            self.bump();
        }

        if self.current.is(TokenKind::EndOfFile) {
            return Err(ParserError {
                span: self.current.span,
                error: ParserErrorType::ExpectedToken(terminator, TokenKind::EndOfFile),
            });
        }

        Ok(BlockStatement { statements })
    }

    /// Pratt parsing algo.
    pub fn parse_expression(&mut self, precedence: Precedence) -> ParserResult<Expression> {
        let prefix = match prefix_parse_fn(self.current.kind) {
            Some(prefix) => prefix,
            None => {
                return Err(ParserError {
                    span: self.current.span,
                    error: ParserErrorType::NoPrefixParse(self.current.kind),
                })
            }
        };
        let mut lhs = prefix(self)?;

        while !self.peek.is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek.kind) {
            let infix = match infix_parse_fn(self.peek.kind) {
                Some(infix) => infix,
                None => return Ok(lhs),
            };

            self.bump();
            lhs = infix(self, lhs)?;
        }

        Ok(lhs)
    }

    fn parse_identifier(&mut self) -> ParserResult<Expression> {
        Ok(Expression::Identifier(Identifier::new(
            self.current.literal.clone(),
        )))
    }

    fn parse_integer_literal(&mut self) -> ParserResult<Expression> {
        match self.current.literal.parse() {
            Ok(value) => Ok(Expression::Integer(value)),
            Err(_) => Err(ParserError {
                span: self.current.span,
                error: ParserErrorType::IntegerOutOfRange(self.current.literal.clone()),
            }),
        }
    }

    fn parse_string_literal(&mut self) -> ParserResult<Expression> {
        Ok(Expression::Str(self.current.literal.clone()))
    }

    fn parse_boolean(&mut self) -> ParserResult<Expression> {
        Ok(Expression::Boolean(self.current.is(TokenKind::True)))
    }

    fn parse_prefix_expression(&mut self) -> ParserResult<Expression> {
        let op = match PrefixOperator::from_token(self.current.kind) {
            Some(op) => op,
            None => {
                return Err(ParserError {
                    span: self.current.span,
                    error: ParserErrorType::NoPrefixParse(self.current.kind),
                })
            }
        };
        self.bump();

        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expression::Prefix(op, Box::new(right)))
    }

    fn parse_grouped_expression(&mut self) -> ParserResult<Expression> {
        self.bump();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        Ok(expr)
    }

    fn parse_array_literal(&mut self) -> ParserResult<Expression> {
        let elements = self.parse_expression_list(TokenKind::RightBracket)?;
        Ok(Expression::Array(elements))
    }

    /// Reads `key : value` pairs until the closing brace. Keys may be any
    /// expression.
    fn parse_hash_literal(&mut self) -> ParserResult<Expression> {
        let mut pairs = vec![];

        while !self.peek.is(TokenKind::RightBrace) {
            self.bump();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.bump();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek.is(TokenKind::RightBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::RightBrace)?;

        Ok(Expression::Hash(pairs))
    }

    fn parse_if_expression(&mut self) -> ParserResult<Expression> {
        self.expect_peek(TokenKind::LeftParen)?;
        self.bump();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block_statement(TokenKind::RightBrace)?;

        let alternative = if self.peek.is(TokenKind::Else) {
            self.bump();
            self.expect_peek(TokenKind::LeftBrace)?;
            Some(self.parse_block_statement(TokenKind::RightBrace)?)
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Function literals run from the start keyword through the parameter
    /// list and the body statements to the end keyword.
    fn parse_function_literal(&mut self) -> ParserResult<Expression> {
        self.expect_peek(TokenKind::LeftParen)?;
        let params = self.parse_function_params()?;
        let body = self.parse_block_statement(TokenKind::FnEnd)?;

        Ok(Expression::Function(FunctionLiteral { params, body }))
    }

    fn parse_function_params(&mut self) -> ParserResult<Vec<Identifier>> {
        let mut params = vec![];

        if self.peek.is(TokenKind::RightParen) {
            self.bump();
            return Ok(params);
        }

        self.expect_peek(TokenKind::Identifier)?;
        params.push(Identifier::new(self.current.literal.clone()));

        while self.peek.is(TokenKind::Comma) {
            self.bump();
            self.expect_peek(TokenKind::Identifier)?;
            params.push(Identifier::new(self.current.literal.clone()));
        }
        self.expect_peek(TokenKind::RightParen)?;

        Ok(params)
    }

    fn parse_infix_expression(&mut self, lhs: Expression) -> ParserResult<Expression> {
        let op = match InfixOperator::from_token(self.current.kind) {
            Some(op) => op,
            None => {
                return Err(ParserError {
                    span: self.current.span,
                    error: ParserErrorType::NoPrefixParse(self.current.kind),
                })
            }
        };
        let precedence = Precedence::of(self.current.kind);
        self.bump();

        let rhs = self.parse_expression(precedence)?;
        Ok(Expression::Infix(op, Box::new(lhs), Box::new(rhs)))
    }

    fn parse_call_expression(&mut self, callee: Expression) -> ParserResult<Expression> {
        let args = self.parse_expression_list(TokenKind::RightParen)?;
        Ok(Expression::Call(Box::new(callee), args))
    }

    fn parse_index_expression(&mut self, lhs: Expression) -> ParserResult<Expression> {
        self.bump();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightBracket)?;

        Ok(Expression::Index(Box::new(lhs), Box::new(index)))
    }

    /// Comma separated expressions up to `end`, which becomes the current
    /// token.
    fn parse_expression_list(&mut self, end: TokenKind) -> ParserResult<Vec<Expression>> {
        let mut list = vec![];

        if self.peek.is(end) {
            self.bump();
            return Ok(list);
        }

        self.bump();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.is(TokenKind::Comma) {
            self.bump();
            self.bump();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;

        Ok(list)
    }
}

/// Parser for a token in prefix position.
fn prefix_parse_fn<'s>(kind: TokenKind) -> Option<PrefixParseFn<'s>> {
    let parse_fn: PrefixParseFn<'s> = match kind {
        TokenKind::Identifier => Parser::parse_identifier,
        TokenKind::Integer => Parser::parse_integer_literal,
        TokenKind::String => Parser::parse_string_literal,
        TokenKind::True | TokenKind::False => Parser::parse_boolean,
        TokenKind::Bang | TokenKind::Minus => Parser::parse_prefix_expression,
        TokenKind::LeftParen => Parser::parse_grouped_expression,
        TokenKind::LeftBracket => Parser::parse_array_literal,
        TokenKind::LeftBrace => Parser::parse_hash_literal,
        TokenKind::If => Parser::parse_if_expression,
        TokenKind::FnStart => Parser::parse_function_literal,
        _ => return None,
    };

    Some(parse_fn)
}

/// Parser for a token in infix position, given the expression to its left.
fn infix_parse_fn<'s>(kind: TokenKind) -> Option<InfixParseFn<'s>> {
    let parse_fn: InfixParseFn<'s> = match kind {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Asterisk
        | TokenKind::Slash
        | TokenKind::DoubleEq
        | TokenKind::BangEq
        | TokenKind::LeftAngle
        | TokenKind::RightAngle => Parser::parse_infix_expression,
        TokenKind::LeftParen => Parser::parse_call_expression,
        TokenKind::LeftBracket => Parser::parse_index_expression,
        _ => return None,
    };

    Some(parse_fn)
}
