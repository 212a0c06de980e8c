use super::cursor::Cursor;
use super::keywords::KeywordTable;
use super::span::Span;
use super::token::{Token, TokenKind};

use log::trace;

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    keywords: KeywordTable,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer from source using the default keyword spellings.
    pub fn new(source: &'src str) -> Self {
        Lexer::with_keywords(source, KeywordTable::default())
    }

    pub fn with_keywords(source: &'src str, keywords: KeywordTable) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            keywords,
        }
    }

    /// Returns the next token. Once the input is exhausted every call returns
    /// an end-of-file token.
    pub fn next_token(&mut self) -> Token {
        self.cursor.skip_whitespace();

        let start_pos = self.cursor.get_position();
        let (kind, literal) = self.lex_token();
        let end_pos = self.cursor.get_position();

        let token = Token::new(kind, literal, Span::new(start_pos, end_pos));
        trace!("lexed {}", token);
        token
    }

    fn lex_token(&mut self) -> (TokenKind, String) {
        let (byte_idx, ch) = match self.cursor.take() {
            Some(t) => t,
            None => return (TokenKind::EndOfFile, String::new()),
        };

        let kind = match ch {
            // Single-character tokens.
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LeftAngle,
            '>' => TokenKind::RightAngle,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,

            // Potentially two character tokens.
            '=' => self.look_for_eq_sign(TokenKind::Assign, TokenKind::DoubleEq),
            '!' => self.look_for_eq_sign(TokenKind::Bang, TokenKind::BangEq),

            '"' => return (TokenKind::String, self.lex_string(byte_idx)),

            _ if is_digit_char(ch) => {
                self.cursor.take_while(is_digit_char);
                TokenKind::Integer
            }

            _ if is_letter_char(ch) => return self.lex_word_or_keyword(byte_idx),

            _ => TokenKind::Illegal,
        };

        (kind, self.cursor.slice_from(byte_idx).to_owned())
    }

    /// Checks if next char is '='. If so, consume it and return t2.
    /// Otherwise, return t1.
    fn look_for_eq_sign(&mut self, t1: TokenKind, t2: TokenKind) -> TokenKind {
        if self.cursor.take_if('=') {
            t2
        } else {
            t1
        }
    }

    /// Scans up to the closing '"' (or the end of input) and returns the text
    /// between the quotes. No escape sequences are processed.
    fn lex_string(&mut self, quote_idx: usize) -> String {
        self.cursor.take_until(|ch| ch == '"');
        let contents = self.cursor.slice_from(quote_idx + 1);

        // Closing quote, when there is one.
        self.cursor.take_if('"');

        contents.to_owned()
    }

    /// Scans a run of letters. The word either starts a keyword phrase, is a
    /// single-word keyword, or is an identifier.
    fn lex_word_or_keyword(&mut self, start_idx: usize) -> (TokenKind, String) {
        self.cursor.take_while(is_letter_char);
        let word = self.cursor.slice_from(start_idx);

        if self.keywords.is_strict_prefix(word) {
            if let Some(keyword) = self.extend_phrase(word) {
                return keyword;
            }
        }

        match self.keywords.kind_of(word) {
            Some(kind) => (kind, word.to_owned()),
            None => (TokenKind::Identifier, word.to_owned()),
        }
    }

    /// Greedily appends the following words while the accumulated phrase is
    /// the start of a keyword. The loop is bounded by the longest keyword and
    /// by the end of input. When no keyword matches, the cursor goes back to
    /// just after the first word.
    fn extend_phrase(&mut self, first_word: &str) -> Option<(TokenKind, String)> {
        let checkpoint = self.cursor.clone();
        let mut phrase = first_word.to_owned();

        for _ in 1..self.keywords.max_words() {
            self.cursor.skip_whitespace();

            let word_start = self.cursor.byte_pos();
            if self.cursor.take_while(is_letter_char) == 0 {
                break;
            }
            phrase.push(' ');
            phrase.push_str(self.cursor.slice_from(word_start));

            if let Some(kind) = self.keywords.kind_of(&phrase) {
                return Some((kind, phrase));
            }
            if !self.keywords.is_strict_prefix(&phrase) {
                break;
            }
        }

        trace!("`{}` does not complete a keyword", phrase);
        self.cursor = checkpoint;
        None
    }

    /// Returns an iterator over the tokens before end of file.
    pub fn iter(self) -> LexerIterator<'src> {
        LexerIterator { lexer: self }
    }
}

pub struct LexerIterator<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Iterator for LexerIterator<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next_token();

        if token.is(TokenKind::EndOfFile) {
            return None;
        }

        Some(token)
    }
}

fn is_digit_char(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_letter_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}
