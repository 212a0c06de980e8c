use super::span::CodePosition;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    char_iterator: Peekable<CharIndices<'src>>,
    position: CodePosition,
}

impl<'src> Cursor<'src> {
    /// Creates a character stream for the source string.
    pub fn new(source: &'src str) -> Self {
        Cursor {
            source,
            char_iterator: source.char_indices().peekable(),
            position: CodePosition::new(0, 1, 1),
        }
    }

    /// Position of the next unconsumed character.
    pub fn get_position(&self) -> CodePosition {
        self.position
    }

    /// Byte offset of the next character, or the source length at the end.
    pub fn byte_pos(&self) -> usize {
        self.position.byte_pos
    }

    pub fn peek(&mut self) -> Option<(usize, char)> {
        self.char_iterator.peek().copied()
    }

    /// Consumes the next character.
    pub fn take(&mut self) -> Option<(usize, char)> {
        let (byte_idx, ch) = self.char_iterator.next()?;

        self.position.byte_pos = self
            .peek()
            .map(|(idx, _)| idx)
            .unwrap_or(self.source.len());
        if ch == '\n' {
            self.position.line_no += 1;
            self.position.column_no = 1;
        } else {
            self.position.column_no += 1;
        }

        Some((byte_idx, ch))
    }

    /// Consumes the next character if it equals target char.
    pub fn take_if(&mut self, target: char) -> bool {
        match self.peek() {
            Some((_, ch)) if ch == target => {
                self.take();
                true
            }
            _ => false,
        }
    }

    /// Consumes characters while they meet the condition and returns how many
    /// were consumed.
    pub fn take_while<F>(&mut self, condition: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        let mut count = 0;
        while let Some((_, ch)) = self.peek() {
            if !condition(ch) {
                break;
            }
            self.take();
            count += 1;
        }
        count
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(|ch| ch.is_ascii_whitespace());
    }

    /// Source text from `start` up to the next unconsumed character. `start`
    /// must be a byte offset this cursor has already passed.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.byte_pos()]
    }

    /// Consumes characters up to (not including) the first one that meets
    /// the condition.
    pub fn take_until<F>(&mut self, condition: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        self.take_while(|ch| !condition(ch))
    }
}
