use peekmore::{PeekMore, PeekMoreIterator};
use std::str::Chars;

/// Returned by the lookahead methods once the input is exhausted.
pub(crate) const EOF_CHAR: char = '\0';

/// Character-level navigation over the source, accumulating the text of the
/// lexeme currently being scanned.
pub(crate) struct Cursor<'a> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    previous: char,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            previous: EOF_CHAR,
            line: 1,
        }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// The most recently consumed character.
    pub(crate) fn previous(&self) -> char {
        self.previous
    }

    pub(crate) fn is_at_end(&mut self) -> bool {
        self.src.peek().is_none()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.src.next()?;
        self.lexeme_buffer.push(c);
        self.previous = c;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    pub(crate) fn peek(&mut self) -> char {
        self.peek_nth(0).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn peek_next(&mut self) -> char {
        self.peek_nth(1).unwrap_or(EOF_CHAR)
    }

    /// The character `n` places past the next one, without consuming anything.
    pub(crate) fn peek_nth(&mut self, n: usize) -> Option<char> {
        self.src.peek_nth(n).copied()
    }

    /// Consumes the next character only if it is `c`.
    pub(crate) fn does_next_match(&mut self, c: char) -> bool {
        match self.src.peek() {
            Some(next) if *next == c => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn advance_until(&mut self, should_stop: impl Fn(char) -> bool) {
        while !self.is_at_end() && !should_stop(self.peek()) {
            self.advance();
        }
    }

    pub(crate) fn lexeme(&self) -> &str {
        &self.lexeme_buffer
    }

    pub(crate) fn take_lexeme(&mut self) -> String {
        std::mem::take(&mut self.lexeme_buffer)
    }

    pub(crate) fn clear_lexeme(&mut self) {
        self.lexeme_buffer.clear();
    }
}
