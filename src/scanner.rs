use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    brackets::BracketStack,
    cursor::Cursor,
    error::{Error, ErrorKind, Reporter},
    indent::{IndentLevel, IndentOrdering, IndentStack},
    token::{Literal, Token, TokenKind},
};

/// Scans `src` to completion, collecting diagnostics alongside the tokens.
pub fn scan(src: &str) -> (Vec<Token>, Vec<Error>) {
    let mut errors = Vec::new();
    let tokens = Scanner::new(src, &mut errors).scan_tokens();
    (tokens, errors)
}

/// Turns source text into tokens, layout tokens included.
///
/// The scanner is an iterator: it yields every token in source order and
/// finishes with a single [`TokenKind::Eof`]. Lexical errors go to the
/// [`Reporter`] and never stop the scan.
pub struct Scanner<'a, R> {
    cursor: Cursor<'a>,
    reporter: R,
    indents: IndentStack,
    brackets: BracketStack,
    at_line_start: bool,
    continuation: bool,
    pending: VecDeque<Token>,
    token_line: usize,
    finished: bool,
    emitted: usize,
    errors: usize,
}

impl<'a, R: Reporter> Iterator for Scanner<'a, R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(token);
            }
            if self.finished {
                return None;
            }

            if self.at_line_start {
                self.measure_indentation();
            } else if self.cursor.is_at_end() {
                self.finish();
            } else if let Some(token) = self.scan_token() {
                self.emitted += 1;
                return Some(token);
            }
        }
    }
}

impl<'a, R: Reporter> Scanner<'a, R> {
    pub fn new(src: &'a str, reporter: R) -> Self {
        Self {
            cursor: Cursor::new(src),
            reporter,
            indents: IndentStack::new(),
            brackets: BracketStack::new(),
            at_line_start: true,
            continuation: false,
            pending: VecDeque::new(),
            token_line: 1,
            finished: false,
            emitted: 0,
            errors: 0,
        }
    }

    pub fn scan_tokens(self) -> Vec<Token> {
        self.collect()
    }

    fn scan_token(&mut self) -> Option<Token> {
        self.cursor.clear_lexeme();
        self.token_line = self.cursor.line();
        let c = self.cursor.advance()?;

        use TokenKind::*;
        match c {
            '(' => self.open_bracket(LeftParen),
            '{' => self.open_bracket(LeftBrace),
            '[' => self.open_bracket(LeftSquare),
            ')' => self.close_bracket(RightParen),
            '}' => self.close_bracket(RightBrace),
            ']' => self.close_bracket(RightSquare),
            ',' => self.make(Comma),
            '.' => {
                if self.cursor.peek() == '.' && self.cursor.peek_next() == '.' {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.make(Ellipsis)
                } else {
                    self.make(Dot)
                }
            }
            '-' => self.make_if_next('-', MinusMinus, Minus),
            '+' => self.make_if_next('+', PlusPlus, Plus),
            '*' => self.make_if_next('*', Exponent, Star),
            '&' => self.make_if_next('&', And, BitAnd),
            '|' => self.make_if_next('|', Or, BitOr),
            '^' => self.make(BitXor),
            ';' => self.make(Semicolon),
            ':' => self.make(Colon),
            '?' => self.make(Question),
            '$' => self.make(Sigil),
            '!' => self.make_if_next('=', BangEqual, Bang),
            '=' => self.make_if_next('=', EqualEqual, Equal),
            '>' => self.make_if_next('=', GreaterEqual, Greater),
            '<' => {
                if self.cursor.does_next_match('=') {
                    self.make_if_next('>', Sign, LessEqual)
                } else {
                    self.make(Less)
                }
            }
            '/' => {
                if self.cursor.does_next_match('/') {
                    self.line_comment();
                    None
                } else if self.cursor.does_next_match('*') {
                    self.block_comment('/');
                    None
                } else {
                    self.make(Slash)
                }
            }
            '#' => {
                if self.cursor.does_next_match('*') {
                    self.block_comment('#');
                } else {
                    self.line_comment();
                }
                None
            }
            '"' => self.string(),
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line_break();
                None
            }
            '\\' if self.line_break_ahead() => {
                self.continuation = true;
                None
            }
            c if c.is_ascii_digit() => self.number(),
            c if can_start_identifier(c) => self.identifier(),
            c => {
                self.error(ErrorKind::UnexpectedCharacter(c));
                None
            }
        }
    }

    fn make(&mut self, kind: TokenKind) -> Option<Token> {
        Some(Token::new(kind, self.cursor.take_lexeme(), self.token_line))
    }

    fn make_if_next(
        &mut self,
        c: char,
        matched: TokenKind,
        otherwise: TokenKind,
    ) -> Option<Token> {
        if self.cursor.does_next_match(c) {
            self.make(matched)
        } else {
            self.make(otherwise)
        }
    }

    fn open_bracket(&mut self, kind: TokenKind) -> Option<Token> {
        self.brackets.open(self.cursor.previous(), self.token_line);
        self.make(kind)
    }

    fn close_bracket(&mut self, kind: TokenKind) -> Option<Token> {
        if let Err(e) = self.brackets.close(self.cursor.previous()) {
            self.error(e);
        }
        self.make(kind)
    }

    fn line_break_ahead(&mut self) -> bool {
        match self.cursor.peek() {
            '\n' => true,
            '\r' => self.cursor.peek_next() == '\n',
            _ => false,
        }
    }

    fn line_break(&mut self) {
        if self.brackets.is_empty() && !self.continuation {
            self.at_line_start = true;
        } else {
            trace!(
                line = self.token_line,
                brackets = self.brackets.depth(),
                "line break continues logical line"
            );
        }
        self.continuation = false;
    }

    fn line_comment(&mut self) {
        self.cursor.advance_until(|c| c == '\n');
    }

    /// Skips to the first `*` directly followed by `close`.
    fn block_comment(&mut self, close: char) {
        loop {
            match self.cursor.advance() {
                None => {
                    self.error(ErrorKind::UnterminatedComment);
                    return;
                }
                Some('*') if self.cursor.peek() == close => {
                    self.cursor.advance();
                    return;
                }
                Some(_) => {}
            }
        }
    }

    fn string(&mut self) -> Option<Token> {
        loop {
            match self.cursor.advance() {
                None => {
                    self.error(ErrorKind::UnterminatedString);
                    return None;
                }
                Some('"') => break,
                Some('\\') => {
                    self.cursor.advance();
                }
                Some(_) => {}
            }
        }

        let lexeme = self.cursor.take_lexeme();
        let value = lexeme[1..lexeme.len() - 1].to_string();
        let token = Token::new(TokenKind::String, lexeme, self.token_line);
        Some(token.with_literal(Literal::String(value)))
    }

    fn number(&mut self) -> Option<Token> {
        self.cursor.advance_until(|c| !c.is_ascii_digit());

        if self.cursor.peek() == '.' && self.cursor.peek_next().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.advance_until(|c| !c.is_ascii_digit());
        }

        match self.cursor.lexeme().parse::<f64>() {
            Ok(number) => self
                .make(TokenKind::Number)
                .map(|token| token.with_literal(Literal::Number(number))),
            Err(_) => {
                let text = self.cursor.take_lexeme();
                self.error(ErrorKind::InvalidNumber(text));
                None
            }
        }
    }

    fn identifier(&mut self) -> Option<Token> {
        self.cursor.advance_until(|c| !is_part_of_valid_identifier(c));
        let kind = TokenKind::keyword(self.cursor.lexeme()).unwrap_or(TokenKind::Identifier);
        self.make(kind)
    }

    fn measure_indentation(&mut self) {
        self.at_line_start = false;
        self.cursor.clear_lexeme();
        self.token_line = self.cursor.line();

        let mut level = IndentLevel::default();
        while matches!(self.cursor.peek(), ' ' | '\t') {
            if let Some(c) = self.cursor.advance() {
                level.add(c);
            }
        }

        if self.at_blank_line() {
            self.cursor.clear_lexeme();
            return;
        }

        let line = self.token_line;
        match level.compare(&self.indents.top()) {
            IndentOrdering::Equal => {}
            IndentOrdering::Greater => {
                trace!(line, width = level.width, count = level.count, "indent");
                self.indents.push(level);
                let whitespace = self.cursor.take_lexeme();
                self.pending.push_back(Token::new(TokenKind::Indent, whitespace, line));
            }
            IndentOrdering::Less => {
                let (closed, found) = match self.indents.dedent_to(level) {
                    Ok(closed) => (closed, true),
                    Err(closed) => (closed, false),
                };
                trace!(line, closed, depth = self.indents.depth(), "dedent");
                for _ in 0..closed {
                    self.pending.push_back(Token::new(TokenKind::Dedent, "", line));
                }
                if !found {
                    self.error(ErrorKind::IndentationMismatch);
                }
            }
            IndentOrdering::Inconsistent => self.error(ErrorKind::InvalidIndentation),
        }
        self.cursor.clear_lexeme();
    }

    /// Whether the rest of the line holds nothing but whitespace and comments
    /// that end on this line.
    fn at_blank_line(&mut self) -> bool {
        let mut i = 0;
        loop {
            match self.cursor.peek_nth(i) {
                None | Some('\n') => return true,
                Some(' ') | Some('\t') | Some('\r') => i += 1,
                Some(open @ '/') | Some(open @ '#') if self.cursor.peek_nth(i + 1) == Some('*') => {
                    match self.block_comment_end(i + 2, open) {
                        Some(end) => i = end,
                        None => return false,
                    }
                }
                Some('/') => return self.cursor.peek_nth(i + 1) == Some('/'),
                Some('#') => return true,
                Some(_) => return false,
            }
        }
    }

    /// Offset just past a block comment body starting at offset `i`, if the
    /// comment closes before the line ends.
    fn block_comment_end(&mut self, mut i: usize, close: char) -> Option<usize> {
        loop {
            match self.cursor.peek_nth(i)? {
                '\n' => return None,
                '*' if self.cursor.peek_nth(i + 1) == Some(close) => return Some(i + 2),
                _ => i += 1,
            }
        }
    }

    fn finish(&mut self) {
        let unclosed: Vec<usize> = self.brackets.unclosed().map(|b| b.line).collect();
        for line in unclosed {
            self.report_at(line, ErrorKind::UnclosedBracket);
        }

        self.pending.push_back(Token::eof(self.cursor.line()));
        self.finished = true;
        debug!(
            tokens = self.emitted + 1,
            errors = self.errors,
            depth = self.indents.depth(),
            "scan finished"
        );
    }

    fn error(&mut self, kind: ErrorKind) {
        self.report_at(self.token_line, kind);
    }

    fn report_at(&mut self, line: usize, kind: ErrorKind) {
        debug!(line, error = %kind, "lexical error");
        self.errors += 1;
        self.reporter.report(Error::lexical(line, kind));
    }
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
