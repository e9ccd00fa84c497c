use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unterminated block comment.")]
    UnterminatedComment,
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),
    #[error("Indentation is invalid.")]
    InvalidIndentation,
    #[error("Did not find previous block with same indentation.")]
    IndentationMismatch,
    #[error("Unclosed bracket.")]
    UnclosedBracket,
    #[error("Expected '{expected}' but found '{found}'.")]
    MismatchedBracket { expected: char, found: char },
    #[error("Unmatched closing bracket '{0}'.")]
    UnmatchedBracket(char),
    #[error("Could not convert {0} into a number.")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("[line {line}] Error: {kind}")]
pub struct Error {
    line: usize,
    kind: ErrorKind,
}

impl Error {
    pub fn lexical(line: usize, kind: ErrorKind) -> Error {
        Error { line, kind }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// Sink for lexical diagnostics. Reporting never stops a scan.
pub trait Reporter {
    fn report(&mut self, error: Error);
}

impl Reporter for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, error: Error) {
        (**self).report(error);
    }
}
