use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenBracket {
    pub(crate) open: char,
    pub(crate) line: usize,
}

/// Brackets still waiting for their closing partner, innermost last.
#[derive(Debug, Default)]
pub(crate) struct BracketStack {
    open: Vec<OpenBracket>,
}

impl BracketStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    pub(crate) fn open(&mut self, open: char, line: usize) {
        self.open.push(OpenBracket { open, line });
    }

    /// Closes the innermost bracket. A closer of the wrong kind still pops,
    /// a closer with nothing open leaves the stack alone.
    pub(crate) fn close(&mut self, close: char) -> Result<(), ErrorKind> {
        let top = self.open.pop().ok_or(ErrorKind::UnmatchedBracket(close))?;
        let expected = closer_for(top.open);
        if expected == close {
            Ok(())
        } else {
            Err(ErrorKind::MismatchedBracket { expected, found: close })
        }
    }

    /// Everything still open, in the order it was opened.
    pub(crate) fn unclosed(&self) -> impl Iterator<Item = &OpenBracket> {
        self.open.iter()
    }
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}
