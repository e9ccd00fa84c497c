//! Indentation levels measured with two metrics at once.
//!
//! `width` expands tabs to the next multiple of [`TAB_STOP`]; `count` counts
//! every tab or space as one. A line only indents (or dedents) when both
//! metrics move in the same direction, so swapping a tab for spaces part way
//! through a block is caught instead of silently accepted.

/// Column multiple a tab advances the width metric to.
pub const TAB_STOP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct IndentLevel {
    pub(crate) width: usize,
    pub(crate) count: usize,
}

impl IndentLevel {
    /// Accounts for one more leading whitespace character.
    pub(crate) fn add(&mut self, c: char) {
        match c {
            '\t' => self.width = (self.width / TAB_STOP + 1) * TAB_STOP,
            _ => self.width += 1,
        }
        self.count += 1;
    }

    pub(crate) fn compare(&self, other: &IndentLevel) -> IndentOrdering {
        use std::cmp::Ordering::*;
        match (self.width.cmp(&other.width), self.count.cmp(&other.count)) {
            (Equal, Equal) => IndentOrdering::Equal,
            (Greater, Greater) => IndentOrdering::Greater,
            (Less, Less) => IndentOrdering::Less,
            _ => IndentOrdering::Inconsistent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndentOrdering {
    Equal,
    Greater,
    Less,
    Inconsistent,
}

/// Open blocks, innermost last. The base level `(0, 0)` is never popped.
#[derive(Debug)]
pub(crate) struct IndentStack {
    levels: Vec<IndentLevel>,
}

impl IndentStack {
    pub(crate) fn new() -> Self {
        Self { levels: vec![IndentLevel::default()] }
    }

    pub(crate) fn top(&self) -> IndentLevel {
        self.levels.last().copied().unwrap_or_default()
    }

    /// Number of blocks opened above the base level.
    pub(crate) fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub(crate) fn push(&mut self, level: IndentLevel) {
        debug_assert_eq!(IndentOrdering::Greater, level.compare(&self.top()));
        self.levels.push(level);
    }

    /// Pops blocks until `level` is on top. `Ok` carries the number of blocks
    /// closed; `Err` carries the number closed before reaching the base level
    /// without finding `level`.
    pub(crate) fn dedent_to(&mut self, level: IndentLevel) -> Result<usize, usize> {
        let mut closed = 0;
        loop {
            if self.top() == level {
                return Ok(closed);
            }
            if self.levels.len() == 1 {
                return Err(closed);
            }
            self.levels.pop();
            closed += 1;
        }
    }
}
