//! Coordinate structures used to reference specific locations within the parser input
#![allow(clippy::len_without_is_empty)]

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single character location within the parser input
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coords {
    /// The absolute character position, starting at zero
    pub absolute: usize,
    /// The line position, starting at one
    pub line: usize,
    /// The column position, starting at one
    pub column: usize,
}

impl Coords {
    /// Compute the coordinates of the character following `c`, where `c` sits at `self`
    pub fn advance(&self, c: char) -> Coords {
        if c == '\n' {
            Coords {
                absolute: self.absolute + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Coords {
                absolute: self.absolute + 1,
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Default for Coords {
    /// The default set of coordinates are positioned on the first character of the first line
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 1,
        }
    }
}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

/// A [Span] represents a closed interval within the parser input, between two different [Coords]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    /// Coordinates of the first character covered by the span
    pub start: Coords,
    /// Coordinates of the last character covered by the span
    pub end: Coords,
}

impl Span {
    /// Get the number of characters covered by the span, minimum is 1
    pub fn len(&self) -> usize {
        match self.start.cmp(&self.end) {
            Ordering::Less => self.end.absolute - self.start.absolute + 1,
            Ordering::Equal => 1,
            Ordering::Greater => self.start.absolute - self.end.absolute + 1,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start: {}, end: {}, length: {}",
            self.start,
            self.end,
            self.len()
        )
    }
}
