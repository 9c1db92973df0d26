use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location span.
///
/// All line/column values are 1-based for human-readable error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero-width span at a single position.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, line, col)
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        let (start_line, start_col) =
            (self.start_line, self.start_col).min((other.start_line, other.start_col));
        let (end_line, end_col) = (self.end_line, self.end_col).max((other.end_line, other.end_col));
        Span::new(start_line, start_col, end_line, end_col)
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::point(1, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_point() {
        let s = Span::point(1, 5);
        assert_eq!(s, Span::new(1, 5, 1, 5));
    }

    #[test]
    fn test_span_merge_across_lines() {
        let a = Span::new(1, 5, 1, 10);
        let b = Span::new(2, 3, 2, 8);
        assert_eq!(a.merge(b), Span::new(1, 5, 2, 8));
        assert_eq!(b.merge(a), Span::new(1, 5, 2, 8));
    }

    #[test]
    fn test_span_merge_same_line() {
        let a = Span::new(1, 5, 1, 10);
        let b = Span::new(1, 3, 1, 8);
        assert_eq!(a.merge(b), Span::new(1, 3, 1, 10));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 7, 3, 15).to_string(), "3:7");
    }
}
