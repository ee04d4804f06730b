//! Byte ranges into parsed source text.

use std::ops::Range;

/// A half-open byte range `start..end` into a source string.
///
/// Spans locate diagnostics. The element tree itself only stores line
/// numbers, see [`texoutline_core::lines::LineIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(4..9);
        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 9);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_inverted_range_is_clamped() {
        #[allow(clippy::reversed_empty_ranges)]
        let span = Span::new(9..4);
        assert_eq!(span.start(), 9);
        assert!(span.is_empty());
    }

    #[test]
    fn test_union() {
        let span = Span::new(10..12).union(Span::new(3..5));
        assert_eq!(span, Span::new(3..12));
    }
}
