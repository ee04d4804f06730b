//! Messages pinned to spans of the source.

use crate::span::Span;

/// Whether a label marks the problem itself or context around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    /// Where the problem is, e.g. the value that never ends.
    Primary,
    /// Surrounding context, e.g. the entry the value belongs to.
    Secondary,
}

/// A message attached to a span of a [`Diagnostic`](crate::error::Diagnostic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    style: LabelStyle,
    span: Span,
    message: String,
}

impl Label {
    pub fn new(style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        Self {
            style,
            span,
            message: message.into(),
        }
    }

    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(LabelStyle::Primary, span, message)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(LabelStyle::Secondary, span, message)
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.style == LabelStyle::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles() {
        let value = Label::primary(Span::new(10..20), "value starts here");
        let entry = Label::secondary(Span::new(0..9), "in this entry");

        assert!(value.is_primary());
        assert_eq!(value.span(), Span::new(10..20));
        assert_eq!(entry.style(), LabelStyle::Secondary);
        assert!(!entry.is_primary());
        assert_eq!(entry.message(), "in this entry");
    }
}
