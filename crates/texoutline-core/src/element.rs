//! The element tree shared by every dialect parser.
//!
//! An [`Element`] is one node of a document's structure: a section, an
//! environment, a bibliography entry and so on. Children are owned by value,
//! kept in document order, and nested strictly inside their parent's line
//! span.
//!
//! # Example
//!
//! ```
//! # use texoutline_core::element::{Element, ElementKind};
//! let intro = Element::new(ElementKind::Section, "Intro", 0, 10)
//!     .with_child(Element::new(ElementKind::Command, "#label: sec:intro", 1, 1));
//!
//! assert!(intro.is_well_formed());
//! assert_eq!(intro.children().len(), 1);
//! ```

use std::fmt;

/// Classification of a structural element.
///
/// The set is closed. Parsers that meet something they cannot classify use
/// [`ElementKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A numbered sectioning command such as `\section`.
    Section,
    /// The starred, unnumbered form of a sectioning command.
    SectionStar,
    /// A tracked `\begin{..}`/`\end{..}` environment.
    Environment,
    /// A tracked command such as `\label`.
    Command,
    /// Placeholder for an inclusion directive (`\input`, `\include`, ...).
    SubFile,
    /// A bibliography entry (`@article{..}`).
    BibItem,
    /// A field of a bibliography entry.
    BibField,
    /// Anything else.
    #[default]
    Other,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Section => "section",
            ElementKind::SectionStar => "section*",
            ElementKind::Environment => "environment",
            ElementKind::Command => "command",
            ElementKind::SubFile => "subfile",
            ElementKind::BibItem => "bibitem",
            ElementKind::BibField => "bibfield",
            ElementKind::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A node of the element tree.
///
/// Line numbers are zero-based and inclusive, in the coordinate space of the
/// document the element was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    kind: ElementKind,
    label: String,
    line_from: u32,
    line_to: u32,
    children: Vec<Element>,
}

impl Element {
    /// Create a leaf element.
    ///
    /// An empty `label` is kept as is. Display placeholders are the
    /// projector's job.
    pub fn new(kind: ElementKind, label: impl Into<String>, line_from: u32, line_to: u32) -> Self {
        Self {
            kind,
            label: label.into(),
            line_from,
            line_to,
            children: Vec::new(),
        }
    }

    /// Append a child and return the element, for building trees inline.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child in document order.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn line_from(&self) -> u32 {
        self.line_from
    }

    pub fn line_to(&self) -> u32 {
        self.line_to
    }

    /// Set the last line of the element.
    pub fn set_line_to(&mut self, line_to: u32) {
        self.line_to = line_to;
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The last line covered by any descendant, or `None` for a leaf.
    pub fn last_child_line(&self) -> Option<u32> {
        self.children.iter().map(Element::line_to).max()
    }

    /// Check the span invariants of this element and all its descendants.
    ///
    /// Holds when `line_from <= line_to` everywhere and every child span lies
    /// inside its parent's span.
    pub fn is_well_formed(&self) -> bool {
        self.line_from <= self.line_to
            && self.children.iter().all(|child| {
                self.line_from <= child.line_from
                    && child.line_to <= self.line_to
                    && child.is_well_formed()
            })
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }
}
