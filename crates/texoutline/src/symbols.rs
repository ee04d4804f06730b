//! Projection of element trees onto LSP document symbols.
//!
//! The projection is pure: no validation, no reordering. A malformed tree
//! projects as-is.

use lsp_types::{DocumentSymbol, Position, Range, SymbolKind};

use texoutline_core::element::{Element, ElementKind};

/// End column used for every symbol range, so ranges cover whole lines.
pub const END_OF_LINE: u32 = 65535;

/// Symbol name shown for elements with an empty label.
pub const EMPTY_LABEL: &str = "empty";

/// The symbol kind an element kind is shown as.
pub fn symbol_kind(kind: ElementKind) -> SymbolKind {
    match kind {
        ElementKind::Section | ElementKind::SectionStar => SymbolKind::MODULE,
        ElementKind::Environment => SymbolKind::CLASS,
        ElementKind::Command => SymbolKind::METHOD,
        ElementKind::SubFile => SymbolKind::INTERFACE,
        ElementKind::BibItem => SymbolKind::PACKAGE,
        ElementKind::BibField => SymbolKind::PROPERTY,
        ElementKind::Other => SymbolKind::CONSTANT,
    }
}

/// Project `elements` into document symbols, keeping order and nesting.
pub fn project(elements: &[Element]) -> Vec<DocumentSymbol> {
    elements.iter().map(to_document_symbol).collect()
}

#[allow(deprecated)]
fn to_document_symbol(element: &Element) -> DocumentSymbol {
    let range = Range::new(
        Position::new(element.line_from(), 0),
        Position::new(element.line_to(), END_OF_LINE),
    );
    let name = if element.label().is_empty() {
        EMPTY_LABEL.to_string()
    } else {
        element.label().to_string()
    };

    DocumentSymbol {
        name,
        detail: Some(String::new()),
        kind: symbol_kind(element.kind()),
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: if element.has_children() {
            Some(project(element.children()))
        } else {
            None
        },
    }
}
