//! texoutline Core Types
//!
//! This crate provides the foundational types shared by the texoutline
//! parsers and the outline engine:
//!
//! - **Elements**: The nested structure tree every dialect parser produces ([`element::Element`])
//! - **Dialects**: The closed set of supported document languages ([`dialect::Dialect`])
//! - **Lines**: Byte offset to line number mapping ([`lines::LineIndex`])

pub mod dialect;
pub mod element;
pub mod lines;
