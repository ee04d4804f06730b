//! DocTeX structure extraction.
//!
//! A `.dtx` file interleaves documentation, written in `%`-prefixed lines,
//! with package code. The parser blanks out the code, strips the comment
//! prefix from the documentation and outlines the result as LaTeX. Line
//! numbers are preserved, so the tree maps back onto the `.dtx` source.

use log::debug;

use texoutline_core::{dialect::Dialect, element::Element};

use crate::{
    ParseInput, StructureParser, config::StructureConfig, error::ParseError, latex::LatexParser,
    resolver::SourceResolver,
};

/// Structure parser for DocTeX sources.
#[derive(Debug, Clone, Default)]
pub struct DoctexParser {
    latex: LatexParser,
}

impl DoctexParser {
    pub fn new(config: StructureConfig) -> Self {
        Self {
            latex: LatexParser::new(config),
        }
    }

    /// Outline the documentation part of a DocTeX source.
    pub fn parse_text(&self, source: &str) -> Vec<Element> {
        let documentation = documentation_text(source);
        let elements = self.latex.parse_text(&documentation);
        debug!(elements = elements.len(); "DocTeX structure built");
        elements
    }
}

impl StructureParser for DoctexParser {
    fn dialect(&self) -> Dialect {
        Dialect::Doctex
    }

    fn parse(
        &self,
        input: ParseInput<'_>,
        resolver: &dyn SourceResolver,
    ) -> Result<Vec<Element>, ParseError> {
        let source = input.load(resolver)?;
        Ok(self.parse_text(&source))
    }
}

/// The documentation text of a DocTeX source, one output line per input line.
///
/// `%` lines lose their first `%`. Code lines, and every line of a
/// `macrocode` block including its markers, become empty.
pub fn documentation_text(source: &str) -> String {
    let mut in_code = false;
    let lines = source.split('\n').map(|line| {
        let Some(doc) = line.strip_prefix('%') else {
            return "";
        };
        let marker = doc.trim_start();
        if in_code {
            if marker.starts_with("\\end{macrocode") {
                in_code = false;
            }
            ""
        } else if marker.starts_with("\\begin{macrocode") {
            in_code = true;
            ""
        } else {
            doc
        }
    });
    lines.collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use texoutline_core::element::ElementKind;

    use super::*;

    const SOURCE: &str = "% \\iffalse\n\
                          %<*driver>\n\
                          \\documentclass{ltxdoc}\n\
                          %</driver>\n\
                          % \\fi\n\
                          % \\section{Usage}\n\
                          % Some text.\n\
                          %    \\begin{macrocode}\n\
                          \\section{NotDocs}\n\
                          %    \\end{macrocode}\n\
                          % \\subsection{Options}\n\
                          %   \\label{sec:options}\n";

    #[test]
    fn test_documentation_text_keeps_lines() {
        let text = documentation_text(SOURCE);

        assert_eq!(text.split('\n').count(), SOURCE.split('\n').count());
        let lines: Vec<_> = text.split('\n').collect();
        assert_eq!(lines[2], "");
        assert_eq!(lines[5], " \\section{Usage}");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "");
        assert_eq!(lines[10], " \\subsection{Options}");
    }

    #[test]
    fn test_code_is_not_outlined() {
        let elements = DoctexParser::default().parse_text(SOURCE);

        assert_eq!(elements.len(), 1);
        let usage = &elements[0];
        assert_eq!(usage.kind(), ElementKind::Section);
        assert_eq!(usage.label(), "1 Usage");
        assert_eq!((usage.line_from(), usage.line_to()), (5, 12));

        let options = &usage.children()[0];
        assert_eq!(options.label(), "1.1 Options");
        assert_eq!(options.line_from(), 10);
        assert_eq!(options.children()[0].label(), "#label: sec:options");
    }

    #[test]
    fn test_unterminated_macrocode_blanks_the_rest() {
        let text = documentation_text("% a\n%\\begin{macrocode}\n% \\section{X}");
        assert_eq!(text, " a\n\n");
    }

    // ===================
    // Proptest Helpers
    // ===================

    fn doctex_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("% \\section{S}".to_string()),
            Just("% \\subsection{T}".to_string()),
            Just("% \\begin{figure}".to_string()),
            Just("% \\end{figure}".to_string()),
            Just("%   \\label{l}".to_string()),
            Just("%    \\begin{macrocode}".to_string()),
            Just("%    \\end{macrocode}".to_string()),
            Just("\\section{Code}".to_string()),
            Just("%<*driver>".to_string()),
            Just("% prose".to_string()),
            Just(String::new()),
        ]
    }

    fn check_trees_are_well_formed(lines: &[String]) -> Result<(), TestCaseError> {
        let source = lines.join("\n");
        let last_line = u32::try_from(lines.len().saturating_sub(1)).unwrap();

        for element in DoctexParser::default().parse_text(&source) {
            prop_assert!(element.is_well_formed(), "malformed tree: {:?}", element);
            prop_assert!(element.line_to() <= last_line);
            prop_assert!(!element.label().contains("Code"), "code outlined: {:?}", element);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn trees_are_well_formed(lines in prop::collection::vec(doctex_line(), 0..40)) {
            check_trees_are_well_formed(&lines)?;
        }
    }
}
