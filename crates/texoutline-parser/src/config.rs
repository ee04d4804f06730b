//! Settings that shape the LaTeX structure tree.

/// Default sectioning hierarchy, outermost first.
pub const DEFAULT_SECTIONS: [&str; 5] = ["part", "chapter", "section", "subsection", "subsubsection"];

/// Commands reported as [`Command`](texoutline_core::element::ElementKind::Command) leaves by default.
pub const DEFAULT_COMMANDS: [&str; 1] = ["label"];

/// Environments reported as elements by default.
pub const DEFAULT_ENVIRONMENTS: [&str; 7] = [
    "figure",
    "figure*",
    "table",
    "table*",
    "frame",
    "algorithm",
    "algorithm*",
];

/// Default limit for nested inclusions.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// Configuration for the LaTeX structure builder.
///
/// # Example
///
/// ```
/// # use texoutline_parser::StructureConfig;
/// let config = StructureConfig::default()
///     .with_sections(["chapter", "section|frametitle"])
///     .with_numbers(false);
///
/// assert_eq!(config.section_level("frametitle"), Some(1));
/// assert_eq!(config.section_level("part"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureConfig {
    sections: Vec<Vec<String>>,
    commands: Vec<String>,
    environments: Vec<String>,
    numbers: bool,
    captions: bool,
    max_include_depth: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTIONS
                .iter()
                .map(|name| vec![(*name).to_string()])
                .collect(),
            commands: DEFAULT_COMMANDS.iter().map(|c| (*c).to_string()).collect(),
            environments: DEFAULT_ENVIRONMENTS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
            numbers: true,
            captions: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl StructureConfig {
    /// Replace the sectioning hierarchy, outermost level first.
    ///
    /// An entry may list alternatives separated by `|` that share a level.
    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sections = sections
            .into_iter()
            .map(|level| {
                level
                    .as_ref()
                    .split('|')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|level| !level.is_empty())
            .collect();
        self
    }

    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Prefix numbered section labels with their number (`1.2 Title`).
    pub fn with_numbers(mut self, numbers: bool) -> Self {
        self.numbers = numbers;
        self
    }

    /// Append the first caption of an environment to its label.
    pub fn with_captions(mut self, captions: bool) -> Self {
        self.captions = captions;
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Level of a sectioning command, `0` being the outermost.
    pub fn section_level(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|level| level.iter().any(|candidate| candidate == name))
    }

    /// Number of sectioning levels.
    pub fn section_depth(&self) -> usize {
        self.sections.len()
    }

    pub fn tracks_command(&self, name: &str) -> bool {
        self.commands.iter().any(|command| command == name)
    }

    pub fn tracks_environment(&self, name: &str) -> bool {
        self.environments.iter().any(|env| env == name)
    }

    pub fn numbers(&self) -> bool {
        self.numbers
    }

    pub fn captions(&self) -> bool {
        self.captions
    }

    pub fn max_include_depth(&self) -> usize {
        self.max_include_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let config = StructureConfig::default();
        assert_eq!(config.section_level("part"), Some(0));
        assert_eq!(config.section_level("subsubsection"), Some(4));
        assert_eq!(config.section_level("paragraph"), None);
        assert_eq!(config.section_depth(), 5);
        assert!(config.tracks_command("label"));
        assert!(config.tracks_environment("figure*"));
        assert!(!config.tracks_environment("itemize"));
        assert_eq!(config.max_include_depth(), DEFAULT_MAX_INCLUDE_DEPTH);
    }

    #[test]
    fn test_alternatives_share_a_level() {
        let config = StructureConfig::default().with_sections(["chapter", "section | frametitle", ""]);
        assert_eq!(config.section_level("section"), Some(1));
        assert_eq!(config.section_level("frametitle"), Some(1));
        assert_eq!(config.section_depth(), 2);
    }

    #[test]
    fn test_builders() {
        let config = StructureConfig::default()
            .with_commands(["label", "todo"])
            .with_environments(["theorem"])
            .with_numbers(false)
            .with_captions(false)
            .with_max_include_depth(2);
        assert!(config.tracks_command("todo"));
        assert!(config.tracks_environment("theorem"));
        assert!(!config.tracks_environment("figure"));
        assert!(!config.numbers());
        assert!(!config.captions());
        assert_eq!(config.max_include_depth(), 2);
    }
}
