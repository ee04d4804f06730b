//! Configuration types for outline extraction.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every setting is optional; unset settings keep the parser
//! defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`OutlineConfig`] - Which LaTeX constructs appear in the outline and how they are labelled.
//! - [`IncludeConfig`] - Limits for following inclusion directives.
//!
//! # Example
//!
//! ```
//! # use texoutline::config::AppConfig;
//! let config = AppConfig::default();
//! let structure = config.structure_config().unwrap();
//! assert_eq!(structure.section_level("section"), Some(2));
//! ```

use serde::Deserialize;

use texoutline_parser::StructureConfig;

use crate::OutlineError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// `[outline]` section.
    #[serde(default)]
    outline: OutlineConfig,

    /// `[includes]` section.
    #[serde(default)]
    includes: IncludeConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(outline: OutlineConfig, includes: IncludeConfig) -> Self {
        Self { outline, includes }
    }

    /// Returns the outline configuration.
    pub fn outline(&self) -> &OutlineConfig {
        &self.outline
    }

    /// Returns the inclusion configuration.
    pub fn includes(&self) -> &IncludeConfig {
        &self.includes
    }

    /// Validate the configuration and convert it into the parser settings.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::Config`] for a section or command name that
    /// is not a control word, an empty environment name, an empty section
    /// hierarchy or a zero inclusion depth.
    pub fn structure_config(&self) -> Result<StructureConfig, OutlineError> {
        let mut structure = StructureConfig::default();
        let outline = &self.outline;

        if let Some(sections) = &outline.sections {
            for name in sections.iter().flat_map(|level| level.split('|')) {
                check_control_word("section", name.trim())?;
            }
            if sections.is_empty() {
                return Err(OutlineError::Config(
                    "outline.sections must list at least one level".to_string(),
                ));
            }
            structure = structure.with_sections(sections);
        }
        if let Some(commands) = &outline.commands {
            for name in commands {
                check_control_word("command", name)?;
            }
            structure = structure.with_commands(commands.iter().cloned());
        }
        if let Some(environments) = &outline.environments {
            if environments.iter().any(|name| name.trim().is_empty()) {
                return Err(OutlineError::Config(
                    "outline.environments contains an empty name".to_string(),
                ));
            }
            structure = structure.with_environments(environments.iter().cloned());
        }
        if let Some(numbers) = outline.numbers {
            structure = structure.with_numbers(numbers);
        }
        if let Some(captions) = outline.captions {
            structure = structure.with_captions(captions);
        }
        if let Some(max_depth) = self.includes.max_depth {
            if max_depth == 0 {
                return Err(OutlineError::Config(
                    "includes.max_depth must be at least 1".to_string(),
                ));
            }
            structure = structure.with_max_include_depth(max_depth);
        }

        Ok(structure)
    }
}

/// A name usable after a backslash: letters and `@` only.
fn check_control_word(what: &str, name: &str) -> Result<(), OutlineError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '@');
    if valid {
        Ok(())
    } else {
        Err(OutlineError::Config(format!(
            "invalid {what} name `{name}` in config"
        )))
    }
}

/// Settings for the LaTeX outline.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutlineConfig {
    /// Sectioning hierarchy, outermost first. `a|b` puts two commands on one level.
    #[serde(default)]
    sections: Option<Vec<String>>,

    /// Commands reported as leaves.
    #[serde(default)]
    commands: Option<Vec<String>>,

    /// Environments reported as elements.
    #[serde(default)]
    environments: Option<Vec<String>>,

    /// Prefix section labels with their number.
    #[serde(default)]
    numbers: Option<bool>,

    /// Append captions to environment labels.
    #[serde(default)]
    captions: Option<bool>,
}

impl OutlineConfig {
    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = Some(sections.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = Some(environments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_numbers(mut self, numbers: bool) -> Self {
        self.numbers = Some(numbers);
        self
    }

    pub fn with_captions(mut self, captions: bool) -> Self {
        self.captions = Some(captions);
        self
    }
}

/// Settings for following `\input`, `\include` and friends.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IncludeConfig {
    /// Longest inclusion chain followed from the root document.
    #[serde(default)]
    max_depth: Option<usize>,
}

impl IncludeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// The configured depth, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use texoutline_parser::DEFAULT_MAX_INCLUDE_DEPTH;

    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let structure = AppConfig::default().structure_config().unwrap();
        assert_eq!(structure, StructureConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [outline]
            sections = ["chapter", "section|frametitle"]
            commands = ["label", "cite"]
            numbers = false

            [includes]
            max_depth = 4
            "#,
        )
        .unwrap();

        let structure = config.structure_config().unwrap();
        assert_eq!(structure.section_level("frametitle"), Some(1));
        assert_eq!(structure.section_level("part"), None);
        assert!(structure.tracks_command("cite"));
        assert!(!structure.numbers());
        assert!(structure.captions());
        assert_eq!(structure.max_include_depth(), 4);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.includes().max_depth(), None);
        assert_eq!(
            config.structure_config().unwrap().max_include_depth(),
            DEFAULT_MAX_INCLUDE_DEPTH
        );
    }

    #[test]
    fn test_invalid_names() {
        let config = AppConfig::new(
            OutlineConfig::default().with_sections(["section", "sub section"]),
            IncludeConfig::default(),
        );
        let err = config.structure_config().unwrap_err();
        assert!(matches!(err, OutlineError::Config(_)));
        assert!(err.to_string().contains("`sub section`"));

        let config = AppConfig::new(
            OutlineConfig::default().with_commands(["\\label"]),
            IncludeConfig::default(),
        );
        assert!(config.structure_config().is_err());

        let config = AppConfig::new(
            OutlineConfig::default().with_environments(["figure", " "]),
            IncludeConfig::default(),
        );
        assert!(config.structure_config().is_err());
    }

    #[test]
    fn test_empty_sections_and_zero_depth() {
        let config = AppConfig::new(
            OutlineConfig::default().with_sections(Vec::<String>::new()),
            IncludeConfig::default(),
        );
        assert!(config.structure_config().is_err());

        let config = AppConfig::new(
            OutlineConfig::default(),
            IncludeConfig::default().with_max_depth(0),
        );
        assert!(config.structure_config().is_err());
    }
}
