//! Analyzer configuration

use serde::{Deserialize, Serialize};

/// Section re-checked by the shallow-override pass when none is configured
pub const DEFAULT_SHALLOW_SECTION: &str = "service";

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Dotted paths of sections whose immediate children are re-checked after
    /// the recursive walk
    pub shallow_sections: Vec<String>,
}

impl AnalyzerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With shallow-override sections
    #[inline]
    #[must_use]
    pub fn with_shallow_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shallow_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Disable the shallow-override pass
    #[inline]
    #[must_use]
    pub fn without_shallow_pass(mut self) -> Self {
        self.shallow_sections.clear();
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            shallow_sections: vec![DEFAULT_SHALLOW_SECTION.to_string()],
        }
    }
}
