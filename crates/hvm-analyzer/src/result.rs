//! Classification output

use std::fmt::{self, Display, Formatter};

use hvm_values::{count_nested_keys, Mapping};
use serde::Serialize;

/// Category a downstream value is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Key absent upstream
    Unsupported,
    /// Key absent upstream but present as a disabled entry in its text
    Commented,
    /// Value equal to upstream
    Redundant,
    /// Retained override
    Optimized,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Self; 4] = [
        Self::Optimized,
        Self::Unsupported,
        Self::Commented,
        Self::Redundant,
    ];

    /// Lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::Commented => "commented",
            Self::Redundant => "redundant",
            Self::Optimized => "optimized",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of classifying a downstream document against upstream
///
/// # Invariants
/// - paths in `unsupported`, `commented` or `redundant` are absent from `optimized`
/// - `unsupported` and `commented` never share a path
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Downstream keys with no counterpart upstream
    pub unsupported: Mapping,
    /// Downstream keys found only as disabled entries in the upstream text
    pub commented: Mapping,
    /// Downstream values equal to upstream
    pub redundant: Mapping,
    /// Minimal downstream document
    pub optimized: Mapping,
}

impl ClassificationResult {
    /// Tree for a category
    #[must_use]
    pub fn tree(&self, category: Category) -> &Mapping {
        match category {
            Category::Unsupported => &self.unsupported,
            Category::Commented => &self.commented,
            Category::Redundant => &self.redundant,
            Category::Optimized => &self.optimized,
        }
    }

    /// True when all four trees are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&category| self.tree(category).is_empty())
    }

    /// Key counts per category
    #[must_use]
    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary {
            unsupported: count_nested_keys(&self.unsupported),
            commented: count_nested_keys(&self.commented),
            redundant: count_nested_keys(&self.redundant),
            optimized: count_nested_keys(&self.optimized),
        }
    }
}

/// Nested key counts of a [`ClassificationResult`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    /// Keys in `unsupported`
    pub unsupported: usize,
    /// Keys in `commented`
    pub commented: usize,
    /// Keys in `redundant`
    pub redundant: usize,
    /// Keys in `optimized`
    pub optimized: usize,
}

impl ClassificationSummary {
    /// Count for a category
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Unsupported => self.unsupported,
            Category::Commented => self.commented,
            Category::Redundant => self.redundant,
            Category::Optimized => self.optimized,
        }
    }

    /// Size of the analysed document as seen by the reduction figure
    ///
    /// Commented keys are not included.
    #[must_use]
    pub fn original(&self) -> usize {
        self.optimized + self.redundant + self.unsupported
    }

    /// Percentage by which `optimized` is smaller than the original
    ///
    /// Integer arithmetic; `None` when there was nothing to reduce.
    #[must_use]
    pub fn reduction_percent(&self) -> Option<usize> {
        let original = self.original();
        (original > 0).then(|| 100 - self.optimized * 100 / original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvm_values::Value;

    #[test]
    fn category_names() {
        let names: Vec<_> = Category::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["optimized", "unsupported", "commented", "redundant"]);
    }

    #[test]
    fn empty_result() {
        let result = ClassificationResult::default();
        assert!(result.is_empty());
        assert_eq!(result.summary(), ClassificationSummary::default());
        assert_eq!(result.summary().reduction_percent(), None);
    }

    #[test]
    fn summary_counts_and_reduction() {
        let mut result = ClassificationResult::default();
        result.optimized.insert("a".into(), Value::from(1));
        result.redundant.insert("b".into(), Value::from(2));
        result.redundant.insert("c".into(), Value::from(3));
        result.unsupported.insert("d".into(), Value::from(4));
        result.commented.insert("e".into(), Value::from(5));

        let summary = result.summary();
        assert_eq!(summary.count(Category::Redundant), 2);
        assert_eq!(summary.count(Category::Commented), 1);
        assert_eq!(summary.original(), 4);
        assert_eq!(summary.reduction_percent(), Some(75));
        assert!(!result.is_empty());
    }
}
