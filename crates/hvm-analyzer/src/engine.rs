//! Value classification engine
//!
//! Walks upstream and downstream mappings in lock-step:
//!
//! ```text
//! downstream ──deep copy──► optimized
//!      │
//!      ├─ absence pass ──► unsupported | commented   (no recursion)
//!      ├─ agreement pass ─► recurse (both mappings) | redundant (equal) | retained
//!      ├─ shallow-override pass over configured sections
//!      └─ prune unsupported, then commented, out of optimized
//! ```
//!
//! Absence always wins over equality. Inputs are only read; every output
//! tree is owned by the run that builds it.

use std::borrow::Cow;

use hvm_values::{deep_copy_mapping, equal, tree, KeyPath, Mapping, PathError, Value};

use crate::comment::CommentIndex;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, AnalyzeResult, Side};
use crate::result::ClassificationResult;

/// Stateless classifier of downstream values
///
/// Holds only configuration; independent runs may share one analyzer across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create analyzer with configuration
    #[inline]
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Classify `downstream` against `upstream`
    ///
    /// `upstream_source` is the raw upstream text; when given, keys absent
    /// upstream are checked for disabled entries and classified as commented.
    /// A `null` root (empty document) counts as an empty mapping.
    ///
    /// # Errors
    /// Returns [`AnalyzeError::NotAMapping`] before any work is done if either
    /// root is neither a mapping nor `null`
    pub fn analyze(
        &self,
        upstream: &Value,
        downstream: &Value,
        upstream_source: Option<&str>,
    ) -> AnalyzeResult<ClassificationResult> {
        let upstream = root_mapping(upstream, Side::Upstream)?;
        let downstream = root_mapping(downstream, Side::Downstream)?;
        self.analyze_mappings(&upstream, &downstream, upstream_source)
    }

    /// Classify two mapping roots
    ///
    /// # Errors
    /// Returns [`AnalyzeError::InvalidSection`] if a configured shallow
    /// section is not a valid key path
    pub fn analyze_mappings(
        &self,
        upstream: &Mapping,
        downstream: &Mapping,
        upstream_source: Option<&str>,
    ) -> AnalyzeResult<ClassificationResult> {
        let sections = self.shallow_section_paths()?;

        let mut run = Run::new(downstream, upstream_source);
        run.classify(&KeyPath::root(), upstream, downstream)?;
        for section in &sections {
            run.shallow_pass(section, upstream, downstream)?;
        }
        run.prune_absent()?;

        let result = run.finish();
        let summary = result.summary();
        tracing::debug!(
            unsupported = summary.unsupported,
            commented = summary.commented,
            redundant = summary.redundant,
            optimized = summary.optimized,
            "classification complete"
        );
        Ok(result)
    }

    fn shallow_section_paths(&self) -> AnalyzeResult<Vec<KeyPath>> {
        self.config
            .shallow_sections
            .iter()
            .map(|name| {
                name.parse::<KeyPath>()
                    .and_then(|path| if path.is_empty() { Err(PathError::InvalidPath) } else { Ok(path) })
                    .map_err(|source| AnalyzeError::InvalidSection {
                        name: name.clone(),
                        source,
                    })
            })
            .collect()
    }
}

fn root_mapping(value: &Value, side: Side) -> AnalyzeResult<Cow<'_, Mapping>> {
    match value {
        Value::Mapping(map) => Ok(Cow::Borrowed(map)),
        Value::Null => Ok(Cow::Owned(Mapping::new())),
        other => Err(AnalyzeError::not_a_mapping(side, other.kind())),
    }
}

/// Per-run state: the output trees and the paths recorded as absent
struct Run<'s> {
    result: ClassificationResult,
    comments: Option<CommentIndex<'s>>,
    unsupported_paths: Vec<KeyPath>,
    commented_paths: Vec<KeyPath>,
}

impl<'s> Run<'s> {
    fn new(downstream: &Mapping, upstream_source: Option<&'s str>) -> Self {
        Self {
            result: ClassificationResult {
                optimized: deep_copy_mapping(downstream),
                ..ClassificationResult::default()
            },
            comments: upstream_source.map(CommentIndex::new),
            unsupported_paths: Vec::new(),
            commented_paths: Vec::new(),
        }
    }

    fn classify(&mut self, prefix: &KeyPath, upstream: &Mapping, downstream: &Mapping) -> Result<(), PathError> {
        for (key, value) in downstream {
            if !upstream.contains_key(key) {
                self.record_absent(prefix.child(key.as_str()), value)?;
            }
        }

        for (key, down_value) in downstream {
            let Some(up_value) = upstream.get(key) else {
                continue;
            };
            let path = prefix.child(key.as_str());
            match (up_value, down_value) {
                (Value::Mapping(up_map), Value::Mapping(down_map)) => {
                    self.classify(&path, up_map, down_map)?;
                }
                _ if equal(down_value, up_value) => self.record_redundant(&path, down_value)?,
                _ => tracing::trace!(path = %path, "override retained"),
            }
        }
        Ok(())
    }

    fn record_absent(&mut self, path: KeyPath, value: &Value) -> Result<(), PathError> {
        let disabled = self
            .comments
            .as_mut()
            .is_some_and(|index| index.is_disabled(&path));

        if disabled {
            tracing::debug!(path = %path, "commented upstream");
            tree::set(&mut self.result.commented, &path, value.deep_copy())?;
            self.commented_paths.push(path);
        } else {
            tracing::debug!(path = %path, "unsupported");
            tree::set(&mut self.result.unsupported, &path, value.deep_copy())?;
            self.unsupported_paths.push(path);
        }
        Ok(())
    }

    fn record_redundant(&mut self, path: &KeyPath, value: &Value) -> Result<(), PathError> {
        tracing::debug!(path = %path, "redundant");
        tree::set(&mut self.result.redundant, path, value.deep_copy())?;
        tree::delete(&mut self.result.optimized, path)?;
        Ok(())
    }

    /// Re-check the immediate children of one section
    ///
    /// Only fills gaps: children already recorded in any category are left
    /// alone, and nested mappings are covered by the recursive walk.
    fn shallow_pass(&mut self, section: &KeyPath, upstream: &Mapping, downstream: &Mapping) -> Result<(), PathError> {
        let (Some(Value::Mapping(up_section)), Some(Value::Mapping(down_section))) =
            (tree::get(upstream, section), tree::get(downstream, section))
        else {
            return Ok(());
        };
        if !matches!(tree::get(&self.result.optimized, section), Some(Value::Mapping(_))) {
            return Ok(());
        }

        for (key, down_value) in down_section {
            let path = section.child(key.as_str());
            if self.is_recorded(&path) {
                continue;
            }
            match up_section.get(key) {
                None => {
                    tracing::debug!(path = %path, "unsupported (shallow pass)");
                    tree::set(&mut self.result.unsupported, &path, down_value.deep_copy())?;
                    self.unsupported_paths.push(path);
                }
                Some(Value::Mapping(_)) if matches!(down_value, Value::Mapping(_)) => {}
                Some(up_value) if equal(down_value, up_value) => {
                    self.record_redundant(&path, down_value)?;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn is_recorded(&self, path: &KeyPath) -> bool {
        tree::exists(&self.result.unsupported, path)
            || tree::exists(&self.result.commented, path)
            || tree::exists(&self.result.redundant, path)
    }

    fn prune_absent(&mut self) -> Result<(), PathError> {
        for path in self.unsupported_paths.iter().chain(&self.commented_paths) {
            tree::delete(&mut self.result.optimized, path)?;
        }
        Ok(())
    }

    fn finish(self) -> ClassificationResult {
        self.result
    }
}
