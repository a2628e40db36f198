//! Report files

use std::path::PathBuf;

use hvm_analyzer::{Category, ClassificationResult};
use hvm_values::{to_json_string, to_yaml_string, Mapping};

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::source::write_file;

/// Report file locations inside the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    dir: PathBuf,
    format: OutputFormat,
}

impl ReportPaths {
    /// Paths under `dir` with the extension of `format`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Report file for a category, e.g. `redundant-values.yaml`
    #[must_use]
    pub fn path(&self, category: Category) -> PathBuf {
        self.dir
            .join(format!("{}-values.{}", category.name(), self.format.extension()))
    }
}

/// Render a tree in the given format
///
/// # Errors
/// Returns [`CliError::Render`] if the serializer rejects the tree
pub fn render(map: &Mapping, format: OutputFormat, category: Category) -> CliResult<String> {
    let rendered = match format {
        OutputFormat::Yaml => to_yaml_string(map),
        OutputFormat::Json => to_json_string(map).map(|mut json| {
            json.push('\n');
            json
        }),
    };
    rendered.map_err(|source| CliError::Render { category, source })
}

/// Writes classification results to disk
#[derive(Debug, Clone)]
pub struct ReportWriter {
    paths: ReportPaths,
    format: OutputFormat,
    optimize: bool,
}

impl ReportWriter {
    /// Writer for the given output settings
    #[must_use]
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            paths: ReportPaths::new(&output.dir, output.format),
            format: output.format,
            optimize: output.optimize,
        }
    }

    /// Write every report file, returning the paths written
    ///
    /// The optimized document is always written; the other categories only
    /// when they hold values.
    ///
    /// # Errors
    /// Returns [`CliError::Render`] or [`CliError::Io`] on the first report
    /// that cannot be rendered or written
    pub fn write(&self, result: &ClassificationResult) -> CliResult<Vec<PathBuf>> {
        let summary = result.summary();
        let mut written = Vec::new();

        for category in Category::ALL {
            let tree = result.tree(category);
            if category != Category::Optimized && tree.is_empty() {
                continue;
            }
            let path = self.paths.path(category);
            write_file(&path, &render(tree, self.format, category)?)?;
            tracing::info!(
                count = summary.count(category),
                path = %path.display(),
                "found {} values",
                category
            );
            written.push(path);
        }

        if self.optimize {
            match summary.reduction_percent() {
                Some(percent) => tracing::info!(
                    original = summary.original(),
                    optimized = summary.count(Category::Optimized),
                    "optimized values reduced by {percent}%"
                ),
                None => tracing::info!("no values to optimize"),
            }
        }

        Ok(written)
    }
}
