//! Loading of upstream and downstream values documents

use std::fs;
use std::path::{Path, PathBuf};

use hvm_values::Value;

use crate::config::UpstreamSource;
use crate::error::{CliError, CliResult};
use crate::helm::ValuesFetcher;

/// File name for saved chart values
pub const CHART_VALUES_FILE: &str = "chart-values.yaml";

/// File name for saved release values
pub const RELEASE_VALUES_FILE: &str = "upstream-values.yaml";

/// Parsed upstream values plus the text used for comment detection
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamDocument {
    /// Parsed values
    pub values: Value,
    /// Raw text, when the source carries comments
    pub source_text: Option<String>,
    /// Where a fetched document was saved
    pub saved_to: Option<PathBuf>,
}

/// Read a file, keeping the path in the error
///
/// # Errors
/// Returns [`CliError::Io`] naming `path`
pub fn read_file(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write a file, creating parent directories
///
/// # Errors
/// Returns [`CliError::Io`] naming the directory or file that failed
pub fn write_file(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::io_error(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| CliError::io_error(path, e))
}

/// Parse YAML text, naming `origin` on failure
///
/// # Errors
/// Returns [`CliError::Parse`] if `text` is not valid YAML
pub fn parse_values(text: &str, origin: &str) -> CliResult<Value> {
    Value::from_yaml_str(text).map_err(|e| CliError::parse_error(origin, e))
}

/// Load and parse a values file, returning the values and the raw text
///
/// # Errors
/// Returns [`CliError::Io`] or [`CliError::Parse`]
pub fn load_values_file(path: &Path) -> CliResult<(Value, String)> {
    let text = read_file(path)?;
    let values = parse_values(&text, &path.display().to_string())?;
    Ok((values, text))
}

/// Resolve the upstream document, saving fetched values into `outdir`
///
/// # Errors
/// Propagates IO, parse and fetcher failures; a chart with no values is
/// [`CliError::EmptyChartValues`]
pub fn resolve_upstream(
    source: &UpstreamSource,
    fetcher: &dyn ValuesFetcher,
    outdir: &Path,
) -> CliResult<UpstreamDocument> {
    match source {
        UpstreamSource::File(path) => {
            tracing::info!(path = %path.display(), "using upstream values file");
            let (values, text) = load_values_file(path)?;
            Ok(UpstreamDocument {
                values,
                source_text: Some(text),
                saved_to: None,
            })
        }
        UpstreamSource::Chart { name, version } => {
            resolve_chart(name, version.as_deref(), fetcher, outdir)
        }
        UpstreamSource::Release { name, revision } => {
            let text = fetcher.release_values(name, *revision)?;
            let values = parse_values(&text, &format!("release {name}"))?;
            let saved_to = outdir.join(RELEASE_VALUES_FILE);
            write_file(&saved_to, &text)?;
            tracing::info!(path = %saved_to.display(), "saved release values");
            Ok(UpstreamDocument {
                values,
                source_text: None,
                saved_to: Some(saved_to),
            })
        }
    }
}

fn resolve_chart(
    chart: &str,
    version: Option<&str>,
    fetcher: &dyn ValuesFetcher,
    outdir: &Path,
) -> CliResult<UpstreamDocument> {
    if chart.contains("cilium") {
        tracing::warn!(
            "the cilium chart has many commented values; for best results run \
             `helm show values {chart} > cilium-values.yaml` and pass it with --upstream"
        );
    }

    let text = match local_chart_values(Path::new(chart)) {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading chart values from local path");
            read_file(&path)?
        }
        None => fetcher.chart_values(chart, version)?,
    };

    if text.contains('#') {
        tracing::info!("chart values retrieved with comments preserved");
    } else {
        tracing::warn!("chart values contain no comments; commented values will not be detected");
    }

    let values = parse_values(&text, &format!("chart {chart}"))?;
    if values.is_null() || values.as_mapping().is_some_and(|map| map.is_empty()) {
        return Err(CliError::EmptyChartValues {
            chart: chart.to_string(),
            version: version.unwrap_or("latest").to_string(),
        });
    }

    let saved_to = outdir.join(CHART_VALUES_FILE);
    write_file(&saved_to, &text)?;
    tracing::info!(path = %saved_to.display(), "saved chart values");

    Ok(UpstreamDocument {
        values,
        source_text: Some(text),
        saved_to: Some(saved_to),
    })
}

/// Local values file for a chart argument, if it names one on disk
fn local_chart_values(chart: &Path) -> Option<PathBuf> {
    if chart.is_dir() {
        let values = chart.join("values.yaml");
        return values.is_file().then_some(values);
    }
    let is_yaml = chart
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    (is_yaml && chart.is_file()).then(|| chart.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use hvm_test_utils::mapping;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct StubFetcher {
        chart_text: String,
        release_text: String,
        calls: RefCell<Vec<String>>,
    }

    impl ValuesFetcher for StubFetcher {
        fn chart_values(&self, chart: &str, version: Option<&str>) -> CliResult<String> {
            self.calls
                .borrow_mut()
                .push(format!("chart {chart} {}", version.unwrap_or("-")));
            Ok(self.chart_text.clone())
        }

        fn release_values(&self, release: &str, revision: u32) -> CliResult<String> {
            self.calls.borrow_mut().push(format!("release {release} {revision}"));
            Ok(self.release_text.clone())
        }
    }

    #[test]
    fn upstream_file_keeps_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("up.yaml");
        fs::write(&path, "a: 1\n# b: 2\n").unwrap();

        let doc = resolve_upstream(
            &UpstreamSource::File(path),
            &StubFetcher::default(),
            dir.path(),
        )
        .unwrap();

        assert_eq!(doc.values, Value::Mapping(mapping("a: 1")));
        assert_eq!(doc.source_text.as_deref(), Some("a: 1\n# b: 2\n"));
        assert_eq!(doc.saved_to, None);
    }

    #[test]
    fn remote_chart_is_fetched_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("out");
        let fetcher = StubFetcher {
            chart_text: "replicaCount: 1\n# replicas: 3\n".to_string(),
            ..StubFetcher::default()
        };
        let source = UpstreamSource::Chart {
            name: "repo/app".to_string(),
            version: Some("1.2.3".to_string()),
        };

        let doc = resolve_upstream(&source, &fetcher, &outdir).unwrap();

        assert_eq!(fetcher.calls.borrow().as_slice(), ["chart repo/app 1.2.3"]);
        let saved = outdir.join(CHART_VALUES_FILE);
        assert_eq!(doc.saved_to.as_deref(), Some(saved.as_path()));
        assert_eq!(fs::read_to_string(saved).unwrap(), fetcher.chart_text);
        assert_eq!(doc.source_text.as_deref(), Some(fetcher.chart_text.as_str()));
    }

    #[test]
    fn local_chart_directory_reads_values_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("mychart");
        fs::create_dir(&chart).unwrap();
        fs::write(chart.join("values.yaml"), "image:\n  tag: v1\n").unwrap();
        let fetcher = StubFetcher::default();

        let doc = resolve_chart(
            &chart.display().to_string(),
            None,
            &fetcher,
            &dir.path().join("out"),
        )
        .unwrap();

        assert!(fetcher.calls.borrow().is_empty());
        assert_eq!(doc.values, Value::Mapping(mapping("image:\n  tag: v1\n")));
    }

    #[test]
    fn empty_chart_values_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher {
            chart_text: "# only comments\n".to_string(),
            ..StubFetcher::default()
        };

        let err = resolve_chart("repo/empty", None, &fetcher, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::EmptyChartValues { ref version, .. } if version == "latest"
        ));
    }

    #[test]
    fn empty_mapping_chart_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher {
            chart_text: "# defaults\n{}\n".to_string(),
            ..StubFetcher::default()
        };

        let err = resolve_chart("repo/empty", Some("2.0.0"), &fetcher, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::EmptyChartValues { ref version, .. } if version == "2.0.0"
        ));
        assert!(!dir.path().join(CHART_VALUES_FILE).exists());
    }

    #[test]
    fn release_values_have_no_comment_text() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher {
            release_text: "replicaCount: 2\n".to_string(),
            ..StubFetcher::default()
        };
        let source = UpstreamSource::Release {
            name: "web".to_string(),
            revision: 0,
        };

        let doc = resolve_upstream(&source, &fetcher, dir.path()).unwrap();

        assert_eq!(doc.source_text, None);
        assert!(dir.path().join(RELEASE_VALUES_FILE).is_file());
        assert_eq!(fetcher.calls.borrow().as_slice(), ["release web 0"]);
    }

    #[test]
    fn invalid_yaml_names_its_origin() {
        let err = parse_values("a: [1, 2", "down.yaml").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse down.yaml"));
    }

    #[test]
    fn write_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.yaml");
        write_file(&path, "a: 1\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "a: 1\n");
    }
}
