//! One analysis run: load, classify, report

use std::io::Write;
use std::path::PathBuf;

use hvm_analyzer::{Analyzer, Category, ClassificationResult};

use crate::config::RunConfig;
use crate::error::{CliError, CliResult};
use crate::helm::ValuesFetcher;
use crate::output::{render, ReportWriter};
use crate::source::{load_values_file, resolve_upstream};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Classification of the downstream document
    pub result: ClassificationResult,
    /// Report files written
    pub written: Vec<PathBuf>,
    /// Where fetched upstream values were saved
    pub upstream_saved_to: Option<PathBuf>,
}

/// Execute a run, printing the optimized document to `stdout` when requested
///
/// # Errors
/// Any IO, helm, parse, analysis or rendering failure ends the run.
pub fn run(
    config: &RunConfig,
    fetcher: &dyn ValuesFetcher,
    stdout: &mut dyn Write,
) -> CliResult<RunOutcome> {
    let outdir = config.output_dir();
    std::fs::create_dir_all(outdir).map_err(|e| CliError::io_error(outdir, e))?;

    tracing::info!(upstream = %config.upstream, "resolving upstream values");
    let upstream = resolve_upstream(&config.upstream, fetcher, outdir)?;

    let (downstream, _) = load_values_file(&config.downstream)?;

    tracing::info!("processing upstream and downstream values");
    if upstream.source_text.is_some() {
        tracing::info!("using upstream text for commented value detection");
    }
    let analyzer = Analyzer::new(config.analyzer.clone());
    let result = analyzer.analyze(&upstream.values, &downstream, upstream.source_text.as_deref())?;

    let written = ReportWriter::new(&config.output).write(&result)?;

    if config.output.stdout {
        let text = render(&result.optimized, config.output.format, Category::Optimized)?;
        stdout
            .write_all(text.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e))?;
    }

    Ok(RunOutcome {
        result,
        written,
        upstream_saved_to: upstream.saved_to,
    })
}
