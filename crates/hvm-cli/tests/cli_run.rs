//! Full runs over temporary directories with a stubbed `helm`.

use std::fs;
use std::path::Path;

use hvm_analyzer::Category;
use hvm_cli::{
    build_command, parse_config, run, CliError, CliResult, EnvSnapshot, OutputFormat, RunConfig,
    UpstreamSource, ValuesFetcher,
};
use hvm_test_utils::{mapping, CHART_VALUES, CUSTOM_VALUES};
use pretty_assertions::assert_eq;

/// Serves fixed chart text and fails release lookups
struct ChartOnly(&'static str);

impl ValuesFetcher for ChartOnly {
    fn chart_values(&self, _chart: &str, _version: Option<&str>) -> CliResult<String> {
        Ok(self.0.to_string())
    }

    fn release_values(&self, release: &str, _revision: u32) -> CliResult<String> {
        Err(CliError::Helm {
            command: format!("helm get values {release}"),
            stderr: "Error: release: not found".to_string(),
        })
    }
}

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn read_yaml(path: &Path) -> hvm_values::Mapping {
    mapping(&fs::read_to_string(path).unwrap())
}

#[test]
fn upstream_file_run_writes_all_reports() {
    let dir = tempfile::tempdir().unwrap();
    let upstream = write(dir.path(), "chart.yaml", CHART_VALUES);
    let downstream = write(dir.path(), "custom.yaml", CUSTOM_VALUES);
    let outdir = dir.path().join("analysis");
    let config = RunConfig::new(UpstreamSource::File(upstream), downstream).with_output_dir(&outdir);

    let mut stdout: Vec<u8> = Vec::new();
    let outcome = run(&config, &ChartOnly(""), &mut stdout).unwrap();

    assert_eq!(outcome.written.len(), 4);
    assert!(stdout.is_empty());
    assert_eq!(
        read_yaml(&outdir.join("optimized-values.yaml")),
        mapping("replicaCount: 3\nservice:\n  type: NodePort\n")
    );
    assert_eq!(
        read_yaml(&outdir.join("unsupported-values.yaml")),
        mapping("extraEnv:\n  - name: MODE\n    value: prod\n")
    );
    assert_eq!(read_yaml(&outdir.join("redundant-values.yaml")), outcome.result.redundant);
    assert_eq!(read_yaml(&outdir.join("commented-values.yaml")), outcome.result.commented);
}

#[test]
fn chart_run_saves_chart_values_and_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let downstream = write(dir.path(), "custom.yaml", "replicaCount: 1\nimage:\n  tag: v2\n");
    let outdir = dir.path().join("out");
    let config = RunConfig::new(
        UpstreamSource::Chart {
            name: "repo/app".to_string(),
            version: None,
        },
        downstream,
    )
    .with_output_dir(&outdir)
    .with_format(OutputFormat::Json)
    .with_stdout(true)
    .with_optimize(true);

    let mut stdout: Vec<u8> = Vec::new();
    let outcome = run(
        &config,
        &ChartOnly("replicaCount: 1\nimage:\n  tag: v1\n# resources: {}\n"),
        &mut stdout,
    )
    .unwrap();

    assert_eq!(outcome.upstream_saved_to, Some(outdir.join("chart-values.yaml")));
    assert!(outdir.join("chart-values.yaml").is_file());
    assert!(outdir.join("redundant-values.json").is_file());
    assert!(!outdir.join("unsupported-values.json").exists());

    let printed = String::from_utf8(stdout).unwrap();
    assert_eq!(printed, "{\n  \"image\": {\n    \"tag\": \"v2\"\n  }\n}\n");
    assert_eq!(
        fs::read_to_string(outdir.join("optimized-values.json")).unwrap(),
        printed
    );
}

#[test]
fn release_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let downstream = write(dir.path(), "custom.yaml", "a: 1\n");
    let config = RunConfig::new(
        UpstreamSource::Release {
            name: "ghost".to_string(),
            revision: 0,
        },
        downstream,
    )
    .with_output_dir(dir.path().join("out"));

    let err = run(&config, &ChartOnly(""), &mut std::io::sink()).unwrap_err();
    assert!(matches!(err, CliError::Helm { .. }));
    assert!(!err.is_usage());
}

#[test]
fn missing_downstream_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let upstream = write(dir.path(), "chart.yaml", "a: 1\n");
    let config = RunConfig::new(UpstreamSource::File(upstream), dir.path().join("absent.yaml"))
        .with_output_dir(dir.path().join("out"));

    let err = run(&config, &ChartOnly(""), &mut std::io::sink()).unwrap_err();
    match err {
        CliError::Io { path, .. } => assert_eq!(path, dir.path().join("absent.yaml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_mapping_downstream_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let upstream = write(dir.path(), "chart.yaml", "a: 1\n");
    let downstream = write(dir.path(), "custom.yaml", "- a\n- b\n");
    let config = RunConfig::new(UpstreamSource::File(upstream), downstream)
        .with_output_dir(dir.path().join("out"));

    let err = run(&config, &ChartOnly(""), &mut std::io::sink()).unwrap_err();
    assert!(matches!(err, CliError::Analyze(_)));
}

#[test]
fn parsed_flags_drive_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let upstream = write(dir.path(), "chart.yaml", "service:\n  port: 80\n  type: ClusterIP\n");
    let downstream = write(dir.path(), "custom.yaml", "service:\n  port: 80\n  type: NodePort\n");
    let outdir = dir.path().join("reports");

    let matches = build_command()
        .try_get_matches_from([
            "helm-values-manager",
            "--upstream",
            upstream.to_str().unwrap(),
            "--downstream",
            downstream.to_str().unwrap(),
            "--outdir",
            outdir.to_str().unwrap(),
        ])
        .unwrap();
    let config = parse_config(&matches, &EnvSnapshot::default()).unwrap();

    let outcome = run(&config, &ChartOnly(""), &mut std::io::sink()).unwrap();

    assert_eq!(outcome.result.redundant, mapping("service:\n  port: 80\n"));
    assert_eq!(outcome.result.summary().count(Category::Optimized), 2);
    assert_eq!(
        read_yaml(&outdir.join("optimized-values.yaml")),
        mapping("service:\n  type: NodePort\n")
    );
}
