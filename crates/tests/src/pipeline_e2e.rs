//! Pipeline end-to-end tests over real processes.
//!
//! Every tool is a small `sh -c` script, so the tests need nothing but a
//! POSIX shell and coreutils.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use contracts::{
    FailureKind, Outcome, PipelineBlueprint, StepKind, Target, TargetReport, ToolSpec,
};
use runner::ProcessRunner;
use verifier::VerificationPipeline;

/// `sh -c <script> sh <args...>`: inside the script `$1` is the first arg
fn sh(script: &str, args: &[&str]) -> ToolSpec {
    let mut all = vec!["-c", script, "sh"];
    all.extend_from_slice(args);
    let mut spec = ToolSpec::new("sh", all);
    spec.env = BTreeMap::from([("LC_ALL".to_string(), "C".to_string())]);
    spec
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// Sorting lines stands in for import ordering, stripping trailing blanks
/// for reformatting. Together they are idempotent.
fn formatting_blueprint() -> PipelineBlueprint {
    let mut blueprint = PipelineBlueprint::default();
    blueprint.tools.import_sort = sh(r#"sort -o "$1" "$1""#, &["{file}"]);
    blueprint.tools.formatter = sh(
        r#"sed 's/[[:space:]]*$//' "$1" > "$1.fmt" && mv "$1.fmt" "$1""#,
        &["{file}"],
    );
    blueprint
}

async fn run(blueprint: PipelineBlueprint, root: &Path, target: Target) -> TargetReport {
    VerificationPipeline::new(blueprint, root, ProcessRunner::new())
        .run(target)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_format_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let primes = write(root, "pieces/primes.rs", "use b;  \nuse a;\n");
    let suite = write(root, "tests/primes.rs", "fn z() {}   \nfn a() {}\n");

    let first = run(formatting_blueprint(), root, Target::Format).await;
    assert_eq!(first.outcome(), Outcome::Passed);
    assert_eq!(read(&primes), "use a;\nuse b;\n");
    assert_eq!(read(&suite), "fn a() {}\nfn z() {}\n");

    let snapshot = (read(&primes), read(&suite));
    let second = run(formatting_blueprint(), root, Target::Format).await;
    assert_eq!(second.exit_code(), 0);
    assert_eq!((read(&primes), read(&suite)), snapshot);
}

#[tokio::test]
async fn test_all_runs_format() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let file = write(root, "pieces/canon.rs", "b\na\n");

    let report = run(formatting_blueprint(), root, Target::All).await;
    assert_eq!(report.requested, Target::All);
    assert_eq!(report.target, Target::Format);
    let steps: Vec<StepKind> = report.steps.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![StepKind::ImportSort, StepKind::Format]);
    assert_eq!(read(&file), "a\nb\n");
}

#[tokio::test]
async fn test_rewrite_stops_at_first_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let a = write(root, "pieces/a.rs", "ok\n");
    let b = write(root, "pieces/b.rs", "BROKEN\n");
    let c = write(root, "pieces/c.rs", "ok\n");

    let mut blueprint = formatting_blueprint();
    blueprint.tools.import_sort = sh(
        r#"if grep -q BROKEN "$1"; then exit 3; fi; printf 'sorted\n' >> "$1""#,
        &["{file}"],
    );

    let report = run(blueprint, root, Target::Format).await;
    assert_eq!(
        report.outcome(),
        Outcome::Failed {
            kind: FailureKind::Rewrite,
            exit_code: 3
        }
    );
    assert_eq!(report.steps.len(), 1);
    let step = &report.steps[0];
    assert_eq!(step.invocations, 2);
    assert_eq!(step.failed_file.as_deref(), Some(b.as_path()));

    // earlier files keep their rewrite, later ones are untouched
    assert_eq!(read(&a), "ok\nsorted\n");
    assert_eq!(read(&b), "BROKEN\n");
    assert_eq!(read(&c), "ok\n");
}

#[tokio::test]
async fn test_every_failing_case_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let mut blueprint = PipelineBlueprint::default();
    blueprint.tools.test_runner = sh(
        r#"fails=0
for case in 1 2 3 4 5 6; do
  if [ $((case % 3)) -eq 0 ]; then
    echo "case $case failed" >> failures.log
    fails=$((fails + 1))
  fi
done
[ "$fails" -eq 0 ]"#,
        &[],
    );

    let report = run(blueprint, root, Target::Tests).await;
    assert_eq!(
        report.outcome(),
        Outcome::Failed {
            kind: FailureKind::Verification,
            exit_code: 1
        }
    );
    let failures = read(&root.join("failures.log"));
    assert_eq!(failures, "case 3 failed\ncase 6 failed\n");
}

#[tokio::test]
async fn test_passing_tests() {
    let dir = tempfile::tempdir().unwrap();
    let mut blueprint = PipelineBlueprint::default();
    blueprint.tools.test_runner = sh("true", &[]);

    let report = run(blueprint, dir.path(), Target::Tests).await;
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.steps[0].step, StepKind::Test);
}

/// printf template: one source record and one test record under `%s`
const LCOV_TEMPLATE: &str = "\
    SF:%s/pieces/primes.rs\\nDA:1,4\\nDA:2,0\\nDA:3,1\\nend_of_record\\n\
    SF:%s/tests/primes.rs\\nDA:1,1\\nend_of_record\\n";

fn coverage_blueprint(exit: i32) -> PipelineBlueprint {
    let mut blueprint = PipelineBlueprint::default();
    let script = format!(
        r#"printf '{LCOV_TEMPLATE}' "$(pwd -P)" "$(pwd -P)" > "$1"; exit {exit}"#
    );
    blueprint.tools.coverage = sh(&script, &["{lcov}"]);
    blueprint
}

#[tokio::test]
async fn test_coverage_is_scoped_to_sources() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "pieces/primes.rs", "");
    write(root, "tests/primes.rs", "");

    let blueprint = coverage_blueprint(0);
    let report_path = root.join(&blueprint.coverage.report_path);
    let report = run(blueprint, root, Target::Coverage).await;

    assert_eq!(report.exit_code(), 0);
    let coverage = report.coverage.expect("scoped coverage");
    assert_eq!(coverage.files.len(), 1);
    assert!(coverage.files[0].path.ends_with("pieces/primes.rs"));
    assert_eq!(coverage.excluded_files, 1);
    assert_eq!((coverage.lines_hit(), coverage.lines_found()), (2, 3));

    let scoped = read(&report_path);
    assert!(scoped.contains("pieces/primes.rs"));
    assert!(!scoped.contains("tests/primes.rs"));
}

#[tokio::test]
async fn test_coverage_fails_with_tests() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "pieces/primes.rs", "");

    let report = run(coverage_blueprint(1), root, Target::Coverage).await;
    assert_eq!(
        report.outcome(),
        Outcome::Failed {
            kind: FailureKind::Verification,
            exit_code: 1
        }
    );
    assert!(report.coverage.is_none());
}

#[tokio::test]
async fn test_clean_exit_status_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    for code in [0, 1, 2] {
        let mut blueprint = PipelineBlueprint::default();
        blueprint.tools.docs_clean = sh(&format!("exit {code}"), &[]);
        let report = run(blueprint, root, Target::Clean).await;
        assert_eq!(report.exit_code(), code);
    }

    let mut blueprint = PipelineBlueprint::default();
    blueprint.tools.docs_clean = sh("exit 1", &[]);
    let report = run(blueprint, root, Target::Clean).await;
    assert_eq!(
        report.outcome(),
        Outcome::Failed {
            kind: FailureKind::Delegation,
            exit_code: 1
        }
    );
}

#[tokio::test]
async fn test_clean_runs_in_docs_dir() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let built = write(root, "docs/_build/index.html", "<html/>");

    let mut blueprint = PipelineBlueprint::default();
    let mut clean = sh("rm -rf _build", &[]);
    clean.working_dir = Some(PathBuf::from("docs"));
    blueprint.tools.docs_clean = clean;

    let report = run(blueprint, root, Target::Clean).await;
    assert_eq!(report.exit_code(), 0);
    assert!(!built.exists());
}

#[tokio::test]
async fn test_config_file_drives_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let file = write(root, "lib/x.py", "b\na\n");
    let config = write(
        root,
        "verify.toml",
        r#"
[layout]
source_dir = "lib"
tests_dir = "spec"
extensions = ["py"]

[tools.import_sort]
program = "sort"
args = ["-o", "{file}", "{file}"]

[tools.formatter]
program = "true"
args = ["{file}"]
"#,
    );

    let blueprint = config_loader::ConfigLoader::load_from_path(&config).unwrap();
    let report = run(blueprint, root, Target::Format).await;
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.steps[0].invocations, 1);
    assert_eq!(read(&file), "a\nb\n");
}

#[tokio::test]
async fn test_missing_tool_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut blueprint = PipelineBlueprint::default();
    blueprint.tools.docs_clean = ToolSpec::new("pieces-no-such-tool", Vec::<String>::new());

    let err = VerificationPipeline::new(blueprint, dir.path(), ProcessRunner::new())
        .clean()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("pieces-no-such-tool"));
}
