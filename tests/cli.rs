use std::error::Error;
use std::fs;

use clap::Parser;

use stalecheck::cli::CliArgs;
use stalecheck::{run_with, RunOutcome};
use stalecheck_test_utils::builders::FileTree;

type TestResult = Result<(), Box<dyn Error>>;

fn run_args(args: &[&str]) -> anyhow::Result<(RunOutcome, String)> {
    let args = CliArgs::try_parse_from(std::iter::once("stalecheck").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    let outcome = run_with(args, &mut out)?;
    Ok((outcome, String::from_utf8(out)?))
}

fn report_tree() -> FileTree {
    let tree = FileTree::new();
    tree.file("in/a.csv", 100);
    tree.file("in/b.csv", 200);
    tree.file("out/result.csv", 150);
    tree
}

#[test]
fn files_and_times_print_one_line_per_match() -> TestResult {
    let tree = report_tree();
    let globs = tree.glob("in/*.csv");

    let (outcome, out) = run_args(&["files", globs.as_str()])?;
    assert_eq!(outcome, RunOutcome::Success);
    let expected = format!(
        "{}\n{}\n",
        tree.path("in/a.csv").display(),
        tree.path("in/b.csv").display()
    );
    assert_eq!(out, expected);

    let (_, out) = run_args(&["times", globs.as_str()])?;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("100.000000\t"));
    assert!(lines[1].starts_with("200.000000\t"));
    Ok(())
}

#[test]
fn outdated_reports_and_sets_outcome() -> TestResult {
    let tree = report_tree();
    let (inputs, outputs) = (tree.glob("in/*.csv"), tree.glob("out/*.csv"));

    let (outcome, out) = run_args(&["outdated", inputs.as_str(), outputs.as_str()])?;
    assert_eq!((outcome, out.as_str()), (RunOutcome::Stale, "true\n"));

    tree.touch("out/result.csv", 250);
    let (outcome, out) = run_args(&["outdated", inputs.as_str(), outputs.as_str()])?;
    assert_eq!((outcome, out.as_str()), (RunOutcome::Success, "false\n"));
    Ok(())
}

#[test]
fn delete_dry_run_leaves_files_in_place() -> TestResult {
    let tree = report_tree();
    let globs = tree.glob("in/*.csv");

    let (_, out) = run_args(&["delete", "--dry-run", globs.as_str()])?;
    assert_eq!(out.lines().count(), 2);
    assert!(out.starts_with("would remove "));
    assert!(tree.path("in/a.csv").exists());

    let (_, out) = run_args(&["delete", globs.as_str()])?;
    assert!(out.is_empty());
    assert!(!tree.path("in/a.csv").exists());
    assert!(!tree.path("in/b.csv").exists());
    Ok(())
}

#[test]
fn relative_glob_is_an_error() {
    let err = run_args(&["files", "relative/*.txt"]).unwrap_err();
    assert!(format!("{err:#}").contains("not an absolute path"));
}

fn write_rules(tree: &FileTree) -> String {
    let contents = format!(
        r#"
[rule.report]
description = "weekly report"
inputs = "{inputs}"
outputs = ["{outputs}"]

[rule.orphan]
inputs = "{inputs}"
outputs = "{missing}"
"#,
        inputs = tree.glob("in/*.csv"),
        outputs = tree.glob("out/*.csv"),
        missing = tree.glob("nothing/*"),
    );
    let path = tree.path("Stalecheck.toml");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn check_evaluates_selected_rules() -> TestResult {
    let tree = report_tree();
    let config = write_rules(&tree);

    let (outcome, out) = run_args(&["check", "--config", config.as_str(), "report"])?;
    assert_eq!(outcome, RunOutcome::Stale);
    assert!(out.starts_with("report: outdated (newest input 200.000000 > oldest output 150.000000)"));
    assert!(out.contains("# weekly report"));

    tree.touch("out/result.csv", 250);
    let (outcome, out) = run_args(&["check", "--config", config.as_str(), "report"])?;
    assert_eq!(outcome, RunOutcome::Success);
    assert!(out.starts_with("report: up to date"));

    // Without names every rule runs; `orphan` has inputs but no outputs.
    let (outcome, out) = run_args(&["check", "--config", config.as_str()])?;
    assert_eq!(outcome, RunOutcome::Stale);
    assert!(out.contains("orphan: outdated (no outputs)"));
    Ok(())
}

#[test]
fn check_rejects_unknown_rules() -> TestResult {
    let tree = report_tree();
    let config = write_rules(&tree);

    let err = run_args(&["check", "--config", config.as_str(), "nope"]).unwrap_err();
    assert!(format!("{err:#}").contains("unknown rule 'nope'"));
    Ok(())
}

#[test]
fn clean_removes_rule_outputs_only() -> TestResult {
    let tree = report_tree();
    let config = write_rules(&tree);

    let (_, out) = run_args(&["clean", "--config", config.as_str(), "--dry-run", "report"])?;
    assert_eq!(
        out,
        format!("would remove {}\n", tree.path("out/result.csv").display())
    );
    assert!(tree.path("out/result.csv").exists());

    run_args(&["clean", "--config", config.as_str(), "report"])?;
    assert!(!tree.path("out/result.csv").exists());
    assert!(tree.path("in/a.csv").exists());
    Ok(())
}
