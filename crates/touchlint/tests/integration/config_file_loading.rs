//! Config file discovery, precedence and failure modes.

use super::test_repo::{RunResult, TestRepo};

fn repo_with_new_eval() -> TestRepo {
    let repo = TestRepo::new();
    repo.write_file("app/assets/new.js", "eval(x);\n");
    repo.commit("add eval");
    repo
}

/// Scenario: excluded paths are never linted.
///
/// Given: touchlint.toml excluding vendor/**
/// When: a commit adds an offending file under vendor/
/// Then: the run passes
#[test]
fn given_exclude_glob_when_vendor_file_offends_then_all_ok() {
    let repo = TestRepo::new();
    repo.write_config("exclude = [\"vendor/**\"]\n");
    repo.write_file("vendor/lib.js", "eval(x);\n");
    repo.write_file("app/assets/ok.js", "var a = 1;\nuse(a);\n");
    repo.commit("vendor a library");

    repo.check(&[]).assert_all_ok();
}

/// Scenario: the base ref can come from the config file.
#[test]
fn given_config_base_when_no_flag_then_config_base_used() {
    let repo = repo_with_new_eval();
    repo.write_config(&format!("[defaults]\nbase = \"{}\"\n", repo.base_sha));

    repo.run(&["check"])
        .assert_exit_code(1)
        .assert_stdout_contains("app/assets/new.js:1:1: E: EvalUsage:");
}

/// Scenario: TOUCHLINT_BASE beats the config file.
#[test]
fn given_env_base_when_config_base_is_bogus_then_env_base_used() {
    let repo = repo_with_new_eval();
    repo.write_config("[defaults]\nbase = \"no-such-ref\"\n");

    let mut cmd = repo.touchlint();
    cmd.env("TOUCHLINT_BASE", &repo.base_sha).arg("check");
    RunResult::from_command(cmd)
        .assert_exit_code(1)
        .assert_stdout_contains("EvalUsage");
}

/// Scenario: --base beats TOUCHLINT_BASE.
#[test]
fn given_flag_and_env_base_when_check_then_flag_wins() {
    let repo = repo_with_new_eval();

    let mut cmd = repo.touchlint();
    cmd.env("TOUCHLINT_BASE", "no-such-ref")
        .args(["check", "--base"])
        .arg(&repo.base_sha);
    RunResult::from_command(cmd)
        .assert_exit_code(1)
        .assert_stdout_contains("EvalUsage");
}

/// Scenario: environment references in the config are expanded.
#[test]
fn given_env_reference_in_config_when_check_then_expanded() {
    let repo = repo_with_new_eval();
    repo.write_config("[defaults]\nbase = \"${LINT_BASE:-no-such-ref}\"\n");

    let mut cmd = repo.touchlint();
    cmd.env("LINT_BASE", &repo.base_sha).arg("check");
    RunResult::from_command(cmd)
        .assert_exit_code(1)
        .assert_stdout_contains("EvalUsage");
}

/// Scenario: the config can switch the report to JSON.
#[test]
fn given_json_format_in_config_when_check_then_json_report() {
    let repo = repo_with_new_eval();
    repo.write_config("[defaults]\nformat = \"json\"\n");

    let result = repo.check(&[]);
    result.assert_exit_code(1).assert_stdout_lacks("[START]");

    let report = result.json();
    assert_eq!(report["summary"]["files_checked"], 1);
    assert_eq!(report["summary"]["files_failed"], 1);
    assert_eq!(report["summary"]["offenses"], 1);
    assert_eq!(report["files"][0]["path"], "app/assets/new.js");
    assert_eq!(report["files"][0]["offenses"][0]["cop_name"], "EvalUsage");
    assert_eq!(report["files"][0]["offenses"][0]["location"]["line"], 1);
}

/// Scenario: --format overrides the config file.
#[test]
fn given_json_in_config_when_text_flag_then_text_report() {
    let repo = repo_with_new_eval();
    repo.write_config("[defaults]\nformat = \"json\"\n");

    let result = repo.check(&["--format", "text"]);
    assert!(result.stdout.starts_with("[START] "), "{}", result.stdout);
}

/// Scenario: an explicit --config path is used over ./touchlint.toml.
#[test]
fn given_explicit_config_when_check_then_default_file_ignored() {
    let repo = repo_with_new_eval();
    repo.write_config("[defaults]\nformat = \"json\"\n");
    repo.write_file("ci/lint.toml", "exclude = [\"app/**\"]\n");

    repo.check(&["--config", "ci/lint.toml"]).assert_all_ok();
}

/// Scenario: a broken exclude glob is a configuration error.
#[test]
fn given_invalid_glob_when_check_then_exit_2() {
    let repo = repo_with_new_eval();
    repo.write_config("exclude = [\"vendor/[\"]\n");

    repo.check(&[])
        .assert_exit_code(2)
        .assert_stderr_contains("invalid exclude glob");
}

/// Scenario: a missing explicit config is a configuration error.
#[test]
fn given_missing_config_path_when_check_then_exit_2() {
    let repo = repo_with_new_eval();

    repo.check(&["--config", "nope.toml"])
        .assert_exit_code(2)
        .assert_stderr_contains("read config");
}

/// Scenario: an unset variable without a default is a configuration error.
#[test]
fn given_unset_variable_in_config_when_check_then_exit_2() {
    let repo = repo_with_new_eval();
    repo.write_config("[defaults]\nbase = \"${TOUCHLINT_TEST_UNSET_VARIABLE}\"\n");

    repo.check(&[])
        .assert_exit_code(2)
        .assert_stderr_contains("TOUCHLINT_TEST_UNSET_VARIABLE");
}

/// Scenario: unparsable TOML is a configuration error.
#[test]
fn given_malformed_toml_when_check_then_exit_2() {
    let repo = repo_with_new_eval();
    repo.write_config("exclude = [\n");

    repo.check(&[])
        .assert_exit_code(2)
        .assert_stderr_contains("parse config");
}
