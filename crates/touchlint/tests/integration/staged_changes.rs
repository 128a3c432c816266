//! `--staged` diffs the index against HEAD.

use super::test_repo::TestRepo;

const BASELINE: &str = "var a = 1;\nuse(a);\n";

/// Scenario: a staged offending line is reported.
///
/// Given: a committed clean file
/// When: an eval call is appended and staged
/// Then: check --staged reports it
#[test]
fn given_staged_offense_when_check_staged_then_reported() {
    let repo = TestRepo::with_initial_content(&[("app/assets/site.js", BASELINE)]);

    repo.write_file("app/assets/site.js", &format!("{BASELINE}eval(a);\n"));
    repo.stage();

    let result = repo.run(&["check", "--staged"]);
    result
        .assert_exit_code(1)
        .assert_stdout_contains("app/assets/site.js:3:1: E: EvalUsage:");
}

/// Scenario: unstaged edits are invisible to a staged check.
///
/// Given: a committed clean file
/// When: an eval call is appended but not staged
/// Then: check --staged passes
#[test]
fn given_unstaged_offense_when_check_staged_then_all_ok() {
    let repo = TestRepo::with_initial_content(&[("app/assets/site.js", BASELINE)]);

    repo.write_file("app/assets/site.js", &format!("{BASELINE}eval(a);\n"));

    repo.run(&["check", "--staged"]).assert_all_ok();
}

/// Scenario: a staged new file is linted in full.
#[test]
fn given_staged_new_file_when_check_staged_then_linted_in_full() {
    let repo = TestRepo::new();

    repo.write_file("app/assets/fresh.js", "let a = 1;\nuse(a)\n");
    repo.stage();

    let result = repo.run(&["check", "--staged"]);
    result.assert_exit_code(1);
    assert_eq!(
        result.offense_lines(),
        vec![
            "app/assets/fresh.js:1:1: E: ConstLet: const/let (ES6) are not allowed. Use var instead.",
            "app/assets/fresh.js:2:1: W: MissingSemicolon: Missing semicolon at end of statement. Add semicolon for consistency.",
        ]
    );
}
