//! Modified files are only checked on the lines the change touched.

use touchlint_testkit::sample_sources;

use super::test_repo::TestRepo;

/// Scenario: an offense on an added line is reported, an old one is not.
///
/// Given: a JavaScript file with a console statement on line 2
/// When: a commit appends an eval call
/// Then: only the eval on line 3 is reported and the run fails
#[test]
fn given_old_offense_when_new_line_offends_then_only_new_line_reported() {
    let repo = TestRepo::with_initial_content(&[(
        "app/assets/site.js",
        "var total = 0;\nconsole.log(total);\n",
    )]);

    repo.write_file(
        "app/assets/site.js",
        "var total = 0;\nconsole.log(total);\neval(code);\n",
    );
    repo.commit("add eval");

    let result = repo.check(&[]);
    result
        .assert_exit_code(1)
        .assert_stdout_contains("app/assets/site.js:3:1: E: EvalUsage: eval() is dangerous")
        .assert_stdout_contains("eval(code);")
        .assert_stdout_lacks("ConsoleStatements")
        .assert_stdout_lacks("All OK");
    assert_eq!(result.offense_lines().len(), 1, "{}", result.stdout);
}

/// Scenario: a clean edit in a file that already has offenses passes.
///
/// Given: a file with a console statement on line 1
/// When: a commit rewrites line 3 cleanly
/// Then: exit 0 with the all-clear line
#[test]
fn given_old_offense_when_clean_edit_then_all_ok() {
    let repo = TestRepo::with_initial_content(&[(
        "app/assets/site.js",
        "console.log(1);\nvar a = 1;\nuse(a);\n",
    )]);

    repo.write_file("app/assets/site.js", "console.log(1);\nvar a = 1;\nuse(a, 2);\n");
    repo.commit("tweak call");

    let result = repo.check(&[]);
    result.assert_all_ok();
    assert!(result.stdout.starts_with("[START] "), "{}", result.stdout);
    assert!(result.offense_lines().is_empty());
}

/// Scenario: a new file is linted in full.
///
/// Given: a clean baseline
/// When: a commit adds a JavaScript file with four offending lines
/// Then: all four are reported, in line order
#[test]
fn given_new_file_when_check_then_every_line_is_checked() {
    let repo = TestRepo::new();

    repo.write_file("app/assets/new.js", sample_sources::offending_js());
    repo.commit("add new.js");

    let result = repo.check(&[]);
    result.assert_exit_code(1);
    assert_eq!(
        result.offense_lines(),
        vec![
            "app/assets/new.js:1:1: E: ConstLet: const/let (ES6) are not allowed. Use var instead.",
            "app/assets/new.js:2:1: W: ConsoleStatements: Console statements should not be left in production code. Remove or use proper logging.",
            "app/assets/new.js:3:1: W: LooseEquality: Use strict equality (===) instead of loose equality (==) to avoid type coercion issues.",
            "app/assets/new.js:4:1: E: EvalUsage: eval() is dangerous and should not be used. Use safer alternatives.",
        ]
    );
}

/// Scenario: a deleted file is never linted.
///
/// Given: a baseline with an offending file
/// When: a commit deletes it
/// Then: exit 0
#[test]
fn given_deleted_file_when_check_then_all_ok() {
    let repo = TestRepo::with_initial_content(&[
        ("app/assets/old.js", "eval(x);\n"),
        ("app/assets/keep.js", "var a = 1;\nuse(a);\n"),
    ]);

    repo.git(&["rm", "--quiet", "app/assets/old.js"]);
    repo.commit("drop old.js");

    repo.check(&[]).assert_all_ok();
}

/// Scenario: a base ref git cannot resolve yields an empty change set.
///
/// Given: a repository with an offending commit
/// When: check runs against a ref that does not exist
/// Then: git's failure is logged and the run passes with nothing to check
#[test]
fn given_unknown_base_when_check_then_warns_and_passes() {
    let repo = TestRepo::new();
    repo.write_file("app/assets/new.js", "eval(x);\n");
    repo.commit("add eval");

    let result = repo.run(&["check", "--base", "no-such-ref"]);
    result
        .assert_all_ok()
        .assert_stderr_contains("no-such-ref...HEAD");
}
