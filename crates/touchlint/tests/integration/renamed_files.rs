//! Renames without content changes carry no changed lines.

use super::test_repo::TestRepo;

/// Scenario: a pure rename of an offending file is skipped.
///
/// Given: a JavaScript file with an eval call
/// When: a commit only moves it
/// Then: nothing is reported and the run passes
#[test]
fn given_pure_rename_when_check_then_file_is_skipped() {
    let repo = TestRepo::with_initial_content(&[("app/assets/old.js", "eval(x);\n")]);

    repo.git(&["mv", "app/assets/old.js", "app/assets/moved.js"]);
    repo.commit("move file");

    let result = repo.check(&[]);
    result.assert_all_ok().assert_stdout_lacks("moved.js");
}

/// Scenario: a rename with an edit is checked on the edited lines of the
/// new path.
///
/// Given: a multi-line file with an eval call on line 1
/// When: a commit moves it and appends a console statement
/// Then: only the console statement is reported, under the new path
#[test]
fn given_rename_with_edit_when_check_then_edited_lines_reported() {
    let original = "eval(x);\nvar a = 1;\nvar b = 2;\nvar c = 3;\nuse(a, b, c);\n";
    let repo = TestRepo::with_initial_content(&[("app/assets/old.js", original)]);

    repo.git(&["mv", "app/assets/old.js", "app/assets/moved.js"]);
    repo.write_file(
        "app/assets/moved.js",
        &format!("{original}console.log(a);\n"),
    );
    repo.commit("move and log");

    let result = repo.check(&[]);
    result.assert_exit_code(1);
    assert_eq!(
        result.offense_lines(),
        vec![
            "app/assets/moved.js:6:1: W: ConsoleStatements: Console statements should not be left in production code. Remove or use proper logging."
        ]
    );
}
