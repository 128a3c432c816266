//! JavaScript and ERB changes in one run.

use touchlint_testkit::sample_sources;

use super::test_repo::TestRepo;

/// Scenario: a new ERB template is linted in full.
#[test]
fn given_new_erb_template_when_check_then_tag_offenses_reported() {
    let repo = TestRepo::new();
    repo.write_file("app/views/show.html.erb", sample_sources::offending_erb());
    repo.commit("add template");

    let result = repo.check(&[]);
    result.assert_exit_code(1);
    assert_eq!(
        result.offense_lines(),
        vec![
            "app/views/show.html.erb:1:1: E: BadCommentFormat: Use <%# comment %> instead of <% # comment %> for ERB comments",
            "app/views/show.html.erb:2:1: W: BadSpacing: <% your_code %> for better readability",
            "app/views/show.html.erb:3:1: W: BadOutputSpacing: <%= your_code %> for better readability",
            "app/views/show.html.erb:4:1: W: BadCommentSpacing: <%# your_comment %> for better readability",
        ]
    );
}

/// Scenario: files are reported in git's order, unsupported files ignored.
///
/// Given: a commit touching a template, a script and a stylesheet
/// When: check runs with the JSON report
/// Then: only the template and script appear, template first
#[test]
fn given_mixed_commit_when_json_check_then_supported_files_reported() {
    let repo = TestRepo::new();
    repo.write_file("app/views/index.html.erb", "<%=title %>\n");
    repo.write_file("app/views/site.js", "var a = 1;\nuse(a);\n");
    repo.write_file("app/views/site.css", "body { color: red }  \n");
    repo.commit("mixed");

    let result = repo.check(&["--format", "json"]);
    result.assert_exit_code(1);

    let report = result.json();
    let files = report["files"].as_array().expect("files array");
    let paths: Vec<_> = files.iter().map(|f| f["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["app/views/index.html.erb", "app/views/site.js"]);
    assert_eq!(files[0]["offenses"][0]["cop_name"], "BadOutputSpacing");
    assert_eq!(files[1]["offenses"].as_array().unwrap().len(), 0);
    assert_eq!(report["summary"]["files_checked"], 2);
    assert_eq!(report["summary"]["files_failed"], 1);
}

/// Scenario: the rule listing names every table in precedence order.
#[test]
fn given_rules_command_then_tables_listed() {
    let repo = TestRepo::new();

    let text = repo.run(&["rules"]);
    text.assert_exit_code(0)
        .assert_stdout_contains("javascript/es6_syntax\n")
        .assert_stdout_contains("javascript/code_quality\n")
        .assert_stdout_contains("erb/erb_conventions\n");

    let json = repo.run(&["rules", "--format", "json"]);
    json.assert_exit_code(0);
    let tables = json.json();
    let tables = tables.as_array().expect("array of tables");
    assert_eq!(tables.len(), 3);
    assert_eq!(tables[2]["category"], "erb");
    assert_eq!(tables[2]["rules"][0]["severity"], "error");
}
