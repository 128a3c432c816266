use std::sync::LazyLock;

use touchlint_types::{Category, Severity};

use crate::engine::Linter;
use crate::rules::{Rule, RuleTable};

static ERB_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::regex(
            "bad_comment_format",
            "BadCommentFormat",
            Severity::Error,
            r"<%\s+#[^%]*%>",
            "Use <%# comment %> instead of <% # comment %> for ERB comments",
        ),
        // `<%` followed by code with no separating space (`=` and `#` open
        // other tag kinds).
        Rule::regex(
            "bad_spacing",
            "BadSpacing",
            Severity::Warning,
            r"<%[^\s#=][^%]*%>",
            "<% your_code %> for better readability",
        ),
        Rule::regex(
            "bad_output_spacing",
            "BadOutputSpacing",
            Severity::Warning,
            r"<%=\S[^%]*%>",
            "<%= your_code %> for better readability",
        ),
        Rule::regex(
            "bad_comment_spacing",
            "BadCommentSpacing",
            Severity::Warning,
            r"<%#\S[^%]*%>",
            "<%# your_comment %> for better readability",
        ),
    ]
});

static TABLES: LazyLock<[RuleTable; 1]> = LazyLock::new(|| {
    [RuleTable {
        name: "erb_conventions",
        rules: ERB_RULES.as_slice(),
    }]
});

/// Tag-spacing checks for ERB templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErbLinter;

impl Linter for ErbLinter {
    fn category(&self) -> Category {
        Category::Erb
    }

    fn tables(&self) -> &[RuleTable] {
        TABLES.as_slice()
    }
}
