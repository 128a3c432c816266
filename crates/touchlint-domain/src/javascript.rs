//! ES5-only JavaScript checks.
//!
//! Two tables run in order: ES6+ syntax, which is always an error, then
//! general code quality. Comment lines are never matched against either.

use std::sync::LazyLock;

use regex::Regex;

use touchlint_types::{Category, Severity};

use crate::engine::Linter;
use crate::rules::{Rule, RuleTable, contains_word, is_blank, starts_with_word};

const MAX_LINE_CHARS: usize = 120;

const CONTROL_KEYWORDS: [&str; 8] = [
    "if", "else", "for", "while", "switch", "try", "catch", "finally",
];
const DECLARATION_KEYWORDS: [&str; 2] = ["function", "class"];
const JUMP_KEYWORDS: [&str; 4] = ["return", "break", "continue", "throw"];
const NOT_METHOD_NAMES: [&str; 5] = ["if", "for", "while", "switch", "catch"];

static VAR_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bvar\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=").expect("var regex should compile")
});

static DEFAULT_PARAMS_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:async\s+)?function\b[^(]*\([^)]*=[^)]*\)")
        .expect("function default params regex should compile")
});

static DEFAULT_PARAMS_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:async\s*)?\([^)]*=[^)]*\)\s*=>")
        .expect("arrow default params regex should compile")
});

static DEFAULT_PARAMS_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\{|;)\s*(?:async\s+)?(get|set\s+)?([A-Za-z_$][\w$]*)\s*\([^)]*=[^)]*\)\s*\{")
        .expect("method default params regex should compile")
});

static ES6_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::regex(
            "arrow_functions",
            "ArrowFunctions",
            Severity::Error,
            r"=>",
            "Arrow functions (ES6) are not allowed. Use function() syntax instead.",
        ),
        Rule::regex(
            "const_let",
            "ConstLet",
            Severity::Error,
            r"\b(const|let)\b",
            "const/let (ES6) are not allowed. Use var instead.",
        ),
        Rule::regex(
            "template_literals",
            "TemplateLiterals",
            Severity::Error,
            r"`[^`]*\$\{[^}]*\}[^`]*`",
            "Template literals (ES6) are not allowed. Use string concatenation instead.",
        ),
        Rule::regex(
            "destructuring",
            "Destructuring",
            Severity::Error,
            r"\{[^}]*\s*=\s*[^}]*\}",
            "Destructuring assignment (ES6) is not allowed.",
        ),
        Rule::regex(
            "spread_operator",
            "SpreadOperator",
            Severity::Error,
            r"\.\.\.",
            "Spread operator (ES6) is not allowed.",
        ),
        Rule::regex(
            "classes",
            "Classes",
            Severity::Error,
            r"\bclass\s+\w+",
            "ES6 classes are not allowed. Use function constructors instead.",
        ),
        Rule::regex(
            "modules",
            "Modules",
            Severity::Error,
            r"\b(import|export)\b",
            "ES6 modules (import/export) are not allowed. Use traditional script loading.",
        ),
        Rule::custom(
            "default_parameters",
            "DefaultParameters",
            Severity::Error,
            "`=` inside the parameter list of a function, arrow function or method",
            has_default_parameters,
            "Default parameters (ES6) are not allowed.",
        ),
        Rule::regex(
            "rest_parameters",
            "RestParameters",
            Severity::Error,
            r"\.\.\.\w+",
            "Rest parameters (ES6) are not allowed.",
        ),
    ]
});

static QUALITY_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::custom(
            "multiple_empty_lines",
            "MultipleEmptyLines",
            Severity::Warning,
            "blank line directly after another blank line",
            follows_blank_line,
            "Multiple consecutive empty lines found. Use maximum 1 empty lines.",
        )
        .on_blank_lines(),
        Rule::custom(
            "line_too_long",
            "LineTooLong",
            Severity::Warning,
            "more than 120 characters",
            is_too_long,
            "Line is too long (over 120 characters). Consider breaking it into multiple lines.",
        ),
        Rule::regex(
            "console_statements",
            "ConsoleStatements",
            Severity::Warning,
            r"\bconsole\.(log|debug|info|warn|error)\s*\(",
            "Console statements should not be left in production code. Remove or use proper logging.",
        ),
        Rule::regex(
            "no_inline_comment",
            "InlineComment",
            Severity::Warning,
            r"[^\s].*//.+",
            "Avoid inline comments at the end of code lines.",
        ),
        Rule::regex(
            "eval_usage",
            "EvalUsage",
            Severity::Error,
            r"\beval\s*\(",
            "eval() is dangerous and should not be used. Use safer alternatives.",
        ),
        Rule::regex(
            "with_statement",
            "WithStatement",
            Severity::Error,
            r"\bwith\s*\(",
            "with statement is deprecated and can cause scope confusion. Avoid using it.",
        ),
        Rule::regex(
            "document_write",
            "DocumentWrite",
            Severity::Warning,
            r"\bdocument\.write\s*\(",
            "document.write() can cause performance issues and security risks. Use DOM manipulation instead.",
        ),
        Rule::custom(
            "loose_equality",
            "LooseEquality",
            Severity::Warning,
            "`==` not followed by null or undefined",
            |lines, i| has_loose_operator(lines[i], "=="),
            "Use strict equality (===) instead of loose equality (==) to avoid type coercion issues.",
        )
        .suppressed_by(|lines, i| lines[i].contains("===") || lines[i].contains("!==")),
        Rule::custom(
            "loose_inequality",
            "LooseInequality",
            Severity::Warning,
            "`!=` not followed by null or undefined",
            |lines, i| has_loose_operator(lines[i], "!="),
            "Use strict inequality (!==) instead of loose inequality (!=) to avoid type coercion issues.",
        )
        .suppressed_by(|lines, i| lines[i].contains("!==")),
        Rule::regex(
            "unused_variables",
            "UnusedVariables",
            Severity::Warning,
            r"\bvar\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=",
            "Variable is declared but may not be used. Consider removing if unused.",
        )
        .suppressed_by(is_used_later),
        Rule::regex(
            "missing_semicolon",
            "MissingSemicolon",
            Severity::Warning,
            r"[^;{}]\s*$",
            "Missing semicolon at end of statement. Add semicolon for consistency.",
        )
        .suppressed_by(needs_no_semicolon),
        Rule::regex(
            "innerhtml_usage",
            "InnerhtmlUsage",
            Severity::Warning,
            r"\.innerHTML\s*=",
            "innerHTML can cause XSS vulnerabilities. Use textContent or proper sanitization.",
        ),
        Rule::regex(
            "global_variables",
            "GlobalVariables",
            Severity::Warning,
            r"^[a-zA-Z_$][a-zA-Z0-9_$]*\s*=",
            "Global variable declaration detected. Consider using var to avoid global scope pollution.",
        ),
    ]
});

static TABLES: LazyLock<[RuleTable; 2]> = LazyLock::new(|| {
    [
        RuleTable {
            name: "es6_syntax",
            rules: ES6_RULES.as_slice(),
        },
        RuleTable {
            name: "code_quality",
            rules: QUALITY_RULES.as_slice(),
        },
    ]
});

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptLinter;

impl Linter for JavaScriptLinter {
    fn category(&self) -> Category {
        Category::JavaScript
    }

    fn tables(&self) -> &[RuleTable] {
        TABLES.as_slice()
    }

    fn skips_line(&self, lines: &[&str], index: usize) -> bool {
        is_comment(lines, index)
    }
}

/// A line is a comment when it opens or closes one, or sits inside a
/// `/* ... */` block.
pub fn is_comment(lines: &[&str], index: usize) -> bool {
    let t = lines[index].trim();
    if t.starts_with("//") || t.starts_with("/*") || t.ends_with("*/") {
        return true;
    }
    in_block_comment(lines, index)
}

fn in_block_comment(lines: &[&str], index: usize) -> bool {
    let mut open = false;
    for (i, line) in lines.iter().enumerate().take(index + 1) {
        let t = line.trim();
        if t.starts_with("/*") {
            open = true;
        }
        if i == index {
            return open;
        }
        if t.ends_with("*/") {
            open = false;
        }
    }
    false
}

fn follows_blank_line(lines: &[&str], index: usize) -> bool {
    index > 0 && is_blank(lines[index]) && is_blank(lines[index - 1])
}

fn is_too_long(lines: &[&str], index: usize) -> bool {
    lines[index].chars().count() > MAX_LINE_CHARS
}

/// `op` somewhere in `line` without optional whitespace and `null` or
/// `undefined` right after it.
fn has_loose_operator(line: &str, op: &str) -> bool {
    let bytes = line.as_bytes();
    let op = op.as_bytes();
    (0..bytes.len().saturating_sub(op.len() - 1))
        .filter(|&i| bytes[i..].starts_with(op))
        .any(|i| {
            let rest = line[i + op.len()..].trim_start_matches(|c: char| c.is_ascii_whitespace());
            !(rest.starts_with("null") || rest.starts_with("undefined"))
        })
}

fn has_default_parameters(lines: &[&str], index: usize) -> bool {
    let line = lines[index];
    DEFAULT_PARAMS_FUNCTION.is_match(line)
        || DEFAULT_PARAMS_ARROW.is_match(line)
        || has_default_method_parameters(line)
}

/// Method shorthand such as `save(force = false) {`, where the method name
/// must not be a statement keyword.
fn has_default_method_parameters(line: &str) -> bool {
    let mut at = 0;
    while at <= line.len() {
        let Some(caps) = DEFAULT_PARAMS_METHOD.captures_at(line, at) else {
            return false;
        };
        let name = &caps[2];
        let accepted = match caps.get(1) {
            // `getif(a = 1) {` is the method `getif`.
            Some(prefix) if prefix.as_str() == "get" => true,
            _ => !is_statement_keyword(name),
        };
        if accepted {
            return true;
        }

        let start = caps.get(0).map_or(at, |m| m.start());
        at = start + line[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

fn is_statement_keyword(name: &str) -> bool {
    NOT_METHOD_NAMES.iter().any(|kw| starts_with_word(name, kw))
}

fn is_used_later(lines: &[&str], index: usize) -> bool {
    let Some(caps) = VAR_DECLARATION.captures(lines[index]) else {
        return false;
    };
    let name = &caps[1];
    lines[index + 1..].iter().any(|l| contains_word(l, name))
}

fn needs_no_semicolon(lines: &[&str], index: usize) -> bool {
    let t = lines[index].trim();

    if t.is_empty() {
        return true;
    }
    if t.ends_with([';', ',', '{', '}', '[', '(']) || t == "]" || t == ")" {
        return true;
    }
    if CONTROL_KEYWORDS
        .iter()
        .chain(&DECLARATION_KEYWORDS)
        .chain(&JUMP_KEYWORDS)
        .any(|kw| starts_with_word(t, kw))
    {
        return true;
    }

    in_object_or_array_literal(lines, index)
}

/// Brace and bracket depth over all lines before `index`.
fn in_object_or_array_literal(lines: &[&str], index: usize) -> bool {
    let mut braces = 0i32;
    let mut brackets = 0i32;
    let mut in_object = false;
    let mut in_array = false;

    for c in lines[..index].iter().flat_map(|l| l.chars()) {
        match c {
            '{' => {
                braces += 1;
                if braces == 1 {
                    in_object = true;
                }
            }
            '}' => {
                braces -= 1;
                if braces == 0 {
                    in_object = false;
                }
            }
            '[' => {
                brackets += 1;
                if brackets == 1 {
                    in_array = true;
                }
            }
            ']' => {
                brackets -= 1;
                if brackets == 0 {
                    in_array = false;
                }
            }
            _ => {}
        }
    }

    in_object || in_array
}
