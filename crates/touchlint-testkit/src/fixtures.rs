//! Common test fixtures for touchlint.
//!
//! Sample sources and sample `git diff` outputs shared by tests across
//! the workspace.

// =============================================================================
// Sample Sources
// =============================================================================

/// Source files with known offenses.
pub mod sample_sources {
    /// ES5 JavaScript that produces no offenses.
    pub fn clean_js() -> &'static str {
        "var total = 0;\n\
         function add(value) {\n\
         \x20 total = total + value;\n\
         \x20 return total;\n\
         }\n\
         add(1);\n"
    }

    /// JavaScript with one offense per line 1..=4.
    ///
    /// 1. `ConstLet`
    /// 2. `ConsoleStatements`
    /// 3. `LooseEquality`
    /// 4. `EvalUsage`
    pub fn offending_js() -> &'static str {
        "const limit = 10;\n\
         console.log(limit);\n\
         if (limit == 10) {\n\
         eval(code);\n\
         }\n"
    }

    /// `x` declared twice: line 1 lacks a semicolon, line 2 is never used.
    pub fn redeclared_var() -> &'static str {
        "var x = 1\nvar x = 2;\n"
    }

    /// JavaScript whose last line lacks a terminator.
    pub fn js_without_final_newline() -> &'static str {
        "var a = 1;\nuse(a);"
    }

    /// ERB with one offense per line 1..=4.
    ///
    /// 1. `BadCommentFormat`
    /// 2. `BadSpacing`
    /// 3. `BadOutputSpacing`
    /// 4. `BadCommentSpacing`
    pub fn offending_erb() -> &'static str {
        "<% # legacy comment %>\n\
         <%if admin? %>\n\
         <p><%=user.name %></p>\n\
         <%#todo %>\n\
         <% end %>\n"
    }

    /// ERB that produces no offenses.
    pub fn clean_erb() -> &'static str {
        "<%# header %>\n<% if admin? %>\n  <p><%= user.name %></p>\n<% end %>\n"
    }
}

// =============================================================================
// Sample Diffs
// =============================================================================

/// Sample `git diff` outputs as touchlint requests them.
pub mod sample_diffs {
    /// `--name-status` covering every code the resolver distinguishes.
    pub fn name_status_mixed() -> &'static str {
        "A\tapp/models/user.rb\n\
         M\tapp/assets/site.js\n\
         R100\tapp/views/old.html.erb\tapp/views/new.html.erb\n\
         D\tapp/assets/gone.js\n\
         \n"
    }

    /// `--unified=0` for a single modified JavaScript file with two hunks.
    pub fn single_file_two_hunks() -> &'static str {
        "diff --git a/app/assets/site.js b/app/assets/site.js\n\
         index 1111111..2222222 100644\n\
         --- a/app/assets/site.js\n\
         +++ b/app/assets/site.js\n\
         @@ -3 +3 @@\n\
         -var a = 1;\n\
         +var a = 2;\n\
         @@ -10,0 +11,2 @@\n\
         +foo();\n\
         +bar();\n"
    }

    /// A hunk that only removes lines.
    pub fn pure_deletion() -> &'static str {
        "diff --git a/app/views/show.html.erb b/app/views/show.html.erb\n\
         index 1111111..2222222 100644\n\
         --- a/app/views/show.html.erb\n\
         +++ b/app/views/show.html.erb\n\
         @@ -4,2 +3,0 @@\n\
         -<p>gone</p>\n\
         -<p>gone</p>\n"
    }

    /// A hunk header whose new-side numbers do not fit in `u32`.
    pub fn malformed_hunk() -> &'static str {
        "diff --git a/lib/task.rb b/lib/task.rb\n\
         --- a/lib/task.rb\n\
         +++ b/lib/task.rb\n\
         @@ -1 +99999999999,2 @@\n\
         +puts 1\n\
         @@ -5 +5 @@\n\
         +puts 2\n"
    }
}
