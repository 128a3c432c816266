//! Both engines on arbitrary content: a filtered scan never leaves its
//! line set and a full scan never panics.

#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;

use touchlint_domain::{Linter, builtin_linters};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let content = String::from_utf8_lossy(rest);
    let lines: BTreeSet<u32> = (0..8u32).map(|i| 1 + (u32::from(selector) >> i)).collect();

    for linter in builtin_linters() {
        let _ = linter.lint_full(&content);
        let filtered = linter.lint_filtered(&content, &lines);
        assert!(filtered.iter().all(|o| lines.contains(&o.location.line)));
    }
});
