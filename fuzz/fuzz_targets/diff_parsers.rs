#![no_main]

use libfuzzer_sys::fuzz_target;

use touchlint_diff::{changed_line_sets, parse_name_status};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let _ = changed_line_sets(&s);
    let _ = parse_name_status(&s);
});
