use std::collections::BTreeSet;

use touchlint_types::Offense;

/// Keep the offenses reported on a changed line, in their original order.
pub fn filter_offenses(offenses: Vec<Offense>, changed_lines: &BTreeSet<u32>) -> Vec<Offense> {
    offenses
        .into_iter()
        .filter(|o| changed_lines.contains(&o.location.line))
        .collect()
}
