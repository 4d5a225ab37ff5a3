use std::collections::HashSet;

use tracing::debug;

use crate::{
    codes::{Entry, parse_codes},
    store::LineStore,
};

/// The outcome of a merge, including the user codes that lost to an existing name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub codes: Vec<Entry>,
    /// Local entries dropped because their name was already taken, in parse order.
    pub discarded: Vec<Entry>,
}

/// Merge the shared and user INIs into a single working set.
///
/// Every shared code is kept. A user code is only added if no code already in the set has
/// the same name. Activation flags are left alone.
pub fn merge_codes(global: &impl LineStore, local: &impl LineStore) -> Vec<Entry> {
    merge_codes_with_report(global, local).codes
}

/// Like [`merge_codes`], but also hands back the user codes that were dropped.
pub fn merge_codes_with_report(global: &impl LineStore, local: &impl LineStore) -> MergeReport {
    merge_entries(parse_codes(global, false), parse_codes(local, true))
}

/// Merge already parsed entries. See [`merge_codes`].
pub fn merge_entries(global: Vec<Entry>, local: Vec<Entry>) -> MergeReport {
    let mut names: HashSet<String> = global.iter().map(|e| e.name.clone()).collect();
    let mut report = MergeReport {
        codes: global,
        discarded: Vec::new(),
    };

    for entry in local {
        if names.insert(entry.name.clone()) {
            report.codes.push(entry);
        } else {
            debug!("Discarding user Gecko code '{}': name already in use", entry.name);
            report.discarded.push(entry);
        }
    }

    report
}
