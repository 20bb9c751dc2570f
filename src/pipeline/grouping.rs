use std::collections::BTreeMap;

use tracing::trace;

use super::{
    entry::{combine, UsageEntry},
    matcher::PatternSet,
};

/// Group display name mapped to the patterns that select its members.
pub type GroupSpec = BTreeMap<String, PatternSet>;

/// Replaces the entries selected by each group with one entry carrying the group's name and the
/// combined values of its members. Groups that select nothing are skipped. The result is sorted
/// by `total_seconds`, longest first; equal durations keep their relative order.
///
/// Every group selects independently, so an entry matched by two groups is counted in both of
/// them. It is still removed from the ungrouped remainder only once.
pub fn group(entries: Vec<UsageEntry>, groups: Option<&GroupSpec>) -> Vec<UsageEntry> {
    let Some(groups) = groups else {
        return entries;
    };

    let mut grouped = Vec::with_capacity(groups.len());
    for (group_name, patterns) in groups {
        let Some(combined) = entries
            .iter()
            .filter(|entry| patterns.matches(&entry.name))
            .cloned()
            .reduce(|acc, next| combine(acc, &next))
        else {
            trace!("Group {group_name} matched no entries");
            continue;
        };
        grouped.push(combined.with_name(group_name.as_str()));
    }

    let consumed = groups.values().fold(PatternSet::default(), |mut acc, next| {
        acc.extend(next);
        acc
    });

    grouped.extend(
        entries
            .into_iter()
            .filter(|entry| !consumed.matches(&entry.name)),
    );
    grouped.sort_by(|a, b| b.total_seconds.total_cmp(&a.total_seconds));
    grouped
}
