use super::{entry::UsageEntry, matcher::PatternSet};

/// Drops every entry matched by `hide`. Without a hide set the entries are returned untouched.
pub fn hide(entries: Vec<UsageEntry>, hide: Option<&PatternSet>) -> Vec<UsageEntry> {
    let Some(hide) = hide else {
        return entries;
    };

    entries
        .into_iter()
        .filter(|entry| !hide.matches(&entry.name))
        .collect()
}
