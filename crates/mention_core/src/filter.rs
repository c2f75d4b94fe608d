//! Candidate filter: pure functions of `(options, selected, query)`.

use std::collections::HashSet;

use crate::option::MentionOption;

/// Options whose id is not in `selected`, in catalog order.
pub fn unselected<'a>(options: &'a [MentionOption], selected: &[String]) -> Vec<&'a MentionOption> {
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();
    options
        .iter()
        .filter(|o| !selected.contains(o.value.as_str()))
        .collect()
}

/// Unselected options whose label or id contains `query`, case-insensitively.
///
/// Order follows the catalog; there is no ranking. An empty query returns
/// every unselected option.
///
/// ```
/// use mention_core::{MentionOption, filter_options};
///
/// let options = vec![
///     MentionOption::new("alice", ""),
///     MentionOption::new("bob", ""),
///     MentionOption::new("charlie", ""),
/// ];
/// let hits = filter_options(&options, &[], "bo");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].value, "bob");
/// ```
pub fn filter_options<'a>(
    options: &'a [MentionOption],
    selected: &[String],
    query: &str,
) -> Vec<&'a MentionOption> {
    let candidates = unselected(options, selected);
    if query.is_empty() {
        return candidates;
    }
    let needle = query.to_lowercase();
    candidates
        .into_iter()
        .filter(|o| matches_query(o, &needle))
        .collect()
}

/// `needle` must already be lowercase.
pub fn matches_query(option: &MentionOption, needle: &str) -> bool {
    option.display_label().to_lowercase().contains(needle)
        || option.value.to_lowercase().contains(needle)
}
