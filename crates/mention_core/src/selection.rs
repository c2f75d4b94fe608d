//! Selection controller: proposes the next selected list and reconciles the
//! field text on commit. Nothing here mutates the host's list.

use std::ops::Range;

use input_core::clamp_to_char_boundary;

use crate::config::CommitMode;

/// `selected` with `id` appended, or `None` if it is already there.
pub fn appended(selected: &[String], id: &str) -> Option<Vec<String>> {
    if selected.iter().any(|s| s == id) {
        log::debug!(target: "mention.selection", "{id:?} already selected");
        return None;
    }
    let mut next = Vec::with_capacity(selected.len() + 1);
    next.extend_from_slice(selected);
    next.push(id.to_string());
    Some(next)
}

/// `selected` without any occurrence of `id`, order preserved.
pub fn removed(selected: &[String], id: &str) -> Vec<String> {
    selected.iter().filter(|s| *s != id).cloned().collect()
}

/// `selected` without its last element, or `None` if it is empty.
pub fn removed_last(selected: &[String]) -> Option<Vec<String>> {
    let (_, rest) = selected.split_last()?;
    Some(rest.to_vec())
}

/// Field text and caret after committing.
///
/// `mention` is the byte span of the typed trigger and query. With no mention
/// (a direct pick from the suggestions) only [`CommitMode::ClearField`]
/// touches the text, and the caret stays at `caret`.
pub fn reconcile_text(
    text: &str,
    mention: Option<Range<usize>>,
    caret: usize,
    mode: CommitMode,
) -> (String, usize) {
    match mode {
        CommitMode::ClearField => (String::new(), 0),
        CommitMode::StripMention => {
            let caret = clamp_to_char_boundary(text, caret);
            let Some(span) = mention else {
                return (text.to_string(), caret);
            };
            let start = clamp_to_char_boundary(text, span.start);
            let end = clamp_to_char_boundary(text, span.end);
            if start >= end {
                log::debug!(target: "mention.selection", "empty mention span {span:?}");
                return (text.to_string(), caret);
            }
            let mut out = String::with_capacity(text.len() - (end - start));
            out.push_str(&text[..start]);
            out.push_str(&text[end..]);
            (out, start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn append_is_exactly_once() {
        let sel = list(&["1"]);
        assert_eq!(appended(&sel, "2"), Some(list(&["1", "2"])));
        assert_eq!(appended(&sel, "1"), None);
    }

    #[test]
    fn add_then_remove_round_trips() {
        let before = list(&["a", "b"]);
        let after = appended(&before, "c").unwrap();
        assert_eq!(removed(&after, "c"), before);
    }

    #[test]
    fn remove_keeps_order_and_ignores_unknown() {
        let sel = list(&["a", "b", "c"]);
        assert_eq!(removed(&sel, "b"), list(&["a", "c"]));
        assert_eq!(removed(&sel, "zzz"), sel);
    }

    #[test]
    fn remove_last_by_position() {
        assert_eq!(removed_last(&list(&["1", "2"])), Some(list(&["1"])));
        assert_eq!(removed_last(&[]), None);
    }

    #[test]
    fn clear_field_mode() {
        assert_eq!(
            reconcile_text("hi @al", Some(3..6), 6, CommitMode::ClearField),
            (String::new(), 0)
        );
    }

    #[test]
    fn strip_mention_mode() {
        assert_eq!(
            reconcile_text("hi @al there", Some(3..6), 6, CommitMode::StripMention),
            ("hi  there".to_string(), 3)
        );
        assert_eq!(
            reconcile_text("@bob", Some(0..4), 4, CommitMode::StripMention),
            (String::new(), 0)
        );
    }

    #[test]
    fn strip_mention_ignores_where_the_caret_sits() {
        assert_eq!(
            reconcile_text("hi @bob", Some(3..7), 5, CommitMode::StripMention),
            ("hi ".to_string(), 3)
        );
    }

    #[test]
    fn strip_mention_without_trigger_or_with_bad_offsets() {
        assert_eq!(
            reconcile_text("plain", None, 2, CommitMode::StripMention),
            ("plain".to_string(), 2)
        );
        assert_eq!(
            reconcile_text("ab", Some(9..12), 1, CommitMode::StripMention),
            ("ab".to_string(), 1)
        );
    }
}
