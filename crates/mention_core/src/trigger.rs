//! Trigger tokenizer.
//!
//! Stateless: the whole string is rescanned on every change, so edits
//! anywhere in the text are picked up.

use input_core::clamp_to_char_boundary;

/// An open mention: the trigger's byte offset and the text typed after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionQuery {
    pub trigger_offset: usize,
    pub query: String,
}

/// Find the mention the caret is in, if any.
///
/// Only the last `trigger` before `cursor` counts. It opens a mention when it
/// starts the text or follows a space, tab or newline, so `user@host` stays
/// inert. The query is everything between that trigger and the cursor,
/// spaces included.
///
/// ```
/// use mention_core::detect_trigger;
///
/// let text = "Email me @ test@email.com or @john";
/// let m = detect_trigger(text, text.len(), '@').unwrap();
/// assert_eq!(m.trigger_offset, 29);
/// assert_eq!(m.query, "john");
///
/// assert_eq!(detect_trigger("user@host", 9, '@'), None);
/// ```
pub fn detect_trigger(text: &str, cursor: usize, trigger: char) -> Option<MentionQuery> {
    let cursor = clamp_to_char_boundary(text, cursor);
    let before_cursor = &text[..cursor];

    let Some(at) = before_cursor.rfind(trigger) else {
        log::trace!(target: "mention.trigger", "no trigger before {cursor}");
        return None;
    };

    let boundary = match text[..at].chars().next_back() {
        None => true,
        Some(prev) => is_token_boundary(prev),
    };
    if !boundary {
        log::trace!(target: "mention.trigger", "trigger at {at} is inside a word");
        return None;
    }

    let query = &before_cursor[at + trigger.len_utf8()..];
    log::trace!(target: "mention.trigger", "trigger at {at}, query {query:?}");
    Some(MentionQuery {
        trigger_offset: at,
        query: query.to_string(),
    })
}

#[inline]
fn is_token_boundary(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str, cursor: usize) -> Option<(usize, String)> {
        detect_trigger(text, cursor, '@').map(|m| (m.trigger_offset, m.query))
    }

    #[test]
    fn trigger_at_start() {
        assert_eq!(q("@", 1), Some((0, String::new())));
        assert_eq!(q("@al", 3), Some((0, "al".into())));
    }

    #[test]
    fn cursor_before_the_trigger_sees_nothing() {
        assert_eq!(q("@al", 0), None);
        assert_eq!(q("hi @al", 3), None);
    }

    #[test]
    fn query_stops_at_the_cursor() {
        assert_eq!(q("hi @alice", 6), Some((3, "al".into())));
    }

    #[test]
    fn whitespace_kinds_open_a_mention() {
        assert_eq!(q("a\t@b", 4), Some((2, "b".into())));
        assert_eq!(q("a\n@b", 4), Some((2, "b".into())));
        // NBSP is not a token boundary.
        assert_eq!(q("a\u{00A0}@b", 5), None);
    }

    #[test]
    fn only_the_last_trigger_counts() {
        // The last '@' is mid-word, so the earlier valid one is not consulted.
        assert_eq!(q("@bob x@y", 8), None);
        assert_eq!(q("@bob @y", 7), Some((5, "y".into())));
    }

    #[test]
    fn query_may_contain_spaces() {
        assert_eq!(q("@john smi", 9), Some((0, "john smi".into())));
    }

    #[test]
    fn cursor_is_clamped() {
        assert_eq!(q("@al", 99), Some((0, "al".into())));
        // Inside the 'é' (2 bytes at offset 2): snaps back to 2.
        assert_eq!(q("@aé", 3), Some((0, "a".into())));
    }

    #[test]
    fn custom_and_multibyte_triggers() {
        assert_eq!(
            detect_trigger("see #ops", 8, '#').map(|m| m.query),
            Some("ops".into())
        );
        let m = detect_trigger("hi ＠bo", 9, '＠').unwrap();
        assert_eq!(m.trigger_offset, 3);
        assert_eq!(m.query, "bo");
    }
}
