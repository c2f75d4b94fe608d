#![no_main]

use libfuzzer_sys::fuzz_target;
use mention_core::detect_trigger;

fuzz_target!(|data: &[u8]| {
    let Some((&cursor, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let cursor = cursor as usize * text.len() / 255;

    let found = detect_trigger(text, cursor, '@');

    // Oracle: the last '@' at or before the caret, valid at the start or
    // after whitespace.
    let mut end = cursor.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let expected = text[..end].rfind('@').filter(|&at| {
        text[..at]
            .chars()
            .next_back()
            .is_none_or(|c| matches!(c, ' ' | '\t' | '\n'))
    });

    match (found, expected) {
        (None, None) => {}
        (Some(m), Some(at)) => {
            assert_eq!(m.trigger_offset, at);
            assert_eq!(m.query, &text[at + 1..end]);
            assert!(!m.query.contains('@'));
        }
        (found, expected) => panic!("{text:?} @ {cursor}: got {found:?}, want {expected:?}"),
    }
});
