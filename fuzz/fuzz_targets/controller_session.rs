#![no_main]

use layout::{FieldStyle, FieldView, FixedAdvanceMeasurer, MeasuringMirrorHost, Rectangle, Size};
use libfuzzer_sys::fuzz_target;
use mention_core::{MeasureInput, MentionConfig, MentionController, MentionKey, MentionOption};

const KEYS: [MentionKey; 5] = [
    MentionKey::ArrowDown,
    MentionKey::ArrowUp,
    MentionKey::Enter,
    MentionKey::Escape,
    MentionKey::Backspace,
];

// Random edits, keys and frames; the menu state must stay consistent.
fuzz_target!(|data: &[u8]| {
    let options = ["alice", "bob", "bobby", "carol"]
        .iter()
        .map(|id| MentionOption::new(*id, ""))
        .collect();
    let mut c = MentionController::new(MentionConfig::default(), options);
    let measurer = FixedAdvanceMeasurer::default();
    let style = FieldStyle::text_input();
    let mut selected: Vec<String> = Vec::new();

    for chunk in data.chunks(2) {
        let (op, arg) = (chunk[0], chunk.get(1).copied().unwrap_or(0));
        let proposed = match op % 6 {
            0 => {
                let mut text = c.value().to_string();
                text.push(b"@ abo"[arg as usize % 5] as char);
                c.handle_text_change(text.clone(), text.len());
                None
            }
            1 => c.handle_key_down(KEYS[arg as usize % KEYS.len()]).proposed,
            2 => {
                c.set_active_index(arg as usize);
                None
            }
            3 => {
                let id = ["alice", "bob", "x"][arg as usize % 3];
                c.select(id)
            }
            4 => selected.last().cloned().map(|id| c.remove(&id)),
            _ => {
                let value = c.value().to_string();
                let view = FieldView {
                    rect: Some(Rectangle::new(f32::from(arg), 40.0, 300.0, 24.0)),
                    value: &value,
                    style: &style,
                    scroll_left: 0.0,
                };
                let mut host = MeasuringMirrorHost::new(&measurer);
                c.poll_measurement(&mut MeasureInput {
                    field: Some(&view),
                    mirror_host: &mut host,
                    viewport: Size::new(640.0, 480.0),
                });
                assert_eq!(host.attached(), 0);
                None
            }
        };
        if let Some(next) = proposed {
            selected = next;
            c.set_selected(selected.clone());
        }

        let filtered = c.filtered_options();
        assert!(filtered.iter().all(|o| !selected.contains(&o.value)));
        assert!(c.active_index() < filtered.len().max(1));
        if !c.is_open() {
            assert!(!c.geometry().visible);
        }
    }
});
