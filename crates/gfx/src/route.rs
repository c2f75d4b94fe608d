//! Routing egui pointer and key events for the focused field into the
//! controller.

use egui::{Event, EventFilter, Id, Key, Modifiers, Rect, Response, Ui};
use input_core::EditCommand;
use layout::{FieldStyle, TextMeasurer};
use mention_core::{MentionController, MentionKey};

use crate::field::{caret_at_pointer, scroll_metrics};

/// Keys the mention engine gets first look at.
pub(crate) fn mention_key(key: Key) -> MentionKey {
    match key {
        Key::ArrowDown => MentionKey::ArrowDown,
        Key::ArrowUp => MentionKey::ArrowUp,
        Key::Enter => MentionKey::Enter,
        Key::Escape => MentionKey::Escape,
        Key::Backspace => MentionKey::Backspace,
        _ => MentionKey::Other,
    }
}

/// Default single-line editing for keys the engine left alone.
pub(crate) fn edit_command(key: Key, modifiers: Modifiers) -> Option<EditCommand> {
    let selecting = modifiers.shift;
    Some(match key {
        Key::Backspace => EditCommand::Backspace,
        Key::Delete => EditCommand::Delete,
        Key::ArrowLeft => EditCommand::CaretLeft { selecting },
        Key::ArrowRight => EditCommand::CaretRight { selecting },
        Key::Home | Key::ArrowUp => EditCommand::CaretHome { selecting },
        Key::End | Key::ArrowDown => EditCommand::CaretEnd { selecting },
        Key::A if modifiers.command || modifiers.ctrl => EditCommand::SelectAll,
        _ => return None,
    })
}

pub(crate) struct FieldInputCtx<'a> {
    pub ui: &'a mut Ui,
    pub id: Id,
    pub rect: Rect,
    pub resp: &'a Response,
    pub style: &'a FieldStyle,
    pub measurer: &'a dyn TextMeasurer,
    pub controller: &'a mut MentionController,
}

/// Feed this frame's input for the field into the controller. Returns the
/// selected lists proposed along the way, oldest first.
pub(crate) fn route_field_input(ctx: FieldInputCtx<'_>) -> Vec<Vec<String>> {
    let FieldInputCtx {
        ui,
        id,
        rect,
        resp,
        style,
        measurer,
        controller,
    } = ctx;
    let mut proposals = Vec::new();

    // --- Pointer: focus and caret placement
    let (primary_pressed, shift) = ui.input(|i| (i.pointer.primary_pressed(), i.modifiers.shift));
    if let Some(pos) = resp.interact_pointer_pos() {
        let offset = caret_at_pointer(rect, pos, controller.buffer(), style, measurer);
        if primary_pressed {
            ui.memory_mut(|mem| mem.request_focus(id));
            controller.apply_edit(EditCommand::SetCaret {
                offset,
                selecting: shift,
            });
        } else if resp.dragged() {
            controller.apply_edit(EditCommand::SetCaret {
                offset,
                selecting: true,
            });
        }
    }
    if resp.clicked() {
        ui.memory_mut(|mem| mem.request_focus(id));
    }

    if !ui.memory(|mem| mem.has_focus(id)) {
        return proposals;
    }

    // Arrows and Escape belong to the field (and its menu) while it is
    // focused, not to egui's focus navigation.
    ui.memory_mut(|mem| {
        mem.set_focus_lock_filter(
            id,
            EventFilter {
                tab: true,
                horizontal_arrows: true,
                vertical_arrows: true,
                escape: true,
            },
        );
    });
    ui.input_mut(|i| {
        i.consume_key(Modifiers::NONE, Key::Tab);
        i.consume_key(Modifiers::SHIFT, Key::Tab);
    });

    // --- Keys and text
    // Copied out: handlers run the host callback, which may lock the context.
    let events = ui.input(|i| i.events.clone());
    for evt in &events {
        match evt {
            Event::Text(t) | Event::Paste(t) => {
                controller.apply_edit(EditCommand::Insert(t.clone()));
            }
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                let mk = mention_key(*key);
                if mk != MentionKey::Other {
                    let out = controller.handle_key_down(mk);
                    log::trace!(target: "gfx.route", "{mk:?} -> {out:?}");
                    if let Some(next) = out.proposed {
                        proposals.push(next);
                    }
                    if out.handled {
                        continue;
                    }
                }
                if let Some(cmd) = edit_command(*key, *modifiers) {
                    controller.apply_edit(cmd);
                }
            }
            _ => {}
        }
    }

    let (caret_px, text_w, available_w) =
        scroll_metrics(rect, controller.buffer(), style, measurer);
    controller.update_field_scroll(caret_px, text_w, available_w);

    proposals
}
