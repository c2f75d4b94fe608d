//! The floating candidate menu.
//!
//! The menu is laid out from the frame it opens in, but stays invisible and
//! ignores the pointer until the controller has a measured position for it.

use egui::{Align, Area, Context, Frame, Id, Key, Layout, Order, Rect, ScrollArea, TextEdit};
use layout::Size;
use mention_core::{MentionController, MentionOption};

use crate::field::from_viewport;
use crate::render::{ClassNames, MentionRenderer};

pub(crate) struct MenuCtx<'a> {
    pub ctx: &'a Context,
    pub id: Id,
    pub screen: Rect,
    pub controller: &'a mut MentionController,
    pub renderer: &'a dyn MentionRenderer,
    pub classes: &'a ClassNames,
}

pub(crate) struct MenuOutput {
    /// Where the menu was drawn this frame, in screen points.
    pub rect: Rect,
    pub proposed: Option<Vec<String>>,
}

pub(crate) fn show_menu(m: MenuCtx<'_>) -> Option<MenuOutput> {
    let MenuCtx {
        ctx,
        id,
        screen,
        controller,
        renderer,
        classes,
    } = m;
    if !controller.is_open() {
        return None;
    }

    let geometry = controller.geometry();
    let target = if geometry.visible {
        from_viewport(geometry.rect(), screen)
    } else {
        let size = controller.menu_box_size();
        Rect::from_min_size(screen.min, egui::vec2(size.width, size.height))
    };

    let filtered: Vec<MentionOption> = controller
        .filtered_options()
        .into_iter()
        .cloned()
        .collect();
    let active = controller.active_index();
    let search_box = controller.config().menu.search_box;
    let mut search = controller.query().to_owned();
    let nav_key = ctx.input(|i| i.key_pressed(Key::ArrowDown) || i.key_pressed(Key::ArrowUp));

    let mut search_changed = false;
    let mut hovered = None;
    let mut clicked = None;

    let area = Area::new(id.with(classes.dropdown()))
        .order(Order::Foreground)
        .fixed_pos(target.min)
        .constrain(false)
        .interactable(geometry.visible)
        .show(ctx, |ui| {
            if !geometry.visible {
                ui.set_invisible();
            }
            let frame = Frame::popup(ui.style());
            let chrome = frame.total_margin().sum();
            frame.show(ui, |ui| {
                ui.set_width((target.width() - chrome.x).max(0.0));
                ui.set_max_height((target.height() - chrome.y).max(0.0));

                if search_box {
                    let resp = ui
                        .push_id(classes.dropdown_search(), |ui| {
                            ui.add(
                                TextEdit::singleline(&mut search)
                                    .hint_text("Search...")
                                    .desired_width(f32::INFINITY),
                            )
                        })
                        .inner;
                    search_changed = resp.changed();
                    ui.separator();
                }

                if filtered.is_empty() {
                    ui.push_id(classes.dropdown_empty(), |ui| {
                        ui.weak("No results found.");
                    });
                    return;
                }

                ui.push_id(classes.dropdown_list(), |ui| {
                    ScrollArea::vertical()
                        .auto_shrink([false, true])
                        .max_height(ui.available_height())
                        .show(ui, |ui| {
                            ui.with_layout(Layout::top_down_justified(Align::LEFT), |ui| {
                                for (i, option) in filtered.iter().enumerate() {
                                    let is_active = i == active;
                                    let row = renderer.dropdown_row(
                                        ui,
                                        option,
                                        is_active,
                                        &classes.dropdown_item(is_active),
                                    );
                                    if is_active && nav_key {
                                        row.scroll_to_me(None);
                                    }
                                    if row.hovered() && !is_active {
                                        hovered = Some(i);
                                    }
                                    if row.clicked() {
                                        clicked = Some(option.value.clone());
                                    }
                                }
                            });
                        });
                });
            });
        });

    let rect = area.response.rect;
    controller.report_menu_size(Size::new(rect.width(), rect.height()));

    if search_changed {
        controller.handle_search_change(&search);
    }
    if let Some(i) = hovered {
        controller.set_active_index(i);
    }
    let proposed = clicked.and_then(|id| controller.select(&id));

    Some(MenuOutput { rect, proposed })
}
