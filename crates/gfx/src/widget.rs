//! [`MentionInput`]: badges, inline suggestions, the field and its menu as
//! one egui widget.

use std::hash::Hash;

use egui::{Id, Pos2, Rect, Response, Sense, Ui, Vec2};
use layout::{FieldStyle, FieldView, MeasuringMirrorHost, Size};
use mention_core::{MeasureInput, MentionConfig, MentionController, MentionOption};

use crate::EguiTextMeasurer;
use crate::field::{FieldPaint, field_height, paint_field, to_viewport};
use crate::menu::{MenuCtx, show_menu};
use crate::reflow::{FrameObservation, FrameReflowSource};
use crate::render::{ClassNames, DefaultRenderer, MentionRenderer};
use crate::route::{FieldInputCtx, route_field_input};

/// The field never gets narrower than this, even on a crowded row.
const MIN_FIELD_WIDTH: f32 = 120.0;

pub struct MentionResponse {
    /// Response of the text field.
    pub response: Response,
    /// Selected lists proposed this frame, oldest first. The host accepts one
    /// by passing it back on the next [`MentionInput::show`].
    pub proposed: Vec<Vec<String>>,
}

impl MentionResponse {
    /// The latest proposal, which is the one a host normally applies.
    pub fn changed(&self) -> Option<&[String]> {
        self.proposed.last().map(Vec::as_slice)
    }
}

pub struct MentionInput {
    id: Id,
    controller: MentionController,
    style: FieldStyle,
    classes: ClassNames,
    renderer: Box<dyn MentionRenderer>,
    measurer: Option<EguiTextMeasurer>,
    reflow: FrameReflowSource,
    field_rect: Option<Rect>,
    menu_rect: Option<Rect>,
}

impl MentionInput {
    pub fn new(id_salt: impl Hash, config: MentionConfig, options: Vec<MentionOption>) -> Self {
        Self {
            id: Id::new(id_salt),
            controller: MentionController::new(config, options),
            style: FieldStyle::text_input(),
            classes: ClassNames::default(),
            renderer: Box::new(DefaultRenderer),
            measurer: None,
            reflow: FrameReflowSource::new(),
            field_rect: None,
            menu_rect: None,
        }
    }

    pub fn with_style(mut self, style: FieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_class_names(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_renderer(mut self, renderer: impl MentionRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn controller(&self) -> &MentionController {
        &self.controller
    }

    /// For hosts that want the change callback, or to swap the catalog.
    pub fn controller_mut(&mut self) -> &mut MentionController {
        &mut self.controller
    }

    /// Field rect from the last frame.
    pub fn field_rect(&self) -> Option<Rect> {
        self.field_rect
    }

    /// Menu rect from the last frame it was shown in.
    pub fn menu_rect(&self) -> Option<Rect> {
        self.menu_rect
    }

    /// Lay out and run one frame. `selected` is the host's current list.
    pub fn show(&mut self, ui: &mut Ui, selected: &[String]) -> MentionResponse {
        if self.controller.selected() != selected {
            self.controller.set_selected(selected.to_vec());
        }
        self.dismiss_on_outside_press(ui);

        let measurer: &EguiTextMeasurer = self
            .measurer
            .get_or_insert_with(|| EguiTextMeasurer::new(ui.ctx()));
        let screen = ui.ctx().screen_rect();
        let mut proposed = Vec::new();

        let classes = &self.classes;
        let renderer = self.renderer.as_ref();
        let controller = &mut self.controller;

        let response = ui
            .push_id(classes.container(), |ui| {
                ui.push_id(classes.selected_container(), |ui| ui.horizontal_wrapped(|ui| {
                    let badges: Vec<MentionOption> =
                        controller.badges().into_iter().cloned().collect();
                    let badge_class = classes.badge();
                    for option in &badges {
                        if renderer.badge(ui, option, &badge_class).clicked() {
                            proposed.push(controller.remove(&option.value));
                        }
                    }

                    let suggestions: Vec<MentionOption> =
                        controller.suggestions().into_iter().cloned().collect();
                    let suggestion_class = classes.suggestion();
                    for option in &suggestions {
                        if renderer.suggestion(ui, option, &suggestion_class).clicked()
                            && let Some(next) = controller.select(&option.value)
                        {
                            proposed.push(next);
                        }
                    }

                    let size = Vec2::new(
                        ui.available_width().max(MIN_FIELD_WIDTH),
                        field_height(&self.style, measurer),
                    );
                    let (_, rect) = ui.allocate_space(size);
                    let resp = ui.interact(rect, self.id, Sense::click_and_drag());

                    proposed.extend(route_field_input(FieldInputCtx {
                        ui,
                        id: self.id,
                        rect,
                        resp: &resp,
                        style: &self.style,
                        measurer,
                        controller: &mut *controller,
                    }));

                    let visuals = ui.visuals();
                    paint_field(
                        rect,
                        &self.style,
                        controller.buffer(),
                        &controller.config().placeholder,
                        FieldPaint {
                            painter: ui.painter(),
                            measurer,
                            focused: ui.memory(|mem| mem.has_focus(self.id)),
                            focus_stroke: visuals.selection.stroke,
                            selection_fill: visuals.selection.bg_fill,
                        },
                    );
                    resp
                }))
                .inner
                .inner
            })
            .inner;
        let field_rect = response.rect;

        let scroll_delta = ui.input(|i| i.raw_scroll_delta);
        self.reflow.observe(
            FrameObservation {
                screen,
                field: field_rect,
                scroll_delta,
            },
            &controller.reflow_hub(),
        );

        let value = controller.value().to_owned();
        let view = FieldView {
            rect: Some(to_viewport(field_rect, screen)),
            value: &value,
            style: &self.style,
            scroll_left: controller.buffer().scroll_x(),
        };
        let mut host = MeasuringMirrorHost::new(measurer);
        if let Some(g) = controller.poll_measurement(&mut MeasureInput {
            field: Some(&view),
            mirror_host: &mut host,
            viewport: Size::new(screen.width(), screen.height()),
        }) {
            log::trace!(target: "gfx.route", "menu placed at {g:?}");
        }
        if controller.measurement_pending() {
            ui.ctx().request_repaint();
        }

        let menu = show_menu(MenuCtx {
            ctx: ui.ctx(),
            id: self.id,
            screen,
            controller,
            renderer,
            classes,
        });
        self.menu_rect = menu.as_ref().map(|m| m.rect);
        proposed.extend(menu.and_then(|m| m.proposed));
        self.field_rect = Some(field_rect);

        MentionResponse { response, proposed }
    }

    /// A primary press outside both the field and the menu closes the menu.
    /// The menu only counts once it is placed and visible.
    fn dismiss_on_outside_press(&mut self, ui: &Ui) {
        if !self.controller.is_open() {
            return;
        }
        let press: Option<Pos2> = ui.input(|i| {
            i.pointer
                .primary_pressed()
                .then(|| i.pointer.press_origin())
                .flatten()
        });
        let Some(pos) = press else {
            return;
        };
        let inside = |r: Option<Rect>| r.is_some_and(|r| r.contains(pos));
        let menu = self
            .menu_rect
            .filter(|_| self.controller.geometry().visible);
        if !inside(self.field_rect) && !inside(menu) {
            log::trace!(target: "gfx.route", "outside press at {pos:?} dismisses");
            self.controller.dismiss();
        }
    }
}

impl std::fmt::Debug for MentionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionInput")
            .field("id", &self.id)
            .field("controller", &self.controller)
            .field("field_rect", &self.field_rect)
            .field("menu_rect", &self.menu_rect)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Align, CentralPanel, Context, Event, Key, Layout, Modifiers, PointerButton, RawInput};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    const SCREEN: Vec2 = Vec2::new(1200.0, 900.0);

    fn raw_input(events: Vec<Event>) -> RawInput {
        sized_input(SCREEN, events)
    }

    fn sized_input(screen: Vec2, events: Vec<Event>) -> RawInput {
        RawInput {
            events,
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, screen)),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<MentionOption> {
        vec![
            MentionOption::new("alice", "Alice"),
            MentionOption::new("bob", "Bob"),
            MentionOption::new("carol", "Carol"),
        ]
    }

    fn widget() -> MentionInput {
        MentionInput::new("mention", MentionConfig::default(), catalog())
    }

    fn run_frame(
        ctx: &Context,
        widget: &mut MentionInput,
        selected: &[String],
        events: Vec<Event>,
    ) -> Vec<Vec<String>> {
        let proposed = RefCell::new(Vec::new());
        let _ = ctx.run(raw_input(events), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let r = widget.show(ui, selected);
                proposed.borrow_mut().extend(r.proposed);
            });
        });
        proposed.into_inner()
    }

    /// One frame with the widget pinned to the bottom of a `screen`-sized window.
    fn run_bottom_frame(ctx: &Context, widget: &mut MentionInput, screen: Vec2, events: Vec<Event>) {
        let _ = ctx.run(sized_input(screen, events), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                ui.with_layout(Layout::bottom_up(Align::LEFT), |ui| {
                    widget.show(ui, &[]);
                });
            });
        });
    }

    fn press(pos: Pos2) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                modifiers: Modifiers::NONE,
            },
        ]
    }

    fn release(pos: Pos2) -> Vec<Event> {
        vec![Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        }]
    }

    fn click(
        ctx: &Context,
        widget: &mut MentionInput,
        selected: &[String],
        pos: Pos2,
    ) -> Vec<Vec<String>> {
        let mut out = run_frame(ctx, widget, selected, press(pos));
        out.extend(run_frame(ctx, widget, selected, release(pos)));
        out
    }

    fn key(key: Key) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    /// Lay out once, then click into the field so it has focus.
    fn focused(ctx: &Context, widget: &mut MentionInput, selected: &[String]) {
        run_frame(ctx, widget, selected, Vec::new());
        let field = widget.field_rect().expect("field laid out");
        click(ctx, widget, selected, field.center());
        assert!(ctx.memory(|mem| mem.has_focus(widget.id())));
    }

    fn settle(ctx: &Context, widget: &mut MentionInput, selected: &[String]) {
        for _ in 0..4 {
            run_frame(ctx, widget, selected, Vec::new());
        }
    }

    #[test]
    fn typing_trigger_opens_a_menu_inside_the_screen() {
        let ctx = Context::default();
        let mut w = widget();
        focused(&ctx, &mut w, &[]);

        run_frame(&ctx, &mut w, &[], vec![Event::Text("hey @".into())]);
        assert!(w.controller().is_open());
        assert_eq!(w.controller().value(), "hey @");

        settle(&ctx, &mut w, &[]);
        let g = w.controller().geometry();
        assert!(g.visible);

        let field = w.field_rect().unwrap();
        let menu = w.menu_rect().unwrap();
        let screen = Rect::from_min_size(Pos2::ZERO, SCREEN).shrink(8.0);
        assert!(screen.contains_rect(menu), "{menu:?}");
        assert!(menu.min.y >= field.max.y, "menu below the field");
        assert!(g.x > field.min.x, "menu follows the trigger column");
    }

    #[test]
    fn enter_commits_the_active_row() {
        let ctx = Context::default();
        let mut w = widget();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        w.controller_mut()
            .set_on_change(move |next| sink.borrow_mut().push(next));
        focused(&ctx, &mut w, &[]);

        run_frame(&ctx, &mut w, &[], vec![Event::Text("@b".into())]);
        assert_eq!(w.controller().filtered_options().len(), 1);

        let proposed = run_frame(&ctx, &mut w, &[], vec![key(Key::ArrowDown), key(Key::Enter)]);
        assert_eq!(proposed, vec![vec!["bob".to_string()]]);
        assert_eq!(*seen.borrow(), proposed);
        assert!(!w.controller().is_open());
        assert_eq!(w.controller().value(), "");
        assert!(w.menu_rect().is_none());
    }

    #[test]
    fn escape_closes_and_keeps_text() {
        let ctx = Context::default();
        let mut w = widget();
        focused(&ctx, &mut w, &[]);
        run_frame(&ctx, &mut w, &[], vec![Event::Text("@al".into())]);
        assert!(w.controller().is_open());

        run_frame(&ctx, &mut w, &[], vec![key(Key::Escape)]);
        assert!(!w.controller().is_open());
        assert_eq!(w.controller().value(), "@al");
    }

    #[test]
    fn backspace_on_empty_field_drops_the_last_badge() {
        let ctx = Context::default();
        let mut w = widget();
        let selected = vec!["alice".to_string(), "bob".to_string()];
        focused(&ctx, &mut w, &selected);

        let proposed = run_frame(&ctx, &mut w, &selected, vec![key(Key::Backspace)]);
        assert_eq!(proposed, vec![vec!["alice".to_string()]]);
        assert_eq!(w.controller().value(), "");
    }

    #[test]
    fn backspace_with_text_edits_the_field() {
        let ctx = Context::default();
        let mut w = widget();
        let selected = vec!["alice".to_string()];
        focused(&ctx, &mut w, &selected);
        run_frame(&ctx, &mut w, &selected, vec![Event::Text("ab".into())]);

        let proposed = run_frame(&ctx, &mut w, &selected, vec![key(Key::Backspace)]);
        assert!(proposed.is_empty());
        assert_eq!(w.controller().value(), "a");
    }

    #[test]
    fn press_outside_field_and_menu_dismisses() {
        let ctx = Context::default();
        let mut w = widget();
        focused(&ctx, &mut w, &[]);
        run_frame(&ctx, &mut w, &[], vec![Event::Text("@".into())]);
        settle(&ctx, &mut w, &[]);
        assert!(w.controller().geometry().visible);

        click(&ctx, &mut w, &[], Pos2::new(1190.0, 890.0));
        assert!(!w.controller().is_open());
        assert_eq!(w.controller().value(), "@");
    }

    #[test]
    fn press_on_an_unplaced_menu_still_dismisses() {
        let ctx = Context::default();
        let mut w = widget();
        focused(&ctx, &mut w, &[]);
        run_frame(&ctx, &mut w, &[], vec![Event::Text("@".into())]);
        assert!(!w.controller().geometry().visible);

        // The hidden menu is parked at the window origin until it is measured.
        let pos = Pos2::new(2.0, 2.0);
        assert!(w.menu_rect().is_some_and(|r| r.contains(pos)));
        assert!(!w.field_rect().unwrap().contains(pos));

        click(&ctx, &mut w, &[], pos);
        assert!(!w.controller().is_open());
        assert_eq!(w.controller().value(), "@");
    }

    #[test]
    fn change_callback_may_touch_the_context() {
        let ctx = Context::default();
        let mut w = widget();
        let cb_ctx = ctx.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        w.controller_mut().set_on_change(move |next| {
            cb_ctx.request_repaint();
            sink.borrow_mut().push(next);
        });
        let selected = vec!["alice".to_string()];
        focused(&ctx, &mut w, &selected);

        let proposed = run_frame(&ctx, &mut w, &selected, vec![key(Key::Backspace)]);
        assert_eq!(proposed, vec![Vec::<String>::new()]);
        assert_eq!(*seen.borrow(), proposed);

        run_frame(&ctx, &mut w, &[], vec![Event::Text("@c".into())]);
        let proposed = run_frame(&ctx, &mut w, &[], vec![key(Key::Enter)]);
        assert_eq!(proposed, vec![vec!["carol".to_string()]]);
    }

    #[test]
    fn resizing_the_window_moves_an_open_menu() {
        let ctx = Context::default();
        let mut w = widget();
        let large = Vec2::new(1000.0, 800.0);
        let small = Vec2::new(700.0, 450.0);

        run_bottom_frame(&ctx, &mut w, large, Vec::new());
        let field = w.field_rect().unwrap();
        run_bottom_frame(&ctx, &mut w, large, press(field.center()));
        run_bottom_frame(&ctx, &mut w, large, release(field.center()));
        assert!(ctx.memory(|mem| mem.has_focus(w.id())));

        run_bottom_frame(&ctx, &mut w, large, vec![Event::Text("@".into())]);
        for _ in 0..4 {
            run_bottom_frame(&ctx, &mut w, large, Vec::new());
        }
        assert!(w.controller().geometry().visible);
        let before = w.menu_rect().unwrap();
        assert!(Rect::from_min_size(Pos2::ZERO, large).shrink(8.0).contains_rect(before));

        for _ in 0..4 {
            run_bottom_frame(&ctx, &mut w, small, Vec::new());
        }
        assert!(w.controller().is_open());
        assert!(w.controller().geometry().visible);
        let after = w.menu_rect().unwrap();
        assert_ne!(before, after);
        let bounds = Rect::from_min_size(Pos2::ZERO, small).shrink(8.0);
        assert!(bounds.contains_rect(after), "{after:?} outside {bounds:?}");
    }

    /// Draws suggestions as plain buttons and remembers where they went.
    #[derive(Clone, Default)]
    struct RecordingRenderer {
        suggestions: Rc<RefCell<HashMap<String, Rect>>>,
    }

    impl MentionRenderer for RecordingRenderer {
        fn badge(&self, ui: &mut Ui, option: &MentionOption, class: &str) -> Response {
            DefaultRenderer.badge(ui, option, class)
        }

        fn suggestion(&self, ui: &mut Ui, option: &MentionOption, class: &str) -> Response {
            let resp = DefaultRenderer.suggestion(ui, option, class);
            self.suggestions
                .borrow_mut()
                .insert(option.value.clone(), resp.rect);
            resp
        }

        fn dropdown_row(
            &self,
            ui: &mut Ui,
            option: &MentionOption,
            active: bool,
            class: &str,
        ) -> Response {
            DefaultRenderer.dropdown_row(ui, option, active, class)
        }
    }

    #[test]
    fn clicking_a_suggestion_proposes_it() {
        let ctx = Context::default();
        let renderer = RecordingRenderer::default();
        let rects = renderer.suggestions.clone();
        let mut w = widget().with_renderer(renderer);

        run_frame(&ctx, &mut w, &[], Vec::new());
        assert_eq!(rects.borrow().len(), 3);
        let bob = rects.borrow()["bob"];

        let proposed = click(&ctx, &mut w, &[], bob.center());
        assert_eq!(proposed, vec![vec!["bob".to_string()]]);

        // Once the host accepts it, bob is a badge and no longer suggested.
        rects.borrow_mut().clear();
        run_frame(&ctx, &mut w, &["bob".to_string()], Vec::new());
        assert!(!rects.borrow().contains_key("bob"));
        assert_eq!(w.controller().badges().len(), 1);
    }
}
