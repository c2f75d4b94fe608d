//! The mention engine as one object: text state, query state, the host's
//! selected list and menu geometry, plus the handlers a presentation layer
//! wires its events into.

use std::ops::Range;

use input_core::{EditCommand, EditOutcome, TextBuffer};
use layout::{CaretError, Size, caret_offset_from_left, place};

use crate::config::MentionConfig;
use crate::error::MeasureError;
use crate::filter::{filter_options, unselected};
use crate::geometry::{MeasureInput, MenuGeometry};
use crate::navigation::{QueryState, Step, Transition};
use crate::option::MentionOption;
use crate::reflow::{ReflowHub, ReflowKind, ReflowSubscription};
use crate::schedule::{MeasureScheduler, MeasureTicket};
use crate::selection::{appended, reconcile_text, removed, removed_last};
use crate::trigger::detect_trigger;

/// Receives every proposed next selected list.
pub type ChangeCallback = Box<dyn FnMut(Vec<String>)>;

/// Keys the engine reacts to. Everything else is [`MentionKey::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MentionKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Backspace,
    Other,
}

impl MentionKey {
    /// Map a DOM-style key name (`"ArrowDown"`, `"Enter"`, ...).
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => MentionKey::ArrowDown,
            "ArrowUp" | "Up" => MentionKey::ArrowUp,
            "Enter" => MentionKey::Enter,
            "Escape" | "Esc" => MentionKey::Escape,
            "Backspace" => MentionKey::Backspace,
            _ => MentionKey::Other,
        }
    }
}

/// Result of [`MentionController::handle_key_down`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The engine consumed the key; the host must not also apply its default
    /// edit.
    pub handled: bool,
    /// The next selected list, if the key proposed one.
    pub proposed: Option<Vec<String>>,
}

impl KeyOutcome {
    fn handled() -> Self {
        Self {
            handled: true,
            proposed: None,
        }
    }
}

pub struct MentionController {
    config: MentionConfig,
    options: Vec<MentionOption>,
    /// Last list the host handed us. Never modified here.
    selected: Vec<String>,
    buffer: TextBuffer,
    query: QueryState,
    /// End of the typed query in the field text, while open. Caret moves and
    /// search-box edits leave it alone.
    mention_end: Option<usize>,
    scheduler: MeasureScheduler,
    reflow: ReflowHub,
    subscription: Option<ReflowSubscription>,
    geometry: MenuGeometry,
    rendered_menu_size: Option<Size>,
    on_change: Option<ChangeCallback>,
}

impl MentionController {
    pub fn new(config: MentionConfig, options: Vec<MentionOption>) -> Self {
        let scheduler = MeasureScheduler::new(config.menu.defer_frames);
        Self {
            config,
            options,
            selected: Vec::new(),
            buffer: TextBuffer::new(),
            query: QueryState::default(),
            mention_end: None,
            scheduler,
            reflow: ReflowHub::new(),
            subscription: None,
            geometry: MenuGeometry::default(),
            rendered_menu_size: None,
            on_change: None,
        }
    }

    // ---- host inputs -------------------------------------------------------

    pub fn set_on_change(&mut self, f: impl FnMut(Vec<String>) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    pub fn set_options(&mut self, options: Vec<MentionOption>) {
        self.options = options;
        self.clamp_active();
    }

    /// The host's controlled selected list.
    pub fn set_selected(&mut self, selected: Vec<String>) {
        if self.selected != selected {
            self.selected = selected;
            self.clamp_active();
        }
    }

    /// A handle hosts use to report resize, scroll and caret moves.
    pub fn reflow_hub(&self) -> ReflowHub {
        self.reflow.clone()
    }

    // ---- outputs -----------------------------------------------------------

    pub fn config(&self) -> &MentionConfig {
        &self.config
    }

    pub fn options(&self) -> &[MentionOption] {
        &self.options
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn value(&self) -> &str {
        self.buffer.value()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.caret()
    }

    pub fn query(&self) -> &str {
        self.query.query()
    }

    pub fn is_open(&self) -> bool {
        self.query.is_open()
    }

    pub fn active_index(&self) -> usize {
        self.query.active_index()
    }

    pub fn trigger_offset(&self) -> Option<usize> {
        self.query.trigger_offset()
    }

    pub fn geometry(&self) -> MenuGeometry {
        self.geometry
    }

    pub fn unselected_options(&self) -> Vec<&MentionOption> {
        unselected(&self.options, &self.selected)
    }

    pub fn filtered_options(&self) -> Vec<&MentionOption> {
        filter_options(&self.options, &self.selected, self.query.query())
    }

    /// The highlighted row, if the menu is open and has one.
    pub fn active_option(&self) -> Option<&MentionOption> {
        if !self.is_open() {
            return None;
        }
        self.filtered_options().get(self.active_index()).copied()
    }

    /// Inline quick-add candidates: the first unselected options, regardless
    /// of the query.
    pub fn suggestions(&self) -> Vec<&MentionOption> {
        if !self.config.show_suggestions {
            return Vec::new();
        }
        let limit = self.config.suggestion_limit.unwrap_or(usize::MAX);
        let mut out = self.unselected_options();
        out.truncate(limit);
        out
    }

    /// Selected options in selected order. Ids missing from the catalog are
    /// skipped.
    pub fn badges(&self) -> Vec<&MentionOption> {
        self.selected
            .iter()
            .filter_map(|id| {
                let found = self.options.iter().find(|o| &o.value == id);
                if found.is_none() {
                    log::debug!(target: "mention.selection", "selected id {id:?} not in catalog");
                }
                found
            })
            .collect()
    }

    // ---- handlers ----------------------------------------------------------

    /// The field's text changed (typing, paste, host-side edit).
    pub fn handle_text_change(&mut self, text: impl Into<String>, cursor: usize) {
        self.buffer.set_value(text.into(), cursor);
        self.retokenize();
    }

    /// Apply an edit to the owned buffer and react to it.
    ///
    /// A caret move that leaves the open mention closes the menu; one that
    /// stays inside it keeps the query and re-measures.
    pub fn apply_edit(&mut self, cmd: EditCommand) -> EditOutcome {
        let out = self.buffer.apply(cmd);
        if out.text_changed {
            self.retokenize();
        } else if out.caret_moved && self.is_open() {
            if self.caret_in_mention() {
                self.reflow.notify(ReflowKind::SelectionChange);
            } else {
                log::trace!(target: "mention.nav", "caret left the mention");
                self.close();
            }
        }
        out
    }

    /// Keep the caret visible inside a field `available_w` px wide.
    pub fn update_field_scroll(&mut self, caret_px: f32, text_w: f32, available_w: f32) {
        let before = self.buffer.scroll_x();
        self.buffer.update_scroll_for_caret(caret_px, text_w, available_w);
        if self.buffer.scroll_x() != before && self.is_open() {
            self.reflow.notify(ReflowKind::Scroll);
        }
    }

    pub fn handle_key_down(&mut self, key: MentionKey) -> KeyOutcome {
        if key == MentionKey::Backspace {
            if !self.buffer.value().trim().is_empty() {
                return KeyOutcome::default();
            }
            let Some(next) = removed_last(&self.selected) else {
                return KeyOutcome::default();
            };
            log::trace!(target: "mention.selection", "backspace on empty field drops last");
            self.emit(next.clone());
            return KeyOutcome {
                handled: true,
                proposed: Some(next),
            };
        }

        if !self.is_open() {
            return KeyOutcome::default();
        }

        match key {
            MentionKey::ArrowDown => {
                let len = self.filtered_options().len();
                self.query.step(Step::Next, len, self.config.wrap_navigation);
                KeyOutcome::handled()
            }
            MentionKey::ArrowUp => {
                let len = self.filtered_options().len();
                self.query.step(Step::Prev, len, self.config.wrap_navigation);
                KeyOutcome::handled()
            }
            MentionKey::Enter => {
                let id = self.active_option().map(|o| o.value.clone());
                match id {
                    Some(id) => KeyOutcome {
                        handled: true,
                        proposed: self.select(&id),
                    },
                    None => {
                        self.close();
                        KeyOutcome::handled()
                    }
                }
            }
            MentionKey::Escape => {
                self.close();
                KeyOutcome::handled()
            }
            MentionKey::Backspace | MentionKey::Other => KeyOutcome::default(),
        }
    }

    /// The menu's search box was edited. The field text is left alone.
    pub fn handle_search_change(&mut self, query: &str) {
        if !self.is_open() {
            log::debug!(target: "mention.nav", "search change while closed ignored");
            return;
        }
        let t = self.query.set_query(query);
        self.after_transition(t);
    }

    /// Highlight row `index` (pointer hover). Clamped to the filtered list.
    pub fn set_active_index(&mut self, index: usize) {
        if self.is_open() {
            let len = self.filtered_options().len();
            self.query.set_active(index, len);
        }
    }

    /// Commit the option with id `id`: propose the appended list, reconcile
    /// the field text and close the menu. Returns the proposal, or `None` if
    /// the id is unknown or already selected.
    pub fn select(&mut self, id: &str) -> Option<Vec<String>> {
        if !self.options.iter().any(|o| o.value == id) {
            log::debug!(target: "mention.selection", "select of unknown id {id:?} ignored");
            return None;
        }

        let next = appended(&self.selected, id);
        let (text, caret) = reconcile_text(
            self.buffer.value(),
            self.mention_span(),
            self.buffer.caret(),
            self.config.commit_mode,
        );
        self.buffer.set_value(text, caret);
        self.close();

        log::trace!(target: "mention.selection", "commit {id:?}");
        if let Some(next) = &next {
            self.emit(next.clone());
        }
        next
    }

    /// Propose the selected list without `id`.
    pub fn remove(&mut self, id: &str) -> Vec<String> {
        let next = removed(&self.selected, id);
        self.emit(next.clone());
        next
    }

    /// Pointer or focus left both the field and the menu.
    pub fn dismiss(&mut self) {
        self.close();
    }

    // ---- measurement -------------------------------------------------------

    /// The host's last rendered menu size. Placement never uses less than
    /// the configured box, but grows to fit this.
    pub fn report_menu_size(&mut self, size: Size) {
        let changed = self.rendered_menu_size.is_none_or(|prev| {
            (prev.width - size.width).abs() > 0.5 || (prev.height - size.height).abs() > 0.5
        });
        if changed {
            self.rendered_menu_size = Some(size);
            if self.is_open() {
                self.scheduler.request();
            }
        }
    }

    /// Size handed to placement: configured size, grown to the rendered one.
    pub fn menu_box_size(&self) -> Size {
        let configured = self.config.menu.size();
        match self.rendered_menu_size {
            Some(r) => Size::new(configured.width.max(r.width), configured.height.max(r.height)),
            None => configured,
        }
    }

    /// Phase one, once per frame: fold in reflow events and return a ticket
    /// if a measurement is due now.
    pub fn take_due_measurement(&mut self) -> Option<MeasureTicket> {
        if !self.is_open() {
            return None;
        }
        if self.subscription.as_ref().is_some_and(|s| s.take_dirty()) {
            self.scheduler.request();
        }
        self.scheduler.on_frame()
    }

    /// Compute where the menu goes for the current state. Pure with respect
    /// to the controller; the mirror is attached and detached inside.
    pub fn measure(&self, input: &mut MeasureInput<'_>) -> Result<MenuGeometry, MeasureError> {
        if !self.is_open() {
            return Err(MeasureError::Closed);
        }
        let offset = self.query.trigger_offset().unwrap_or(self.buffer.caret());
        let dx = caret_offset_from_left(input.field, offset, &mut *input.mirror_host)?;
        let anchor = input
            .field
            .and_then(|f| f.bounding_rect())
            .ok_or(CaretError::Unmounted)?;
        let placement = place(
            anchor,
            dx,
            self.menu_box_size(),
            input.viewport,
            &self.config.menu.placement(),
        );
        Ok(placement.into())
    }

    /// Phase two: apply a result, unless its ticket has been superseded or
    /// the menu closed meanwhile.
    pub fn apply_measurement(&mut self, ticket: MeasureTicket, geometry: MenuGeometry) -> bool {
        if !self.is_open() || !self.scheduler.is_current(ticket) {
            log::debug!(target: "mention.measure", "dropping stale measurement");
            return false;
        }
        self.geometry = geometry;
        true
    }

    /// Both phases in one call. A failed measurement (field not mounted,
    /// marker lost) is dropped and geometry is left as it was.
    pub fn poll_measurement(&mut self, input: &mut MeasureInput<'_>) -> Option<MenuGeometry> {
        let ticket = self.take_due_measurement()?;
        match self.measure(input) {
            Ok(g) => self.apply_measurement(ticket, g).then_some(self.geometry),
            Err(err) => {
                log::debug!(target: "mention.measure", "measurement aborted: {err}");
                None
            }
        }
    }

    /// Whether a measurement is waiting for its frame.
    pub fn measurement_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    // ---- internals ---------------------------------------------------------

    fn retokenize(&mut self) {
        let trigger = self.config.trigger;
        let t = match detect_trigger(self.buffer.value(), self.buffer.caret(), trigger) {
            Some(m) => {
                self.mention_end = Some(m.trigger_offset + trigger.len_utf8() + m.query.len());
                self.query.open_at(m.trigger_offset, &m.query)
            }
            None => self.query.close(),
        };
        self.after_transition(t);
    }

    /// Trigger plus typed query, while open.
    fn mention_span(&self) -> Option<Range<usize>> {
        let start = self.query.trigger_offset().filter(|_| self.is_open())?;
        let end = self.mention_end?;
        Some(start..end)
    }

    fn caret_in_mention(&self) -> bool {
        let caret = self.buffer.caret();
        self.mention_span()
            .is_some_and(|span| caret > span.start && caret <= span.end)
    }

    fn close(&mut self) {
        let t = self.query.close();
        self.after_transition(t);
    }

    fn after_transition(&mut self, t: Transition) {
        if t.opened {
            self.geometry = MenuGeometry::default();
            self.subscription = Some(self.reflow.subscribe(&ReflowKind::ALL));
            self.scheduler.request();
        } else if t.closed {
            self.mention_end = None;
            self.scheduler.cancel();
            self.subscription = None;
            self.geometry.visible = false;
        } else if self.is_open() {
            self.scheduler.request();
        }
    }

    fn clamp_active(&mut self) {
        if self.is_open() {
            let len = self.filtered_options().len();
            self.query.clamp(len);
        }
    }

    fn emit(&mut self, next: Vec<String>) {
        match self.on_change.as_mut() {
            Some(cb) => cb(next),
            None => log::debug!(target: "mention.selection", "no change callback set"),
        }
    }
}

impl std::fmt::Debug for MentionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionController")
            .field("value", &self.buffer.value())
            .field("query", &self.query)
            .field("selected", &self.selected)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller() -> (MentionController, Rc<RefCell<Vec<Vec<String>>>>) {
        let mut c = MentionController::new(
            MentionConfig::default(),
            vec![
                MentionOption::new("alice", "Alice"),
                MentionOption::new("bob", "Bob"),
                MentionOption::new("carol", "Carol"),
            ],
        );
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        c.set_on_change(move |next| sink.borrow_mut().push(next));
        (c, log)
    }

    #[test]
    fn typing_trigger_opens_with_index_zero() {
        let (mut c, _) = controller();
        c.handle_text_change("hi @", 4);
        assert!(c.is_open());
        assert_eq!(c.query(), "");
        assert_eq!(c.trigger_offset(), Some(3));
        assert_eq!(c.filtered_options().len(), 3);
        assert!(!c.geometry().visible);
    }

    #[test]
    fn invalid_trigger_closes() {
        let (mut c, _) = controller();
        c.handle_text_change("@a", 2);
        assert!(c.is_open());
        c.handle_text_change("x@a", 3);
        assert!(!c.is_open());
        assert_eq!(c.query(), "");
    }

    #[test]
    fn arrows_are_ignored_while_closed() {
        let (mut c, _) = controller();
        assert_eq!(c.handle_key_down(MentionKey::ArrowDown), KeyOutcome::default());
        assert_eq!(c.handle_key_down(MentionKey::Escape), KeyOutcome::default());
    }

    #[test]
    fn enter_with_no_rows_just_closes() {
        let (mut c, log) = controller();
        c.handle_text_change("@zzz", 4);
        assert!(c.filtered_options().is_empty());
        let out = c.handle_key_down(MentionKey::Enter);
        assert!(out.handled);
        assert_eq!(out.proposed, None);
        assert!(!c.is_open());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn escape_keeps_text() {
        let (mut c, _) = controller();
        c.handle_text_change("hey @bo", 7);
        c.handle_key_down(MentionKey::Escape);
        assert!(!c.is_open());
        assert_eq!(c.value(), "hey @bo");
    }

    #[test]
    fn backspace_on_non_empty_field_is_left_to_the_host() {
        let (mut c, log) = controller();
        c.set_selected(vec!["alice".into()]);
        c.handle_text_change("a", 1);
        assert_eq!(c.handle_key_down(MentionKey::Backspace), KeyOutcome::default());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn external_selected_update_clamps_index() {
        let (mut c, _) = controller();
        c.handle_text_change("@", 1);
        c.handle_key_down(MentionKey::ArrowDown);
        c.handle_key_down(MentionKey::ArrowDown);
        assert_eq!(c.active_index(), 2);
        c.set_selected(vec!["carol".into()]);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn unknown_select_is_ignored() {
        let (mut c, log) = controller();
        c.handle_text_change("@a", 2);
        assert_eq!(c.select("mallory"), None);
        assert!(c.is_open());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn strip_commit_after_caret_move_removes_whole_mention() {
        let (mut c, log) = controller();
        c.config.commit_mode = crate::config::CommitMode::StripMention;
        c.handle_text_change("hi @bob", 7);
        c.apply_edit(EditCommand::CaretLeft { selecting: false });
        c.apply_edit(EditCommand::CaretLeft { selecting: false });
        assert!(c.is_open());
        assert_eq!(c.query(), "bob");
        assert_eq!(c.cursor(), 5);

        c.handle_key_down(MentionKey::Enter);
        assert_eq!(c.value(), "hi ");
        assert_eq!(c.cursor(), 3);
        assert_eq!(*log.borrow(), vec![vec!["bob".to_string()]]);
    }

    #[test]
    fn strip_commit_after_search_edit_keeps_following_text() {
        let (mut c, _) = controller();
        c.config.commit_mode = crate::config::CommitMode::StripMention;
        c.handle_text_change("@b tail", 2);
        c.handle_search_change("carol");
        c.handle_key_down(MentionKey::Enter);
        assert_eq!(c.value(), " tail");
    }

    #[test]
    fn caret_leaving_the_mention_closes() {
        let (mut c, _) = controller();
        c.handle_text_change("hi @al", 6);
        c.apply_edit(EditCommand::CaretLeft { selecting: false });
        assert!(c.is_open());
        c.apply_edit(EditCommand::CaretHome { selecting: false });
        assert!(!c.is_open());
        assert_eq!(c.value(), "hi @al");
    }

    #[test]
    fn key_names() {
        assert_eq!(MentionKey::from_key_name("ArrowDown"), MentionKey::ArrowDown);
        assert_eq!(MentionKey::from_key_name("Esc"), MentionKey::Escape);
        assert_eq!(MentionKey::from_key_name("a"), MentionKey::Other);
    }
}
