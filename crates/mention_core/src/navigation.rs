//! The Closed/Open state machine and the active (highlighted) index.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Direction of an arrow-key step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

/// What a transition did, so the caller knows which side effects to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub opened: bool,
    pub closed: bool,
    pub query_changed: bool,
}

/// `{ trigger_offset, query, is_open, active_index }`.
///
/// Invariant: `active_index` is 0 whenever the menu is closed, and callers
/// keep it below the filtered length with [`QueryState::clamp`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryState {
    state: MenuState,
    trigger_offset: Option<usize>,
    query: String,
    active_index: usize,
}

impl QueryState {
    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn trigger_offset(&self) -> Option<usize> {
        self.trigger_offset
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The tokenizer found a live trigger: open (or stay open) on it.
    /// The active index always goes back to the first row.
    pub fn open_at(&mut self, trigger_offset: usize, query: &str) -> Transition {
        let opened = self.state == MenuState::Closed;
        let query_changed = self.query != query;
        if opened {
            log::trace!(target: "mention.nav", "Closed -> Open at {trigger_offset}");
        }
        self.state = MenuState::Open;
        self.trigger_offset = Some(trigger_offset);
        if query_changed {
            self.query.clear();
            self.query.push_str(query);
        }
        self.active_index = 0;
        Transition {
            opened,
            closed: false,
            query_changed,
        }
    }

    /// Back to Closed with an empty query. Idempotent.
    pub fn close(&mut self) -> Transition {
        let closed = self.state == MenuState::Open;
        if closed {
            log::trace!(target: "mention.nav", "Open -> Closed");
        }
        let query_changed = !self.query.is_empty();
        *self = Self::default();
        Transition {
            opened: false,
            closed,
            query_changed,
        }
    }

    /// Replace the query from the menu's search box. The trigger offset and
    /// open state are left alone.
    pub fn set_query(&mut self, query: &str) -> Transition {
        let query_changed = self.query != query;
        if query_changed {
            self.query.clear();
            self.query.push_str(query);
        }
        self.active_index = 0;
        Transition {
            query_changed,
            ..Transition::default()
        }
    }

    /// Move the highlight over a list of `len` rows. Clamps at the ends
    /// unless `wrap` is set. Returns whether the index moved.
    pub fn step(&mut self, step: Step, len: usize, wrap: bool) -> bool {
        if len == 0 {
            self.active_index = 0;
            return false;
        }
        let last = len - 1;
        let cur = self.active_index.min(last);
        let next = match (step, wrap) {
            (Step::Next, false) => (cur + 1).min(last),
            (Step::Prev, false) => cur.saturating_sub(1),
            (Step::Next, true) => (cur + 1) % len,
            (Step::Prev, true) => (cur + len - 1) % len,
        };
        let moved = next != self.active_index;
        self.active_index = next;
        log::trace!(target: "mention.nav", "{step:?} -> {next} of {len}");
        moved
    }

    /// Set the highlight directly (pointer hover). Out-of-range indices clamp.
    pub fn set_active(&mut self, index: usize, len: usize) {
        self.active_index = index.min(len.saturating_sub(1));
    }

    /// Pull the index back into `0..len` (or to 0 when `len` is 0).
    pub fn clamp(&mut self, len: usize) {
        self.active_index = self.active_index.min(len.saturating_sub(1));
    }
}
