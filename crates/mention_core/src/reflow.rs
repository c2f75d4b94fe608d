//! Re-measurement triggers.
//!
//! While the menu is open its position depends on things that change without
//! any text edit: the viewport is resized, something scrolls, or the caret
//! moves. The host reports those through a [`ReflowHub`]; the controller only
//! listens while open, through a [`ReflowSubscription`] that unregisters
//! itself when dropped.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReflowKind {
    Resize,
    /// Any scroll, at any depth (window or ancestor container).
    Scroll,
    /// Caret or selection moved without a text change.
    SelectionChange,
}

impl ReflowKind {
    pub const ALL: [ReflowKind; 3] = [
        ReflowKind::Resize,
        ReflowKind::Scroll,
        ReflowKind::SelectionChange,
    ];
}

#[derive(Default)]
struct Listener {
    id: u64,
    kinds: Vec<ReflowKind>,
    dirty: bool,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Shared, single-threaded event fan-in. Cloning yields another handle to the
/// same hub.
#[derive(Clone, Default)]
pub struct ReflowHub {
    inner: Rc<RefCell<HubState>>,
}

impl ReflowHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for `kinds`. The registration lives as long as the returned
    /// subscription.
    pub fn subscribe(&self, kinds: &[ReflowKind]) -> ReflowSubscription {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push(Listener {
            id,
            kinds: kinds.to_vec(),
            dirty: false,
        });
        log::trace!(target: "mention.reflow", "listen #{id} {kinds:?}");
        ReflowSubscription {
            hub: self.clone(),
            id,
        }
    }

    /// Host side: something happened. Marks every interested listener dirty.
    pub fn notify(&self, kind: ReflowKind) {
        let mut state = self.inner.borrow_mut();
        for l in state.listeners.iter_mut().filter(|l| l.kinds.contains(&kind)) {
            l.dirty = true;
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn take_dirty(&self, id: u64) -> bool {
        let mut state = self.inner.borrow_mut();
        state
            .listeners
            .iter_mut()
            .find(|l| l.id == id)
            .is_some_and(|l| std::mem::take(&mut l.dirty))
    }

    fn unlisten(&self, id: u64) {
        let mut state = self.inner.borrow_mut();
        state.listeners.retain(|l| l.id != id);
        log::trace!(target: "mention.reflow", "unlisten #{id}");
    }
}

impl std::fmt::Debug for ReflowHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflowHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// A live registration on a [`ReflowHub`].
#[derive(Debug)]
pub struct ReflowSubscription {
    hub: ReflowHub,
    id: u64,
}

impl ReflowSubscription {
    /// True if a matching event arrived since the last call.
    pub fn take_dirty(&self) -> bool {
        self.hub.take_dirty(self.id)
    }
}

impl Drop for ReflowSubscription {
    fn drop(&mut self) {
        self.hub.unlisten(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_marks_only_interested_listeners() {
        let hub = ReflowHub::new();
        let scroll = hub.subscribe(&[ReflowKind::Scroll]);
        let all = hub.subscribe(&ReflowKind::ALL);

        hub.notify(ReflowKind::Resize);
        assert!(!scroll.take_dirty());
        assert!(all.take_dirty());
        assert!(!all.take_dirty());

        hub.notify(ReflowKind::Scroll);
        assert!(scroll.take_dirty());
    }

    #[test]
    fn dropping_unregisters() {
        let hub = ReflowHub::new();
        {
            let _a = hub.subscribe(&ReflowKind::ALL);
            let _b = hub.subscribe(&[ReflowKind::Resize]);
            assert_eq!(hub.listener_count(), 2);
        }
        assert_eq!(hub.listener_count(), 0);
        // Notifying an empty hub is a no-op.
        hub.notify(ReflowKind::Scroll);
    }

    #[test]
    fn early_return_still_unregisters() {
        fn listen_then_bail(hub: &ReflowHub) -> Result<(), ()> {
            let _sub = hub.subscribe(&ReflowKind::ALL);
            Err(())
        }
        let hub = ReflowHub::new();
        assert!(listen_then_bail(&hub).is_err());
        assert_eq!(hub.listener_count(), 0);
    }
}
