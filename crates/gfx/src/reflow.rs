//! Turns frame-to-frame changes egui exposes into reflow notifications.

use egui::{Rect, Vec2};
use mention_core::{ReflowHub, ReflowKind};

/// Frame observations that affect where the menu belongs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameObservation {
    pub screen: Rect,
    /// Field rect in screen points; it moves when an ancestor scrolls.
    pub field: Rect,
    /// Wheel or touch scroll delivered this frame anywhere in the window.
    pub scroll_delta: Vec2,
}

/// Compares each frame with the previous one and reports resize and scroll
/// to a [`ReflowHub`]. Caret moves are reported by the controller itself.
#[derive(Debug, Default)]
pub struct FrameReflowSource {
    last: Option<FrameObservation>,
}

impl FrameReflowSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns what was reported, for tracing and tests.
    pub fn observe(&mut self, obs: FrameObservation, hub: &ReflowHub) -> Vec<ReflowKind> {
        let mut fired = Vec::new();
        if let Some(prev) = self.last {
            if prev.screen != obs.screen {
                fired.push(ReflowKind::Resize);
            }
            if prev.field.min != obs.field.min || obs.scroll_delta != Vec2::ZERO {
                fired.push(ReflowKind::Scroll);
            }
        }
        self.last = Some(obs);

        for kind in &fired {
            log::trace!(target: "mention.reflow", "frame reports {kind:?}");
            hub.notify(*kind);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn obs(screen_w: f32, field_y: f32, scroll: f32) -> FrameObservation {
        FrameObservation {
            screen: Rect::from_min_size(Pos2::ZERO, Vec2::new(screen_w, 600.0)),
            field: Rect::from_min_size(Pos2::new(10.0, field_y), Vec2::new(200.0, 24.0)),
            scroll_delta: Vec2::new(0.0, scroll),
        }
    }

    #[test]
    fn first_frame_is_a_baseline() {
        let hub = ReflowHub::new();
        let mut src = FrameReflowSource::new();
        assert!(src.observe(obs(800.0, 10.0, 0.0), &hub).is_empty());
        assert!(src.observe(obs(800.0, 10.0, 0.0), &hub).is_empty());
    }

    #[test]
    fn resize_and_scroll_are_reported() {
        let hub = ReflowHub::new();
        let sub = hub.subscribe(&ReflowKind::ALL);
        let mut src = FrameReflowSource::new();
        src.observe(obs(800.0, 10.0, 0.0), &hub);

        assert_eq!(src.observe(obs(640.0, 10.0, 0.0), &hub), vec![ReflowKind::Resize]);
        assert!(sub.take_dirty());
        assert_eq!(src.observe(obs(640.0, -30.0, 0.0), &hub), vec![ReflowKind::Scroll]);
        assert_eq!(src.observe(obs(640.0, -30.0, 12.0), &hub), vec![ReflowKind::Scroll]);
        assert!(sub.take_dirty());
        assert!(!sub.take_dirty());
    }
}
