//! Deferred menu measurement.
//!
//! Positions are only trustworthy once the host has laid out the frame the
//! menu first appears in, so measurement runs a few frames after it is
//! requested. Requests coalesce; a newer request or a cancel invalidates
//! every ticket handed out before it.

/// Proof that a measurement was due. Applying a result needs a ticket that is
/// still current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasureTicket {
    generation: u64,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    generation: u64,
    frames_left: u32,
}

#[derive(Debug)]
pub struct MeasureScheduler {
    defer_frames: u32,
    generation: u64,
    pending: Option<Pending>,
}

impl MeasureScheduler {
    pub fn new(defer_frames: u32) -> Self {
        Self {
            defer_frames: defer_frames.max(1),
            generation: 0,
            pending: None,
        }
    }

    /// Ask for a measurement. A request already waiting absorbs this one.
    pub fn request(&mut self) {
        if self.pending.is_some() {
            log::trace!(target: "mention.measure", "request coalesced");
            return;
        }
        self.generation += 1;
        self.pending = Some(Pending {
            generation: self.generation,
            frames_left: self.defer_frames,
        });
        log::trace!(target: "mention.measure", "request #{}", self.generation);
    }

    /// Drop the waiting request and invalidate any ticket in flight.
    /// Returns whether something was cancelled.
    pub fn cancel(&mut self) -> bool {
        let had_pending = self.pending.take().is_some();
        self.generation += 1;
        if had_pending {
            log::trace!(target: "mention.measure", "cancelled");
        }
        had_pending
    }

    /// Advance one frame. Yields a ticket when the waiting request is due.
    pub fn on_frame(&mut self) -> Option<MeasureTicket> {
        let pending = self.pending.as_mut()?;
        pending.frames_left = pending.frames_left.saturating_sub(1);
        if pending.frames_left > 0 {
            return None;
        }
        let generation = pending.generation;
        self.pending = None;
        Some(MeasureTicket { generation })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_current(&self, ticket: MeasureTicket) -> bool {
        ticket.generation == self.generation
    }
}
