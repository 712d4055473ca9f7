//! Hand-off of proposed notes to the editing surface.
//!
//! When a milestone prompt is accepted the engine produces a [`NoteStub`]
//! and hands it off exactly once. The receiving surface pre-populates its
//! editor with the stub; persistence failures downstream are its concern,
//! never the engine's.

use crate::note::NoteStub;

/// External collaborator contract: deliver a proposed note stub to the
/// note-editing surface. Fire-and-forget; no failure is surfaced back.
pub trait NoteHandoff {
    fn deliver(&mut self, stub: NoteStub);
}

/// One-shot cross-surface parameter slot.
///
/// The editor consumes the stub exactly once via [`PendingNote::take`];
/// re-reads (e.g. a surface re-rendering with the same parameter) see
/// nothing and must not re-trigger note creation.
#[derive(Debug, Clone, Default)]
pub struct PendingNote {
    slot: Option<NoteStub>,
}

impl PendingNote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, stub: NoteStub) {
        self.slot = Some(stub);
    }

    /// Consume the pending stub. Subsequent calls return `None` until a
    /// new stub is delivered.
    pub fn take(&mut self) -> Option<NoteStub> {
        self.slot.take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

impl NoteHandoff for PendingNote {
    fn deliver(&mut self, stub: NoteStub) {
        self.set(stub);
    }
}
