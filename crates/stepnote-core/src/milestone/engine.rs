//! Milestone engine: tracker + gate composition.
//!
//! The engine is a single-threaded stream processor. Feed callbacks call
//! [`MilestoneEngine::observe`]; user taps call [`MilestoneEngine::decline`]
//! or [`MilestoneEngine::accept`]. Both user choices release the gate and
//! immediately re-scan against the last known step count, so a milestone
//! crossed during the busy window surfaces without waiting for a new
//! sensor tick.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::note::NoteStub;

use super::gate::{ActivePrompt, GateState, PromptGate};
use super::table::MilestoneTable;
use super::tracker::MilestoneTracker;

/// Result of accepting a milestone prompt: the proposed note stub plus
/// any events produced, including a possible immediate follow-up crossing.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub note: NoteStub,
    pub events: Vec<Event>,
}

/// Point-in-time view of the engine, for status displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub step_count: u32,
    pub next_milestone: Option<u32>,
    pub steps_to_next: Option<u32>,
    pub achieved: Vec<u32>,
    pub gate: GateState,
    pub active_prompt: Option<ActivePrompt>,
}

/// The core stateful engine over the step stream.
///
/// Serializable so a host can persist it between callback deliveries (the
/// CLI stores it in the kv store between invocations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneEngine {
    tracker: MilestoneTracker,
    gate: PromptGate,
}

impl Default for MilestoneEngine {
    fn default() -> Self {
        Self::new(MilestoneTable::default())
    }
}

impl MilestoneEngine {
    pub fn new(table: MilestoneTable) -> Self {
        Self {
            tracker: MilestoneTracker::new(table),
            gate: PromptGate::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn steps(&self) -> u32 {
        self.tracker.steps()
    }

    pub fn tracker(&self) -> &MilestoneTracker {
        &self.tracker
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn active_prompt(&self) -> Option<&ActivePrompt> {
        self.gate.active()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            step_count: self.tracker.steps(),
            next_milestone: self
                .tracker
                .table()
                .next_after(self.tracker.steps())
                .map(|m| m.steps),
            steps_to_next: self.tracker.steps_to_next(),
            achieved: self.tracker.achieved().iter().copied().collect(),
            gate: self.gate.state(),
            active_prompt: self.gate.active().cloned(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Ingest a cumulative step reading.
    ///
    /// Emits `StepsUpdated` when the count advances, followed by at most
    /// one `MilestoneCrossed`. Crossings found while a prompt is already
    /// showing are neither recorded nor surfaced; they are re-detected
    /// once the gate frees up.
    pub fn observe(&mut self, reading: i64) -> Vec<Event> {
        let before = self.tracker.steps();
        self.tracker.observe(reading);

        let mut events = Vec::new();
        if self.tracker.steps() != before {
            events.push(Event::StepsUpdated {
                step_count: self.tracker.steps(),
                at: Utc::now(),
            });
        }
        events.extend(self.scan());
        events
    }

    /// Dismiss the active prompt without creating a note.
    ///
    /// The released gate triggers an immediate re-scan, so the next
    /// pending crossing (if any) surfaces in the returned events. Returns
    /// nothing when no prompt is active.
    pub fn decline(&mut self) -> Vec<Event> {
        let Some(prompt) = self.gate.release() else {
            return Vec::new();
        };
        let mut events = vec![Event::PromptDeclined {
            steps: prompt.steps,
            at: Utc::now(),
        }];
        events.extend(self.scan());
        events
    }

    /// Accept the active prompt: build the proposed note stub, release the
    /// gate, and re-scan. Returns `None` when no prompt is active.
    ///
    /// The milestone is considered spent here regardless of whether the
    /// note is ultimately saved; the engine never rolls back the achieved
    /// set on downstream persistence failures.
    pub fn accept(&mut self) -> Option<Accepted> {
        let prompt = self.gate.release()?;
        let now = Utc::now();
        let note = NoteStub::milestone(prompt.steps, now);

        let mut events = vec![Event::PromptAccepted {
            steps: prompt.steps,
            note_id: note.id.clone(),
            at: now,
        }];
        events.extend(self.scan());
        Some(Accepted { note, events })
    }

    /// Surface the lowest pending crossing if the gate is idle.
    ///
    /// The threshold is only marked achieved on the idle path; a busy gate
    /// leaves it pending so no milestone is ever dropped under bursts.
    fn scan(&mut self) -> Option<Event> {
        if self.gate.is_busy() {
            return None;
        }
        let crossing = self.tracker.pending_crossing()?.clone();
        self.tracker.mark_achieved(crossing.steps);
        self.gate.present(crossing.steps, crossing.message.clone());
        Some(Event::MilestoneCrossed {
            steps: crossing.steps,
            message: crossing.message,
            step_count: self.tracker.steps(),
            at: Utc::now(),
        })
    }
}
