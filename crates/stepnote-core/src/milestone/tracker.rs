//! Achieved-set bookkeeping over the step-count stream.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::table::{Milestone, MilestoneTable};

/// Stateful filter over cumulative step readings.
///
/// Owns the achieved set (monotonic: thresholds are added at most once and
/// never removed for the tracker's lifetime) and the last-seen step count.
/// The tracker never fails: negative or decreasing readings are treated as
/// out-of-order noise and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneTracker {
    table: MilestoneTable,
    achieved: BTreeSet<u32>,
    last_steps: u32,
}

impl MilestoneTracker {
    pub fn new(table: MilestoneTable) -> Self {
        Self {
            table,
            achieved: BTreeSet::new(),
            last_steps: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Last-seen cumulative step count.
    pub fn steps(&self) -> u32 {
        self.last_steps
    }

    pub fn table(&self) -> &MilestoneTable {
        &self.table
    }

    pub fn achieved(&self) -> &BTreeSet<u32> {
        &self.achieved
    }

    pub fn is_achieved(&self, steps: u32) -> bool {
        self.achieved.contains(&steps)
    }

    /// The lowest un-achieved milestone met by the last-seen step count,
    /// if any. Scanning in ascending order means a burst that crosses
    /// several thresholds surfaces the lowest one first.
    pub fn pending_crossing(&self) -> Option<&Milestone> {
        self.table
            .iter()
            .find(|m| self.last_steps >= m.steps && !self.achieved.contains(&m.steps))
    }

    /// Distance to the next milestone, for the stats display. Computed
    /// from the last-seen reading; informational only.
    pub fn steps_to_next(&self) -> Option<u32> {
        self.table.steps_to_next(self.last_steps)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Ingest a reading. Negative values and values below the last-seen
    /// count are ignored; the step count never moves backwards.
    pub fn observe(&mut self, reading: i64) {
        if reading < 0 {
            return;
        }
        let reading = u32::try_from(reading).unwrap_or(u32::MAX);
        if reading > self.last_steps {
            self.last_steps = reading;
        }
    }

    /// Record a threshold as achieved. Only thresholds the current step
    /// count has actually met are recorded; anything else is ignored so
    /// the achieved-set invariant cannot be violated by a caller bug.
    pub fn mark_achieved(&mut self, steps: u32) {
        if self.last_steps >= steps {
            self.achieved.insert(steps);
        }
    }
}
