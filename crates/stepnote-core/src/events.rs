use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pedometer::Availability;

/// Every observable state change in the system produces an Event.
/// The CLI prints them; a GUI would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The cumulative step count advanced.
    StepsUpdated {
        step_count: u32,
        at: DateTime<Utc>,
    },
    /// The pedometer availability probe resolved.
    AvailabilityChanged {
        availability: Availability,
        at: DateTime<Utc>,
    },
    /// A milestone threshold was reached for the first time and its
    /// prompt is now being presented. At most one of these is in flight
    /// at any instant.
    MilestoneCrossed {
        steps: u32,
        message: String,
        step_count: u32,
        at: DateTime<Utc>,
    },
    /// The user dismissed the active milestone prompt without writing.
    PromptDeclined {
        steps: u32,
        at: DateTime<Utc>,
    },
    /// The user accepted the active milestone prompt; a note stub was
    /// handed off to the editor surface.
    PromptAccepted {
        steps: u32,
        note_id: String,
        at: DateTime<Utc>,
    },
}
