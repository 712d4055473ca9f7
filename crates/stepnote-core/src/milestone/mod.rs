//! Milestone detection over the step-count stream.
//!
//! Three pieces compose into the engine:
//! - [`MilestoneTable`]: the ordered (threshold, message) table
//! - [`MilestoneTracker`]: achieved-set bookkeeping over readings
//! - [`PromptGate`]: at-most-one-visible-prompt serialization
//!
//! [`MilestoneEngine`] wires them together, including the re-scan that
//! runs whenever the gate transitions back to idle.

mod engine;
mod gate;
mod table;
mod tracker;

pub use engine::{Accepted, EngineSnapshot, MilestoneEngine};
pub use gate::{ActivePrompt, GateState, PromptGate};
pub use table::{Milestone, MilestoneTable};
pub use tracker::MilestoneTracker;
