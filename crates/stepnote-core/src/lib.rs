//! # Stepnote Core Library
//!
//! This library provides the core business logic for Stepnote, a step-count
//! journaling app: users capture short notes, view them in a grid, and are
//! nudged to reflect whenever their step count crosses a milestone.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary; any GUI is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Milestone Engine**: A stateful stream processor over a cumulative
//!   step-count feed. It deduplicates milestone crossings exactly once each
//!   and serializes user prompts through a gate so at most one is visible
//!   at a time, even when a single burst crosses several thresholds.
//! - **Step Feed**: Contract for the underlying pedometer, with a
//!   deterministic simulated feed for tests and the CLI.
//! - **Storage**: SQLite-based note storage and TOML-based configuration.
//! - **Handoff**: One-shot delivery of a proposed note to the editor surface.
//!
//! ## Key Components
//!
//! - [`MilestoneEngine`]: Tracker + prompt gate composition
//! - [`StepFeed`]: Pedometer contract
//! - [`Database`]: Note and key-value persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod handoff;
pub mod milestone;
pub mod note;
pub mod pedometer;
pub mod prompts;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, FeedError, ValidationError};
pub use events::Event;
pub use handoff::{NoteHandoff, PendingNote};
pub use milestone::{
    Accepted, ActivePrompt, EngineSnapshot, GateState, Milestone, MilestoneEngine,
    MilestoneTable, MilestoneTracker, PromptGate,
};
pub use note::NoteStub;
pub use pedometer::{Availability, SimulatedFeed, StepFeed, StepReading, Subscription};
pub use prompts::PromptBank;
pub use storage::{Config, Database};
