pub mod config;
pub mod milestone;
pub mod note;
pub mod prompt;
pub mod steps;

use stepnote_core::storage::{Config, Database};
use stepnote_core::{MilestoneEngine, NoteHandoff, NoteStub};

/// kv key for the persisted milestone engine.
pub const ENGINE_KEY: &str = "milestone_engine";

/// kv key for the one-shot pending note hand-off.
pub const PENDING_NOTE_KEY: &str = "pending_note";

/// kv key for the step feed availability status.
pub const AVAILABILITY_KEY: &str = "feed_availability";

/// Load the persisted engine, or build a fresh one from the configured
/// milestone table.
pub fn load_engine(db: &Database, config: &Config) -> Result<MilestoneEngine, Box<dyn std::error::Error>> {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<MilestoneEngine>(&json) {
            return Ok(engine);
        }
    }
    let table = config.milestone_table()?;
    Ok(MilestoneEngine::new(table))
}

pub fn save_engine(db: &Database, engine: &MilestoneEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

/// Note hand-off backed by the kv store: the accepted stub waits under
/// [`PENDING_NOTE_KEY`] until `note edit` consumes it exactly once.
pub struct StoredHandoff<'a> {
    db: &'a Database,
}

impl<'a> StoredHandoff<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl NoteHandoff for StoredHandoff<'_> {
    fn deliver(&mut self, stub: NoteStub) {
        // Fire-and-forget per the hand-off contract; a storage failure is
        // logged, never propagated to the engine.
        match serde_json::to_string(&stub) {
            Ok(json) => {
                if let Err(e) = self.db.kv_set(PENDING_NOTE_KEY, &json) {
                    eprintln!("handoff: failed to store pending note: {e}");
                }
            }
            Err(e) => eprintln!("handoff: failed to serialize pending note: {e}"),
        }
    }
}

/// Consume the pending note, if one is waiting.
pub fn take_pending_note(db: &Database) -> Result<Option<NoteStub>, Box<dyn std::error::Error>> {
    match db.kv_take(PENDING_NOTE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
