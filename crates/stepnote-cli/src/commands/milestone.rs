use clap::Subcommand;
use serde::Serialize;
use stepnote_core::storage::{Config, Database};
use stepnote_core::{NoteHandoff, NoteStub};

use super::{load_engine, save_engine, StoredHandoff};

#[derive(Subcommand)]
pub enum MilestoneAction {
    /// Show the milestone table with achieved markers
    List,
    /// Show the active prompt and achieved set
    Status,
    /// Decline the active milestone prompt
    Decline,
    /// Accept the active milestone prompt; the proposed note waits for `note edit`
    Accept,
}

#[derive(Serialize)]
struct MilestoneRow<'a> {
    steps: u32,
    message: &'a str,
    achieved: bool,
}

#[derive(Serialize)]
struct AcceptOutput {
    note: NoteStub,
    events: Vec<stepnote_core::Event>,
}

pub fn run(action: MilestoneAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut engine = load_engine(&db, &config)?;

    match action {
        MilestoneAction::List => {
            let rows: Vec<MilestoneRow<'_>> = engine
                .tracker()
                .table()
                .iter()
                .map(|m| MilestoneRow {
                    steps: m.steps,
                    message: &m.message,
                    achieved: engine.tracker().is_achieved(m.steps),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        MilestoneAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        MilestoneAction::Decline => {
            let events = engine.decline();
            if events.is_empty() {
                eprintln!("no active milestone prompt");
            }
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
            save_engine(&db, &engine)?;
        }
        MilestoneAction::Accept => {
            match engine.accept() {
                Some(accepted) => {
                    StoredHandoff::new(&db).deliver(accepted.note.clone());
                    let output = AcceptOutput {
                        note: accepted.note,
                        events: accepted.events,
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                None => eprintln!("no active milestone prompt"),
            }
            save_engine(&db, &engine)?;
        }
    }
    Ok(())
}
