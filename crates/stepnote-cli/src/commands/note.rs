use clap::Subcommand;
use stepnote_core::note::PALETTE;
use stepnote_core::storage::{Config, Database};
use stepnote_core::NoteStub;

use super::take_pending_note;

#[derive(Subcommand)]
pub enum NoteAction {
    /// List all notes, newest first
    List {
        /// Print full JSON instead of the summary table
        #[arg(long)]
        json: bool,
    },
    /// Create a note directly
    Add {
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
        /// Card color (hex); defaults to the configured note color
        #[arg(long)]
        color: Option<String>,
        /// Attach a captured image by path
        #[arg(long)]
        image: Option<String>,
    },
    /// Print a single note as JSON
    Show { id: String },
    /// Delete a note
    Delete { id: String },
    /// Consume the pending milestone note, apply edits, and save it
    Edit {
        /// Replace the proposed title
        #[arg(long)]
        title: Option<String>,
        /// Fill in the note body
        #[arg(long)]
        content: Option<String>,
    },
}

pub fn run(action: NoteAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        NoteAction::List { json } => {
            let notes = db.list_notes()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else {
                for note in &notes {
                    let marker = if note.image_uri.is_some() { "[img] " } else { "" };
                    println!("{}  {}{}", note.id, marker, note.title);
                }
            }
        }
        NoteAction::Add {
            title,
            content,
            color,
            image,
        } => {
            let config = Config::load_or_default();
            let color = color.unwrap_or(config.notes.default_color);
            if !PALETTE.contains(&color.as_str()) {
                eprintln!("note: color {color} is not in the fixed palette");
            }
            let mut note = NoteStub::new(title, content, &color);
            note.image_uri = image;
            db.insert_note(&note)?;
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
        NoteAction::Show { id } => match db.get_note(&id)? {
            Some(note) => println!("{}", serde_json::to_string_pretty(&note)?),
            None => return Err(format!("no note with id {id}").into()),
        },
        NoteAction::Delete { id } => {
            if db.delete_note(&id)? {
                println!("{{\"deleted\": \"{id}\"}}");
            } else {
                return Err(format!("no note with id {id}").into());
            }
        }
        NoteAction::Edit { title, content } => {
            // One-shot: the stub is gone after this read, so a repeated
            // edit cannot re-create the note.
            let Some(mut note) = take_pending_note(&db)? else {
                return Err("no pending note; accept a milestone prompt first".into());
            };
            if let Some(title) = title {
                note.title = title;
            }
            if let Some(content) = content {
                note.content = content;
            }
            db.insert_note(&note)?;
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
    }
    Ok(())
}
