use clap::Subcommand;
use pomocycle_core::Database;

#[derive(Subcommand)]
pub enum NotesAction {
    /// Add a note
    Add {
        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List notes, oldest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a note by id
    Remove {
        /// Note id
        id: i64,
    },
    /// Remove all notes
    Clear,
}

pub fn run(action: NotesAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        NotesAction::Add { text } => {
            let note = db.add_note(&text.join(" "))?;
            println!("Note added: {}", note.id);
        }
        NotesAction::List { json } => {
            let notes = db.list_notes()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("No notes.");
            } else {
                for note in notes {
                    println!(
                        "{:>4}  {}  {}",
                        note.id,
                        note.created_at.format("%Y-%m-%d %H:%M"),
                        note.text
                    );
                }
            }
        }
        NotesAction::Remove { id } => {
            if !db.remove_note(id)? {
                return Err(format!("note not found: {id}").into());
            }
            println!("Note removed: {id}");
        }
        NotesAction::Clear => {
            let removed = db.clear_notes()?;
            println!("Removed {removed} notes");
        }
    }
    Ok(())
}
