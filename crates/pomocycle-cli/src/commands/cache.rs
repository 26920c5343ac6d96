use std::io::{self, BufRead, Write};

use pomocycle_core::storage::clear_all;
use pomocycle_core::{Config, Database};

/// Reset settings to defaults and delete every note.
pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes && !confirm()? {
        println!("Aborted.");
        return Ok(());
    }
    let db = Database::open()?;
    let removed = clear_all(&Config::path()?, &db)?;
    println!("Cleared all data ({removed} notes removed)");
    Ok(())
}

fn confirm() -> io::Result<bool> {
    print!("Are you sure you want to clear all data? This will reset your settings and delete all notes. [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
