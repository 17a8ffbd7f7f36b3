use crate::error::Result;
use crate::models::Flashcard;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "flashcards.json";

/// Two-space indented JSON.
pub fn serialize_cards(cards: &[Flashcard]) -> Result<String> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Write `flashcards.json` into `dir`, returning the final path.
///
/// The payload goes to a transient sibling first and is renamed into place, so
/// an interrupted write never leaves a truncated `flashcards.json` behind.
pub fn export_cards(dir: &Path, cards: &[Flashcard]) -> Result<PathBuf> {
    let contents = serialize_cards(cards)?;

    fs::create_dir_all(dir)?;
    let target = dir.join(EXPORT_FILE_NAME);
    let transient = dir.join(format!(".{}.partial", EXPORT_FILE_NAME));

    if let Err(e) = fs::write(&transient, contents.as_bytes()) {
        fs::remove_file(&transient).ok();
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&transient, &target) {
        fs::remove_file(&transient).ok();
        return Err(e.into());
    }

    Ok(target)
}
