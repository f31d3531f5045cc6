use crate::scraper::ScraperError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverwriteDecision {
    Overwrite,
    /// Write somewhere else instead; the new path is checked again.
    Rename(PathBuf),
    Cancel,
}

/// Asked whenever a dump target already exists.
pub trait OverwritePrompt {
    fn on_existing(&mut self, path: &Path) -> Result<OverwriteDecision, ScraperError>;
}

/// Writes `text` to `path` without ever replacing a file the prompt did
/// not approve. Returns where the text ended up, or `None` if cancelled.
pub fn dump_page_text(
    text: &str,
    path: &Path,
    prompt: &mut dyn OverwritePrompt,
) -> Result<Option<PathBuf>, ScraperError> {
    let mut target = path.to_path_buf();

    while target.exists() {
        match prompt.on_existing(&target)? {
            OverwriteDecision::Overwrite => break,
            OverwriteDecision::Rename(other) => target = other,
            OverwriteDecision::Cancel => {
                info!("Dump to {} cancelled", path.display());
                return Ok(None);
            }
        }
    }

    fs::write(&target, text)?;
    info!("Page text written to {}", target.display());

    Ok(Some(target))
}
