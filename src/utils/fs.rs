//! Atomic file operations using a temp-and-rename strategy.
//!
//! Writes land in a temporary file in the target directory first and are
//! renamed into place once fully flushed, so an interrupted write never
//! leaves a truncated file behind.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Safely write a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`] for string content.
///
/// # Examples
///
/// ```rust,no_run
/// use distforge::utils::fs::safe_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// safe_write(Path::new("distforge.toml"), "[package]\nname = \"demo\"")?;
/// # Ok(())
/// # }
/// ```
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically write bytes to a file using a write-then-rename strategy.
///
/// The content is written to a named temporary file in the same directory
/// as the target (so the final rename stays on one filesystem), synced to
/// disk, and then renamed over the target path. Parent directories are
/// created if missing.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the
/// temporary file cannot be written, or the rename fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut temp = NamedTempFile::new_in(if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    })
    .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    temp.persist(path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Read a file to a UTF-8 string with a contextual error message.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
