//! Atomic whole-file replacement.
//!
//! Every artifact write follows the same pattern:
//! 1. Write content to a temporary file in the destination directory
//! 2. Sync the file to disk
//! 3. Rename over the destination
//!
//! Source and destination live in the same directory, so the rename is
//! atomic on POSIX. A crash mid-run leaves some artifacts updated and
//! others untouched, which is acceptable because every run is a full
//! rebuild. On crash a stray `.{filename}.tmp` may remain.

use crate::error::{Result, StackgenError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to a file, creating parent directories as needed.
///
/// The destination is unconditionally overwritten; regeneration is total,
/// not merge-based.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| StackgenError::io(parent, e))?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StackgenError::io(path, format!("failed to replace file: {}", e))
    })?;

    Ok(())
}

/// Temporary file path in the same directory as the target.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StackgenError::io(target, "invalid file name"))?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| StackgenError::io(path, e))?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        StackgenError::io(path, e)
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        StackgenError::io(path, e)
    })?;

    Ok(())
}
