/*!
 * File system helpers for text and knowledge-base loading.
 */

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

use crate::errors::KairyouError;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Find `.txt` files directly inside a directory (non-recursive),
    /// in a deterministic sorted order
    pub fn find_text_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case("txt") {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }
}

/// Loads a text argument that may be either a path to a text file or the
/// text itself
pub fn load_text_source(source: &str) -> Result<String, KairyouError> {
    if FileManager::file_exists(source) {
        fs::read_to_string(source)
            .map_err(|err| KairyouError::SourceUnreadable(format!("{source}: {err}")))
    } else {
        Ok(source.to_string())
    }
}

/// Loads a knowledge-base argument: a directory of `.txt` files (each file
/// one block), a single text file, or the text itself
pub fn load_knowledge_base(source: &str) -> Result<Vec<String>, KairyouError> {
    let path = Path::new(source);

    if FileManager::dir_exists(path) {
        let files = FileManager::find_text_files(path)
            .map_err(|err| KairyouError::SourceUnreadable(format!("{source}: {err}")))?;
        let mut blocks = Vec::with_capacity(files.len());
        for file in files {
            let content = fs::read_to_string(&file).map_err(|err| {
                KairyouError::SourceUnreadable(format!("{}: {err}", file.display()))
            })?;
            blocks.push(content);
        }
        Ok(blocks)
    } else if FileManager::file_exists(path) {
        let content = fs::read_to_string(path)
            .map_err(|err| KairyouError::SourceUnreadable(format!("{source}: {err}")))?;
        Ok(vec![content])
    } else {
        Ok(vec![source.to_string()])
    }
}

/// Formats an elapsed duration in a human-readable unit
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds < 60.0 {
        format!("{seconds:.2} seconds")
    } else if seconds < 3600.0 {
        format!("{:.2} minutes", seconds / 60.0)
    } else {
        format!("{:.2} hours", seconds / 3600.0)
    }
}
