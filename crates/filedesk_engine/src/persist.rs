use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("directory missing or not writable: {0}")]
    Directory(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure `dir` exists and is a directory; create it if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::Directory(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::Directory("path is not a directory".into()));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PersistError::Directory(e.to_string()))
}

/// Writes whole files under one directory via temp file + rename.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // `persist` overwrites an existing target.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// File name for a saved action set: unsafe characters become `_`,
/// runs of `_` collapse, and an empty result falls back to `action_set`.
pub fn preset_filename(name: &str, extension: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.trim().chars() {
        let mapped = if c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.') {
            c
        } else {
            '_'
        };
        if mapped == '_' && stem.ends_with('_') {
            continue;
        }
        stem.push(mapped);
    }
    let stem = stem.trim_matches(&['_', ' ', '.'][..]);
    let stem: String = stem.chars().take(80).collect();
    if stem.is_empty() {
        format!("action_set.{extension}")
    } else {
        format!("{stem}.{extension}")
    }
}
