use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use filedesk_core::ActionPreset;
use filedesk_engine::{preset_filename, AtomicFileWriter, PersistError};
use filedesk_logging::desk_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PRESET_EXTENSION: &str = "ron";
const PRESET_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedPreset {
    version: u32,
    saved_utc: String,
    preset: ActionPreset,
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("no saved action set at {0:?}")]
    NotFound(PathBuf),
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unsupported preset version {0}")]
    UnsupportedVersion(u32),
    #[error("could not encode action set: {0}")]
    Encode(#[from] ron::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub(crate) fn preset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(preset_filename(name, PRESET_EXTENSION))
}

pub(crate) fn save_preset(dir: &Path, preset: &ActionPreset) -> Result<PathBuf, PresetError> {
    let persisted = PersistedPreset {
        version: PRESET_VERSION,
        saved_utc: Utc::now().to_rfc3339(),
        preset: preset.clone(),
    };
    let content = ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new())?;

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&preset_filename(&preset.name, PRESET_EXTENSION), &content)?;
    desk_info!(
        "Saved action set {:?} ({} actions) to {:?}",
        preset.name,
        preset.actions.len(),
        path
    );
    Ok(path)
}

pub(crate) fn load_preset(dir: &Path, name: &str) -> Result<ActionPreset, PresetError> {
    let path = preset_path(dir, name);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PresetError::NotFound(path));
        }
        Err(source) => return Err(PresetError::Read { path, source }),
    };

    let persisted: PersistedPreset = match ron::from_str(&content) {
        Ok(persisted) => persisted,
        Err(source) => return Err(PresetError::Parse { path, source }),
    };
    if persisted.version != PRESET_VERSION {
        return Err(PresetError::UnsupportedVersion(persisted.version));
    }

    desk_info!("Loaded action set {:?} from {:?}", name, path);
    Ok(persisted.preset)
}
