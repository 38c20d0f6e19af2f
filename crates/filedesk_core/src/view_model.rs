use crate::{ActionKind, FileId, FileKind, FilePhase, RunId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadStats {
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub files: Vec<FileRowView>,
    pub actions: Vec<ActionRowView>,
    pub processing: Option<ProcessingView>,
    pub can_process: bool,
    pub last_upload: Option<UploadStats>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub id: FileId,
    pub name: String,
    pub size_label: String,
    pub kind: FileKind,
    pub progress: u8,
    pub phase: FilePhase,
    pub failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRowView {
    pub index: usize,
    pub kind: ActionKind,
    pub description: String,
    pub file_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingView {
    pub run_id: RunId,
    /// 1-based position of the running action.
    pub action_position: usize,
    pub total_actions: usize,
    pub description: String,
    pub failures: usize,
    pub cancelling: bool,
}

/// Human readable size with one decimal, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[unit])
    } else {
        format!("{rounded:.1} {}", UNITS[unit])
    }
}
