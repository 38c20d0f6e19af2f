use crate::{ActionPreset, FileId, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a short, dismissible status message.
    Notify(Notification),
    /// Process one action of a run over the resolved files.
    RunAction {
        run_id: RunId,
        action_index: usize,
        description: String,
        files: Vec<FileId>,
    },
    CancelRun { run_id: RunId },
    SavePreset(ActionPreset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
