use std::fmt;

use thiserror::Error;

pub type FileId = u64;
pub type RunId = u64;

/// One file of one action of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileJob {
    pub run_id: RunId,
    pub action_index: usize,
    pub file_id: FileId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileProgress {
    pub run_id: RunId,
    pub action_index: usize,
    pub file_id: FileId,
    /// Floored percentage, 0..=100.
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionReport {
    pub completed: usize,
    pub failed: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(FileProgress),
    FileFinished {
        job: FileJob,
        result: Result<(), ProcessFailure>,
    },
    ActionFinished {
        run_id: RunId,
        action_index: usize,
        report: ActionReport,
    },
    RunCancelled { run_id: RunId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProcessFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ProcessFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "run cancelled")
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FailureKind::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Cancelled,
    UnreadableFile,
    UnsupportedConversion { from: String, to: String },
    ProcessingError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::UnreadableFile => write!(f, "unreadable file"),
            FailureKind::UnsupportedConversion { from, to } => {
                write!(f, "unsupported conversion {from} -> {to}")
            }
            FailureKind::ProcessingError => write!(f, "processing error"),
        }
    }
}
