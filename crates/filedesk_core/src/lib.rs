//! FileDesk core: pure state machine and view-model helpers.
mod action;
mod effect;
mod file;
mod msg;
mod preset;
mod queue;
mod registry;
mod state;
mod update;
mod view_model;

pub use action::{
    Action, ActionKind, ActionOptions, ArchiveFormat, CombineMode, CombineOptions,
    CompressOptions, ConvertMode, ConvertOptions, DocumentFormat, ReduceMode, ReduceOptions,
    RenameMode, RenameOptions, UnknownFormat,
};
pub use effect::{Effect, Notification, Severity};
pub use file::{FileDescriptor, FileId, FileKind, FilePhase, UploadedFile};
pub use msg::Msg;
pub use preset::{ActionPreset, PresetAction};
pub use queue::ActionQueue;
pub use registry::{FileRegistry, UploadOutcome};
pub use state::{AppState, RunId};
pub use update::update;
pub use view_model::{
    format_file_size, ActionRowView, AppViewModel, FileRowView, ProcessingView, UploadStats,
};
