use crate::{ActionOptions, ActionPreset, FileId, RunId, UploadedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files dropped or picked by the user.
    FilesUploaded(Vec<UploadedFile>),
    /// User deleted a single file.
    RemoveFileClicked(FileId),
    /// User cleared the file list (this also empties the action queue).
    ClearAllClicked,
    /// User confirmed a configuration panel.
    ActionAdded(ActionOptions),
    /// User removed the action at this queue position.
    RemoveActionClicked(usize),
    /// User clicked Process.
    ProcessClicked,
    /// User asked to stop the current run.
    CancelClicked,
    /// User asked to save the queue as a named action set.
    SaveActionSetClicked { name: String },
    PresetSaved { name: String },
    PresetSaveFailed { name: String, error: String },
    /// A saved action set was read back and should be queued.
    PresetLoaded(ActionPreset),
    PresetLoadFailed { name: String, error: String },
    /// Engine progress for a file.
    FileProgress {
        run_id: RunId,
        file_id: FileId,
        progress: u32,
    },
    /// Engine reports a file done after its settle delay.
    FileCompleted { run_id: RunId, file_id: FileId },
    /// Engine reports that a file could not be processed.
    FileFailed {
        run_id: RunId,
        file_id: FileId,
        reason: String,
    },
    /// Every file of the action has finished.
    ActionFinished { run_id: RunId, action_index: usize },
    /// The engine stopped the run after a cancel request.
    RunCancelled { run_id: RunId },
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
