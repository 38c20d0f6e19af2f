use crate::view_model::{
    format_file_size, ActionRowView, AppViewModel, FileRowView, ProcessingView, UploadStats,
};
use crate::{Action, ActionQueue, Effect, FileId, FileRegistry, Notification, UploadOutcome};

pub type RunId = u64;

/// A processing request over a copy of the queue taken when it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProcessingRun {
    pub(crate) run_id: RunId,
    pub(crate) actions: Vec<Action>,
    pub(crate) cursor: usize,
    pub(crate) failures: usize,
    pub(crate) cancelling: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    registry: FileRegistry,
    queue: ActionQueue,
    run: Option<ProcessingRun>,
    next_run_id: RunId,
    last_upload: Option<UploadStats>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    pub fn is_processing(&self) -> bool {
        self.run.is_some()
    }

    pub fn current_run_id(&self) -> Option<RunId> {
        self.run.as_ref().map(|run| run.run_id)
    }

    pub fn view(&self) -> AppViewModel {
        let files = self
            .registry
            .iter()
            .map(|file| FileRowView {
                id: file.id,
                name: file.name.clone(),
                size_label: format_file_size(file.size_bytes),
                kind: file.kind,
                progress: file.progress,
                phase: file.phase(),
                failure: file.failure.clone(),
            })
            .collect();
        let actions = self
            .queue
            .iter()
            .enumerate()
            .map(|(index, action)| ActionRowView {
                index,
                kind: action.kind(),
                description: action.options.describe(),
                file_count: action.file_ids.len(),
            })
            .collect();
        let processing = self.run.as_ref().map(|run| ProcessingView {
            run_id: run.run_id,
            action_position: (run.cursor + 1).min(run.actions.len()),
            total_actions: run.actions.len(),
            description: run
                .actions
                .get(run.cursor)
                .map(|action| action.options.describe())
                .unwrap_or_default(),
            failures: run.failures,
            cancelling: run.cancelling,
        });

        AppViewModel {
            files,
            actions,
            processing,
            can_process: !self.is_processing()
                && !self.queue.is_empty()
                && !self.registry.is_empty(),
            last_upload: self.last_upload.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn registry_mut(&mut self) -> &mut FileRegistry {
        &mut self.registry
    }

    pub(crate) fn queue_mut(&mut self) -> &mut ActionQueue {
        &mut self.queue
    }

    /// Adds an action covering the current registry; returns its snapshot size.
    pub(crate) fn push_action(&mut self, options: crate::ActionOptions) -> usize {
        let index = self.queue.add_action(options, &self.registry);
        self.queue.get(index).map_or(0, |action| action.file_ids.len())
    }

    pub(crate) fn set_last_upload(&mut self, outcome: &UploadOutcome) {
        self.last_upload = Some(UploadStats {
            accepted: outcome.accepted.len(),
            rejected: outcome.rejected,
        });
    }

    pub(crate) fn run_matches(&self, run_id: RunId) -> bool {
        self.current_run_id() == Some(run_id)
    }

    pub(crate) fn begin_run(&mut self) -> RunId {
        self.next_run_id += 1;
        let run_id = self.next_run_id;
        self.run = Some(ProcessingRun {
            run_id,
            actions: self.queue.iter().cloned().collect(),
            cursor: 0,
            failures: 0,
            cancelling: false,
        });
        run_id
    }

    pub(crate) fn begin_cancel(&mut self) -> Option<RunId> {
        let run = self.run.as_mut()?;
        if run.cancelling {
            return None;
        }
        run.cancelling = true;
        Some(run.run_id)
    }

    pub(crate) fn end_run(&mut self) {
        self.run = None;
    }

    pub(crate) fn record_failure(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.failures += 1;
        }
    }

    /// Moves past `action_index` if it is the action currently running.
    pub(crate) fn advance_run(&mut self, action_index: usize) -> bool {
        match self.run.as_mut() {
            Some(run) if !run.cancelling && run.cursor == action_index => {
                run.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Starts the action at the cursor, skipping actions whose files are all gone.
    ///
    /// Finishes the run once every action has been handled.
    pub(crate) fn start_next_action(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        loop {
            let Some(run) = self.run.as_ref() else {
                return effects;
            };
            let run_id = run.run_id;
            let action_index = run.cursor;
            let Some(action) = run.actions.get(action_index) else {
                let failures = run.failures;
                self.end_run();
                effects.push(Effect::Notify(finished_notice(failures)));
                return effects;
            };

            let description = action.options.describe();
            let files: Vec<FileId> = action
                .file_ids
                .iter()
                .copied()
                .filter(|id| self.registry.contains(*id))
                .collect();
            for id in &files {
                self.registry.reset_progress(*id);
            }

            effects.push(Effect::Notify(Notification::success(
                format!("Processing: {description}"),
                format!("Working on {} file(s)...", files.len()),
            )));

            if files.is_empty() {
                if let Some(run) = self.run.as_mut() {
                    run.cursor += 1;
                }
                continue;
            }

            effects.push(Effect::RunAction {
                run_id,
                action_index,
                description,
                files,
            });
            return effects;
        }
    }
}

fn finished_notice(failures: usize) -> Notification {
    if failures == 0 {
        Notification::success(
            "Processing complete",
            "All actions have been completed successfully.",
        )
    } else {
        Notification::error(
            "Processing failed",
            format!("{failures} file(s) could not be processed."),
        )
    }
}
