use crate::{ActionPreset, AppState, Effect, Msg, Notification};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesUploaded(files) => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            let outcome = state.registry_mut().add_files(files);
            state.set_last_upload(&outcome);
            state.mark_dirty();

            let mut effects = Vec::with_capacity(2);
            if outcome.rejected > 0 {
                effects.push(Effect::Notify(Notification::error(
                    format!("{} file(s) not supported", outcome.rejected),
                    "Only DOCX, PDF, XLS, and PNG files are supported.",
                )));
            }
            if !outcome.accepted.is_empty() {
                effects.push(Effect::Notify(Notification::success(
                    format!("{} file(s) added", outcome.accepted.len()),
                    "Files are ready to be processed.",
                )));
            }
            effects
        }
        Msg::RemoveFileClicked(id) => {
            if state.registry_mut().remove_file(id).is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearAllClicked => {
            state.registry_mut().clear_all();
            state.queue_mut().clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ActionAdded(options) => {
            let (title, description) = {
                let file_count = state.push_action(options.clone());
                options.added_notice(file_count)
            };
            state.mark_dirty();
            vec![Effect::Notify(Notification::success(title, description))]
        }
        Msg::RemoveActionClicked(index) => {
            if state.queue_mut().remove_action(index).is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ProcessClicked => {
            if state.is_processing() {
                return (state, Vec::new());
            }
            if state.queue().is_empty() || state.registry().is_empty() {
                return (
                    state,
                    vec![Effect::Notify(Notification::error(
                        "No actions to process",
                        "Please add files and select actions to process.",
                    ))],
                );
            }
            state.begin_run();
            state.mark_dirty();
            state.start_next_action()
        }
        Msg::CancelClicked => match state.begin_cancel() {
            Some(run_id) => {
                state.mark_dirty();
                vec![Effect::CancelRun { run_id }]
            }
            None => Vec::new(),
        },
        Msg::SaveActionSetClicked { name } => {
            if state.queue().is_empty() {
                vec![Effect::Notify(Notification::error(
                    "No actions to save",
                    "Please add actions before saving.",
                ))]
            } else {
                vec![Effect::SavePreset(ActionPreset::from_queue(
                    name,
                    state.queue(),
                ))]
            }
        }
        Msg::PresetSaved { name } => vec![Effect::Notify(Notification::success(
            "Action set saved",
            format!("Your action set \"{name}\" has been saved for future use."),
        ))],
        Msg::PresetSaveFailed { name, error } => vec![Effect::Notify(Notification::error(
            "Saving action set failed",
            format!("Could not save \"{name}\": {error}"),
        ))],
        Msg::PresetLoaded(preset) => {
            let action_count = preset.actions.len();
            let file_count = state.registry().len();
            for action in preset.actions {
                state.push_action(action.options);
            }
            state.mark_dirty();
            vec![Effect::Notify(Notification::success(
                "Action set loaded",
                format!(
                    "{action_count} action(s) from \"{}\" added for {file_count} file(s).",
                    preset.name
                ),
            ))]
        }
        Msg::PresetLoadFailed { name, error } => vec![Effect::Notify(Notification::error(
            "Loading action set failed",
            format!("Could not load \"{name}\": {error}"),
        ))],
        Msg::FileProgress {
            run_id,
            file_id,
            progress,
        } => {
            if state.run_matches(run_id) && state.registry_mut().set_progress(file_id, progress) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FileCompleted { run_id, file_id } => {
            if state.run_matches(run_id) && state.registry_mut().mark_complete(file_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FileFailed {
            run_id,
            file_id,
            reason,
        } => {
            if state.run_matches(run_id) {
                state.record_failure();
                state.registry_mut().mark_failed(file_id, reason);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ActionFinished {
            run_id,
            action_index,
        } => {
            if state.run_matches(run_id) && state.advance_run(action_index) {
                state.mark_dirty();
                state.start_next_action()
            } else {
                Vec::new()
            }
        }
        Msg::RunCancelled { run_id } => {
            if state.run_matches(run_id) {
                state.end_run();
                state.mark_dirty();
                vec![Effect::Notify(Notification::error(
                    "Processing cancelled",
                    "Remaining actions were not run.",
                ))]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
