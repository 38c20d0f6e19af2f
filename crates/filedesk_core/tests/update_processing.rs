use filedesk_core::{
    update, ActionOptions, AppState, Effect, FileId, FilePhase, Msg, Notification, ReduceOptions,
    RunId, UploadedFile,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    filedesk_logging::initialize_for_tests();
}

fn state_with(names: &[&str], actions: Vec<ActionOptions>) -> AppState {
    let files = names.iter().map(|name| UploadedFile::new(*name, 10)).collect();
    let (mut state, _) = update(AppState::new(), Msg::FilesUploaded(files));
    for options in actions {
        state = update(state, Msg::ActionAdded(options)).0;
    }
    state
}

fn run_action(effects: &[Effect]) -> Option<(RunId, usize, Vec<FileId>)> {
    effects.iter().find_map(|effect| match effect {
        Effect::RunAction {
            run_id,
            action_index,
            files,
            ..
        } => Some((*run_id, *action_index, files.clone())),
        _ => None,
    })
}

fn complete_files(mut state: AppState, run_id: RunId, files: &[FileId]) -> AppState {
    for file_id in files {
        state = update(
            state,
            Msg::FileProgress {
                run_id,
                file_id: *file_id,
                progress: 100,
            },
        )
        .0;
        state = update(
            state,
            Msg::FileCompleted {
                run_id,
                file_id: *file_id,
            },
        )
        .0;
    }
    state
}

#[test]
fn processing_without_actions_is_refused() {
    init_logging();
    let state = state_with(&["a.pdf"], Vec::new());
    let before = state.clone();

    let (next, effects) = update(state, Msg::ProcessClicked);

    assert_eq!(next, before);
    assert!(!next.is_processing());
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(
            "No actions to process",
            "Please add files and select actions to process.",
        ))]
    );
}

#[test]
fn processing_without_files_is_refused() {
    init_logging();
    let state = state_with(&[], vec![ActionOptions::Resize]);

    let (next, effects) = update(state, Msg::ProcessClicked);

    assert!(!next.is_processing());
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], Effect::Notify(n) if n.is_error()));
}

#[test]
fn single_action_two_files_runs_to_completion() {
    init_logging();
    let state = state_with(&["a.pdf", "b.png"], vec![ActionOptions::Resize]);
    let ids = state.registry().ids();

    let (state, effects) = update(state, Msg::ProcessClicked);
    let (run_id, action_index, files) = run_action(&effects).expect("run action effect");
    assert_eq!(action_index, 0);
    assert_eq!(files, ids);
    assert!(state.is_processing());
    assert!(matches!(
        &effects[0],
        Effect::Notify(n) if n.title == "Processing: Resizing images"
            && n.description == "Working on 2 file(s)..."
    ));

    let (state, _) = update(
        state,
        Msg::FileProgress {
            run_id,
            file_id: ids[0],
            progress: 42,
        },
    );
    assert_eq!(state.view().files[0].phase, FilePhase::InProgress);
    assert_eq!(state.view().files[0].progress, 42);

    let state = complete_files(state, run_id, &ids);
    for file in state.registry().iter() {
        assert_eq!(file.progress, 100);
        assert!(file.complete);
    }

    let (state, effects) = update(
        state,
        Msg::ActionFinished {
            run_id,
            action_index: 0,
        },
    );
    assert!(!state.is_processing());
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::success(
            "Processing complete",
            "All actions have been completed successfully.",
        ))]
    );
}

#[test]
fn actions_run_in_queue_order_and_reset_files() {
    init_logging();
    let state = state_with(
        &["a.pdf"],
        vec![
            ActionOptions::Reduce(ReduceOptions::default()),
            ActionOptions::Resize,
        ],
    );

    let (state, effects) = update(state, Msg::ProcessClicked);
    let (run_id, first_index, files) = run_action(&effects).unwrap();
    assert_eq!(first_index, 0);
    let state = complete_files(state, run_id, &files);

    // A finish for an action that is not running is ignored.
    let (state, effects) = update(
        state,
        Msg::ActionFinished {
            run_id,
            action_index: 1,
        },
    );
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::ActionFinished {
            run_id,
            action_index: 0,
        },
    );
    let (_, second_index, _) = run_action(&effects).unwrap();
    assert_eq!(second_index, 1);
    assert_eq!(state.view().files[0].phase, FilePhase::Pending);
    let processing = state.view().processing.unwrap();
    assert_eq!(processing.action_position, 2);
    assert_eq!(processing.total_actions, 2);
    assert_eq!(processing.description, "Resizing images");
}

#[test]
fn deleted_files_are_skipped_when_the_action_starts() {
    init_logging();
    let state = state_with(
        &["a.pdf", "b.pdf"],
        vec![ActionOptions::Resize, ActionOptions::Resize],
    );
    let ids = state.registry().ids();

    let (state, effects) = update(state, Msg::ProcessClicked);
    let (run_id, _, files) = run_action(&effects).unwrap();
    assert_eq!(files.len(), 2);

    let (state, _) = update(state, Msg::RemoveFileClicked(ids[0]));
    let state = complete_files(state, run_id, &files);
    let (_, effects) = update(
        state,
        Msg::ActionFinished {
            run_id,
            action_index: 0,
        },
    );

    let (_, _, files) = run_action(&effects).unwrap();
    assert_eq!(files, vec![ids[1]]);
}

#[test]
fn action_whose_files_are_all_gone_is_skipped() {
    init_logging();
    let state = state_with(&["a.pdf"], vec![ActionOptions::Resize]);
    let old_id = state.registry().ids()[0];
    let (state, _) = update(state, Msg::RemoveFileClicked(old_id));
    let files = vec![UploadedFile::new("b.pdf", 1)];
    let (state, _) = update(state, Msg::FilesUploaded(files));

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert!(run_action(&effects).is_none());
    assert!(!state.is_processing());
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Notify(n) if n.title == "Processing complete")));
}

#[test]
fn failed_file_is_marked_and_run_reports_failure() {
    init_logging();
    let state = state_with(&["a.pdf", "b.pdf"], vec![ActionOptions::Resize]);
    let ids = state.registry().ids();

    let (state, effects) = update(state, Msg::ProcessClicked);
    let (run_id, _, _) = run_action(&effects).unwrap();
    let (state, _) = update(
        state,
        Msg::FileFailed {
            run_id,
            file_id: ids[0],
            reason: "unreadable file".to_string(),
        },
    );
    let state = complete_files(state, run_id, &ids[1..]);
    let view = state.view();
    assert_eq!(view.files[0].phase, FilePhase::Failed);
    assert_eq!(view.files[0].failure.as_deref(), Some("unreadable file"));
    assert_eq!(view.files[1].phase, FilePhase::Complete);
    assert_eq!(view.processing.unwrap().failures, 1);

    let (_, effects) = update(
        state,
        Msg::ActionFinished {
            run_id,
            action_index: 0,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error(
            "Processing failed",
            "1 file(s) could not be processed.",
        ))]
    );
}

#[test]
fn cancel_emits_effect_once_and_ends_run_on_ack() {
    init_logging();
    let state = state_with(&["a.pdf"], vec![ActionOptions::Resize]);
    let (state, effects) = update(state, Msg::ProcessClicked);
    let (run_id, _, _) = run_action(&effects).unwrap();

    let (state, effects) = update(state, Msg::CancelClicked);
    assert_eq!(effects, vec![Effect::CancelRun { run_id }]);
    assert!(state.view().processing.unwrap().cancelling);

    let (state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());

    // Late completion after cancel does not start the next action.
    let (state, effects) = update(
        state,
        Msg::ActionFinished {
            run_id,
            action_index: 0,
        },
    );
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::RunCancelled { run_id });
    assert!(!state.is_processing());
    assert!(matches!(&effects[0], Effect::Notify(n) if n.title == "Processing cancelled"));
}

#[test]
fn events_from_stale_runs_are_ignored() {
    init_logging();
    let state = state_with(&["a.pdf"], vec![ActionOptions::Resize]);
    let file_id = state.registry().ids()[0];
    let (state, effects) = update(state, Msg::ProcessClicked);
    let (run_id, _, _) = run_action(&effects).unwrap();
    let (state, _) = update(state, Msg::CancelClicked);
    let (state, _) = update(state, Msg::RunCancelled { run_id });

    let (mut state, _) = update(
        state,
        Msg::FileProgress {
            run_id,
            file_id,
            progress: 80,
        },
    );
    state.consume_dirty();
    assert_eq!(state.view().files[0].progress, 0);

    let (state, effects) = update(state, Msg::ProcessClicked);
    let (next_run_id, _, _) = run_action(&effects).unwrap();
    assert_ne!(next_run_id, run_id);
    assert_eq!(state.current_run_id(), Some(next_run_id));
}

#[test]
fn process_while_running_is_ignored() {
    init_logging();
    let state = state_with(&["a.pdf"], vec![ActionOptions::Resize]);
    let (state, _) = update(state, Msg::ProcessClicked);

    let (_, effects) = update(state, Msg::ProcessClicked);
    assert!(effects.is_empty());
}
