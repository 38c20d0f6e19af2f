use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;

use filedesk_logging::{desk_debug, desk_info, desk_warn};

use crate::{ActionReport, EngineEvent, FileId, FileJob, FileProcessor, ProgressSink, RunId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Completed,
    Failed,
    Cancelled,
}

/// Processes every file of one action concurrently and waits for all of them.
///
/// Each file reports `FileFinished` as soon as it is done (cancelled files
/// report nothing). `ActionFinished` follows once all files are done, unless
/// the run was cancelled in the meantime.
pub async fn run_action(
    processor: &dyn FileProcessor,
    run_id: RunId,
    action_index: usize,
    files: &[FileId],
    sink: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> ActionReport {
    desk_info!(
        "run {} action {} starting on {} file(s)",
        run_id,
        action_index,
        files.len()
    );

    let outcomes = join_all(files.iter().map(|&file_id| {
        let job = FileJob {
            run_id,
            action_index,
            file_id,
        };
        async move {
            match processor.process(job, sink, cancel).await {
                Ok(()) => {
                    desk_debug!("run {} file {} complete", run_id, file_id);
                    sink.emit(EngineEvent::FileFinished { job, result: Ok(()) });
                    FileOutcome::Completed
                }
                Err(failure) if failure.is_cancelled() => FileOutcome::Cancelled,
                Err(failure) => {
                    desk_warn!("run {} file {} failed: {}", run_id, file_id, failure);
                    sink.emit(EngineEvent::FileFinished {
                        job,
                        result: Err(failure),
                    });
                    FileOutcome::Failed
                }
            }
        }
    }))
    .await;

    let mut report = ActionReport {
        completed: count(&outcomes, FileOutcome::Completed),
        failed: count(&outcomes, FileOutcome::Failed),
        cancelled: false,
    };

    if cancel.is_cancelled() {
        report.cancelled = true;
        desk_info!("run {} action {} cancelled", run_id, action_index);
        return report;
    }

    desk_info!(
        "run {} action {} finished: {} complete, {} failed",
        run_id,
        action_index,
        report.completed,
        report.failed
    );
    sink.emit(EngineEvent::ActionFinished {
        run_id,
        action_index,
        report,
    });
    report
}

fn count(outcomes: &[FileOutcome], wanted: FileOutcome) -> usize {
    outcomes.iter().filter(|outcome| **outcome == wanted).count()
}
