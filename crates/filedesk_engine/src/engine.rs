use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use filedesk_logging::{desk_debug, desk_error, desk_info};

use crate::processor::ChannelProgressSink;
use crate::{run_action, EngineEvent, FileId, FileProcessor, RunId, SimulatedProcessor, SimulationSettings};

enum EngineCommand {
    RunAction {
        run_id: RunId,
        action_index: usize,
        files: Vec<FileId>,
    },
    Cancel {
        run_id: RunId,
    },
}

/// Owns a background thread with a tokio runtime that executes actions.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SimulationSettings) -> Self {
        Self::with_processor(Arc::new(SimulatedProcessor::new(settings)))
    }

    pub fn with_processor(processor: Arc<dyn FileProcessor>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    desk_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut runs: HashMap<RunId, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &processor, &mut runs, command, &event_tx);
            }
            desk_debug!("engine command channel closed; shutting down");
        });

        Self { cmd_tx, event_rx }
    }

    /// Starts one action of a run. Actions of a run must be sent in order,
    /// each after the previous one reported `ActionFinished`.
    pub fn run_action(&self, run_id: RunId, action_index: usize, files: Vec<FileId>) {
        let _ = self.cmd_tx.send(EngineCommand::RunAction {
            run_id,
            action_index,
            files,
        });
    }

    /// Stops a run. `RunCancelled` is always reported, even if no action is active.
    pub fn cancel(&self, run_id: RunId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { run_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    processor: &Arc<dyn FileProcessor>,
    runs: &mut HashMap<RunId, CancellationToken>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::RunAction {
            run_id,
            action_index,
            files,
        } => {
            // Only the newest run keeps a token; older runs are finished or cancelled.
            runs.retain(|id, _| *id == run_id);
            let cancel = runs.entry(run_id).or_default().clone();
            let processor = processor.clone();
            let sink = ChannelProgressSink::new(event_tx.clone());
            runtime.spawn(async move {
                run_action(
                    processor.as_ref(),
                    run_id,
                    action_index,
                    &files,
                    &sink,
                    &cancel,
                )
                .await;
            });
        }
        EngineCommand::Cancel { run_id } => {
            match runs.remove(&run_id) {
                Some(token) => {
                    token.cancel();
                    desk_info!("run {} cancelled", run_id);
                }
                None => desk_debug!("cancel for run {} with no active token", run_id),
            }
            let _ = event_tx.send(EngineEvent::RunCancelled { run_id });
        }
    }
}
