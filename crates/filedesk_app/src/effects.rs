use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use filedesk_core::{Effect, FileId, Msg, Notification};
use filedesk_engine::{EngineEvent, EngineHandle, SimulatedProcessor, SimulationSettings};
use filedesk_logging::{desk_info, desk_warn};

use crate::persistence;
use crate::render::notification_line;

/// Where user-facing notifications end up.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Prints notifications to stdout and mirrors them into the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: &Notification) {
        if notification.is_error() {
            desk_warn!("{}: {}", notification.title, notification.description);
        } else {
            desk_info!("{}: {}", notification.title, notification.description);
        }
        println!("{}", notification_line(notification));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    presets_dir: PathBuf,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(settings: SimulationSettings, seed: Option<u64>, presets_dir: PathBuf) -> Self {
        let processor = match seed {
            Some(seed) => SimulatedProcessor::with_seed(settings, seed),
            None => SimulatedProcessor::new(settings),
        };
        Self {
            engine: EngineHandle::with_processor(Arc::new(processor)),
            presets_dir,
            notifier: Box::new(ConsoleNotifier),
        }
    }

    /// Executes effects. Effects that complete synchronously yield follow-up messages.
    pub fn apply(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.notifier.notify(&notification),
                Effect::RunAction {
                    run_id,
                    action_index,
                    description,
                    files,
                } => {
                    desk_info!(
                        "RunAction run_id={} index={} files={} {}",
                        run_id,
                        action_index,
                        files.len(),
                        description
                    );
                    let files = files.into_iter().map(FileId::get).collect();
                    self.engine.run_action(run_id, action_index, files);
                }
                Effect::CancelRun { run_id } => {
                    desk_info!("CancelRun run_id={}", run_id);
                    self.engine.cancel(run_id);
                }
                Effect::SavePreset(preset) => {
                    let name = preset.name.clone();
                    let msg = match persistence::save_preset(&self.presets_dir, &preset) {
                        Ok(_) => Msg::PresetSaved { name },
                        Err(err) => {
                            desk_warn!("Saving action set {:?} failed: {}", name, err);
                            Msg::PresetSaveFailed {
                                name,
                                error: err.to_string(),
                            }
                        }
                    };
                    follow_ups.push(msg);
                }
            }
        }
        follow_ups
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::FileProgress {
            run_id: progress.run_id,
            file_id: FileId::from_raw(progress.file_id),
            progress: u32::from(progress.progress),
        },
        EngineEvent::FileFinished { job, result } => match result {
            Ok(()) => Msg::FileCompleted {
                run_id: job.run_id,
                file_id: FileId::from_raw(job.file_id),
            },
            Err(failure) => {
                desk_warn!("File {} failed: {}", job.file_id, failure);
                Msg::FileFailed {
                    run_id: job.run_id,
                    file_id: FileId::from_raw(job.file_id),
                    reason: failure.to_string(),
                }
            }
        },
        EngineEvent::ActionFinished {
            run_id,
            action_index,
            ..
        } => Msg::ActionFinished {
            run_id,
            action_index,
        },
        EngineEvent::RunCancelled { run_id } => Msg::RunCancelled { run_id },
    }
}
