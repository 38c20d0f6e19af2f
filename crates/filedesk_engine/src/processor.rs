use std::sync::mpsc;

use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, FileJob, FileProgress, ProcessFailure, SimulationSettings};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Works on a single file, reporting progress through the sink.
///
/// Implementations must return promptly with a cancelled failure once
/// `cancel` fires.
#[async_trait::async_trait]
pub trait FileProcessor: Send + Sync {
    async fn process(
        &self,
        job: FileJob,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<(), ProcessFailure>;
}

/// Fabricates progress on a fixed tick with a decelerating random step.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    settings: SimulationSettings,
    seed: Option<u64>,
}

impl SimulatedProcessor {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            settings,
            seed: None,
        }
    }

    /// Deterministic increments per file id.
    pub fn with_seed(settings: SimulationSettings, seed: u64) -> Self {
        Self {
            settings,
            seed: Some(seed),
        }
    }

    fn rng_for(&self, job: &FileJob) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(
                seed ^ job.file_id.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ job.action_index as u64,
            ),
            None => fastrand::Rng::new(),
        }
    }
}

#[async_trait::async_trait]
impl FileProcessor for SimulatedProcessor {
    async fn process(
        &self,
        job: FileJob,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<(), ProcessFailure> {
        let mut rng = self.rng_for(&job);
        let tick = self.settings.tick;
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut progress = 0.0_f64;
        while progress < 100.0 {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ProcessFailure::cancelled()),
                _ = ticker.tick() => {}
            }
            progress = (progress + self.settings.increment(progress, &mut rng)).min(100.0);
            sink.emit(EngineEvent::Progress(FileProgress {
                run_id: job.run_id,
                action_index: job.action_index,
                file_id: job.file_id,
                progress: progress.floor() as u8,
            }));
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProcessFailure::cancelled()),
            _ = sleep(self.settings.settle) => Ok(()),
        }
    }
}
