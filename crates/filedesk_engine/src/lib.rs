//! FileDesk engine: simulated processing and effect execution.
mod engine;
mod persist;
mod processor;
mod runner;
mod settings;
mod types;

pub use engine::EngineHandle;
pub use persist::{ensure_dir, preset_filename, AtomicFileWriter, PersistError};
pub use processor::{ChannelProgressSink, FileProcessor, ProgressSink, SimulatedProcessor};
pub use runner::run_action;
pub use settings::{IncrementTier, SimulationSettings};
pub use types::{
    ActionReport, EngineEvent, FailureKind, FileId, FileJob, FileProgress, ProcessFailure, RunId,
};
