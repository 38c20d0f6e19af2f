use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use filedesk_core::{update, AppState, Msg, UploadedFile};
use filedesk_logging::{desk_debug, desk_info, desk_warn};

use crate::cli::AppConfig;
use crate::effects::EffectRunner;
use crate::persistence;
use crate::render;

struct App {
    state: AppState,
    runner: EffectRunner,
    inbox: VecDeque<Msg>,
}

impl App {
    fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(
                config.simulation.clone(),
                config.seed,
                config.presets_dir.clone(),
            ),
            inbox: VecDeque::new(),
        }
    }

    fn send(&mut self, msg: Msg) {
        self.inbox.push_back(msg);
        self.process_pending_messages();
    }

    fn process_pending_messages(&mut self) {
        while let Some(msg) = self.inbox.pop_front() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let render_now = matches!(msg, Msg::Tick);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let follow_ups = self.runner.apply(effects);
        self.inbox.extend(follow_ups);

        if render_now && self.state.consume_dirty() {
            print_lines(render::render(&self.state.view()));
        }
    }
}

pub fn run(config: AppConfig) -> Result<()> {
    desk_info!(
        "Starting filedesk: {} file(s), {} action(s), tick={:?} settle={:?}",
        config.files.len(),
        config.actions.len(),
        config.simulation.tick,
        config.simulation.settle
    );
    let mut app = App::new(&config);

    let uploads: Vec<UploadedFile> = config.files.iter().map(|path| uploaded_file(path)).collect();
    if !uploads.is_empty() {
        app.send(Msg::FilesUploaded(uploads));
    }

    if let Some(name) = &config.preset {
        let msg = match persistence::load_preset(&config.presets_dir, name) {
            Ok(preset) => Msg::PresetLoaded(preset),
            Err(err) => Msg::PresetLoadFailed {
                name: name.clone(),
                error: err.to_string(),
            },
        };
        app.send(msg);
    }

    for options in &config.actions {
        app.send(Msg::ActionAdded(options.clone()));
    }

    if let Some(name) = &config.save_preset {
        app.send(Msg::SaveActionSetClicked { name: name.clone() });
    }

    if config.dry_run {
        print_lines(render::render_plan(&app.state.view()));
        return Ok(());
    }

    app.send(Msg::ProcessClicked);

    let mut next_tick = Instant::now() + config.render_interval;
    while app.state.is_processing() {
        let wait = next_tick.saturating_duration_since(Instant::now());
        if let Some(msg) = app.runner.next_msg(wait) {
            app.send(msg);
        }
        if Instant::now() >= next_tick {
            app.send(Msg::Tick);
            next_tick = Instant::now() + config.render_interval;
        }
    }

    print_lines(render::render(&app.state.view()));
    desk_debug!("filedesk finished");
    Ok(())
}

/// Builds an upload entry from a path. Unreadable files are still offered,
/// with a size of zero.
fn uploaded_file(path: &Path) -> UploadedFile {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let size_bytes = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            desk_warn!("Could not stat {:?}: {}", path, err);
            0
        }
    };
    UploadedFile::new(name, size_bytes)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn uploaded_file_uses_name_and_size() {
        let mut file = NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(&[0u8; 1234]).unwrap();

        let upload = uploaded_file(file.path());
        assert_eq!(upload.size_bytes, 1234);
        assert!(upload.name.ends_with(".pdf"));
        assert!(!upload.name.contains('/'));
    }

    #[test]
    fn missing_file_has_zero_size() {
        let upload = uploaded_file(Path::new("/definitely/not/here/report.docx"));
        assert_eq!(upload.name, "report.docx");
        assert_eq!(upload.size_bytes, 0);
    }
}
