use filedesk_core::{AppViewModel, FilePhase, FileRowView, Notification, Severity};

const BAR_WIDTH: usize = 20;

/// Text frame for the current view: run headline, then one bar per file.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.files.len() + 1);

    let headline = match &view.processing {
        Some(run) if run.cancelling => format!("Cancelling run {}...", run.run_id),
        Some(run) => format!(
            "[{}/{}] {}",
            run.action_position, run.total_actions, run.description
        ),
        None => format!("Files: {} | Actions: {}", view.files.len(), view.actions.len()),
    };
    lines.push(headline);

    let name_width = view
        .files
        .iter()
        .map(|file| file.name.chars().count())
        .max()
        .unwrap_or(0);
    for file in &view.files {
        lines.push(file_line(file, name_width));
    }
    lines
}

/// Files and queued actions, for `--dry-run`.
pub fn render_plan(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{} file(s):", view.files.len()));
    for file in &view.files {
        lines.push(format!(
            "  {} {} ({}, {})",
            file.id,
            file.name,
            file.kind.label(),
            file.size_label
        ));
    }
    lines.push(format!("{} action(s):", view.actions.len()));
    for action in &view.actions {
        lines.push(format!(
            "  {}. {} [{}] on {} file(s)",
            action.index + 1,
            action.description,
            action.kind,
            action.file_count
        ));
    }
    lines
}

pub fn notification_line(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Success => "ok",
        Severity::Error => "!!",
    };
    format!(
        "[{marker}] {}: {}",
        notification.title, notification.description
    )
}

pub fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn file_line(file: &FileRowView, name_width: usize) -> String {
    let status = match file.phase {
        FilePhase::Pending => "pending".to_string(),
        FilePhase::InProgress => format!("{:>3}%", file.progress),
        FilePhase::Settling => "finishing".to_string(),
        FilePhase::Complete => "done".to_string(),
        FilePhase::Failed => format!(
            "failed: {}",
            file.failure.as_deref().unwrap_or("unknown error")
        ),
    };
    format!(
        "  {:<name_width$}  {:>8}  {} {}",
        file.name,
        file.size_label,
        progress_bar(file.progress),
        status
    )
}
