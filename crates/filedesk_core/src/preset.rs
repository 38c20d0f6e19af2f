use serde::{Deserialize, Serialize};

use crate::{ActionKind, ActionOptions, ActionQueue};

/// A named, reloadable action set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPreset {
    pub name: String,
    pub actions: Vec<PresetAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetAction {
    pub options: ActionOptions,
    /// Number of files the action covered when the preset was saved.
    pub file_count: usize,
}

impl PresetAction {
    pub fn kind(&self) -> ActionKind {
        self.options.kind()
    }
}

impl ActionPreset {
    pub fn from_queue(name: impl Into<String>, queue: &ActionQueue) -> Self {
        Self {
            name: name.into(),
            actions: queue
                .iter()
                .map(|action| PresetAction {
                    options: action.options.clone(),
                    file_count: action.file_ids.len(),
                })
                .collect(),
        }
    }
}
