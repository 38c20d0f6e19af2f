use crate::{Action, ActionOptions, FileRegistry};

/// Ordered list of actions; the order is the execution order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action that applies to every file currently in `registry`.
    ///
    /// Returns the index of the new action.
    pub fn add_action(&mut self, options: ActionOptions, registry: &FileRegistry) -> usize {
        self.actions.push(Action {
            options,
            file_ids: registry.ids(),
        });
        self.actions.len() - 1
    }

    /// Removes by position; later actions shift down by one.
    pub fn remove_action(&mut self, index: usize) -> Option<Action> {
        if index < self.actions.len() {
            Some(self.actions.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::ActionQueue;
    use crate::{ActionKind, ActionOptions, FileRegistry, UploadedFile};

    #[test]
    fn snapshot_is_not_affected_by_later_uploads_or_removals() {
        let mut registry = FileRegistry::new();
        registry.add_files(vec![UploadedFile::new("a.pdf", 1), UploadedFile::new("b.pdf", 1)]);
        let mut queue = ActionQueue::new();

        let index = queue.add_action(ActionOptions::Resize, &registry);
        let snapshot = queue.get(index).unwrap().file_ids.clone();

        registry.add_files(vec![UploadedFile::new("c.pdf", 1)]);
        registry.remove_file(snapshot[0]);

        assert_eq!(queue.get(index).unwrap().file_ids, snapshot);
        assert_eq!(queue.get(index).unwrap().kind(), ActionKind::Resize);
    }

    #[test]
    fn out_of_range_removal_is_noop() {
        let registry = FileRegistry::new();
        let mut queue = ActionQueue::new();
        queue.add_action(ActionOptions::Resize, &registry);

        assert!(queue.remove_action(3).is_none());
        assert_eq!(queue.len(), 1);
    }
}
