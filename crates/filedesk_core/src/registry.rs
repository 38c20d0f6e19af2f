use crate::{FileDescriptor, FileId, FileKind, UploadedFile};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadOutcome {
    pub accepted: Vec<FileId>,
    pub rejected: usize,
}

/// In-memory collection of uploaded files, in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileRegistry {
    files: Vec<FileDescriptor>,
    next_id: u64,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits files whose kind is supported; the rest are only counted.
    pub fn add_files<I>(&mut self, raw_files: I) -> UploadOutcome
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let mut outcome = UploadOutcome::default();
        for raw in raw_files {
            let kind = FileKind::from_name(&raw.name);
            if !kind.is_supported() {
                outcome.rejected += 1;
                continue;
            }
            let id = self.allocate_id();
            self.files.push(FileDescriptor {
                id,
                name: raw.name,
                size_bytes: raw.size_bytes,
                kind,
                progress: 0,
                complete: false,
                failure: None,
            });
            outcome.accepted.push(id);
        }
        outcome
    }

    /// Returns the removed descriptor, or `None` when the id is unknown.
    pub fn remove_file(&mut self, id: FileId) -> Option<FileDescriptor> {
        let index = self.files.iter().position(|file| file.id == id)?;
        Some(self.files.remove(index))
    }

    /// Drops every file. Ids handed out so far stay retired.
    pub fn clear_all(&mut self) {
        self.files.clear();
    }

    /// Overwrites progress, clamped to 100. Returns false for unknown ids.
    pub fn set_progress(&mut self, id: FileId, value: u32) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                file.progress = value.min(100) as u8;
                true
            }
            None => false,
        }
    }

    pub fn mark_complete(&mut self, id: FileId) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                file.progress = 100;
                file.complete = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_failed(&mut self, id: FileId, reason: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                file.complete = false;
                file.failure = Some(reason.into());
                true
            }
            None => false,
        }
    }

    /// Puts a file back to pending before another action works on it.
    pub fn reset_progress(&mut self, id: FileId) -> bool {
        match self.get_mut(id) {
            Some(file) => {
                file.progress = 0;
                file.complete = false;
                file.failure = None;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: FileId) -> Option<&FileDescriptor> {
        self.files.iter().find(|file| file.id == id)
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<FileId> {
        self.files.iter().map(|file| file.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileDescriptor> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn get_mut(&mut self, id: FileId) -> Option<&mut FileDescriptor> {
        self.files.iter_mut().find(|file| file.id == id)
    }

    fn allocate_id(&mut self) -> FileId {
        self.next_id += 1;
        FileId::new(self.next_id)
    }
}
