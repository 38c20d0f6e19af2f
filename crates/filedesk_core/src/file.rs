use std::fmt;

/// Opaque identifier handed out by the registry. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u64);

impl FileId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, for crossing into the engine.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Rebuilds an id from a value previously obtained with [`FileId::get`].
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Docx,
    Pdf,
    Xls,
    Png,
    Other,
}

impl FileKind {
    /// Derives the kind from the text after the last `.` of a file name.
    pub fn from_name(name: &str) -> Self {
        let Some((_, extension)) = name.rsplit_once('.') else {
            return FileKind::Other;
        };
        match extension.to_ascii_lowercase().as_str() {
            "doc" | "docx" => FileKind::Docx,
            "pdf" => FileKind::Pdf,
            "xls" | "xlsx" => FileKind::Xls,
            "png" | "jpg" | "jpeg" | "gif" | "webp" => FileKind::Png,
            _ => FileKind::Other,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, FileKind::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Docx => "docx",
            FileKind::Pdf => "pdf",
            FileKind::Xls => "xls",
            FileKind::Png => "png",
            FileKind::Other => "other",
        }
    }
}

/// A file handle as it arrives from the upload surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub id: FileId,
    pub name: String,
    pub size_bytes: u64,
    pub kind: FileKind,
    pub progress: u8,
    pub complete: bool,
    pub failure: Option<String>,
}

impl FileDescriptor {
    pub fn phase(&self) -> FilePhase {
        if self.failure.is_some() {
            FilePhase::Failed
        } else if self.complete {
            FilePhase::Complete
        } else {
            match self.progress {
                0 => FilePhase::Pending,
                100 => FilePhase::Settling,
                _ => FilePhase::InProgress,
            }
        }
    }
}

/// Per-file processing state, derived from progress and completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePhase {
    Pending,
    InProgress,
    /// Reached 100% and waiting out the settle delay.
    Settling,
    Complete,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::FileKind;

    #[test]
    fn kind_follows_last_extension_case_insensitively() {
        assert_eq!(FileKind::from_name("report.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("archive.tar.xlsx"), FileKind::Xls);
        assert_eq!(FileKind::from_name("letter.doc"), FileKind::Docx);
        assert_eq!(FileKind::from_name("photo.jpeg"), FileKind::Png);
        assert_eq!(FileKind::from_name("anim.gif"), FileKind::Png);
    }

    #[test]
    fn unknown_or_missing_extension_is_other() {
        assert_eq!(FileKind::from_name("image.bmp"), FileKind::Other);
        assert_eq!(FileKind::from_name("Makefile"), FileKind::Other);
        assert_eq!(FileKind::from_name("trailing."), FileKind::Other);
        assert!(!FileKind::Other.is_supported());
    }
}
