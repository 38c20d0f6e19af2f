use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Convert,
    Combine,
    Reduce,
    Resize,
    Compress,
    Rename,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Convert => "convert",
            ActionKind::Combine => "combine",
            ActionKind::Reduce => "reduce",
            ActionKind::Resize => "resize",
            ActionKind::Compress => "compress",
            ActionKind::Rename => "rename",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target or output format offered by the configuration panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Xls,
    Jpg,
    Png,
}

impl DocumentFormat {
    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Xls => "xls",
            DocumentFormat::Jpg => "jpg",
            DocumentFormat::Png => "png",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document format {:?}", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for DocumentFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "xls" => Ok(DocumentFormat::Xls),
            "jpg" | "jpeg" => Ok(DocumentFormat::Jpg),
            "png" => Ok(DocumentFormat::Png),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvertMode {
    #[default]
    All,
    Individual,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub target_format: DocumentFormat,
    pub mode: ConvertMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            target_format: DocumentFormat::Pdf,
            mode: ConvertMode::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    #[default]
    SameFormat,
    Merge,
    SinglePdf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineOptions {
    pub mode: CombineMode,
    pub output_format: Option<DocumentFormat>,
    pub output_name: Option<String>,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            mode: CombineMode::SameFormat,
            output_format: Some(DocumentFormat::Pdf),
            output_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceMode {
    #[default]
    Optimize,
    Maximum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOptions {
    pub mode: ReduceMode,
    pub max_size_mb: Option<u32>,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            mode: ReduceMode::Optimize,
            max_size_mb: Some(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameMode {
    AddBefore,
    #[default]
    AddAfter,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenameOptions {
    pub mode: RenameMode,
    pub text: String,
    pub example: Option<String>,
}

impl RenameOptions {
    /// Builds options with `example` derived from the mode and text.
    pub fn with_text(mode: RenameMode, text: impl Into<String>) -> Self {
        let text = text.into();
        let example = if text.is_empty() {
            None
        } else {
            Some(match mode {
                RenameMode::AddBefore => format!("Example: {text}Filename.ext"),
                RenameMode::AddAfter | RenameMode::Replace => format!("Example: Filename{text}.ext"),
            })
        };
        Self {
            mode,
            text,
            example,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveFormat {
    #[default]
    Zip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressOptions {
    pub output_name: String,
    pub format: ArchiveFormat,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            output_name: "compressed_files".to_string(),
            format: ArchiveFormat::Zip,
        }
    }
}

/// Configuration of one queued action; the variant is the action kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOptions {
    Convert(ConvertOptions),
    Combine(CombineOptions),
    Reduce(ReduceOptions),
    Resize,
    Compress(CompressOptions),
    Rename(RenameOptions),
}

impl ActionOptions {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionOptions::Convert(_) => ActionKind::Convert,
            ActionOptions::Combine(_) => ActionKind::Combine,
            ActionOptions::Reduce(_) => ActionKind::Reduce,
            ActionOptions::Resize => ActionKind::Resize,
            ActionOptions::Compress(_) => ActionKind::Compress,
            ActionOptions::Rename(_) => ActionKind::Rename,
        }
    }

    /// Headline shown while the action is being processed.
    pub fn describe(&self) -> String {
        match self {
            ActionOptions::Convert(options) => format!(
                "Converting to {}",
                options.target_format.label().to_ascii_uppercase()
            ),
            ActionOptions::Combine(_) => "Combining files".to_string(),
            ActionOptions::Reduce(_) => "Reducing file size".to_string(),
            ActionOptions::Resize => "Resizing images".to_string(),
            ActionOptions::Compress(_) => "Compressing files".to_string(),
            ActionOptions::Rename(_) => "Renaming files".to_string(),
        }
    }

    /// Confirmation text used when the action is added for `file_count` files.
    pub(crate) fn added_notice(&self, file_count: usize) -> (String, String) {
        match self {
            ActionOptions::Convert(options) => (
                "Convert action added".to_string(),
                format!(
                    "{file_count} file(s) will be converted to {}.",
                    options.target_format.label().to_ascii_uppercase()
                ),
            ),
            ActionOptions::Combine(_) => (
                "Combine action added".to_string(),
                format!("{file_count} file(s) will be combined."),
            ),
            ActionOptions::Reduce(_) => (
                "Reduce size action added".to_string(),
                format!("{file_count} file(s) will be optimized for size."),
            ),
            ActionOptions::Resize => (
                "Resize action added".to_string(),
                format!("{file_count} file(s) will be resized."),
            ),
            ActionOptions::Compress(_) => (
                "Compress action added".to_string(),
                format!("{file_count} file(s) will be compressed."),
            ),
            ActionOptions::Rename(_) => (
                "Rename action added".to_string(),
                format!("{file_count} file(s) will be renamed."),
            ),
        }
    }
}

/// A queued action: its options plus the registry ids present at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub options: ActionOptions,
    pub file_ids: Vec<FileId>,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.options.kind()
    }
}
