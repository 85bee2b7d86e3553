//! File API types for OpenCode Server.

use serde::{Deserialize, Serialize};

/// Body of `GET /file?path=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReadResponse {
    pub content: String,
    /// Whether `content` is the file itself or a patch against the last commit.
    #[serde(rename = "type")]
    pub kind: FileReadKind,
}

/// Kind of content returned by `GET /file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileReadKind {
    Raw,
    Patch,
    /// Value not known to this SDK version.
    #[serde(other)]
    Unknown,
}

impl FileReadKind {
    pub fn is_known(&self) -> bool {
        !matches!(self, FileReadKind::Unknown)
    }
}

/// A file status entry from `GET /file/status` (git status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Path relative to project root.
    pub path: String,
    /// Lines added.
    pub added: u64,
    /// Lines removed.
    pub removed: u64,
    pub status: FileStatus,
}

/// Git status of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Deleted,
    Modified,
    /// Value not known to this SDK version.
    #[serde(other)]
    Unknown,
}

impl FileStatus {
    pub fn is_known(&self) -> bool {
        !matches!(self, FileStatus::Unknown)
    }
}
