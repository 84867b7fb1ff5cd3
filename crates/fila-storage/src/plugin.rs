//! Downstream host plugin contract.
//!
//! Requests mirror the host's JSON call shape: every path travels with the
//! volume it lives in.

use async_trait::async_trait;
use fila_core::{Encoding, EntryType, FilaError, StatRecord, VolumeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("File does not exist: {0}")]
    NotFound(String),
    #[error("File or directory already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Failed(String),
}

/// Result of a host call.
pub type HostResult<T> = std::result::Result<T, HostError>;

impl From<HostError> for FilaError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::NotFound(path) => FilaError::NotFound { path },
            other => FilaError::Io(other.to_string()),
        }
    }
}

/// Arguments of `readFile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileOptions {
    /// Path relative to the volume root.
    pub path: String,
    /// Volume holding the file.
    pub directory: VolumeId,
    /// `Some(Utf8)` for text, `None` for a base64 payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
}

/// Arguments of `writeFile` and `appendFile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileOptions {
    /// Path relative to the volume root.
    pub path: String,
    /// Volume holding the file.
    pub directory: VolumeId,
    /// Text, or base64 when `encoding` is `None`.
    pub data: String,
    /// `Some(Utf8)` for text, `None` for a base64 payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    /// Create missing parent directories first.
    #[serde(default)]
    pub recursive: bool,
}

/// Shared shape of `mkdir` and `rmdir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirOptions {
    pub path: String,
    pub directory: VolumeId,
    /// `mkdir`: create intermediate directories. `rmdir`: remove contents.
    #[serde(default)]
    pub recursive: bool,
}

/// Shared shape of `deleteFile`, `stat` and `readdir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathOptions {
    pub path: String,
    pub directory: VolumeId,
}

/// Shared shape of `copy` and `rename`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    /// Source path, relative to `directory`.
    pub from: String,
    /// Source volume.
    pub directory: VolumeId,
    /// Destination path, relative to `to_directory`.
    pub to: String,
    /// Destination volume.
    pub to_directory: VolumeId,
}

/// Reply to `readFile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadFileResult {
    /// Text, or base64 when no encoding was requested.
    pub data: String,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Entry name, without any directory part.
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Size in bytes.
    pub size: u64,
    /// Modification time, epoch milliseconds.
    pub mtime: u64,
    /// Creation time, when the host tracks it.
    #[serde(default)]
    pub ctime: Option<u64>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Reply to `readdir`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReaddirResult {
    /// Entries in host order.
    pub files: Vec<FileInfo>,
}

/// Volume-addressed storage provided by the host.
#[async_trait]
pub trait HostPlugin: Send + Sync {
    /// With `encoding: None` the data comes back as base64.
    async fn read_file(&self, opts: ReadFileOptions) -> HostResult<ReadFileResult>;
    /// With `encoding: None` the data is taken as base64.
    async fn write_file(&self, opts: WriteFileOptions) -> HostResult<()>;
    async fn append_file(&self, opts: WriteFileOptions) -> HostResult<()>;
    async fn mkdir(&self, opts: DirOptions) -> HostResult<()>;
    async fn rmdir(&self, opts: DirOptions) -> HostResult<()>;
    async fn delete_file(&self, opts: PathOptions) -> HostResult<()>;
    async fn stat(&self, opts: PathOptions) -> HostResult<StatRecord>;
    async fn readdir(&self, opts: PathOptions) -> HostResult<ReaddirResult>;
    async fn copy(&self, opts: TransferOptions) -> HostResult<()>;
    async fn rename(&self, opts: TransferOptions) -> HostResult<()>;
}
