//! The upstream file handle contract.

use crate::error::Result;
use crate::path::FilaPath;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options for [`Fila::write_text`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteTextOptions {
    /// Append to the existing file instead of replacing it.
    #[serde(default)]
    pub append: bool,
}

impl WriteTextOptions {
    pub fn append() -> Self {
        Self { append: true }
    }
}

/// Change reported to a watch callback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WatchEvent {
    Create,
    Modify,
    Delete,
}

pub type WatchCallback = Box<dyn Fn(WatchEvent, FilaPath) + Send + Sync>;

/// Stops a watch when called.
pub type Unwatch = Box<dyn FnOnce() + Send>;

/// A file or directory identified by a [`FilaPath`].
///
/// Every operation talks to storage afresh; handles cache nothing.
#[async_trait]
pub trait Fila: Sized + Send + Sync {
    fn fila_path(&self) -> &FilaPath;

    /// Parent handle.
    fn up(&self) -> Self;

    /// Child handle.
    fn down(&self, name: &str) -> Self;

    async fn read_text(&self) -> Result<String>;
    async fn read_binary(&self) -> Result<Vec<u8>>;
    async fn read_directory(&self) -> Result<Vec<Self>>;

    async fn write_text(&self, text: &str, options: WriteTextOptions) -> Result<()>;
    async fn write_binary(&self, bytes: &[u8]) -> Result<()>;
    async fn write_directory(&self) -> Result<()>;

    /// Write a symlink at `at` pointing to this handle.
    async fn write_symlink(&self, at: &Self) -> Result<()>;

    async fn delete(&self) -> Result<()>;
    async fn move_to(&self, target: &Self) -> Result<()>;
    async fn copy_to(&self, target: &Self) -> Result<()>;
    async fn rename(&self, new_name: &str) -> Result<()>;

    async fn exists(&self) -> Result<bool>;
    async fn get_size(&self) -> Result<u64>;
    async fn get_modified_ticks(&self) -> Result<u64>;
    async fn get_created_ticks(&self) -> Result<u64>;
    async fn get_accessed_ticks(&self) -> Result<u64>;
    async fn is_directory(&self) -> Result<bool>;

    fn watch(&self, recursive: bool, callback: WatchCallback) -> Result<Unwatch>;
}
