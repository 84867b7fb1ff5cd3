//! Host plugin backed by the local filesystem.
//!
//! Each volume is a subdirectory of one root (`<root>/documents/...`).
//! Encodings follow the host contract: UTF-8 text when asked, base64
//! otherwise.

use crate::plugin::{
    DirOptions, FileInfo, HostError, HostPlugin, HostResult, PathOptions, ReadFileOptions,
    ReadFileResult, ReaddirResult, TransferOptions, WriteFileOptions,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fila_core::{codec, Encoding, EntryType, StatRecord, VolumeId};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

pub struct LocalHostPlugin {
    root: PathBuf,
}

impl LocalHostPlugin {
    /// Create a plugin rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Rooted under the user's local data directory, if the platform has one.
    pub fn user_default() -> Option<Self> {
        dirs::data_local_dir().map(|d| Self::new(d.join("fila")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn volume_root(&self, volume: VolumeId) -> PathBuf {
        self.root.join(volume.as_str())
    }

    /// Map an address to a local path. `..` and absolute components never
    /// leave the volume.
    pub fn address_to_path(&self, volume: VolumeId, relative: &str) -> PathBuf {
        let mut path = self.volume_root(volume);
        for comp in Path::new(relative).components() {
            if let Component::Normal(c) = comp {
                path.push(c);
            }
        }
        path
    }

    /// Volume roots always exist on a real host; create them on first touch.
    async fn prepare(&self, volume: VolumeId) -> HostResult<()> {
        let root = self.volume_root(volume);
        fs::create_dir_all(&root)
            .await
            .map_err(|e| host_err(&root, e))
    }

    async fn ensure_parent(path: &Path) -> HostResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| host_err(parent, e))?;
        }
        Ok(())
    }

    async fn write_data(&self, opts: &WriteFileOptions, append: bool) -> HostResult<()> {
        use tokio::io::AsyncWriteExt;
        self.prepare(opts.directory).await?;
        let path = self.address_to_path(opts.directory, &opts.path);
        if opts.recursive {
            Self::ensure_parent(&path).await?;
        }
        let bytes = match opts.encoding {
            Some(Encoding::Utf8) => opts.data.clone().into_bytes(),
            None => codec::decode(&opts.data).map_err(|e| HostError::Failed(e.to_string()))?,
        };
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&path)
            .await
            .map_err(|e| host_err(&path, e))?;
        file.write_all(&bytes).await.map_err(|e| host_err(&path, e))?;
        file.flush().await.map_err(|e| host_err(&path, e))
    }

    #[async_recursion::async_recursion]
    async fn copy_dir(from: &Path, to: &Path) -> HostResult<()> {
        fs::create_dir_all(to).await.map_err(|e| host_err(to, e))?;
        let mut rd = fs::read_dir(from).await.map_err(|e| host_err(from, e))?;
        while let Some(entry) = rd.next_entry().await.map_err(|e| host_err(from, e))? {
            let src = entry.path();
            let dst = to.join(entry.file_name());
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if is_dir {
                Self::copy_dir(&src, &dst).await?;
            } else {
                fs::copy(&src, &dst).await.map_err(|e| host_err(&src, e))?;
            }
        }
        Ok(())
    }
}

fn host_err(path: &Path, e: io::Error) -> HostError {
    let shown = path.display().to_string();
    match e.kind() {
        io::ErrorKind::NotFound => HostError::NotFound(shown),
        io::ErrorKind::AlreadyExists => HostError::AlreadyExists(shown),
        _ => HostError::Failed(format!("{shown}: {e}")),
    }
}

fn ticks(time: io::Result<SystemTime>) -> Option<u64> {
    time.ok()
        .map(|t| DateTime::<Utc>::from(t).timestamp_millis().max(0) as u64)
}

fn stat_record(path: &Path, meta: &std::fs::Metadata) -> StatRecord {
    StatRecord {
        entry_type: if meta.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        },
        size: meta.len(),
        mtime: ticks(meta.modified()).unwrap_or(0),
        ctime: ticks(meta.created()),
        uri: Some(format!("file://{}", path.display())),
    }
}

#[async_trait]
impl HostPlugin for LocalHostPlugin {
    async fn read_file(&self, opts: ReadFileOptions) -> HostResult<ReadFileResult> {
        self.prepare(opts.directory).await?;
        let path = self.address_to_path(opts.directory, &opts.path);
        let bytes = fs::read(&path).await.map_err(|e| host_err(&path, e))?;
        let data = match opts.encoding {
            Some(Encoding::Utf8) => String::from_utf8(bytes)
                .map_err(|e| HostError::Failed(format!("{}: {e}", path.display())))?,
            None => codec::encode(&bytes),
        };
        Ok(ReadFileResult { data })
    }

    async fn write_file(&self, opts: WriteFileOptions) -> HostResult<()> {
        self.write_data(&opts, false).await
    }

    async fn append_file(&self, opts: WriteFileOptions) -> HostResult<()> {
        self.write_data(&opts, true).await
    }

    async fn mkdir(&self, opts: DirOptions) -> HostResult<()> {
        self.prepare(opts.directory).await?;
        let path = self.address_to_path(opts.directory, &opts.path);
        if fs::metadata(&path).await.is_ok() {
            return Err(HostError::AlreadyExists(path.display().to_string()));
        }
        if opts.recursive {
            fs::create_dir_all(&path).await
        } else {
            fs::create_dir(&path).await
        }
        .map_err(|e| host_err(&path, e))
    }

    async fn rmdir(&self, opts: DirOptions) -> HostResult<()> {
        let path = self.address_to_path(opts.directory, &opts.path);
        if opts.recursive {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_dir(&path).await
        }
        .map_err(|e| host_err(&path, e))
    }

    async fn delete_file(&self, opts: PathOptions) -> HostResult<()> {
        let path = self.address_to_path(opts.directory, &opts.path);
        fs::remove_file(&path).await.map_err(|e| host_err(&path, e))
    }

    async fn stat(&self, opts: PathOptions) -> HostResult<StatRecord> {
        self.prepare(opts.directory).await?;
        let path = self.address_to_path(opts.directory, &opts.path);
        let meta = fs::metadata(&path).await.map_err(|e| host_err(&path, e))?;
        Ok(stat_record(&path, &meta))
    }

    async fn readdir(&self, opts: PathOptions) -> HostResult<ReaddirResult> {
        self.prepare(opts.directory).await?;
        let path = self.address_to_path(opts.directory, &opts.path);
        let mut files = Vec::new();
        let mut rd = fs::read_dir(&path).await.map_err(|e| host_err(&path, e))?;
        while let Some(entry) = rd.next_entry().await.map_err(|e| host_err(&path, e))? {
            let name = entry.file_name().to_string_lossy().to_string();
            let Ok(meta) = entry.metadata().await else {
                continue;
            };
            let rec = stat_record(&entry.path(), &meta);
            files.push(FileInfo {
                name,
                entry_type: rec.entry_type,
                size: rec.size,
                mtime: rec.mtime,
                ctime: rec.ctime,
                uri: rec.uri,
            });
        }
        Ok(ReaddirResult { files })
    }

    async fn copy(&self, opts: TransferOptions) -> HostResult<()> {
        let from = self.address_to_path(opts.directory, &opts.from);
        let to = self.address_to_path(opts.to_directory, &opts.to);
        self.prepare(opts.to_directory).await?;
        let meta = fs::metadata(&from).await.map_err(|e| host_err(&from, e))?;
        Self::ensure_parent(&to).await?;
        if meta.is_dir() {
            Self::copy_dir(&from, &to).await
        } else {
            fs::copy(&from, &to)
                .await
                .map(|_| ())
                .map_err(|e| host_err(&from, e))
        }
    }

    async fn rename(&self, opts: TransferOptions) -> HostResult<()> {
        let from = self.address_to_path(opts.directory, &opts.from);
        let to = self.address_to_path(opts.to_directory, &opts.to);
        Self::ensure_parent(&to).await?;
        fs::rename(&from, &to).await.map_err(|e| host_err(&from, e))
    }
}
