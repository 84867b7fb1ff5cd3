//! Volume-addressed filesystem adapter.
//!
//! Maps the flat [`Fila`] handle contract onto a [`HostPlugin`]. Every
//! operation resolves its path to `(volume, relative path)`, issues one host
//! call, and translates the outcome back.
//!
//! Two asymmetries are deliberate:
//! - stat failures degrade to "no record", so `exists` and `is_directory`
//!   report `false` instead of failing;
//! - `write_text` under [`WritePolicy::BestEffort`] logs host failures and
//!   still returns `Ok(())`. `write_binary` always propagates.

use crate::plugin::{
    DirOptions, HostError, HostPlugin, PathOptions, ReadFileOptions, TransferOptions,
    WriteFileOptions,
};
use crate::source::{DirectPlugin, PluginSource, RegistryPlugin};
use async_trait::async_trait;
use fila_core::resolver::{is_volume_root, resolve};
use fila_core::{
    codec, Encoding, Fila, FilaConfig, FilaError, FilaPath, ResolvedAddress, Result,
    StatRecord, Unwatch, VolumeId, WatchCallback, WriteTextOptions, WritePolicy,
};
use std::sync::Arc;

/// OS metadata file that is never surfaced from a listing.
pub const IGNORED_ENTRY: &str = ".DS_Store";

struct Inner {
    source: Box<dyn PluginSource>,
    write_policy: WritePolicy,
}

/// The adapter. Cheap to clone; clones share one plugin source.
#[derive(Clone)]
pub struct VolumeFs {
    inner: Arc<Inner>,
}

impl VolumeFs {
    pub fn new(source: impl PluginSource + 'static, write_policy: WritePolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                source: Box::new(source),
                write_policy,
            }),
        }
    }

    /// Adapter over an injected plugin handle.
    pub fn with_plugin(plugin: Arc<dyn HostPlugin>) -> Self {
        Self::new(DirectPlugin::new(plugin), WritePolicy::default())
    }

    /// Adapter that discovers its plugin in the global registry.
    pub fn from_registry(config: &FilaConfig) -> Self {
        Self::new(
            RegistryPlugin::new(config.plugin_name.clone()),
            config.write_policy,
        )
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.inner.write_policy
    }

    pub fn fila(&self, path: impl Into<FilaPath>) -> VolumeFile {
        VolumeFile {
            fs: self.clone(),
            path: path.into(),
        }
    }

    /// Handle at the default working volume.
    pub fn cwd(&self) -> VolumeFile {
        self.fila(FilaPath::cwd())
    }

    /// Handle at the default temporary volume.
    pub fn temporary(&self) -> VolumeFile {
        self.fila(FilaPath::temporary())
    }

    fn plugin(&self) -> Result<Arc<dyn HostPlugin>> {
        self.inner.source.acquire()
    }
}

/// A [`Fila`] handle served by a [`VolumeFs`].
#[derive(Clone)]
pub struct VolumeFile {
    fs: VolumeFs,
    path: FilaPath,
}

impl std::fmt::Debug for VolumeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeFile").field("path", &self.path).finish()
    }
}

impl PartialEq for VolumeFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl VolumeFile {
    pub fn path(&self) -> String {
        self.path.path()
    }

    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Address this handle resolves to. A handle naming only a volume
    /// addresses that volume's root.
    pub fn address(&self) -> ResolvedAddress {
        match self.path.components() {
            [only] => match VolumeId::parse(only) {
                Some(volume) => ResolvedAddress::new(volume, ""),
                None => resolve(only),
            },
            _ => resolve(&self.path.path()),
        }
    }

    fn at(&self) -> PathOptions {
        let addr = self.address();
        PathOptions {
            path: addr.relative_path,
            directory: addr.volume,
        }
    }

    /// Both ends go through [`VolumeFile::address`], so a volume-root
    /// target lands in that volume.
    fn transfer_to(&self, target: &VolumeFile) -> TransferOptions {
        let from = self.address();
        let to = target.address();
        TransferOptions {
            from: from.relative_path,
            directory: from.volume,
            to: to.relative_path,
            to_directory: to.volume,
        }
    }

    /// Stat record, or `None` when the host has none to give.
    pub async fn stat(&self) -> Result<Option<StatRecord>> {
        let plugin = self.fs.plugin()?;
        match plugin.stat(self.at()).await {
            Ok(rec) => Ok(Some(rec)),
            Err(HostError::NotFound(_)) => Ok(None),
            Err(e) => {
                tracing::debug!(path = %self.path, error = %e, "stat failed, treating as absent");
                Ok(None)
            }
        }
    }

    async fn require_stat(&self) -> Result<StatRecord> {
        self.stat()
            .await?
            .ok_or_else(|| FilaError::not_found(self.path()))
    }

    /// Create the parent directory unless it is a volume root.
    async fn ensure_parent(&self, only_if_missing: bool) -> Result<()> {
        let up = self.up();
        if is_volume_root(&up.path()) {
            return Ok(());
        }
        if only_if_missing && up.exists().await? {
            return Ok(());
        }
        up.write_directory().await
    }

    async fn put_text(&self, text: &str, options: WriteTextOptions) -> Result<()> {
        self.ensure_parent(true).await?;
        let plugin = self.fs.plugin()?;
        let addr = self.address();
        tracing::debug!(%addr, append = options.append, "write text");
        let opts = WriteFileOptions {
            path: addr.relative_path,
            directory: addr.volume,
            data: text.to_string(),
            encoding: Some(Encoding::Utf8),
            recursive: false,
        };
        if options.append {
            plugin.append_file(opts).await?;
        } else {
            plugin.write_file(opts).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Fila for VolumeFile {
    fn fila_path(&self) -> &FilaPath {
        &self.path
    }

    fn up(&self) -> Self {
        self.fs.fila(self.path.up())
    }

    fn down(&self, name: &str) -> Self {
        self.fs.fila(self.path.down(name))
    }

    async fn read_text(&self) -> Result<String> {
        let plugin = self.fs.plugin()?;
        let addr = self.address();
        tracing::debug!(%addr, "read text");
        let result = plugin
            .read_file(ReadFileOptions {
                path: addr.relative_path,
                directory: addr.volume,
                encoding: Some(Encoding::Utf8),
            })
            .await?;
        Ok(result.data)
    }

    async fn read_binary(&self) -> Result<Vec<u8>> {
        let plugin = self.fs.plugin()?;
        let addr = self.address();
        tracing::debug!(%addr, "read binary");
        let result = plugin
            .read_file(ReadFileOptions {
                path: addr.relative_path,
                directory: addr.volume,
                encoding: None,
            })
            .await?;
        codec::decode(&result.data)
    }

    async fn read_directory(&self) -> Result<Vec<Self>> {
        let plugin = self.fs.plugin()?;
        let listing = plugin.readdir(self.at()).await?;
        Ok(listing
            .files
            .into_iter()
            .filter(|f| !f.name.is_empty() && f.name != IGNORED_ENTRY)
            .map(|f| self.down(&f.name))
            .collect())
    }

    /// Under [`WritePolicy::BestEffort`] host failures are logged and
    /// swallowed; only a missing plugin is reported. Callers that need to
    /// observe failures configure [`WritePolicy::Strict`].
    async fn write_text(&self, text: &str, options: WriteTextOptions) -> Result<()> {
        match self.put_text(text, options).await {
            Ok(()) => Ok(()),
            Err(e @ FilaError::PluginUnavailable { .. }) => Err(e),
            Err(e) => match self.fs.write_policy() {
                WritePolicy::BestEffort => {
                    tracing::warn!(path = %self.path, error = %e, "write_text failed");
                    Ok(())
                }
                WritePolicy::Strict => Err(e),
            },
        }
    }

    async fn write_binary(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_parent(false).await?;
        let plugin = self.fs.plugin()?;
        let addr = self.address();
        tracing::debug!(%addr, len = bytes.len(), "write binary");
        plugin
            .write_file(WriteFileOptions {
                path: addr.relative_path,
                directory: addr.volume,
                data: codec::encode(bytes),
                encoding: None,
                recursive: false,
            })
            .await?;
        Ok(())
    }

    async fn write_directory(&self) -> Result<()> {
        let plugin = self.fs.plugin()?;
        let addr = self.address();
        tracing::debug!(%addr, "mkdir");
        match plugin
            .mkdir(DirOptions {
                path: addr.relative_path,
                directory: addr.volume,
                recursive: true,
            })
            .await
        {
            Ok(()) | Err(HostError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_symlink(&self, _at: &Self) -> Result<()> {
        Err(FilaError::not_implemented("write_symlink"))
    }

    /// Deleting an absent path succeeds.
    async fn delete(&self) -> Result<()> {
        let plugin = self.fs.plugin()?;
        let opts = self.at();
        tracing::debug!(path = %self.path, "delete");
        let result = if self.is_directory().await? {
            plugin
                .rmdir(DirOptions {
                    path: opts.path,
                    directory: opts.directory,
                    recursive: true,
                })
                .await
        } else {
            plugin.delete_file(opts).await
        };
        match result {
            Ok(()) => Ok(()),
            Err(HostError::NotFound(_)) => {
                tracing::debug!(path = %self.path, "delete of absent path");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Unsupported: the host has no atomic move. Use `copy_to` then `delete`.
    async fn move_to(&self, _target: &Self) -> Result<()> {
        Err(FilaError::not_implemented("move"))
    }

    async fn copy_to(&self, target: &Self) -> Result<()> {
        let plugin = self.fs.plugin()?;
        let opts = self.transfer_to(target);
        tracing::debug!(from = %self.path, to = %target.path, "copy");
        plugin.copy(opts).await?;
        Ok(())
    }

    async fn rename(&self, new_name: &str) -> Result<()> {
        let plugin = self.fs.plugin()?;
        let target = self.up().down(new_name);
        let opts = self.transfer_to(&target);
        tracing::debug!(from = %self.path, to = %target.path, "rename");
        plugin.rename(opts).await?;
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.stat().await?.is_some())
    }

    async fn get_size(&self) -> Result<u64> {
        Ok(self.require_stat().await?.size)
    }

    async fn get_modified_ticks(&self) -> Result<u64> {
        Ok(self.require_stat().await?.mtime)
    }

    async fn get_created_ticks(&self) -> Result<u64> {
        Ok(self.require_stat().await?.ctime.unwrap_or(0))
    }

    /// The host does not track access time.
    async fn get_accessed_ticks(&self) -> Result<u64> {
        Ok(0)
    }

    async fn is_directory(&self) -> Result<bool> {
        Ok(self
            .stat()
            .await?
            .map(|rec| rec.is_directory())
            .unwrap_or(false))
    }

    fn watch(&self, _recursive: bool, _callback: WatchCallback) -> Result<Unwatch> {
        Err(FilaError::not_implemented("watch"))
    }
}
