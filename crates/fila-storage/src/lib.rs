//! Fila storage: the volume-addressed adapter over a host storage plugin.

pub mod adapter;
pub mod local_host;
pub mod plugin;
pub mod source;

pub use adapter::{VolumeFile, VolumeFs, IGNORED_ENTRY};
pub use local_host::LocalHostPlugin;
pub use plugin::{HostError, HostPlugin, HostResult};
pub use source::{
    lookup_plugin, register_plugin, unregister_plugin, DirectPlugin, PluginSource,
    RegistryPlugin,
};
