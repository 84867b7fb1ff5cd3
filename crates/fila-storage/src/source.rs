//! How the adapter obtains its host plugin.
//!
//! Either a handle injected directly, or one discovered by name in the
//! process-global registry on first use and cached from then on.

use crate::plugin::HostPlugin;
use fila_core::{FilaError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, OnceLock};

static REGISTRY: LazyLock<RwLock<HashMap<String, Arc<dyn HostPlugin>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Register a host plugin under `name`, replacing any previous one.
pub fn register_plugin(name: impl Into<String>, plugin: Arc<dyn HostPlugin>) {
    let name = name.into();
    tracing::debug!(plugin = %name, "host plugin registered");
    REGISTRY.write().insert(name, plugin);
}

/// Remove a registered plugin. Adapters that already cached it keep it.
pub fn unregister_plugin(name: &str) -> Option<Arc<dyn HostPlugin>> {
    REGISTRY.write().remove(name)
}

pub fn lookup_plugin(name: &str) -> Option<Arc<dyn HostPlugin>> {
    REGISTRY.read().get(name).cloned()
}

/// Strategy for acquiring the host plugin.
pub trait PluginSource: Send + Sync {
    fn acquire(&self) -> Result<Arc<dyn HostPlugin>>;
}

/// A plugin handed to the adapter at construction.
pub struct DirectPlugin {
    plugin: Arc<dyn HostPlugin>,
}

impl DirectPlugin {
    pub fn new(plugin: Arc<dyn HostPlugin>) -> Self {
        Self { plugin }
    }
}

impl PluginSource for DirectPlugin {
    fn acquire(&self) -> Result<Arc<dyn HostPlugin>> {
        Ok(self.plugin.clone())
    }
}

/// A plugin looked up in the registry on first use.
///
/// A failed lookup is not cached, so a plugin registered later is still
/// found. A successful one is kept for the lifetime of this source.
pub struct RegistryPlugin {
    name: String,
    cached: OnceLock<Arc<dyn HostPlugin>>,
}

impl RegistryPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cached: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PluginSource for RegistryPlugin {
    fn acquire(&self) -> Result<Arc<dyn HostPlugin>> {
        if let Some(plugin) = self.cached.get() {
            return Ok(plugin.clone());
        }
        let plugin = lookup_plugin(&self.name).ok_or_else(|| {
            tracing::warn!(plugin = %self.name, "host plugin not installed");
            FilaError::PluginUnavailable {
                name: self.name.clone(),
            }
        })?;
        Ok(self.cached.get_or_init(|| plugin).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_host::LocalHostPlugin;
    use tempfile::TempDir;

    fn plugin(tmp: &TempDir) -> Arc<dyn HostPlugin> {
        Arc::new(LocalHostPlugin::new(tmp.path()))
    }

    #[test]
    fn test_direct_always_available() {
        let tmp = TempDir::new().unwrap();
        let p = plugin(&tmp);
        let src = DirectPlugin::new(p.clone());
        assert!(Arc::ptr_eq(&src.acquire().unwrap(), &p));
    }

    #[test]
    fn test_registry_missing_plugin() {
        let src = RegistryPlugin::new("source-test-missing");
        match src.acquire() {
            Err(FilaError::PluginUnavailable { name }) => assert_eq!(name, "source-test-missing"),
            other => panic!("expected PluginUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_registry_late_registration() {
        let tmp = TempDir::new().unwrap();
        let src = RegistryPlugin::new("source-test-late");
        assert!(src.acquire().is_err());
        register_plugin("source-test-late", plugin(&tmp));
        assert!(src.acquire().is_ok());
        unregister_plugin("source-test-late");
    }

    #[test]
    fn test_registry_caches_for_lifetime() {
        let tmp = TempDir::new().unwrap();
        let p = plugin(&tmp);
        register_plugin("source-test-cache", p.clone());
        let src = RegistryPlugin::new("source-test-cache");
        let first = src.acquire().unwrap();
        unregister_plugin("source-test-cache");
        let second = src.acquire().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &p));
        assert!(lookup_plugin("source-test-cache").is_none());
    }
}
