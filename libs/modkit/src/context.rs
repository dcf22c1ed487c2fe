use serde::de::DeserializeOwned;
use std::sync::Arc;

use kvstore::KvStore;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Everything a module receives at init time: the shared store handle and
/// its configuration section.
#[derive(Clone)]
pub struct ModuleCtx {
    store: Arc<dyn KvStore>,
    config_provider: Option<Arc<dyn ConfigProvider>>,
}

impl ModuleCtx {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            config_provider: None,
        }
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.config_provider = Some(p);
        self
    }

    pub fn store(&self) -> Arc<dyn KvStore> {
        self.store.clone()
    }

    /// Strict: a missing section yields `T::default()`, an invalid one is an error.
    pub fn module_config_required<T: DeserializeOwned + Default>(
        &self,
        module_name: &str,
    ) -> anyhow::Result<T> {
        match self
            .config_provider
            .as_ref()
            .and_then(|p| p.get_module_config(module_name))
        {
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|e| anyhow::anyhow!("invalid {module_name} config: {e}")),
            None => Ok(T::default()),
        }
    }
}
