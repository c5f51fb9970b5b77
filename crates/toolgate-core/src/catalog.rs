//! Static backend catalog
//!
//! The set of backends is fixed at startup. The catalog preserves insertion
//! order so that a full registry rebuild processes backends deterministically:
//! when two backends claim the same tool name, the later catalog entry wins
//! on every refresh, not whichever probe happened to finish last.

use std::sync::Arc;

use crate::backend::ToolBackend;

/// Ordered table of backend name -> adapter
pub struct BackendCatalog {
    backends: Vec<Arc<dyn ToolBackend>>,
}

impl BackendCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Register a backend adapter.
    ///
    /// Insertion order is significant: it defines the last-writer-wins
    /// order for duplicate tool names.
    pub fn register(&mut self, backend: Arc<dyn ToolBackend>) {
        tracing::info!(backend = %backend.name(), url = %backend.base_url(), "Registering backend");
        self.backends.push(backend);
    }

    /// Look up a backend by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolBackend>> {
        self.backends.iter().find(|b| b.name() == name)
    }

    /// Backends in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ToolBackend>> {
        self.backends.iter()
    }

    /// Number of registered backends
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for BackendCatalog {
    fn default() -> Self {
        Self::new()
    }
}
