//! Tool registry - the tool-name -> backend mapping
//!
//! A refresh rebuilds the entire map from scratch: health probe, then
//! discovery, per backend, with backends probed concurrently. The rebuilt
//! map is published with a single snapshot swap so readers never observe a
//! partially-built registry, and concurrent refreshes coalesce behind a
//! single-flight guard.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use toolgate_core::{
    BackendCatalog, BackendStatus, Discovery, HealthState, ToolBackend, ToolDescriptor,
};

type RegistrySnapshot = Arc<HashMap<String, ToolDescriptor>>;

/// Process-wide mapping from tool name to owning backend.
///
/// Lifecycle: created empty at startup, rebuilt wholesale on demand,
/// discarded at shutdown. Never persisted.
pub struct ToolRegistry {
    catalog: BackendCatalog,
    snapshot: RwLock<RegistrySnapshot>,
    /// Serializes refreshes; waiters coalesce instead of re-running
    refresh_guard: tokio::sync::Mutex<()>,
    /// Completed refresh count, also the coalescing epoch
    refreshes: AtomicU64,
}

impl ToolRegistry {
    /// Create an empty registry over a backend catalog
    pub fn new(catalog: BackendCatalog) -> Self {
        Self {
            catalog,
            snapshot: RwLock::new(Arc::new(HashMap::new())),
            refresh_guard: tokio::sync::Mutex::new(()),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Look up the descriptor for a tool in the current snapshot.
    ///
    /// Never triggers discovery; that decision belongs to the router.
    pub fn resolve(&self, tool: &str) -> Option<ToolDescriptor> {
        self.snapshot.read().get(tool).cloned()
    }

    /// Resolve a tool to its owning backend adapter
    pub fn backend_for(&self, tool: &str) -> Option<Arc<dyn ToolBackend>> {
        let descriptor = self.resolve(tool)?;
        self.catalog.get(&descriptor.backend).cloned()
    }

    /// Snapshot of current tool names, sorted for stable output
    pub fn list(&self) -> Vec<String> {
        let mut tools: Vec<String> = self.snapshot.read().keys().cloned().collect();
        tools.sort();
        tools
    }

    /// Whether the registry currently maps any tools
    pub fn is_empty(&self) -> bool {
        self.snapshot.read().is_empty()
    }

    /// Per-backend identity and last-known health, in catalog order
    pub fn backend_statuses(&self) -> Vec<BackendStatus> {
        self.catalog.iter().map(|b| b.status()).collect()
    }

    /// Number of completed refresh passes
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// Rebuild the registry from every catalog backend.
    ///
    /// Backends are probed concurrently (health first, then discovery,
    /// sequentially within each backend). Results are inserted in catalog
    /// order, so a duplicate tool name deterministically belongs to the
    /// last catalog backend that claims it. One backend's failure never
    /// aborts the refresh of the others.
    pub async fn refresh(&self) {
        let epoch = self.refreshes.load(Ordering::SeqCst);
        let _guard = self.refresh_guard.lock().await;
        if self.refreshes.load(Ordering::SeqCst) != epoch {
            debug!("Refresh already completed while waiting, coalescing");
            return;
        }

        let probes = self.catalog.iter().map(|backend| {
            let backend = Arc::clone(backend);
            async move {
                let health = backend.check_health().await;
                if health != HealthState::Healthy {
                    warn!(backend = %backend.name(), "Backend is not healthy, skipping discovery");
                    return (backend.name().to_string(), Discovery::empty());
                }
                (backend.name().to_string(), backend.discover().await)
            }
        });
        let results = futures::future::join_all(probes).await;

        let mut map = HashMap::new();
        for (backend, discovery) in results {
            for tool in discovery.tools {
                let descriptor = ToolDescriptor {
                    name: tool.clone(),
                    backend: backend.clone(),
                    source: discovery.source,
                };
                if let Some(previous) = map.insert(tool.clone(), descriptor) {
                    warn!(
                        tool = %tool,
                        previous = %previous.backend,
                        backend = %backend,
                        "Duplicate tool name claimed by multiple backends, last one wins"
                    );
                }
            }
        }

        info!(tools = map.len(), backends = self.catalog.len(), "Tool registry rebuilt");
        *self.snapshot.write() = Arc::new(map);
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use toolgate_core::testing::StubBackend;
    use toolgate_core::DiscoverySource;

    fn registry_of(backends: Vec<Arc<dyn ToolBackend>>) -> ToolRegistry {
        let mut catalog = BackendCatalog::new();
        for backend in backends {
            catalog.register(backend);
        }
        ToolRegistry::new(catalog)
    }

    #[tokio::test]
    async fn refresh_collects_tools_from_all_healthy_backends() {
        let registry = registry_of(vec![
            Arc::new(StubBackend::healthy("time-client", &["get_current_time"])),
            Arc::new(StubBackend::healthy("code-executor", &["execute_python"])),
        ]);

        registry.refresh().await;

        assert_eq!(
            registry.list(),
            vec!["execute_python".to_string(), "get_current_time".to_string()]
        );
    }

    #[tokio::test]
    async fn unhealthy_backend_contributes_nothing_and_does_not_abort_refresh() {
        let dead = Arc::new(StubBackend::unreachable("code-executor"));
        let registry = registry_of(vec![
            Arc::new(StubBackend::healthy("time-client", &["get_current_time"])),
            dead.clone(),
        ]);

        registry.refresh().await;

        assert_eq!(registry.list(), vec!["get_current_time".to_string()]);
        // Health was probed, discovery was not
        assert_eq!(dead.health_checks.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(dead.discoveries.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn duplicate_tool_goes_to_last_catalog_backend() {
        let registry = registry_of(vec![
            Arc::new(StubBackend::healthy("first", &["shared_tool"])),
            Arc::new(StubBackend::healthy("second", &["shared_tool"])),
        ]);

        registry.refresh().await;

        let descriptor = registry.resolve("shared_tool").expect("resolved");
        assert_eq!(descriptor.backend, "second");
        assert_eq!(descriptor.source, DiscoverySource::Probed);
    }

    #[tokio::test]
    async fn refresh_replaces_the_map_wholesale() {
        let flaky = Arc::new(StubBackend::healthy("svc", &["tool_a"]));
        let registry = registry_of(vec![flaky.clone()]);

        registry.refresh().await;
        assert!(registry.resolve("tool_a").is_some());

        // Rebuild against the same backend: same single tool, nothing stale
        registry.refresh().await;
        assert_eq!(registry.list(), vec!["tool_a".to_string()]);
        assert_eq!(registry.refresh_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_refreshes_coalesce() {
        let backend = Arc::new(StubBackend::healthy("svc", &["tool_a"]));
        let registry = Arc::new(registry_of(vec![backend.clone()]));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.refresh().await })
            })
            .collect();
        for task in tasks {
            task.await.expect("refresh task");
        }

        // At least one pass ran; racers that queued behind it coalesced
        let passes = registry.refresh_count();
        assert!(passes >= 1);
        assert_eq!(
            backend.discoveries.load(std::sync::atomic::Ordering::SeqCst) as u64,
            passes
        );
        assert!(registry.resolve("tool_a").is_some());
    }

    #[tokio::test]
    async fn resolve_never_triggers_discovery() {
        let backend = Arc::new(StubBackend::healthy("svc", &["tool_a"]));
        let registry = registry_of(vec![backend.clone()]);

        assert!(registry.resolve("tool_a").is_none());
        assert_eq!(backend.discoveries.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn backend_statuses_follow_catalog_order() {
        let registry = registry_of(vec![
            Arc::new(StubBackend::healthy("b", &[])),
            Arc::new(StubBackend::healthy("a", &[])),
        ]);

        let names: Vec<String> = registry
            .backend_statuses()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }
}
