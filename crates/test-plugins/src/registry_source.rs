// Registry construction double
// Maps manifest names to prebuilt registries, standing in for the package
// loading machinery that turns an aggregator manifest into a resolver set.

use std::collections::HashMap;

use reso_core::model::manifest::PackageManifest;
use reso_core::registry::{RegistryError, RegistrySource, ResolverRegistry};

#[derive(Debug, Clone, Default)]
pub struct StaticRegistrySource {
    registries: HashMap<String, ResolverRegistry>,
}

impl StaticRegistrySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, manifest_name: &str, registry: ResolverRegistry) -> Self {
        self.registries.insert(manifest_name.to_string(), registry);
        self
    }
}

impl RegistrySource for StaticRegistrySource {
    fn registry_for(&self, manifest: &PackageManifest) -> anyhow::Result<ResolverRegistry> {
        if manifest.resolvers.is_empty() {
            return Err(RegistryError::EmptyResolverList {
                name: manifest.name.clone(),
            }
            .into());
        }
        self.registries
            .get(&manifest.name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no registry staged for manifest '{}'", manifest.name))
    }
}
