// Resolver registry
// An ordered collection of resolver handles. Order is the priority/trial
// order and is preserved exactly as supplied. A registry is built fresh for
// each resolution and replaced wholesale (never mutated in place) when the
// resolver set changes mid-resolution.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::model::manifest::PackageManifest;
use crate::resolver::plugin::{FileSource, ResolverPlugin};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate resolver id '{id}' in registry")]
    DuplicateResolver { id: String },

    #[error("manifest '{name}' lists no resolver packages")]
    EmptyResolverList { name: String },
}

/// An invocable resolver plugin paired with its registry identity.
///
/// Handles are owned by the registry and live only as long as the
/// resolution call that uses them; they are not cached across unrelated
/// resolutions.
#[derive(Clone)]
pub struct ResolverHandle {
    id: String,
    plugin: Arc<dyn ResolverPlugin>,
    file_source: Option<Arc<dyn FileSource>>,
}

impl ResolverHandle {
    pub fn new(id: impl Into<String>, plugin: Arc<dyn ResolverPlugin>) -> Self {
        Self {
            id: id.into(),
            plugin,
            file_source: None,
        }
    }

    /// Attach the file-fetch capability for this resolver. Requested by the
    /// caller after a terminal `Found`, never during the resolution loop.
    pub fn with_file_source(mut self, file_source: Arc<dyn FileSource>) -> Self {
        self.file_source = Some(file_source);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn plugin(&self) -> &dyn ResolverPlugin {
        self.plugin.as_ref()
    }

    pub fn file_source(&self) -> Option<&dyn FileSource> {
        self.file_source.as_deref()
    }
}

impl fmt::Debug for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverHandle")
            .field("id", &self.id)
            .field("has_file_source", &self.file_source.is_some())
            .finish()
    }
}

/// Ordered sequence of resolver handles with unique ids.
#[derive(Debug, Clone, Default)]
pub struct ResolverRegistry {
    handles: Vec<ResolverHandle>,
}

impl ResolverRegistry {
    /// Build a registry, preserving `handles` order. Duplicate ids are
    /// rejected so that resolver identity in outcomes stays unambiguous.
    pub fn new(handles: Vec<ResolverHandle>) -> Result<Self, RegistryError> {
        for (index, handle) in handles.iter().enumerate() {
            if handles[..index].iter().any(|seen| seen.id() == handle.id()) {
                return Err(RegistryError::DuplicateResolver {
                    id: handle.id().to_string(),
                });
            }
        }
        Ok(Self { handles })
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResolverHandle> {
        self.handles.get(index)
    }

    /// Look up a handle by resolver id, e.g. to request file fetch from the
    /// resolver that produced a terminal manifest.
    pub fn find(&self, id: &str) -> Option<&ResolverHandle> {
        self.handles.iter().find(|handle| handle.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolverHandle> {
        self.handles.iter()
    }
}

/// Registry construction boundary: build a fresh registry from a resolved
/// manifest. Invoked by the caller after a resolver-set swap, never by the
/// engine itself.
pub trait RegistrySource {
    fn registry_for(&self, manifest: &PackageManifest) -> anyhow::Result<ResolverRegistry>;
}
