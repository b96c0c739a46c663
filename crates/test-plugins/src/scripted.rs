// Scripted resolver plugin
// Answers from a fixed URI -> response table; every URI not in the table
// gets no opinion. Stateless across calls, like a real resolver plugin.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use reso_core::model::outcome::PluginResponse;
use reso_core::model::uri::Uri;
use reso_core::registry::ResolverHandle;
use reso_core::resolver::plugin::ResolverPlugin;

use crate::trace::CallTrace;

pub struct ScriptedResolver {
    id: String,
    responses: HashMap<String, PluginResponse>,
    trace: Option<CallTrace>,
}

impl ScriptedResolver {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            responses: HashMap::new(),
            trace: None,
        }
    }

    /// Script an arbitrary response for `uri`.
    pub fn on(mut self, uri: &str, response: PluginResponse) -> Self {
        self.responses.insert(canonical(uri), response);
        self
    }

    pub fn redirect(self, from: &str, to: &str) -> Self {
        let response = PluginResponse::redirect(canonical(to));
        self.on(from, response)
    }

    pub fn manifest(self, uri: &str, manifest: &str) -> Self {
        let response = PluginResponse::manifest(manifest);
        self.on(uri, response)
    }

    pub fn set_change(self, uri: &str, new_resolver_uri: &str) -> Self {
        let response = PluginResponse::resolver_set_changed(canonical(new_resolver_uri));
        self.on(uri, response)
    }

    pub fn traced(mut self, trace: CallTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn into_handle(self) -> ResolverHandle {
        let id = self.id.clone();
        ResolverHandle::new(id, Arc::new(self))
    }
}

#[async_trait]
impl ResolverPlugin for ScriptedResolver {
    async fn try_resolve(&self, authority: &str, path: &str) -> anyhow::Result<PluginResponse> {
        let uri = Uri::new(authority, path)?;
        if let Some(trace) = &self.trace {
            trace.record(&self.id, &uri.to_string())?;
        }
        Ok(self
            .responses
            .get(&uri.to_string())
            .cloned()
            .unwrap_or_default())
    }
}

fn canonical(uri: &str) -> String {
    match Uri::parse(uri) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => uri.to_string(),
    }
}
