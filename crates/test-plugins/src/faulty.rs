// Misbehaving resolver plugins
// FailingResolver errors on every call; HangingResolver never answers,
// optionally declaring a plugin timeout so the adapter can cut it off.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use reso_core::model::outcome::PluginResponse;
use reso_core::model::uri::Uri;
use reso_core::registry::ResolverHandle;
use reso_core::resolver::plugin::ResolverPlugin;

use crate::trace::CallTrace;

pub struct FailingResolver {
    id: String,
    message: String,
    trace: Option<CallTrace>,
}

impl FailingResolver {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            trace: None,
        }
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
impl ResolverPlugin for FailingResolver {
    async fn try_resolve(&self, authority: &str, path: &str) -> anyhow::Result<PluginResponse> {
        let uri = Uri::new(authority, path)?;
        if let Some(trace) = &self.trace {
            trace.record(&self.id, &uri.to_string())?;
        }
        Err(anyhow::anyhow!("{}", self.message))
    }
}

pub struct HangingResolver {
    id: String,
    timeout: Option<Duration>,
    trace: Option<CallTrace>,
}

impl HangingResolver {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timeout: None,
            trace: None,
        }
    }

    /// Declare a plugin timeout, so the invocation adapter aborts the hang.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
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
impl ResolverPlugin for HangingResolver {
    async fn try_resolve(&self, authority: &str, path: &str) -> anyhow::Result<PluginResponse> {
        let uri = Uri::new(authority, path)?;
        if let Some(trace) = &self.trace {
            trace.record(&self.id, &uri.to_string())?;
        }
        std::future::pending::<anyhow::Result<PluginResponse>>().await
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
