// Aggregator adapter
// Presents an ordered list of inner resolvers as a single resolver-shaped
// unit, attributing any hit to the inner resolver that produced it so the
// outer engine never needs to know the aggregator's composition.

use async_trait::async_trait;
use tracing::warn;

use crate::model::outcome::{PluginResponse, ResolutionOutcome};
use crate::model::uri::Uri;
use crate::registry::ResolverHandle;
use crate::resolver::plugin::{call_bounded, ResolverPlugin};

/// A resolver that fans out sequentially over a fixed inner list.
///
/// The inner list is set at construction and never changes; the aggregator
/// holds no mutable state across calls. It imposes no timeout of its own —
/// each inner call carries its own plugin timeout. File fetch is not part
/// of its contract: that capability belongs to the specific inner resolver
/// a terminal outcome is attributed to.
pub struct AggregatorResolver {
    inner: Vec<ResolverHandle>,
}

impl AggregatorResolver {
    pub fn new(inner: Vec<ResolverHandle>) -> Self {
        Self { inner }
    }

    /// The inner handles, in fan-out order.
    pub fn handles(&self) -> &[ResolverHandle] {
        &self.inner
    }
}

#[async_trait]
impl ResolverPlugin for AggregatorResolver {
    async fn try_resolve(&self, authority: &str, path: &str) -> anyhow::Result<PluginResponse> {
        let uri = Uri::new(authority, path)?;
        for handle in &self.inner {
            match call_bounded(handle, &uri).await {
                Err(error) => {
                    warn!(
                        inner_resolver = handle.id(),
                        uri = %uri,
                        %error,
                        "inner resolver fault absorbed, continuing fan-out"
                    );
                }
                Ok((ResolutionOutcome::NoOpinion, _)) => {}
                Ok((outcome, source)) => {
                    let attributed = source.unwrap_or_else(|| handle.id().to_string());
                    return Ok(PluginResponse::from(outcome).with_source(attributed));
                }
            }
        }
        Ok(PluginResponse::no_opinion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Scripted(PluginResponse);

    #[async_trait]
    impl ResolverPlugin for Scripted {
        async fn try_resolve(&self, _: &str, _: &str) -> anyhow::Result<PluginResponse> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl ResolverPlugin for Failing {
        async fn try_resolve(&self, _: &str, _: &str) -> anyhow::Result<PluginResponse> {
            Err(anyhow::anyhow!("backend unreachable"))
        }
    }

    fn handle(id: &str, response: PluginResponse) -> ResolverHandle {
        ResolverHandle::new(id, Arc::new(Scripted(response)))
    }

    #[tokio::test]
    async fn first_inner_hit_wins_and_is_attributed() {
        let aggregator = AggregatorResolver::new(vec![
            handle("inner-a", PluginResponse::no_opinion()),
            handle("inner-b", PluginResponse::manifest("{\"name\":\"pkg\"}")),
            handle("inner-c", PluginResponse::manifest("{\"name\":\"other\"}")),
        ]);

        let response = aggregator.try_resolve("ens", "domain.eth").await.unwrap();
        assert_eq!(response.manifest.as_deref(), Some("{\"name\":\"pkg\"}"));
        assert_eq!(response.source.as_deref(), Some("inner-b"));
    }

    #[tokio::test]
    async fn inner_fault_does_not_stop_the_scan() {
        let aggregator = AggregatorResolver::new(vec![
            ResolverHandle::new("broken", Arc::new(Failing)),
            handle("healthy", PluginResponse::redirect("w3://ipfs/Qm")),
        ]);

        let response = aggregator.try_resolve("ens", "domain.eth").await.unwrap();
        assert_eq!(response.new_uri.as_deref(), Some("w3://ipfs/Qm"));
        assert_eq!(response.source.as_deref(), Some("healthy"));
    }

    #[tokio::test]
    async fn all_silent_inners_yield_no_opinion() {
        let aggregator = AggregatorResolver::new(vec![
            handle("inner-a", PluginResponse::no_opinion()),
            handle("inner-b", PluginResponse::no_opinion()),
        ]);

        let response = aggregator.try_resolve("ens", "domain.eth").await.unwrap();
        assert_eq!(response, PluginResponse::no_opinion());
    }

    #[tokio::test]
    async fn nested_attribution_is_preserved() {
        // An aggregator wrapping an aggregator keeps the innermost id.
        let inner = AggregatorResolver::new(vec![handle(
            "deep",
            PluginResponse::manifest("{}"),
        )]);
        let outer = AggregatorResolver::new(vec![ResolverHandle::new("mid", Arc::new(inner))]);

        let response = outer.try_resolve("ens", "x").await.unwrap();
        assert_eq!(response.source.as_deref(), Some("deep"));
    }
}
