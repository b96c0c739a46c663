// Resolver invocation boundary
// The narrow contract a resolver plugin satisfies, plus the adapter that
// bounds, validates, and types a single plugin call. A misbehaving plugin
// is confined here: its failure becomes a PluginError the caller absorbs
// as no-opinion, so one bad resolver cannot abort resolution for everyone.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::model::outcome::{PluginResponse, ResolutionOutcome};
use crate::model::uri::{Uri, UriError};
use crate::registry::ResolverHandle;

/// Contract satisfied by every resolver plugin.
///
/// `try_resolve` interprets an authority + path pair and answers with at
/// most one payload field populated. Implementations are stateless with
/// respect to the resolution loop: the same URI may be offered to the same
/// plugin more than once within one resolution.
#[async_trait]
pub trait ResolverPlugin: Send + Sync {
    async fn try_resolve(&self, authority: &str, path: &str) -> anyhow::Result<PluginResponse>;

    /// Upper bound for a single `try_resolve` call. `None` means the plugin
    /// manages its own deadlines.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// File-fetch capability, separate from resolution.
///
/// Requested against the specific resolver that produced a terminal
/// manifest. Deliberately not part of [`ResolverPlugin`]: adapters that
/// only fan out (the aggregator) never implement it, so there is no
/// "unsupported operation" failure path.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn get_file(&self, path: &str) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("resolver '{resolver_id}' call failed: {source}")]
    CallFailed {
        resolver_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("resolver '{resolver_id}' timed out after {timeout:?}")]
    TimedOut {
        resolver_id: String,
        timeout: Duration,
    },

    #[error("resolver '{resolver_id}' populated more than one payload field")]
    AmbiguousResponse { resolver_id: String },

    #[error("resolver '{resolver_id}' returned unparseable URI '{uri}'")]
    MalformedResponse {
        resolver_id: String,
        uri: String,
        #[source]
        source: UriError,
    },
}

/// Result of pushing one URI through one resolver handle.
#[derive(Debug)]
pub enum Invocation {
    /// The plugin answered within its bounds.
    Answered {
        outcome: ResolutionOutcome,
        /// Inner resolver the outcome is attributed to, when a fan-out
        /// adapter answered on its behalf.
        source: Option<String>,
    },
    /// The plugin errored, timed out, or returned a malformed response.
    Faulted(PluginError),
    /// The caller's cancellation token fired mid-call.
    Cancelled,
}

/// Invoke `handle` against `uri`, racing the call against `cancel`.
pub async fn invoke(handle: &ResolverHandle, uri: &Uri, cancel: &CancellationToken) -> Invocation {
    tokio::select! {
        _ = cancel.cancelled() => Invocation::Cancelled,
        result = call_bounded(handle, uri) => match result {
            Ok((outcome, source)) => Invocation::Answered { outcome, source },
            Err(error) => Invocation::Faulted(error),
        },
    }
}

/// One plugin call under the plugin's own timeout, validated into a typed
/// outcome. Shared by the engine's adapter and the aggregator's fan-out.
pub(crate) async fn call_bounded(
    handle: &ResolverHandle,
    uri: &Uri,
) -> Result<(ResolutionOutcome, Option<String>), PluginError> {
    let call = handle.plugin().try_resolve(uri.authority(), uri.path());
    let response = match handle.plugin().timeout() {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(|source| PluginError::CallFailed {
                resolver_id: handle.id().to_string(),
                source,
            })?,
            Err(_) => {
                return Err(PluginError::TimedOut {
                    resolver_id: handle.id().to_string(),
                    timeout: limit,
                })
            }
        },
        None => call.await.map_err(|source| PluginError::CallFailed {
            resolver_id: handle.id().to_string(),
            source,
        })?,
    };
    validate_response(handle.id(), response)
}

/// Enforce payload exclusivity and parse URI payloads into values.
fn validate_response(
    resolver_id: &str,
    response: PluginResponse,
) -> Result<(ResolutionOutcome, Option<String>), PluginError> {
    if response.populated_payloads() > 1 {
        return Err(PluginError::AmbiguousResponse {
            resolver_id: resolver_id.to_string(),
        });
    }
    let PluginResponse {
        new_uri,
        manifest,
        new_resolver_uri,
        source,
    } = response;
    let outcome = if let Some(raw) = new_uri {
        ResolutionOutcome::Redirect {
            new_uri: parse_uri_payload(resolver_id, raw)?,
        }
    } else if let Some(manifest) = manifest {
        ResolutionOutcome::ManifestFound { manifest }
    } else if let Some(raw) = new_resolver_uri {
        ResolutionOutcome::ResolverSetChanged {
            new_resolver_uri: parse_uri_payload(resolver_id, raw)?,
        }
    } else {
        ResolutionOutcome::NoOpinion
    };
    Ok((outcome, source))
}

fn parse_uri_payload(resolver_id: &str, raw: String) -> Result<Uri, PluginError> {
    Uri::parse(&raw).map_err(|source| PluginError::MalformedResponse {
        resolver_id: resolver_id.to_string(),
        uri: raw,
        source,
    })
}
