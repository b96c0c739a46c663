// Resolver engine - main resolution entry point
// This module implements the core resolve() loop that scans the active
// registry against the current URI, follows redirects, and hands control
// back to the caller when the resolver set itself must change.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::model::outcome::ResolutionOutcome;
use crate::model::uri::Uri;
use crate::registry::ResolverRegistry;
use crate::resolver::context::{EngineState, ResolutionRequest};
use crate::resolver::diagnostics::{DiagnosticOutcome, ResolutionDiagnostic, StepDiagnostic};
use crate::resolver::plugin::{invoke, Invocation};

#[derive(Debug, Error)]
pub enum ResolutionError {
    /// A redirect reintroduced a previously visited URI. Fatal: retrying
    /// with the same inputs is guaranteed to cycle again.
    #[error("redirect cycle detected at {uri}")]
    CycleDetected {
        uri: Uri,
        diagnostic: ResolutionDiagnostic,
    },

    /// Caller-initiated cancellation fired mid-resolution. No terminal
    /// outcome was recorded; a fresh call with the same inputs is safe.
    #[error("resolution cancelled")]
    Cancelled { diagnostic: ResolutionDiagnostic },
}

impl ResolutionError {
    pub fn diagnostic(&self) -> &ResolutionDiagnostic {
        match self {
            Self::CycleDetected { diagnostic, .. } => diagnostic,
            Self::Cancelled { diagnostic } => diagnostic,
        }
    }
}

/// Terminal outcome of one resolution run.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A manifest was located at `uri`. `resolver_id` identifies the
    /// resolver that produced it, so the caller can request file fetch
    /// against that specific resolver afterwards.
    Found {
        uri: Uri,
        manifest: String,
        resolver_id: String,
        diagnostic: ResolutionDiagnostic,
    },
    /// No resolver in the active registry had an opinion on any URI
    /// reachable from the input. A negative result, not an error.
    Exhausted {
        uri: Uri,
        diagnostic: ResolutionDiagnostic,
    },
    /// The resolver set must change before scanning can resume. The caller
    /// resolves `new_resolver_uri` to a manifest, rebuilds a registry from
    /// it, and re-invokes the engine with `current_uri` unchanged and the
    /// returned `visited` log seeded into the new request.
    ResolverSetSwapped {
        current_uri: Uri,
        new_resolver_uri: Uri,
        visited: Vec<Uri>,
        diagnostic: ResolutionDiagnostic,
    },
}

/// Resolve `request` against `registry` without external cancellation.
pub async fn resolve(
    request: ResolutionRequest,
    registry: &ResolverRegistry,
) -> Result<Resolution, ResolutionError> {
    resolve_with_cancellation(request, registry, &CancellationToken::new()).await
}

/// Resolve `request` against `registry`, aborting cleanly if `cancel` fires.
///
/// The scan is sequential and ordered: the first resolver in registry order
/// to answer wins, and later resolvers are never consulted for that URI.
/// A redirect restarts the scan from index 0 against the new URI, since any
/// resolver, not only later ones, may recognize the new authority.
pub async fn resolve_with_cancellation(
    request: ResolutionRequest,
    registry: &ResolverRegistry,
    cancel: &CancellationToken,
) -> Result<Resolution, ResolutionError> {
    let mut state = EngineState::from_request(&request);
    let mut diagnostic = ResolutionDiagnostic::new(request.uri.clone());

    while let Some(handle) = registry.get(state.cursor) {
        match invoke(handle, &state.current_uri, cancel).await {
            Invocation::Cancelled => {
                debug!(uri = %state.current_uri, resolver = handle.id(), "resolution cancelled");
                diagnostic.set_visited(state.visited);
                diagnostic.set_outcome(DiagnosticOutcome::Cancelled);
                return Err(ResolutionError::Cancelled { diagnostic });
            }
            Invocation::Faulted(error) => {
                warn!(
                    resolver = handle.id(),
                    uri = %state.current_uri,
                    %error,
                    "resolver fault absorbed as no-opinion"
                );
                diagnostic.add_step(StepDiagnostic::fault(
                    handle.id(),
                    state.current_uri.clone(),
                    &error,
                ));
                state.cursor += 1;
            }
            Invocation::Answered { outcome, source } => {
                let resolver_id = source.unwrap_or_else(|| handle.id().to_string());
                match outcome {
                    ResolutionOutcome::NoOpinion => {
                        diagnostic.add_step(StepDiagnostic::no_opinion(
                            &resolver_id,
                            state.current_uri.clone(),
                        ));
                        state.cursor += 1;
                    }
                    ResolutionOutcome::Redirect { new_uri } => {
                        debug!(
                            resolver = %resolver_id,
                            from = %state.current_uri,
                            to = %new_uri,
                            "redirect"
                        );
                        diagnostic.add_step(StepDiagnostic::redirect(
                            &resolver_id,
                            state.current_uri.clone(),
                            &new_uri,
                        ));
                        if !state.record_redirect(new_uri.clone()) {
                            warn!(uri = %new_uri, "redirect cycle detected");
                            diagnostic.set_visited(state.visited);
                            diagnostic.set_outcome(DiagnosticOutcome::CycleDetected);
                            return Err(ResolutionError::CycleDetected {
                                uri: new_uri,
                                diagnostic,
                            });
                        }
                    }
                    ResolutionOutcome::ManifestFound { manifest } => {
                        debug!(resolver = %resolver_id, uri = %state.current_uri, "manifest found");
                        diagnostic.add_step(StepDiagnostic::manifest_found(
                            &resolver_id,
                            state.current_uri.clone(),
                        ));
                        diagnostic.set_visited(state.visited);
                        diagnostic.set_outcome(DiagnosticOutcome::Found);
                        return Ok(Resolution::Found {
                            uri: state.current_uri,
                            manifest,
                            resolver_id,
                            diagnostic,
                        });
                    }
                    ResolutionOutcome::ResolverSetChanged { new_resolver_uri } => {
                        debug!(
                            resolver = %resolver_id,
                            uri = %state.current_uri,
                            new_resolver_uri = %new_resolver_uri,
                            "resolver set swap requested"
                        );
                        diagnostic.add_step(StepDiagnostic::resolver_set_changed(
                            &resolver_id,
                            state.current_uri.clone(),
                            &new_resolver_uri,
                        ));
                        diagnostic.set_visited(state.visited.clone());
                        diagnostic.set_outcome(DiagnosticOutcome::ResolverSetSwapped);
                        return Ok(Resolution::ResolverSetSwapped {
                            current_uri: state.current_uri,
                            new_resolver_uri,
                            visited: state.visited,
                            diagnostic,
                        });
                    }
                }
            }
        }
    }

    debug!(uri = %state.current_uri, "registry exhausted");
    diagnostic.set_visited(state.visited);
    diagnostic.set_outcome(DiagnosticOutcome::Exhausted);
    Ok(Resolution::Exhausted {
        uri: state.current_uri,
        diagnostic,
    })
}
