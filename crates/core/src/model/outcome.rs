// Resolution outcome types
// Defines the raw plugin response record and the validated tagged variant
// the engine operates on.

use serde::{Deserialize, Serialize};

use crate::model::uri::Uri;

/// Raw record returned by a resolver plugin across the invocation boundary.
///
/// At most one of the three payload fields may be populated; the invocation
/// adapter rejects anything else. `source` is attribution metadata, not a
/// payload: fan-out adapters set it to the id of the inner resolver that
/// actually produced the payload, and it does not count toward the
/// one-payload rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginResponse {
    #[serde(default)]
    pub new_uri: Option<String>,
    #[serde(default)]
    pub manifest: Option<String>,
    #[serde(default)]
    pub new_resolver_uri: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl PluginResponse {
    /// Response carrying no payload: this resolver has no opinion.
    pub fn no_opinion() -> Self {
        Self::default()
    }

    pub fn redirect(new_uri: impl Into<String>) -> Self {
        Self {
            new_uri: Some(new_uri.into()),
            ..Self::default()
        }
    }

    pub fn manifest(text: impl Into<String>) -> Self {
        Self {
            manifest: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn resolver_set_changed(new_resolver_uri: impl Into<String>) -> Self {
        Self {
            new_resolver_uri: Some(new_resolver_uri.into()),
            ..Self::default()
        }
    }

    /// Attribute this response to an inner resolver.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Number of populated payload fields (`source` excluded).
    pub fn populated_payloads(&self) -> usize {
        usize::from(self.new_uri.is_some())
            + usize::from(self.manifest.is_some())
            + usize::from(self.new_resolver_uri.is_some())
    }
}

/// Validated outcome of one resolver invocation. Exactly one variant per
/// invocation; enforced at the boundary, not left to caller discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// This resolver does not recognize the URI.
    NoOpinion,
    /// Resolution continues with `new_uri` in place of the current URI.
    Redirect { new_uri: Uri },
    /// The terminal package manifest was located at the current URI.
    ManifestFound { manifest: String },
    /// The set of resolvers to consult should change; the new set is
    /// discovered by resolving `new_resolver_uri`.
    ResolverSetChanged { new_resolver_uri: Uri },
}

impl From<ResolutionOutcome> for PluginResponse {
    fn from(outcome: ResolutionOutcome) -> Self {
        match outcome {
            ResolutionOutcome::NoOpinion => Self::no_opinion(),
            ResolutionOutcome::Redirect { new_uri } => Self::redirect(new_uri.to_string()),
            ResolutionOutcome::ManifestFound { manifest } => Self::manifest(manifest),
            ResolutionOutcome::ResolverSetChanged { new_resolver_uri } => {
                Self::resolver_set_changed(new_resolver_uri.to_string())
            }
        }
    }
}
