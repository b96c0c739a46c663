// Package manifest boundary
// Deserialization of located manifest text into a validated descriptor.
// Manifest failures are distinct from resolution failures: the engine never
// retries alternate resolvers after a manifest has been found.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::uri::{Uri, UriError};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest text is empty")]
    Empty,

    #[error("manifest is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("manifest is not valid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("manifest lists an invalid resolver URI '{uri}'")]
    InvalidResolverUri {
        uri: String,
        #[source]
        source: UriError,
    },
}

/// Validated package descriptor located at a fully resolved URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// URIs of resolver packages, in priority order. Consumed by the
    /// registry construction boundary after a resolver-set swap.
    #[serde(default)]
    pub resolvers: Vec<String>,
}

impl PackageManifest {
    /// Parse the resolver list into URIs, preserving order.
    pub fn resolver_uris(&self) -> Result<Vec<Uri>, ManifestError> {
        self.resolvers
            .iter()
            .map(|raw| {
                Uri::parse(raw).map_err(|source| ManifestError::InvalidResolverUri {
                    uri: raw.clone(),
                    source,
                })
            })
            .collect()
    }
}

pub fn from_json(text: &str) -> Result<PackageManifest, ManifestError> {
    Ok(serde_json::from_str(text)?)
}

pub fn from_yaml(text: &str) -> Result<PackageManifest, ManifestError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Deserialize manifest text, sniffing the format: documents opening with
/// `{` are treated as JSON, everything else as YAML.
pub fn deserialize(text: &str) -> Result<PackageManifest, ManifestError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(ManifestError::Empty);
    }
    if trimmed.starts_with('{') {
        from_json(text)
    } else {
        from_yaml(text)
    }
}
