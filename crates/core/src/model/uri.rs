// Authority-qualified resource identifier
// An immutable authority + path pair; the authority names the resolution
// scheme, the path is opaque text interpreted by whichever resolver claims it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Canonical scheme prefix accepted and rendered by [`Uri`].
pub const URI_SCHEME_PREFIX: &str = "w3://";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("URI is empty")]
    Empty,

    #[error("URI '{0}' has an empty authority")]
    EmptyAuthority(String),

    #[error("URI '{0}' is missing the '/' separating authority and path")]
    MissingSeparator(String),
}

/// An authority-qualified resource identifier.
///
/// Equality is exact and case-sensitive on both components. Values are
/// immutable once constructed; every redirect produces a new `Uri`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    authority: String,
    path: String,
}

impl Uri {
    /// Build a URI from already-split components. The authority must be a
    /// non-empty token; the path may be any text, including empty.
    pub fn new(authority: impl Into<String>, path: impl Into<String>) -> Result<Self, UriError> {
        let authority = authority.into();
        let path = path.into();
        if authority.is_empty() {
            return Err(UriError::EmptyAuthority(format!(
                "{URI_SCHEME_PREFIX}{authority}/{path}"
            )));
        }
        Ok(Self { authority, path })
    }

    /// Parse `w3://authority/path` or the bare `authority/path` form.
    ///
    /// The scheme prefix is stripped during normalization; the path starts
    /// after the first `/` and is kept verbatim.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UriError::Empty);
        }
        let rest = trimmed.strip_prefix(URI_SCHEME_PREFIX).unwrap_or(trimmed);
        let (authority, path) = rest
            .split_once('/')
            .ok_or_else(|| UriError::MissingSeparator(input.to_string()))?;
        if authority.is_empty() {
            return Err(UriError::EmptyAuthority(input.to_string()));
        }
        Ok(Self {
            authority: authority.to_string(),
            path: path.to_string(),
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_SCHEME_PREFIX}{}/{}", self.authority, self.path)
    }
}

impl Serialize for Uri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uri::parse(&raw).map_err(D::Error::custom)
    }
}
