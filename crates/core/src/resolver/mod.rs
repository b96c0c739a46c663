//! URI resolution engine.
//!
//! This module drives an ordered registry of resolver plugins against a URI
//! until a manifest is found, the registry is exhausted, or the resolver
//! set itself must change.
//!
//! # Example
//!
//! ```ignore
//! use reso_core::resolver::context::ResolutionRequest;
//! use reso_core::resolver::engine::{resolve, Resolution};
//!
//! let outcome = resolve(ResolutionRequest::new(uri), &registry).await?;
//! ```
pub mod aggregator;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod plugin;
