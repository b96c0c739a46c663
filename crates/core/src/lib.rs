pub mod model;
pub mod registry;
pub mod resolver;

pub use model::manifest::{ManifestError, PackageManifest};
pub use model::outcome::{PluginResponse, ResolutionOutcome};
pub use model::uri::{Uri, UriError};
pub use registry::{RegistryError, RegistrySource, ResolverHandle, ResolverRegistry};
pub use resolver::aggregator::AggregatorResolver;
pub use resolver::context::ResolutionRequest;
pub use resolver::diagnostics::{
    DiagnosticOutcome, ResolutionDiagnostic, StepAction, StepDiagnostic,
};
pub use resolver::engine::{resolve, resolve_with_cancellation, Resolution, ResolutionError};
pub use resolver::plugin::{FileSource, Invocation, PluginError, ResolverPlugin};
