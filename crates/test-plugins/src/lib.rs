pub mod errors;
pub mod faulty;
pub mod files;
pub mod manifests;
pub mod registry_source;
pub mod scripted;
pub mod trace;

pub use faulty::*;
pub use files::*;
pub use manifests::*;
pub use registry_source::*;
pub use scripted::*;
pub use trace::*;
