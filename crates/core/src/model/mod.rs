//! Value types exchanged across the resolution boundary.

pub mod manifest;
pub mod outcome;
pub mod uri;
