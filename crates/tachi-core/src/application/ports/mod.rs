//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world. Adapters
//! in `tachi-adapters` implement them.
//!
//! - `ConfigSource`: reads and decodes a project description
//! - `ArtifactRenderer`: turns the model into file contents
//! - `Filesystem`: writes the results

pub mod output;

pub use output::{ArtifactRenderer, ConfigSource, Filesystem};

#[cfg(test)]
pub use output::{MockArtifactRenderer, MockConfigSource, MockFilesystem};
