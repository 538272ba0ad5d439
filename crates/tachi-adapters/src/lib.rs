//! Infrastructure adapters for tachi.
//!
//! This crate implements the ports defined in `tachi_core::application::ports`.
//! Everything that touches the disk, decodes YAML or renders templates lives
//! here.

pub mod config_source;
pub mod filesystem;
pub mod renderer;

pub use config_source::YamlConfigSource;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::TeraRenderer;
