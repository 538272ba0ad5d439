//! Config source adapters.

mod yaml;

pub use yaml::YamlConfigSource;
