//! Application layer for tachi.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ConfigService, GenerateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ConfigService, GenerateService, WriteSummary};

pub use ports::{ArtifactRenderer, ConfigSource, Filesystem};

pub use error::ApplicationError;
