//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "check a config" or "generate the pipelines".

pub mod config_service;
pub mod generate_service;

pub use config_service::ConfigService;
pub use generate_service::{GenerateService, WriteSummary};
