pub mod azure;
pub mod common;
pub mod generation_plan;
pub mod project;
pub mod service;

pub use crate::domain::DomainError;
pub use azure::AzureConfig;
pub use generation_plan::{ArtifactKind, GenerationPlan, PlannedFile};
pub use project::ProjectConfig;
pub use service::Service;
