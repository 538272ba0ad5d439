//! tachi core
//!
//! Domain and application layers for the tachi CI/CD generator, following a
//! ports and adapters layout.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             tachi-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ConfigService, GenerateService)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (ConfigSource, ArtifactRenderer, Fs)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     tachi-adapters (Infrastructure)     │
//! │ (YamlConfigSource, TeraRenderer, ...)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfig, validation, strategies) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tachi_core::domain::{ProjectConfig, workflows_for};
//!
//! fn check<'de, D: serde::Deserializer<'de>>(document: D) {
//!     let config = ProjectConfig::from_document(document).unwrap();
//!     for issue in config.validate() {
//!         eprintln!("{issue}");
//!     }
//!     let workflows = workflows_for(&config.strategy);
//!     println!("{} workflows", workflows.len());
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigService, GenerateService, WriteSummary,
        ports::{ArtifactRenderer, ConfigSource, Filesystem},
    };
    pub use crate::domain::{
        AzureConfig, GenerationPlan, ProjectConfig, Service, Strategy, ValidationIssue,
        WorkflowKind, workflows_for,
    };
    pub use crate::error::{TachiError, TachiResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
