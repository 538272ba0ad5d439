//! Domain value objects: Strategy, WorkflowKind, ProdTrigger.
//!
//! # Design
//!
//! These are pure value types, `Copy` and compared by value. They hold NO
//! resolution logic: which workflows a strategy produces and how production
//! is triggered live in `strategies.rs`. This file only defines the types,
//! their string forms and their parsers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::strategies;

// ── Strategy ──────────────────────────────────────────────────────────────────

/// A deployment topology.
///
/// The project model stores the strategy as the raw string the user wrote, so
/// that an unknown value is a validation issue rather than a parse failure.
/// `Strategy` is what that string means once it is recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Merge to main deploys straight to production.
    #[default]
    TrunkDirect,
    /// Version tags deploy to production.
    TrunkRelease,
    /// Merge to main deploys to staging; version tags deploy to production.
    TrunkReleaseStage,
}

impl Strategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrunkDirect => "trunk-direct",
            Self::TrunkRelease => "trunk-release",
            Self::TrunkReleaseStage => "trunk-release-stage",
        }
    }

    /// Every accepted strategy, in registry order.
    pub fn all() -> impl Iterator<Item = Strategy> {
        strategies::STRATEGY_REGISTRY.iter().map(|def| def.strategy)
    }

    /// The workflows this strategy produces, in generation order.
    pub fn workflows(self) -> &'static [WorkflowKind] {
        strategies::find_strategy(self).workflows
    }

    /// How the production workflow is triggered under this strategy.
    pub fn prod_trigger(self) -> ProdTrigger {
        strategies::find_strategy(self).prod_trigger
    }

    /// One-line human description, used by prompts and summaries.
    pub fn description(self) -> &'static str {
        strategies::find_strategy(self).description
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy: {}", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Exact, case-sensitive match against the registry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::all()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

// ── WorkflowKind ──────────────────────────────────────────────────────────────

/// One generated GitHub Actions workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowKind {
    /// Ephemeral environment per pull request.
    PrDeploy,
    /// Staging deployment on merge to main.
    StageDeploy,
    /// Production deployment; trigger depends on the strategy.
    ProdDeploy,
    /// Tears down the PR environment when the pull request closes.
    PrCleanup,
}

impl WorkflowKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrDeploy => "pr-deploy",
            Self::StageDeploy => "stage-deploy",
            Self::ProdDeploy => "prod-deploy",
            Self::PrCleanup => "pr-cleanup",
        }
    }

    /// File name of the workflow under `.github/workflows/`.
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProdTrigger ───────────────────────────────────────────────────────────────

/// What starts a production deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProdTrigger {
    MergeToMain,
    TagPush,
}

impl ProdTrigger {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MergeToMain => "merge-to-main",
            Self::TagPush => "tag-push",
        }
    }
}

impl fmt::Display for ProdTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
