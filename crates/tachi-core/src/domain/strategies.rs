//! Deployment strategy registry and resolver.
//!
//! Each strategy is described exactly once by a [`StrategyDef`]. Validity
//! checking (`Strategy::from_str`) and workflow resolution ([`workflows_for`])
//! both read this table, so the set of accepted strategies is never spelled
//! out twice.
//!
//! # Adding a New Strategy
//!
//! 1. Add a variant to `Strategy` in `value_objects.rs`
//! 2. Add one [`StrategyDef`] entry to [`STRATEGY_REGISTRY`]
//! 3. Add templates for any new workflow kind in `tachi-adapters`

use crate::domain::value_objects::{ProdTrigger, Strategy, WorkflowKind};

/// Describes what one strategy generates.
#[derive(Debug, Clone, Copy)]
pub struct StrategyDef {
    pub strategy: Strategy,

    /// Workflows to generate, in order. Never contains duplicates.
    pub workflows: &'static [WorkflowKind],

    pub prod_trigger: ProdTrigger,

    pub description: &'static str,
}

/// Single source of truth for deployment strategies.
pub static STRATEGY_REGISTRY: &[StrategyDef] = &[
    StrategyDef {
        strategy: Strategy::TrunkDirect,
        workflows: &[
            WorkflowKind::PrDeploy,
            WorkflowKind::ProdDeploy,
            WorkflowKind::PrCleanup,
        ],
        prod_trigger: ProdTrigger::MergeToMain,
        description: "PR environments, merge to main deploys to production",
    },
    StrategyDef {
        strategy: Strategy::TrunkRelease,
        workflows: &[
            WorkflowKind::PrDeploy,
            WorkflowKind::ProdDeploy,
            WorkflowKind::PrCleanup,
        ],
        prod_trigger: ProdTrigger::TagPush,
        description: "PR environments, version tags deploy to production",
    },
    StrategyDef {
        strategy: Strategy::TrunkReleaseStage,
        workflows: &[
            WorkflowKind::PrDeploy,
            WorkflowKind::StageDeploy,
            WorkflowKind::ProdDeploy,
            WorkflowKind::PrCleanup,
        ],
        prod_trigger: ProdTrigger::TagPush,
        description: "PR environments, main deploys to staging, version tags to production",
    },
];

/// Look up the definition for a strategy.
pub fn find_strategy(strategy: Strategy) -> &'static StrategyDef {
    STRATEGY_REGISTRY
        .iter()
        .find(|def| def.strategy == strategy)
        .unwrap_or(&STRATEGY_REGISTRY[0])
}

/// Comma-separated list of accepted strategy names, for messages.
pub fn valid_strategy_names() -> String {
    STRATEGY_REGISTRY
        .iter()
        .map(|def| def.strategy.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Interpret a raw strategy string for generation purposes.
///
/// Total over all inputs: anything unrecognised resolves to the default
/// strategy (`trunk-direct`). Whether the value is acceptable is a validation
/// question, not a resolution one.
pub fn resolve_strategy(raw: &str) -> Strategy {
    raw.parse().unwrap_or_default()
}

/// The ordered workflows to generate for a raw strategy string.
pub fn workflows_for(raw: &str) -> Vec<WorkflowKind> {
    resolve_strategy(raw).workflows().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_one_entry_per_strategy() {
        let unique: HashSet<_> = STRATEGY_REGISTRY.iter().map(|d| d.strategy).collect();
        assert_eq!(unique.len(), STRATEGY_REGISTRY.len());
    }

    #[test]
    fn no_strategy_lists_a_workflow_twice() {
        for def in STRATEGY_REGISTRY {
            let unique: HashSet<_> = def.workflows.iter().collect();
            assert_eq!(unique.len(), def.workflows.len(), "{}", def.strategy);
        }
    }

    #[test]
    fn trunk_direct_workflows() {
        assert_eq!(
            workflows_for("trunk-direct"),
            vec![
                WorkflowKind::PrDeploy,
                WorkflowKind::ProdDeploy,
                WorkflowKind::PrCleanup
            ]
        );
    }

    #[test]
    fn trunk_release_matches_trunk_direct_set() {
        assert_eq!(workflows_for("trunk-release"), workflows_for("trunk-direct"));
    }

    #[test]
    fn trunk_release_stage_adds_staging_before_prod() {
        assert_eq!(
            workflows_for("trunk-release-stage"),
            vec![
                WorkflowKind::PrDeploy,
                WorkflowKind::StageDeploy,
                WorkflowKind::ProdDeploy,
                WorkflowKind::PrCleanup
            ]
        );
    }

    #[test]
    fn unknown_strategies_fall_back_to_trunk_direct() {
        for raw in ["nonsense", "", "basic", "TRUNK-DIRECT", "trunk-release-stage "] {
            assert_eq!(workflows_for(raw), workflows_for("trunk-direct"), "{raw:?}");
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        for raw in ["trunk-direct", "trunk-release", "trunk-release-stage", "x"] {
            assert_eq!(workflows_for(raw), workflows_for(raw));
        }
    }

    #[test]
    fn prod_trigger_differs_by_strategy() {
        assert_eq!(Strategy::TrunkDirect.prod_trigger(), ProdTrigger::MergeToMain);
        assert_eq!(Strategy::TrunkRelease.prod_trigger(), ProdTrigger::TagPush);
        assert_eq!(Strategy::TrunkReleaseStage.prod_trigger(), ProdTrigger::TagPush);
    }

    #[test]
    fn valid_names_follow_registry_order() {
        assert_eq!(
            valid_strategy_names(),
            "trunk-direct, trunk-release, trunk-release-stage"
        );
    }
}
