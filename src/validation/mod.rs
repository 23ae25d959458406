//! Roster validation engine.
//!
//! Runs a fixed pipeline of independent checks over clients, workers and
//! tasks (and optionally rules) and returns a flat list of findings. The
//! pass is pure: no I/O, no shared state, same input gives the same
//! findings in the same order with the same IDs.
//!
//! # Usage
//!
//! ```
//! use roster_check::models::{Client, Task};
//! use roster_check::validation::{ValidationContext, ValidationEngine};
//!
//! let clients = vec![Client::new("C1").with_name("Acme").with_requested_task("T9")];
//! let tasks = vec![Task::new("T1")];
//! let ctx = ValidationContext::new(&clients, &[], &tasks);
//!
//! let report = ValidationEngine::new().run(&ctx);
//! assert!(!report.export_allowed());
//! ```
//!
//! # Check order
//!
//! required columns → duplicate IDs → malformed lists → range values →
//! broken JSON → unknown references → circular co-runs → overloaded
//! workers → phase-slot saturation → skill coverage → max-concurrency
//! feasibility → conflicting rules, then any optional or custom checks.

pub mod checks;
mod context;
mod engine;
mod options;
mod report;

pub use context::ValidationContext;
pub use engine::ValidationEngine;
pub use options::EngineOptions;
pub use report::{CheckOutcome, CheckStatus, ValidationReport};

use crate::models::Finding;
use serde::Serialize;
use std::fmt::Debug;

/// Identifies a check; its label doubles as the finding category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckKind {
    RequiredColumns,
    DuplicateIds,
    MalformedLists,
    RangeValues,
    BrokenJson,
    UnknownReferences,
    CircularCoRuns,
    OverloadedWorkers,
    PhaseSlotSaturation,
    SkillCoverage,
    MaxConcurrencyFeasibility,
    ConflictingRules,
    PlaceholderIds,
    /// Caller-supplied check.
    Custom(&'static str),
}

impl CheckKind {
    /// Category label carried by this check's findings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RequiredColumns => "Required Columns",
            Self::DuplicateIds => "Duplicate IDs",
            Self::MalformedLists => "Malformed Lists",
            Self::RangeValues => "Out of Range Values",
            Self::BrokenJson => "Broken JSON",
            Self::UnknownReferences => "Unknown References",
            Self::CircularCoRuns => "Circular Co-Runs",
            Self::OverloadedWorkers => "Overloaded Workers",
            Self::PhaseSlotSaturation => "Phase Slot Saturation",
            Self::SkillCoverage => "Skill Coverage",
            Self::MaxConcurrencyFeasibility => "Max Concurrency Feasibility",
            Self::ConflictingRules => "Conflicting Rules",
            Self::PlaceholderIds => "Placeholder IDs",
            Self::Custom(label) => label,
        }
    }
}

/// A validation check.
///
/// Checks are pure functions of the context. They must not panic on empty
/// or malformed input; a check with nothing to report returns an empty list.
pub trait Check: Send + Sync + Debug {
    /// Which check this is.
    fn kind(&self) -> CheckKind;

    /// Runs the check.
    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding>;

    /// Whether the context carries what this check needs. When `false` the
    /// engine records the check as skipped instead of running it.
    fn applies(&self, _ctx: &ValidationContext<'_>) -> bool {
        true
    }

    /// Check description.
    fn description(&self) -> &'static str {
        self.kind().label()
    }
}

/// Runs the standard pipeline with default options.
pub fn run_all(ctx: &ValidationContext<'_>) -> Vec<Finding> {
    ValidationEngine::new().run_all(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_distinct() {
        let kinds = [
            CheckKind::RequiredColumns,
            CheckKind::DuplicateIds,
            CheckKind::MalformedLists,
            CheckKind::RangeValues,
            CheckKind::BrokenJson,
            CheckKind::UnknownReferences,
            CheckKind::CircularCoRuns,
            CheckKind::OverloadedWorkers,
            CheckKind::PhaseSlotSaturation,
            CheckKind::SkillCoverage,
            CheckKind::MaxConcurrencyFeasibility,
            CheckKind::ConflictingRules,
            CheckKind::PlaceholderIds,
        ];
        let labels: std::collections::HashSet<&str> = kinds.iter().map(CheckKind::label).collect();
        assert_eq!(labels.len(), kinds.len());
    }

    #[test]
    fn test_custom_label() {
        assert_eq!(CheckKind::Custom("Site Rules").label(), "Site Rules");
    }

    #[test]
    fn test_description_defaults_to_label() {
        assert_eq!(checks::SkillCoverage.description(), "Skill Coverage");
    }
}
