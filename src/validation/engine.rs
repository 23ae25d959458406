//! Validation engine: ordered check dispatch.

use std::sync::Arc;

use super::checks::{
    BrokenJson, CircularCoRuns, ConflictingRules, DuplicateIds, MalformedLists,
    MaxConcurrencyFeasibility, OverloadedWorkers, PhaseSlotSaturation, PlaceholderIds,
    RangeValues, RequiredColumns, SkillCoverage, UnknownReferences,
};
use super::{Check, CheckKind, EngineOptions, ValidationContext, ValidationReport};
use crate::models::Finding;

/// Runs checks in a fixed order and collects their findings.
///
/// The standard pipeline is built from [`EngineOptions`]; extra checks can
/// be appended with [`with_check`](Self::with_check) and run after it.
///
/// # Example
/// ```
/// use roster_check::models::Roster;
/// use roster_check::validation::{EngineOptions, ValidationEngine};
///
/// let engine = ValidationEngine::with_options(EngineOptions::default().with_placeholder_ids(true));
/// let report = engine.run(&Roster::new().context());
/// assert!(report.findings.is_empty());
/// ```
#[derive(Clone)]
pub struct ValidationEngine {
    checks: Vec<Arc<dyn Check>>,
    options: EngineOptions,
}

impl ValidationEngine {
    /// Creates the standard pipeline with default options.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Creates the standard pipeline with the given options.
    pub fn with_options(options: EngineOptions) -> Self {
        let mut checks: Vec<Arc<dyn Check>> = vec![
            Arc::new(RequiredColumns),
            Arc::new(DuplicateIds),
            Arc::new(MalformedLists),
            Arc::new(RangeValues::from_options(&options)),
            Arc::new(BrokenJson),
            Arc::new(UnknownReferences),
            Arc::new(CircularCoRuns),
            Arc::new(OverloadedWorkers),
            Arc::new(PhaseSlotSaturation),
            Arc::new(SkillCoverage),
            Arc::new(MaxConcurrencyFeasibility),
            Arc::new(ConflictingRules),
        ];
        if options.flag_placeholder_ids {
            checks.push(Arc::new(PlaceholderIds));
        }
        Self { checks, options }
    }

    /// Appends a check after the standard pipeline.
    pub fn with_check<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Options this engine was built with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Checks in run order.
    pub fn check_kinds(&self) -> Vec<CheckKind> {
        self.checks.iter().map(|c| c.kind()).collect()
    }

    /// Runs every check and returns the findings with per-check outcomes.
    pub fn run(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let mut report = ValidationReport::default();

        for check in &self.checks {
            let kind = check.kind();
            if !check.applies(ctx) {
                tracing::debug!(check = kind.label(), "check skipped");
                report.record_skipped(kind);
                continue;
            }
            let findings = check.run(ctx);
            tracing::debug!(check = kind.label(), findings = findings.len(), "check complete");
            report.record(kind, findings);
        }

        tracing::debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            skipped = report.skipped_checks().len(),
            "validation pass complete"
        );
        report
    }

    /// Runs every check and returns only the findings.
    pub fn run_all(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        self.run(ctx).findings
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("checks", &self.check_kinds())
            .field("options", &self.options)
            .finish()
    }
}
