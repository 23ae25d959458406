//! Validation pass results.

use std::collections::HashSet;

use serde::Serialize;

use super::CheckKind;
use crate::models::{Finding, Severity};

/// How a single check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Ran and found nothing.
    Passed,
    /// Ran and produced at least one finding.
    Flagged,
    /// Did not run because its input was absent.
    Skipped,
}

/// Per-check summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub status: CheckStatus,
    pub findings: usize,
}

/// Findings from one pass, in check order, plus how each check ended.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    pub(crate) fn record(&mut self, kind: CheckKind, findings: Vec<Finding>) {
        let status = if findings.is_empty() {
            CheckStatus::Passed
        } else {
            CheckStatus::Flagged
        };
        self.outcomes.push(CheckOutcome {
            kind,
            status,
            findings: findings.len(),
        });
        self.findings.extend(findings);
    }

    pub(crate) fn record_skipped(&mut self, kind: CheckKind) {
        self.outcomes.push(CheckOutcome {
            kind,
            status: CheckStatus::Skipped,
            findings: 0,
        });
    }

    /// Whether any finding is an error.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Export is allowed when no errors remain. Warnings never block.
    pub fn export_allowed(&self) -> bool {
        !self.has_errors()
    }

    /// Findings grouped by category, groups in order of first appearance.
    pub fn by_category(&self) -> Vec<(&str, Vec<&Finding>)> {
        let mut groups: Vec<(&str, Vec<&Finding>)> = Vec::new();
        for finding in &self.findings {
            match groups.iter_mut().find(|(c, _)| *c == finding.category) {
                Some((_, members)) => members.push(finding),
                None => groups.push((finding.category.as_str(), vec![finding])),
            }
        }
        groups
    }

    /// Copy of the report without the findings whose IDs are listed.
    ///
    /// Outcome counts are recomputed; a flagged check whose findings are all
    /// resolved becomes passed. Skipped checks stay skipped.
    pub fn without<S: AsRef<str>>(&self, resolved: &[S]) -> Self {
        let resolved: HashSet<&str> = resolved.iter().map(|s| s.as_ref()).collect();
        let findings: Vec<Finding> = self
            .findings
            .iter()
            .filter(|f| !resolved.contains(f.id.as_str()))
            .cloned()
            .collect();

        let outcomes = self
            .outcomes
            .iter()
            .map(|o| {
                if o.status == CheckStatus::Skipped {
                    return o.clone();
                }
                let label = o.kind.label();
                let remaining = findings.iter().filter(|f| f.category == label).count();
                CheckOutcome {
                    kind: o.kind,
                    status: if remaining == 0 {
                        CheckStatus::Passed
                    } else {
                        CheckStatus::Flagged
                    },
                    findings: remaining,
                }
            })
            .collect();

        Self { findings, outcomes }
    }

    /// Checks that did not run.
    pub fn skipped_checks(&self) -> Vec<CheckKind> {
        self.outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Skipped)
            .map(|o| o.kind)
            .collect()
    }

    /// Outcome of the given check, if it was part of the pass.
    pub fn outcome(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
