//! Cross-collection reference checks.

use std::collections::HashSet;

use crate::models::{EntityKind, Finding};
use crate::validation::{Check, CheckKind, ValidationContext};

/// Client `RequestedTaskIDs` entries that name no task.
#[derive(Debug, Clone, Copy)]
pub struct UnknownReferences;

impl Check for UnknownReferences {
    fn kind(&self) -> CheckKind {
        CheckKind::UnknownReferences
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let task_ids: HashSet<&str> = ctx.tasks.iter().map(|t| t.id.as_str()).collect();
        let mut findings = Vec::new();

        for (row, client) in ctx.clients.iter().enumerate() {
            // A missing ID listed twice on one client is reported once.
            let mut reported: HashSet<&str> = HashSet::new();
            for task_id in &client.requested_task_ids {
                if task_ids.contains(task_id.as_str()) || !reported.insert(task_id.as_str()) {
                    continue;
                }
                findings.push(
                    Finding::error(
                        format!("unknown-task-{row}-{task_id}"),
                        category,
                        EntityKind::Clients,
                        format!("Referenced TaskID '{task_id}' does not exist"),
                    )
                    .at_row(row)
                    .in_column("RequestedTaskIDs")
                    .with_suggestion("Remove invalid task reference or add the missing task"),
                );
            }
        }

        findings
    }
}
