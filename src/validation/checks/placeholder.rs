//! Placeholder identifier detection.

use crate::models::{EntityKind, Finding};
use crate::validation::{Check, CheckKind, ValidationContext};

/// IDs that match what the column mapper synthesizes for a missing ID:
/// the entity letter followed by the 1-based row number padded to three
/// digits (`C003` on client row 2). Off unless enabled in the options.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderIds;

impl PlaceholderIds {
    /// The ID the mapper would synthesize for `row`.
    pub fn placeholder(entity: EntityKind, row: usize) -> String {
        format!("{}{:03}", entity.id_prefix(), row + 1)
    }
}

impl Check for PlaceholderIds {
    fn kind(&self) -> CheckKind {
        CheckKind::PlaceholderIds
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let clients = ctx.clients.iter().map(|c| c.id.as_str());
        let workers = ctx.workers.iter().map(|w| w.id.as_str());
        let tasks = ctx.tasks.iter().map(|t| t.id.as_str());

        let mut findings = Vec::new();
        for (entity, ids) in [
            (EntityKind::Clients, clients.collect::<Vec<_>>()),
            (EntityKind::Workers, workers.collect()),
            (EntityKind::Tasks, tasks.collect()),
        ] {
            for (row, id) in ids.into_iter().enumerate() {
                if id != Self::placeholder(entity, row) {
                    continue;
                }
                findings.push(
                    Finding::warning(
                        format!("placeholder-{}-{row}", entity.singular()),
                        category,
                        entity,
                        format!("{} '{id}' looks auto-generated", entity.id_column()),
                    )
                    .at_row(row)
                    .in_column(entity.id_column())
                    .with_suggestion("Confirm the ID or supply the real one from the source file"),
                );
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Task, Worker};

    #[test]
    fn test_placeholder_format() {
        assert_eq!(PlaceholderIds::placeholder(EntityKind::Clients, 2), "C003");
        assert_eq!(PlaceholderIds::placeholder(EntityKind::Tasks, 999), "T1000");
    }

    #[test]
    fn test_flags_only_positional_matches() {
        let clients = vec![Client::new("ACME"), Client::new("C002"), Client::new("C001")];
        let workers = vec![Worker::new("W001")];
        let tasks = vec![Task::new("T7")];
        let ctx = ValidationContext::new(&clients, &workers, &tasks);
        let ids: Vec<String> = PlaceholderIds.run(&ctx).into_iter().map(|f| f.id).collect();

        assert_eq!(ids, vec!["placeholder-client-1", "placeholder-worker-0"]);
    }
}
