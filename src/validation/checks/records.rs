//! Per-record data-quality checks.
//!
//! These look at one collection at a time: missing identifiers, duplicate
//! keys, malformed slot lists, out-of-range numbers, and unparsable
//! attribute JSON.

use std::collections::HashMap;

use crate::models::{EntityKind, Finding};
use crate::validation::{Check, CheckKind, EngineOptions, ValidationContext};

/// Empty identifiers (error) and empty client names (warning).
///
/// Only the empty string counts as missing; whitespace is a value.
#[derive(Debug, Clone, Copy)]
pub struct RequiredColumns;

impl Check for RequiredColumns {
    fn kind(&self) -> CheckKind {
        CheckKind::RequiredColumns
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let mut findings = Vec::new();

        for (row, client) in ctx.clients.iter().enumerate() {
            if client.id.is_empty() {
                findings.push(missing_id(category, EntityKind::Clients, row));
            }
            if client.name.is_empty() {
                findings.push(
                    Finding::warning(
                        format!("client-name-{row}"),
                        category,
                        EntityKind::Clients,
                        "ClientName is missing",
                    )
                    .at_row(row)
                    .in_column("ClientName")
                    .with_suggestion("Add a descriptive client name"),
                );
            }
        }

        for (row, worker) in ctx.workers.iter().enumerate() {
            if worker.id.is_empty() {
                findings.push(missing_id(category, EntityKind::Workers, row));
            }
        }

        for (row, task) in ctx.tasks.iter().enumerate() {
            if task.id.is_empty() {
                findings.push(missing_id(category, EntityKind::Tasks, row));
            }
        }

        findings
    }
}

fn missing_id(category: &str, entity: EntityKind, row: usize) -> Finding {
    Finding::error(
        format!("{}-id-{row}", entity.singular()),
        category,
        entity,
        format!("{} is required", entity.id_column()),
    )
    .at_row(row)
    .in_column(entity.id_column())
    .with_suggestion(format!("Generate a unique {} ID", entity.singular()))
}

/// Every row sharing a non-empty ID with another row of the same collection.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateIds;

impl Check for DuplicateIds {
    fn kind(&self) -> CheckKind {
        CheckKind::DuplicateIds
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let mut findings = Vec::new();
        duplicates(
            category,
            EntityKind::Clients,
            ctx.clients.iter().map(|c| c.id.as_str()),
            &mut findings,
        );
        duplicates(
            category,
            EntityKind::Workers,
            ctx.workers.iter().map(|w| w.id.as_str()),
            &mut findings,
        );
        duplicates(
            category,
            EntityKind::Tasks,
            ctx.tasks.iter().map(|t| t.id.as_str()),
            &mut findings,
        );
        findings
    }
}

/// Emits one finding per (duplicated value, row). Values are reported in
/// the order their first repeat appears; rows ascending within a value.
fn duplicates<'a>(
    category: &str,
    entity: EntityKind,
    ids: impl Iterator<Item = &'a str>,
    out: &mut Vec<Finding>,
) {
    let mut rows_by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut repeated: Vec<&str> = Vec::new();

    for (row, id) in ids.enumerate() {
        if id.is_empty() {
            continue;
        }
        let rows = rows_by_id.entry(id).or_default();
        rows.push(row);
        if rows.len() == 2 {
            repeated.push(id);
        }
    }

    for id in repeated {
        let Some(rows) = rows_by_id.get(id) else {
            continue;
        };
        for &row in rows {
            out.push(
                Finding::error(
                    format!("duplicate-{}-{id}-{row}", entity.singular()),
                    category,
                    entity,
                    format!("Duplicate {}: {id}", entity.id_column()),
                )
                .at_row(row)
                .in_column(entity.id_column())
                .with_suggestion(format!("Make {} IDs unique", entity.singular())),
            );
        }
    }
}

/// Worker `AvailableSlots` entries that are not finite numbers ≥ 1.
#[derive(Debug, Clone, Copy)]
pub struct MalformedLists;

impl Check for MalformedLists {
    fn kind(&self) -> CheckKind {
        CheckKind::MalformedLists
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        ctx.workers
            .iter()
            .enumerate()
            .filter_map(|(row, worker)| {
                let bad: Vec<String> = worker.malformed_slots().map(format_slot).collect();
                if bad.is_empty() {
                    return None;
                }
                Some(
                    Finding::error(
                        format!("malformed-slots-{row}"),
                        category,
                        EntityKind::Workers,
                        format!("AvailableSlots contains invalid values: {}", bad.join(", ")),
                    )
                    .at_row(row)
                    .in_column("AvailableSlots")
                    .with_suggestion("Use only positive integers for phase slots"),
                )
            })
            .collect()
    }
}

fn format_slot(slot: f64) -> String {
    if slot.is_nan() {
        "non-numeric".to_string()
    } else {
        slot.to_string()
    }
}

/// `PriorityLevel` outside its range and `Duration` below its minimum.
#[derive(Debug, Clone, Copy)]
pub struct RangeValues {
    priority_min: i64,
    priority_max: i64,
    min_duration: i64,
}

impl RangeValues {
    pub fn from_options(options: &EngineOptions) -> Self {
        let (priority_min, priority_max) = options.priority_range;
        Self {
            priority_min,
            priority_max,
            min_duration: options.min_duration,
        }
    }
}

impl Default for RangeValues {
    fn default() -> Self {
        Self::from_options(&EngineOptions::default())
    }
}

impl Check for RangeValues {
    fn kind(&self) -> CheckKind {
        CheckKind::RangeValues
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let mut findings = Vec::new();
        let priority = self.priority_min..=self.priority_max;

        for (row, client) in ctx.clients.iter().enumerate() {
            if !priority.contains(&client.priority_level) {
                findings.push(
                    Finding::error(
                        format!("priority-range-{row}"),
                        category,
                        EntityKind::Clients,
                        format!(
                            "PriorityLevel must be between {} and {} (got {})",
                            self.priority_min, self.priority_max, client.priority_level
                        ),
                    )
                    .at_row(row)
                    .in_column("PriorityLevel")
                    .with_suggestion(format!(
                        "Set priority to a value between {}-{}",
                        self.priority_min, self.priority_max
                    )),
                );
            }
        }

        for (row, task) in ctx.tasks.iter().enumerate() {
            if task.duration < self.min_duration {
                findings.push(
                    Finding::error(
                        format!("duration-range-{row}"),
                        category,
                        EntityKind::Tasks,
                        format!(
                            "Duration must be at least {} (got {})",
                            self.min_duration, task.duration
                        ),
                    )
                    .at_row(row)
                    .in_column("Duration")
                    .with_suggestion(format!(
                        "Set duration to at least {} phase(s)",
                        self.min_duration
                    )),
                );
            }
        }

        findings
    }
}

/// Non-empty `AttributesJSON` that does not parse.
#[derive(Debug, Clone, Copy)]
pub struct BrokenJson;

impl Check for BrokenJson {
    fn kind(&self) -> CheckKind {
        CheckKind::BrokenJson
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        ctx.clients
            .iter()
            .enumerate()
            .filter(|(_, client)| !client.attributes_json.is_empty())
            .filter_map(|(row, client)| {
                let err = serde_json::from_str::<serde_json::Value>(&client.attributes_json).err()?;
                Some(
                    Finding::error(
                        format!("broken-json-{row}"),
                        category,
                        EntityKind::Clients,
                        format!("AttributesJSON is not valid JSON: {err}"),
                    )
                    .at_row(row)
                    .in_column("AttributesJSON")
                    .with_suggestion("Fix JSON syntax or leave empty"),
                )
            })
            .collect()
    }
}
