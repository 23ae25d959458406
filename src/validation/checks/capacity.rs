//! Capacity feasibility checks.
//!
//! Compares what workers can absorb per phase against what tasks ask for.
//! These are warnings: an allocator might still find a plan, but the
//! configuration makes it unlikely.

use std::collections::BTreeMap;

use crate::models::{EntityKind, Finding};
use crate::validation::{Check, CheckKind, ValidationContext};

/// Workers whose per-phase load exceeds the number of phases they offer.
#[derive(Debug, Clone, Copy)]
pub struct OverloadedWorkers;

impl Check for OverloadedWorkers {
    fn kind(&self) -> CheckKind {
        CheckKind::OverloadedWorkers
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        ctx.workers
            .iter()
            .enumerate()
            .filter(|(_, w)| (w.available_slots.len() as i64) < w.max_load_per_phase)
            .map(|(row, w)| {
                Finding::warning(
                    format!("overloaded-worker-{row}"),
                    category,
                    EntityKind::Workers,
                    format!(
                        "Worker has {} available slots but MaxLoadPerPhase is {}",
                        w.available_slots.len(),
                        w.max_load_per_phase
                    ),
                )
                .at_row(row)
                .in_column("MaxLoadPerPhase")
                .with_suggestion("Increase available slots or reduce max load per phase")
            })
            .collect()
    }
}

/// Phases where preferred task demand exceeds worker capacity.
///
/// Capacity of phase `p` is the sum of `MaxLoadPerPhase` over workers that
/// list `p`; demand is the sum of `Duration` over tasks that prefer `p`.
/// Each listing counts, so a worker naming a phase twice contributes twice.
/// Sums saturate at `i64::MAX`.
#[derive(Debug, Clone, Copy)]
pub struct PhaseSlotSaturation;

impl PhaseSlotSaturation {
    /// Worker capacity per phase.
    pub fn capacity(ctx: &ValidationContext<'_>) -> BTreeMap<i64, i64> {
        let mut capacity = BTreeMap::new();
        for worker in ctx.workers {
            for phase in worker.phases() {
                let total = capacity.entry(phase).or_insert(0i64);
                *total = total.saturating_add(worker.max_load_per_phase);
            }
        }
        capacity
    }

    /// Task demand per phase.
    pub fn demand(ctx: &ValidationContext<'_>) -> BTreeMap<i64, i64> {
        let mut demand = BTreeMap::new();
        for task in ctx.tasks {
            for &phase in &task.preferred_phases {
                let total = demand.entry(phase).or_insert(0i64);
                *total = total.saturating_add(task.duration);
            }
        }
        demand
    }
}

impl Check for PhaseSlotSaturation {
    fn kind(&self) -> CheckKind {
        CheckKind::PhaseSlotSaturation
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let capacity = Self::capacity(ctx);

        Self::demand(ctx)
            .into_iter()
            .filter_map(|(phase, required)| {
                let available = capacity.get(&phase).copied().unwrap_or(0);
                (required > available).then(|| {
                    Finding::warning(
                        format!("phase-saturation-{phase}"),
                        category,
                        EntityKind::Tasks,
                        format!(
                            "Phase {phase} requires {required} slots but only {available} are available"
                        ),
                    )
                    .with_suggestion("Add more workers for this phase or adjust task preferences")
                })
            })
            .collect()
    }
}
