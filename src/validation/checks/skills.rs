//! Skill coverage and staffing checks.

use std::collections::HashSet;

use crate::models::{EntityKind, Finding, Task, Worker};
use crate::validation::{Check, CheckKind, ValidationContext};

/// Task skills that no worker offers. One finding per task.
#[derive(Debug, Clone, Copy)]
pub struct SkillCoverage;

impl Check for SkillCoverage {
    fn kind(&self) -> CheckKind {
        CheckKind::SkillCoverage
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let offered: HashSet<&str> = ctx
            .workers
            .iter()
            .flat_map(|w| w.skills.iter().map(String::as_str))
            .collect();

        ctx.tasks
            .iter()
            .enumerate()
            .filter_map(|(row, task)| {
                let mut seen = HashSet::new();
                let uncovered: Vec<&str> = task
                    .required_skills
                    .iter()
                    .map(String::as_str)
                    .filter(|s| !offered.contains(s) && seen.insert(*s))
                    .collect();
                if uncovered.is_empty() {
                    return None;
                }
                Some(
                    Finding::error(
                        format!("skill-coverage-{row}"),
                        category,
                        EntityKind::Tasks,
                        format!("Required skills not available: {}", uncovered.join(", ")),
                    )
                    .at_row(row)
                    .in_column("RequiredSkills")
                    .with_suggestion("Add workers with these skills or adjust task requirements"),
                )
            })
            .collect()
    }
}

/// Tasks whose `MaxConcurrent` exceeds the number of qualified workers.
///
/// A worker is qualified when its skills are a superset of the task's
/// required skills; a task with no required skills is open to everyone.
#[derive(Debug, Clone, Copy)]
pub struct MaxConcurrencyFeasibility;

impl MaxConcurrencyFeasibility {
    /// Number of workers able to take the task.
    pub fn qualified_workers(task: &Task, workers: &[Worker]) -> usize {
        workers
            .iter()
            .filter(|w| w.covers(task.required_skills.as_slice()))
            .count()
    }
}

impl Check for MaxConcurrencyFeasibility {
    fn kind(&self) -> CheckKind {
        CheckKind::MaxConcurrencyFeasibility
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        ctx.tasks
            .iter()
            .enumerate()
            .filter_map(|(row, task)| {
                let qualified = Self::qualified_workers(task, ctx.workers);
                (task.max_concurrent > qualified as i64).then(|| {
                    Finding::warning(
                        format!("max-concurrency-{row}"),
                        category,
                        EntityKind::Tasks,
                        format!(
                            "MaxConcurrent ({}) exceeds qualified workers ({qualified})",
                            task.max_concurrent
                        ),
                    )
                    .at_row(row)
                    .in_column("MaxConcurrent")
                    .with_suggestion("Reduce max concurrency or add more qualified workers")
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncovered_skill_reported_once_per_task() {
        let workers = vec![Worker::new("W1").with_skill("Go")];
        let tasks = vec![Task::new("T1")
            .with_required_skill("Rust")
            .with_required_skill("Go")
            .with_required_skill("SQL")
            .with_required_skill("Rust")];
        let ctx = ValidationContext::new(&[], &workers, &tasks);
        let findings = SkillCoverage.run(&ctx);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "skill-coverage-0");
        assert_eq!(findings[0].message, "Required skills not available: Rust, SQL");
        assert!(findings[0].is_error());
    }

    #[test]
    fn test_adding_worker_covers_skill() {
        let tasks = vec![Task::new("T1").with_required_skill("Rust")];
        let mut workers = vec![Worker::new("W1").with_skill("Go")];
        assert_eq!(
            SkillCoverage.run(&ValidationContext::new(&[], &workers, &tasks)).len(),
            1
        );

        workers.push(Worker::new("W2").with_skill("Rust"));
        assert!(SkillCoverage
            .run(&ValidationContext::new(&[], &workers, &tasks))
            .is_empty());
    }

    #[test]
    fn test_coverage_can_span_workers() {
        // Coverage is collective; concurrency is per worker.
        let workers = vec![Worker::new("W1").with_skill("A"), Worker::new("W2").with_skill("B")];
        let tasks = vec![Task::new("T1").with_required_skill("A").with_required_skill("B")];
        let ctx = ValidationContext::new(&[], &workers, &tasks);

        assert!(SkillCoverage.run(&ctx).is_empty());
        assert_eq!(MaxConcurrencyFeasibility.run(&ctx).len(), 1);
    }

    #[test]
    fn test_max_concurrency_needs_enough_qualified_workers() {
        let tasks = vec![Task::new("T1").with_required_skill("X").with_max_concurrent(3)];
        let mut workers = vec![Worker::new("W1").with_skill("X"), Worker::new("W2").with_skill("Y")];

        let findings = MaxConcurrencyFeasibility.run(&ValidationContext::new(&[], &workers, &tasks));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "MaxConcurrent (3) exceeds qualified workers (1)");
        assert!(findings[0].is_warning());

        workers.push(Worker::new("W3").with_skill("X"));
        workers.push(Worker::new("W4").with_skill("X").with_skill("Y"));
        assert!(MaxConcurrencyFeasibility
            .run(&ValidationContext::new(&[], &workers, &tasks))
            .is_empty());
    }

    #[test]
    fn test_no_required_skills_everyone_qualifies() {
        let workers = vec![Worker::new("W1"), Worker::new("W2")];
        let task = Task::new("T1").with_max_concurrent(2);
        assert_eq!(MaxConcurrencyFeasibility::qualified_workers(&task, &workers), 2);
    }
}
