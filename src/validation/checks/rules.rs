//! Rule-aware checks.
//!
//! Both checks need a rule collection and are skipped when the context
//! carries none. Disabled rules are ignored.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS edge classification)

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{EntityKind, Finding, Rule, RuleKind};
use crate::validation::{Check, CheckKind, ValidationContext};

/// Cycles among co-run rules.
///
/// Each co-run rule `[t0, t1, …, tn]` contributes edges `t0→t1 … t(n-1)→tn`.
/// Any back edge found by DFS closes a cycle; each distinct cycle is
/// reported once, regardless of which node the traversal entered it from.
#[derive(Debug, Clone, Copy)]
pub struct CircularCoRuns;

impl Check for CircularCoRuns {
    fn kind(&self) -> CheckKind {
        CheckKind::CircularCoRuns
    }

    fn applies(&self, ctx: &ValidationContext<'_>) -> bool {
        ctx.has_rules()
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let graph = CoRunGraph::build(ctx.enabled_rules());

        graph
            .cycles()
            .into_iter()
            .enumerate()
            .map(|(n, cycle)| {
                let mut path: Vec<&str> = cycle.clone();
                path.push(cycle[0]);
                let rules = graph.rules_on(&cycle);
                Finding::error(
                    format!("corun-cycle-{n}"),
                    category,
                    EntityKind::Tasks,
                    format!(
                        "Co-run rules form a cycle: {} (rules: {})",
                        path.join(" → "),
                        rules.join(", ")
                    ),
                )
                .with_suggestion("Remove a task from one of the co-run rules to break the cycle")
            })
            .collect()
    }
}

/// Directed co-run graph with nodes in first-seen order.
struct CoRunGraph<'a> {
    nodes: Vec<&'a str>,
    adj: HashMap<&'a str, Vec<&'a str>>,
    edge_rules: HashMap<(&'a str, &'a str), Vec<&'a str>>,
}

impl<'a> CoRunGraph<'a> {
    fn build(rules: impl Iterator<Item = &'a Rule>) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            adj: HashMap::new(),
            edge_rules: HashMap::new(),
        };
        let mut seen = HashSet::new();

        for rule in rules {
            let RuleKind::CoRun { tasks } = &rule.kind else {
                continue;
            };
            for task in tasks {
                if seen.insert(task.as_str()) {
                    graph.nodes.push(task.as_str());
                }
            }
            for pair in tasks.windows(2) {
                let (from, to) = (pair[0].as_str(), pair[1].as_str());
                let owners = graph.edge_rules.entry((from, to)).or_default();
                if owners.is_empty() {
                    graph.adj.entry(from).or_default().push(to);
                }
                if !owners.contains(&rule.id.as_str()) {
                    owners.push(rule.id.as_str());
                }
            }
        }

        tracing::trace!(
            nodes = graph.nodes.len(),
            edges = graph.edge_rules.len(),
            "built co-run graph"
        );
        graph
    }

    /// Distinct cycles, each as its node sequence starting at the entry node.
    fn cycles(&self) -> Vec<Vec<&'a str>> {
        let mut state = DfsState::default();
        for &node in &self.nodes {
            if !state.visited.contains(node) {
                self.visit(node, &mut state);
            }
        }
        state.cycles
    }

    fn visit(&self, node: &'a str, state: &mut DfsState<'a>) {
        state.visited.insert(node);
        state.on_path.insert(node);
        state.path.push(node);

        if let Some(next) = self.adj.get(node) {
            for &succ in next {
                if state.on_path.contains(succ) {
                    // Back edge → cycle
                    if let Some(start) = state.path.iter().position(|&p| p == succ) {
                        let cycle = state.path[start..].to_vec();
                        if state.seen.insert(canonical(&cycle)) {
                            state.cycles.push(cycle);
                        }
                    }
                } else if !state.visited.contains(succ) {
                    self.visit(succ, state);
                }
            }
        }

        state.path.pop();
        state.on_path.remove(node);
    }

    /// IDs of the rules contributing edges along `cycle`, deduplicated.
    fn rules_on(&self, cycle: &[&'a str]) -> Vec<&'a str> {
        let mut rules = Vec::new();
        for (i, &from) in cycle.iter().enumerate() {
            let to = cycle[(i + 1) % cycle.len()];
            for &id in self.edge_rules.get(&(from, to)).into_iter().flatten() {
                if !rules.contains(&id) {
                    rules.push(id);
                }
            }
        }
        rules
    }
}

#[derive(Default)]
struct DfsState<'a> {
    visited: HashSet<&'a str>,
    on_path: HashSet<&'a str>,
    path: Vec<&'a str>,
    seen: HashSet<Vec<&'a str>>,
    cycles: Vec<Vec<&'a str>>,
}

/// Rotation of `cycle` starting at its smallest node.
fn canonical<'a>(cycle: &[&'a str]) -> Vec<&'a str> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, n)| **n)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle[start..].iter().chain(&cycle[..start]).copied().collect()
}

/// Contradictions between rules, and between rules and task preferences.
///
/// - phase windows on one task with no phase common to all of them (error)
/// - a phase window disjoint from the task's preferred phases (warning)
/// - load limits on one worker group with different caps (warning)
/// - a co-run rule whose tasks' phase windows share no phase (error)
#[derive(Debug, Clone, Copy)]
pub struct ConflictingRules;

impl Check for ConflictingRules {
    fn kind(&self) -> CheckKind {
        CheckKind::ConflictingRules
    }

    fn applies(&self, ctx: &ValidationContext<'_>) -> bool {
        ctx.has_rules()
    }

    fn run(&self, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let category = self.kind().label();
        let windows = PhaseWindows::collect(ctx);
        let mut findings = Vec::new();

        // Windows on the same task with an empty intersection.
        for (task_id, rules) in &windows.by_task {
            if rules.len() < 2 || !windows.allowed(task_id).is_some_and(|p| p.is_empty()) {
                continue;
            }
            let ids: Vec<&str> = rules.iter().map(|(id, _)| *id).collect();
            let mut finding = Finding::error(
                format!("conflict-phase-window-{task_id}"),
                category,
                EntityKind::Tasks,
                format!(
                    "Phase window rules {} leave task '{task_id}' with no allowed phase",
                    ids.join(", ")
                ),
            )
            .with_suggestion("Widen or remove one of the phase windows");
            if let Some(row) = ctx.task_index(task_id) {
                finding = finding.at_row(row).in_column("TaskID");
            }
            findings.push(finding);
        }

        // Windows that exclude every preferred phase.
        for rule in ctx.enabled_rules() {
            let RuleKind::PhaseWindow { task_id, phases } = &rule.kind else {
                continue;
            };
            if task_id.is_empty() {
                continue;
            }
            let Some(row) = ctx.task_index(task_id) else {
                continue;
            };
            let task = &ctx.tasks[row];
            if task.preferred_phases.is_empty() || phases.iter().any(|p| task.prefers(*p)) {
                continue;
            }
            findings.push(
                Finding::warning(
                    format!("conflict-phase-preference-{}", rule.id),
                    category,
                    EntityKind::Tasks,
                    format!(
                        "Phase window rule {} excludes every preferred phase of task '{task_id}'",
                        rule.id
                    ),
                )
                .at_row(row)
                .in_column("PreferredPhases")
                .with_suggestion("Align the phase window with the task's preferred phases"),
            );
        }

        // Load limits on the same group that disagree.
        for (group, limits) in load_limits(ctx) {
            let caps: BTreeSet<i64> = limits.iter().map(|(_, cap)| *cap).collect();
            if caps.len() < 2 {
                continue;
            }
            let ids: Vec<&str> = limits.iter().map(|(id, _)| *id).collect();
            let caps: Vec<String> = caps.iter().map(i64::to_string).collect();
            findings.push(
                Finding::warning(
                    format!("conflict-load-limit-{group}"),
                    category,
                    EntityKind::Workers,
                    format!(
                        "Load limit rules {} set different caps ({}) for worker group '{group}'",
                        ids.join(", "),
                        caps.join(", ")
                    ),
                )
                .in_column("WorkerGroup")
                .with_suggestion("Keep a single load limit per worker group"),
            );
        }

        // Co-run groups whose windows cannot overlap.
        for rule in ctx.enabled_rules() {
            let RuleKind::CoRun { tasks } = &rule.kind else {
                continue;
            };
            let mut constrained = 0;
            let mut common: Option<BTreeSet<i64>> = None;
            let mut members: HashSet<&str> = HashSet::new();
            for task_id in tasks {
                if !members.insert(task_id.as_str()) {
                    continue;
                }
                let Some(allowed) = windows.allowed(task_id) else {
                    continue;
                };
                constrained += 1;
                common = Some(match common {
                    None => allowed,
                    Some(acc) => acc.intersection(&allowed).copied().collect(),
                });
            }
            if constrained < 2 || !common.is_some_and(|c| c.is_empty()) {
                continue;
            }
            findings.push(
                Finding::error(
                    format!("conflict-corun-window-{}", rule.id),
                    category,
                    EntityKind::Tasks,
                    format!(
                        "Co-run rule {} groups tasks whose phase windows share no phase",
                        rule.id
                    ),
                )
                .with_suggestion("Give co-run tasks overlapping phase windows"),
            );
        }

        findings
    }
}

/// Enabled phase-window rules grouped by task, tasks in first-seen order.
/// Windows that name no task are ignored.
struct PhaseWindows<'a> {
    by_task: Vec<(&'a str, Vec<(&'a str, BTreeSet<i64>)>)>,
}

impl<'a> PhaseWindows<'a> {
    fn collect(ctx: &ValidationContext<'a>) -> Self {
        let mut by_task: Vec<(&'a str, Vec<(&'a str, BTreeSet<i64>)>)> = Vec::new();
        for rule in ctx.enabled_rules() {
            let RuleKind::PhaseWindow { task_id, phases } = &rule.kind else {
                continue;
            };
            if task_id.is_empty() {
                continue;
            }
            let window = (rule.id.as_str(), phases.iter().copied().collect());
            match by_task.iter_mut().find(|(t, _)| *t == task_id.as_str()) {
                Some((_, windows)) => windows.push(window),
                None => by_task.push((task_id.as_str(), vec![window])),
            }
        }
        Self { by_task }
    }

    /// Phases allowed for a task by all its windows; `None` if unconstrained.
    fn allowed(&self, task_id: &str) -> Option<BTreeSet<i64>> {
        let (_, windows) = self.by_task.iter().find(|(t, _)| *t == task_id)?;
        let mut iter = windows.iter();
        let first = iter.next()?.1.clone();
        Some(iter.fold(first, |acc, (_, w)| acc.intersection(w).copied().collect()))
    }
}

/// Enabled load-limit rules grouped by worker group, groups in first-seen order.
fn load_limits<'a>(ctx: &ValidationContext<'a>) -> Vec<(&'a str, Vec<(&'a str, i64)>)> {
    let mut groups: Vec<(&'a str, Vec<(&'a str, i64)>)> = Vec::new();
    for rule in ctx.enabled_rules() {
        let RuleKind::LoadLimit {
            worker_group,
            max_slots,
        } = &rule.kind
        else {
            continue;
        };
        let limit = (rule.id.as_str(), *max_slots);
        match groups.iter_mut().find(|(g, _)| *g == worker_group.as_str()) {
            Some((_, limits)) => limits.push(limit),
            None => groups.push((worker_group.as_str(), vec![limit])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn run_cycles(rules: &[Rule]) -> Vec<Finding> {
        CircularCoRuns.run(&ValidationContext::default().with_rules(rules))
    }

    #[test]
    fn test_skipped_without_rules() {
        let ctx = ValidationContext::default();
        assert!(!CircularCoRuns.applies(&ctx));
        assert!(!ConflictingRules.applies(&ctx));

        let empty: Vec<Rule> = Vec::new();
        let ctx = ctx.with_rules(&empty);
        assert!(CircularCoRuns.applies(&ctx));
        assert!(CircularCoRuns.run(&ctx).is_empty());
        assert!(ConflictingRules.run(&ctx).is_empty());
    }

    #[test]
    fn test_three_rule_cycle() {
        let rules = vec![
            Rule::co_run("r1", ["A", "B"]),
            Rule::co_run("r2", ["B", "C"]),
            Rule::co_run("r3", ["C", "A"]),
        ];
        let findings = run_cycles(&rules);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "corun-cycle-0");
        assert_eq!(findings[0].category, "Circular Co-Runs");
        assert_eq!(
            findings[0].message,
            "Co-run rules form a cycle: A → B → C → A (rules: r1, r2, r3)"
        );
    }

    #[test]
    fn test_chain_is_not_a_cycle() {
        let rules = vec![Rule::co_run("r1", ["A", "B", "C"]), Rule::co_run("r2", ["C", "D"])];
        assert!(run_cycles(&rules).is_empty());
    }

    #[test]
    fn test_disabled_rule_breaks_cycle() {
        let rules = vec![
            Rule::co_run("r1", ["A", "B"]),
            Rule::co_run("r2", ["B", "A"]).with_enabled(false),
        ];
        assert!(run_cycles(&rules).is_empty());
    }

    #[test]
    fn test_repeated_task_is_self_loop() {
        let rules = vec![Rule::co_run("r1", ["A", "A"])];
        let findings = run_cycles(&rules);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("A → A"));
    }

    #[test]
    fn test_same_cycle_reported_once() {
        let rules = vec![
            Rule::co_run("r1", ["A", "B", "A"]),
            Rule::co_run("r2", ["B", "A"]),
        ];
        let findings = run_cycles(&rules);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("rules: r1, r2"));
    }

    #[test]
    fn test_canonical_rotation() {
        assert_eq!(canonical(&["C", "A", "B"]), vec!["A", "B", "C"]);
        assert_eq!(canonical(&["A"]), vec!["A"]);
    }

    #[test]
    fn test_disjoint_phase_windows() {
        let tasks = vec![Task::new("T1")];
        let rules = vec![
            Rule::phase_window("w1", "T1", [1, 2]),
            Rule::phase_window("w2", "T1", [3]),
        ];
        let ctx = ValidationContext::new(&[], &[], &tasks).with_rules(&rules);
        let findings = ConflictingRules.run(&ctx);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "conflict-phase-window-T1");
        assert!(findings[0].is_error());
        assert_eq!(findings[0].row_index, Some(0));
    }

    #[test]
    fn test_windows_without_common_phase() {
        // Every pair overlaps, but no phase is in all three.
        let tasks = vec![Task::new("T1")];
        let rules = vec![
            Rule::phase_window("w1", "T1", [1, 2]),
            Rule::phase_window("w2", "T1", [2, 3]),
            Rule::phase_window("w3", "T1", [1, 3]),
        ];
        let ctx = ValidationContext::new(&[], &[], &tasks).with_rules(&rules);
        let findings = ConflictingRules.run(&ctx);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "conflict-phase-window-T1");
        assert!(findings[0].message.contains("w1, w2, w3"));
    }

    #[test]
    fn test_windows_naming_no_task_are_ignored() {
        let tasks = vec![Task::new("").with_preferred_phases([1])];
        let rules = vec![
            Rule::new("d1", RuleKind::PhaseWindow { task_id: String::new(), phases: Vec::new() }),
            Rule::new("d2", RuleKind::PhaseWindow { task_id: String::new(), phases: vec![4] }),
            Rule::new("d3", RuleKind::CoRun { tasks: Vec::new() }),
        ];
        let ctx = ValidationContext::new(&[], &[], &tasks).with_rules(&rules);

        assert!(ConflictingRules.run(&ctx).is_empty());
        assert!(CircularCoRuns.run(&ctx).is_empty());
    }

    #[test]
    fn test_overlapping_windows_pass() {
        let rules = vec![
            Rule::phase_window("w1", "T1", [1, 2]),
            Rule::phase_window("w2", "T1", [2, 3]),
        ];
        let ctx = ValidationContext::default().with_rules(&rules);
        assert!(ConflictingRules.run(&ctx).is_empty());
    }

    #[test]
    fn test_window_excludes_preferences() {
        let tasks = vec![Task::new("T1").with_preferred_phases([1, 2])];
        let rules = vec![Rule::phase_window("w1", "T1", [4, 5])];
        let ctx = ValidationContext::new(&[], &[], &tasks).with_rules(&rules);
        let findings = ConflictingRules.run(&ctx);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "conflict-phase-preference-w1");
        assert!(findings[0].is_warning());
        assert_eq!(findings[0].column.as_deref(), Some("PreferredPhases"));
    }

    #[test]
    fn test_load_limits_disagree() {
        let rules = vec![
            Rule::load_limit("l1", "ops", 2),
            Rule::load_limit("l2", "ops", 3),
            Rule::load_limit("l3", "dev", 1),
            Rule::load_limit("l4", "dev", 1),
        ];
        let ctx = ValidationContext::default().with_rules(&rules);
        let findings = ConflictingRules.run(&ctx);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "conflict-load-limit-ops");
        assert_eq!(findings[0].entity, EntityKind::Workers);
        assert!(findings[0].message.contains("(2, 3)"));
    }

    #[test]
    fn test_corun_with_disjoint_windows() {
        let rules = vec![
            Rule::co_run("c1", ["T1", "T2", "T3"]),
            Rule::phase_window("w1", "T1", [1]),
            Rule::phase_window("w2", "T2", [2]),
        ];
        let ctx = ValidationContext::default().with_rules(&rules);
        let findings = ConflictingRules.run(&ctx);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "conflict-corun-window-c1");
        assert!(findings[0].is_error());
    }

    #[test]
    fn test_corun_with_one_window_passes() {
        let rules = vec![
            Rule::co_run("c1", ["T1", "T2"]),
            Rule::phase_window("w1", "T1", [1]),
        ];
        let ctx = ValidationContext::default().with_rules(&rules);
        assert!(ConflictingRules.run(&ctx).is_empty());
    }
}
