//! Validation input.

use crate::models::{Client, Rule, Task, Worker};

/// Borrowed snapshot of everything one validation pass reads.
///
/// The collections must not change for the duration of a pass; row indices
/// in findings refer to positions in these slices.
///
/// `rules` is optional: `None` means no rule collection was supplied and
/// the rule-aware checks are skipped, while `Some(&[])` means an empty rule
/// set was supplied and those checks pass trivially.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    pub clients: &'a [Client],
    pub workers: &'a [Worker],
    pub tasks: &'a [Task],
    pub rules: Option<&'a [Rule]>,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context without rules.
    pub fn new(clients: &'a [Client], workers: &'a [Worker], tasks: &'a [Task]) -> Self {
        Self {
            clients,
            workers,
            tasks,
            rules: None,
        }
    }

    /// Supplies the rule collection.
    pub fn with_rules(mut self, rules: &'a [Rule]) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Whether a rule collection was supplied (possibly empty).
    pub fn has_rules(&self) -> bool {
        self.rules.is_some()
    }

    /// Enabled rules, in the order given. Empty when no rules were supplied.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.unwrap_or_default().iter().filter(|r| r.enabled)
    }

    /// Row index of the first task with the given ID.
    pub fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}
