//! Task model.
//!
//! A task is a unit of work that clients request and workers perform. It
//! consumes `duration` phases, needs a set of skills, prefers certain
//! phases, and caps how many assignments may run at once.

use serde::{Deserialize, Serialize};

use super::lenient::{integral_phases, whole_number};

/// A task row from the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Unique task identifier.
    #[serde(rename = "TaskID")]
    pub id: String,
    /// Human-readable name.
    #[serde(rename = "TaskName")]
    pub name: String,
    /// Task category (for grouping).
    #[serde(rename = "Category")]
    pub category: String,
    /// Number of phases consumed (≥ 1).
    #[serde(rename = "Duration", deserialize_with = "whole_number")]
    pub duration: i64,
    /// Skills a worker needs to perform this task.
    #[serde(rename = "RequiredSkills")]
    pub required_skills: Vec<String>,
    /// Phases this task prefers to run in.
    #[serde(rename = "PreferredPhases", deserialize_with = "integral_phases")]
    pub preferred_phases: Vec<i64>,
    /// Maximum simultaneous assignments.
    #[serde(rename = "MaxConcurrent", deserialize_with = "whole_number")]
    pub max_concurrent: i64,
}

impl Task {
    /// Creates a new task with the given ID, duration 1 and concurrency 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration: 1,
            max_concurrent: 1,
            ..Default::default()
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the task category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the duration in phases.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    /// Adds a required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Sets the preferred phases.
    pub fn with_preferred_phases(mut self, phases: impl IntoIterator<Item = i64>) -> Self {
        self.preferred_phases = phases.into_iter().collect();
        self
    }

    /// Sets the concurrency cap.
    pub fn with_max_concurrent(mut self, max: i64) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Whether this task prefers the given phase.
    pub fn prefers(&self, phase: i64) -> bool {
        self.preferred_phases.contains(&phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1")
            .with_name("Migrate")
            .with_category("infra")
            .with_duration(3)
            .with_required_skill("rust")
            .with_preferred_phases([1, 2])
            .with_max_concurrent(2);

        assert_eq!(task.id, "T1");
        assert_eq!(task.name, "Migrate");
        assert_eq!(task.category, "infra");
        assert_eq!(task.duration, 3);
        assert_eq!(task.required_skills, vec!["rust".to_string()]);
        assert!(task.prefers(2));
        assert!(!task.prefers(3));
        assert_eq!(task.max_concurrent, 2);
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("T1");
        assert_eq!(task.duration, 1);
        assert_eq!(task.max_concurrent, 1);
        assert!(task.preferred_phases.is_empty());
    }

    #[test]
    fn test_task_decodes() {
        let task: Task = serde_json::from_str(
            r#"{"TaskID":"T9","Duration":2,"RequiredSkills":["x"],"PreferredPhases":[2,3],"MaxConcurrent":4}"#,
        )
        .unwrap();
        assert_eq!(task.id, "T9");
        assert_eq!(task.duration, 2);
        assert_eq!(task.preferred_phases, vec![2, 3]);
        assert_eq!(task.max_concurrent, 4);
    }
}
