//! Roster snapshot: the three entity collections validated together.

use serde::{Deserialize, Serialize};

use super::{Client, Task, Worker};
use crate::error::{Error, Result};
use crate::validation::ValidationContext;

/// Owned clients, workers and tasks.
///
/// Decodes from `{"clients": [...], "workers": [...], "tasks": [...]}`;
/// any missing collection is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    /// Adds a worker.
    pub fn with_worker(mut self, worker: Worker) -> Self {
        self.workers.push(worker);
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Decodes a roster from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let roster: Roster =
            serde_json::from_str(json).map_err(|source| Error::RosterDecode { source })?;
        tracing::debug!(
            clients = roster.clients.len(),
            workers = roster.workers.len(),
            tasks = roster.tasks.len(),
            "decoded roster"
        );
        Ok(roster)
    }

    /// Borrows the roster as a validation context without rules.
    pub fn context(&self) -> ValidationContext<'_> {
        ValidationContext::new(&self.clients, &self.workers, &self.tasks)
    }

    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }

    /// Whether all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let roster = Roster::from_json(
            r#"{
                "clients": [{"ClientID":"C1","ClientName":"Acme","PriorityLevel":2}],
                "tasks": [{"TaskID":"T1","Duration":1}]
            }"#,
        )
        .unwrap();

        assert_eq!(roster.clients.len(), 1);
        assert!(roster.workers.is_empty());
        assert_eq!(roster.tasks.len(), 1);
        assert_eq!(roster.record_count(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Roster::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::RosterDecode { .. }));
    }

    #[test]
    fn test_context_borrows_collections() {
        let roster = Roster::new()
            .with_client(Client::new("C1"))
            .with_worker(Worker::new("W1"))
            .with_task(Task::new("T1"));
        let ctx = roster.context();

        assert_eq!(ctx.clients.len(), 1);
        assert_eq!(ctx.workers.len(), 1);
        assert_eq!(ctx.tasks.len(), 1);
        assert!(ctx.rules.is_none());
        assert!(!roster.is_empty());
    }
}
