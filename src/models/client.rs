//! Client model.
//!
//! A client is a requester of work: it names the tasks it wants done, a
//! priority, a grouping tag, and free-form attributes carried as JSON text.

use serde::{Deserialize, Serialize};

use super::lenient::{string_or_json, whole_number};

/// A client row from the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Unique client identifier.
    #[serde(rename = "ClientID")]
    pub id: String,
    /// Human-readable name.
    #[serde(rename = "ClientName")]
    pub name: String,
    /// Priority (valid range 1-5, higher = more important).
    #[serde(rename = "PriorityLevel", deserialize_with = "whole_number")]
    pub priority_level: i64,
    /// Task IDs this client requests, in the order given.
    #[serde(rename = "RequestedTaskIDs")]
    pub requested_task_ids: Vec<String>,
    /// Grouping tag used by rules.
    #[serde(rename = "GroupTag")]
    pub group_tag: String,
    /// Free-form attributes; expected to be valid JSON or empty.
    #[serde(rename = "AttributesJSON", deserialize_with = "string_or_json")]
    pub attributes_json: String,
}

impl Client {
    /// Creates a client with the given ID and priority 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority_level: 1,
            ..Default::default()
        }
    }

    /// Sets the client name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the priority level.
    pub fn with_priority(mut self, level: i64) -> Self {
        self.priority_level = level;
        self
    }

    /// Adds a requested task.
    pub fn with_requested_task(mut self, task_id: impl Into<String>) -> Self {
        self.requested_task_ids.push(task_id.into());
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, tag: impl Into<String>) -> Self {
        self.group_tag = tag.into();
        self
    }

    /// Sets the raw attributes JSON text.
    pub fn with_attributes(mut self, json: impl Into<String>) -> Self {
        self.attributes_json = json.into();
        self
    }

    /// Whether this client requests the given task.
    pub fn requests(&self, task_id: &str) -> bool {
        self.requested_task_ids.iter().any(|t| t == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let c = Client::new("C1")
            .with_name("Acme")
            .with_priority(4)
            .with_requested_task("T1")
            .with_requested_task("T2")
            .with_group("enterprise")
            .with_attributes(r#"{"tier":"gold"}"#);

        assert_eq!(c.id, "C1");
        assert_eq!(c.name, "Acme");
        assert_eq!(c.priority_level, 4);
        assert!(c.requests("T2"));
        assert!(!c.requests("T3"));
        assert_eq!(c.group_tag, "enterprise");
    }

    #[test]
    fn test_client_decodes_pascal_case() {
        let c: Client = serde_json::from_str(
            r#"{"ClientID":"C7","ClientName":"Acme","PriorityLevel":3,
                "RequestedTaskIDs":["T1"],"GroupTag":"g","AttributesJSON":{"a":1}}"#,
        )
        .unwrap();

        assert_eq!(c.id, "C7");
        assert_eq!(c.priority_level, 3);
        assert_eq!(c.requested_task_ids, vec!["T1".to_string()]);
        assert_eq!(c.attributes_json, r#"{"a":1}"#);
    }

    #[test]
    fn test_missing_fields_default() {
        let c: Client = serde_json::from_str(r#"{"ClientID":"C1"}"#).unwrap();
        assert!(c.name.is_empty());
        assert_eq!(c.priority_level, 0);
        assert!(c.attributes_json.is_empty());
    }
}
