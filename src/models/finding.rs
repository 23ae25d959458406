//! Validation finding model.
//!
//! A finding is one problem reported by a validation pass. Findings carry a
//! stable `id` that consumers use as a key (for example to mark a finding
//! resolved in a session), a severity, a category label used for grouping,
//! and optional pointers to the row and column involved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before export.
    Error,
    /// Advisory; does not block export.
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// The roster collection a finding concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Clients,
    Workers,
    Tasks,
}

impl EntityKind {
    /// Collection name as used on the wire (`clients`, `workers`, `tasks`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Workers => "workers",
            Self::Tasks => "tasks",
        }
    }

    /// Singular noun, used when building finding IDs.
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Clients => "client",
            Self::Workers => "worker",
            Self::Tasks => "task",
        }
    }

    /// Name of the identifying column.
    pub fn id_column(&self) -> &'static str {
        match self {
            Self::Clients => "ClientID",
            Self::Workers => "WorkerID",
            Self::Tasks => "TaskID",
        }
    }

    /// Letter the upstream mapper uses when it synthesizes an ID.
    pub fn id_prefix(&self) -> char {
        match self {
            Self::Clients => 'C',
            Self::Workers => 'W',
            Self::Tasks => 'T',
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable identity within one pass.
    pub id: String,
    pub severity: Severity,
    /// Category label (one per check).
    pub category: String,
    /// Human-readable description.
    pub message: String,
    /// Collection the finding concerns.
    pub entity: EntityKind,
    /// Position in the collection passed to the pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    /// Field implicated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Remediation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    /// Creates a finding with no row, column or suggestion.
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        category: impl Into<String>,
        entity: EntityKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            category: category.into(),
            message: message.into(),
            entity,
            row_index: None,
            column: None,
            suggestion: None,
        }
    }

    /// Creates an error finding.
    pub fn error(
        id: impl Into<String>,
        category: impl Into<String>,
        entity: EntityKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Error, category, entity, message)
    }

    /// Creates a warning finding.
    pub fn warning(
        id: impl Into<String>,
        category: impl Into<String>,
        entity: EntityKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Warning, category, entity, message)
    }

    /// Points the finding at a row.
    pub fn at_row(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }

    /// Points the finding at a column.
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity.label(), self.category, self.message)?;
        if let Some(row) = self.row_index {
            write!(f, " ({} row {}", self.entity, row)?;
            if let Some(column) = &self.column {
                write!(f, ", {column}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
