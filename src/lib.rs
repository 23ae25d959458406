//! Data-integrity validation for resource-allocation rosters.
//!
//! Clients request tasks, workers perform them, and tasks declare the
//! skills, phases and concurrency they need. Before a roster is handed to
//! an allocator it goes through one validation pass that reports every
//! structural, referential and feasibility problem it can find.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Client`, `Worker`, `Task`, `Rule`,
//!   `Roster`, `Finding`
//! - **`validation`**: The check pipeline, engine options and reports
//! - **`error`**: Decode errors for rosters and rule sets
//!
//! # Example
//!
//! ```
//! use roster_check::models::Roster;
//!
//! let roster = Roster::from_json(
//!     r#"{
//!         "clients": [{"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 3,
//!                      "RequestedTaskIDs": ["T1", "T999"]}],
//!         "tasks": [{"TaskID": "T1", "Duration": 1}]
//!     }"#,
//! )?;
//!
//! let findings = roster_check::run_all(&roster.context());
//! assert!(findings.iter().any(|f| f.id == "unknown-task-0-T999"));
//! # Ok::<(), roster_check::Error>(())
//! ```
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22 (cycle detection)

pub mod error;
pub mod models;
pub mod validation;

pub use error::{Error, Result};
pub use validation::{run_all, EngineOptions, ValidationContext, ValidationEngine, ValidationReport};
