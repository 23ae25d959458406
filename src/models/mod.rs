//! Roster domain models.
//!
//! Entity rows (`Client`, `Worker`, `Task`) arrive already normalized by an
//! upstream column mapper and are read-only to validation. `Rule` carries
//! user-declared allocation constraints; `Finding` is the validation output.
//!
//! | Model | Role | Identifying column |
//! |-------|------|--------------------|
//! | Client | requests tasks | `ClientID` |
//! | Worker | performs tasks | `WorkerID` |
//! | Task | unit of work | `TaskID` |

mod client;
mod finding;
mod lenient;
mod roster;
mod rule;
mod task;
mod worker;

pub use client::Client;
pub use finding::{EntityKind, Finding, Severity};
pub use roster::Roster;
pub use rule::{Rule, RuleKind};
pub use task::Task;
pub use worker::Worker;
