//! Built-in validation checks.
//!
//! # Categories
//!
//! - **Records**: required columns, duplicate IDs, malformed lists, range values, broken JSON
//! - **References**: unknown task references
//! - **Capacity**: overloaded workers, phase-slot saturation
//! - **Skills**: skill coverage, max-concurrency feasibility
//! - **Rules**: circular co-runs, conflicting rules (skipped without rules)
//! - **Optional**: placeholder IDs
//!
//! Every check is a stateless value; running one never fails. A check that
//! finds nothing returns an empty list.

mod capacity;
mod placeholder;
mod records;
mod references;
mod rules;
mod skills;

pub use capacity::{OverloadedWorkers, PhaseSlotSaturation};
pub use placeholder::PlaceholderIds;
pub use records::{BrokenJson, DuplicateIds, MalformedLists, RangeValues, RequiredColumns};
pub use references::UnknownReferences;
pub use rules::{CircularCoRuns, ConflictingRules};
pub use skills::{MaxConcurrencyFeasibility, SkillCoverage};
