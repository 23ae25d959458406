//! Worker model.
//!
//! Workers perform tasks. Each worker has a skill set, the phases it is
//! available in, and a per-phase load ceiling.

use serde::{Deserialize, Serialize};

use super::lenient::{phase_numbers, whole_number};

/// A worker row from the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Worker {
    /// Unique worker identifier.
    #[serde(rename = "WorkerID")]
    pub id: String,
    /// Human-readable name.
    #[serde(rename = "WorkerName")]
    pub name: String,
    /// Skill names. Order is irrelevant for matching.
    #[serde(rename = "Skills")]
    pub skills: Vec<String>,
    /// Phases this worker is available in.
    ///
    /// Stored as `f64` so that malformed upstream values (NaN, zero,
    /// negatives, fractions) survive decoding and can be reported.
    #[serde(rename = "AvailableSlots", deserialize_with = "phase_numbers")]
    pub available_slots: Vec<f64>,
    /// Maximum concurrent assignments per phase.
    #[serde(rename = "MaxLoadPerPhase", deserialize_with = "whole_number")]
    pub max_load_per_phase: i64,
    /// Worker group used by load-limit rules.
    #[serde(rename = "WorkerGroup")]
    pub worker_group: String,
    /// Qualification (valid range 1-10).
    #[serde(rename = "QualificationLevel", deserialize_with = "whole_number")]
    pub qualification_level: i64,
}

impl Worker {
    /// Creates a worker with the given ID, load 1 and qualification 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_load_per_phase: 1,
            qualification_level: 1,
            ..Default::default()
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Sets the available phases.
    pub fn with_slots(mut self, slots: impl IntoIterator<Item = f64>) -> Self {
        self.available_slots = slots.into_iter().collect();
        self
    }

    /// Sets the maximum load per phase.
    pub fn with_max_load(mut self, max_load: i64) -> Self {
        self.max_load_per_phase = max_load;
        self
    }

    /// Sets the worker group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.worker_group = group.into();
        self
    }

    /// Sets the qualification level.
    pub fn with_qualification(mut self, level: i64) -> Self {
        self.qualification_level = level;
        self
    }

    /// Whether this worker has a given skill.
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s == name)
    }

    /// Whether this worker has every skill in `required`.
    pub fn covers<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|s| self.has_skill(s.as_ref()))
    }

    /// Well-formed phases (finite whole numbers ≥ 1), one entry per slot.
    pub fn phases(&self) -> impl Iterator<Item = i64> + '_ {
        self.available_slots
            .iter()
            .filter(|s| is_phase(**s))
            .map(|s| *s as i64)
    }

    /// Slots that are not a valid phase number.
    pub fn malformed_slots(&self) -> impl Iterator<Item = f64> + '_ {
        self.available_slots
            .iter()
            .copied()
            .filter(|s| !s.is_finite() || *s < 1.0)
    }
}

fn is_phase(slot: f64) -> bool {
    slot.is_finite() && slot >= 1.0 && slot.fract() == 0.0
}
