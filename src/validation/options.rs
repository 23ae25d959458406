//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Options that shape which checks run and the bounds they enforce.
///
/// Defaults reproduce the standard twelve-check pass. Missing fields in a
/// serialized config take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Warn about IDs that look synthesized by the upstream mapper
    /// (`C003` on the third client row and so on).
    pub flag_placeholder_ids: bool,
    /// Inclusive valid range for `PriorityLevel`.
    pub priority_range: (i64, i64),
    /// Smallest valid task `Duration`.
    pub min_duration: i64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            flag_placeholder_ids: false,
            priority_range: (1, 5),
            min_duration: 1,
        }
    }
}

impl EngineOptions {
    /// Enables or disables the placeholder-ID check.
    pub fn with_placeholder_ids(mut self, enabled: bool) -> Self {
        self.flag_placeholder_ids = enabled;
        self
    }

    /// Sets the valid priority range (inclusive).
    pub fn with_priority_range(mut self, min: i64, max: i64) -> Self {
        self.priority_range = (min, max);
        self
    }

    /// Sets the minimum task duration.
    pub fn with_min_duration(mut self, min: i64) -> Self {
        self.min_duration = min;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = EngineOptions::default();
        assert!(!opts.flag_placeholder_ids);
        assert_eq!(opts.priority_range, (1, 5));
        assert_eq!(opts.min_duration, 1);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let opts: EngineOptions = serde_json::from_str(r#"{"flag_placeholder_ids": true}"#).unwrap();
        assert!(opts.flag_placeholder_ids);
        assert_eq!(opts.priority_range, (1, 5));
    }

    #[test]
    fn test_builder() {
        let opts = EngineOptions::default()
            .with_placeholder_ids(true)
            .with_priority_range(0, 10)
            .with_min_duration(2);
        assert!(opts.flag_placeholder_ids);
        assert_eq!(opts.priority_range, (0, 10));
        assert_eq!(opts.min_duration, 2);
    }
}
