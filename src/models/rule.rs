//! Allocation rules.
//!
//! Rules are user-declared constraints on how work may be allocated. The
//! validation pass does not enforce them; it only checks that the rule set
//! is internally consistent and consistent with the roster.
//!
//! On the wire a rule is an envelope with a `type` string and an untyped
//! `parameters` object. Here the parameters are a tagged union keyed by
//! the rule type, so each type's parameter shape is checked on decode.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};

/// A user-defined allocation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct Rule {
    /// Unique rule identifier.
    pub id: String,
    /// Short display name.
    pub name: String,
    /// Free-text description (often the natural-language source).
    pub description: String,
    /// Disabled rules are ignored by validation.
    pub enabled: bool,
    /// Rule priority (higher = evaluated first by downstream allocators).
    pub priority: i64,
    /// Rule type and its parameters.
    pub kind: RuleKind,
}

/// Rule type with its typed parameters.
///
/// Parameter fields may be absent: rules saved before their parameters are
/// filled in carry `{}` and decode with empty or zero values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters")]
pub enum RuleKind {
    /// Listed tasks must run together.
    #[serde(rename = "coRun")]
    CoRun {
        #[serde(default)]
        tasks: Vec<String>,
    },

    /// Members of `group` must share at least `min_common_slots` phases.
    #[serde(rename = "slotRestriction")]
    SlotRestriction {
        #[serde(default)]
        group: String,
        #[serde(rename = "minCommonSlots", default)]
        min_common_slots: i64,
    },

    /// Workers in `worker_group` take at most `max_slots` slots per phase.
    #[serde(rename = "loadLimit")]
    LoadLimit {
        #[serde(rename = "workerGroup", default)]
        worker_group: String,
        #[serde(rename = "maxSlots", default)]
        max_slots: i64,
    },

    /// Task may only run in the listed phases.
    #[serde(rename = "phaseWindow")]
    PhaseWindow {
        #[serde(rename = "taskId", default)]
        task_id: String,
        #[serde(default)]
        phases: Vec<i64>,
    },

    /// Regex-driven rule applied to matching records.
    #[serde(rename = "patternMatch")]
    PatternMatch {
        #[serde(default)]
        regex: String,
        #[serde(default)]
        template: String,
    },

    /// Records matching `condition` are allocated ahead of others.
    #[serde(rename = "precedence")]
    Precedence {
        #[serde(default)]
        condition: String,
        #[serde(default)]
        priority: i64,
    },

    /// Anything else; parameters are kept verbatim.
    #[serde(rename = "custom")]
    Custom(Map<String, Value>),
}

impl RuleKind {
    /// Every wire type name, in declaration order.
    pub const TYPES: [&'static str; 7] = [
        "coRun",
        "slotRestriction",
        "loadLimit",
        "phaseWindow",
        "patternMatch",
        "precedence",
        "custom",
    ];

    /// Wire type name of this rule kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CoRun { .. } => "coRun",
            Self::SlotRestriction { .. } => "slotRestriction",
            Self::LoadLimit { .. } => "loadLimit",
            Self::PhaseWindow { .. } => "phaseWindow",
            Self::PatternMatch { .. } => "patternMatch",
            Self::Precedence { .. } => "precedence",
            Self::Custom(_) => "custom",
        }
    }
}

impl Rule {
    /// Creates an enabled rule with priority 0.
    pub fn new(id: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            enabled: true,
            priority: 0,
            kind,
        }
    }

    /// Creates a co-run rule over the given tasks.
    pub fn co_run<I, S>(id: impl Into<String>, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            RuleKind::CoRun {
                tasks: tasks.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Creates a phase-window rule.
    pub fn phase_window(
        id: impl Into<String>,
        task_id: impl Into<String>,
        phases: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self::new(
            id,
            RuleKind::PhaseWindow {
                task_id: task_id.into(),
                phases: phases.into_iter().collect(),
            },
        )
    }

    /// Creates a load-limit rule.
    pub fn load_limit(id: impl Into<String>, worker_group: impl Into<String>, max_slots: i64) -> Self {
        Self::new(
            id,
            RuleKind::LoadLimit {
                worker_group: worker_group.into(),
                max_slots,
            },
        )
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Enables or disables the rule.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Decodes a JSON array of rule envelopes.
    ///
    /// Fails on the first rule with an unknown type or parameters that do
    /// not fit its type.
    pub fn from_json_list(json: &str) -> Result<Vec<Rule>> {
        let raw: Vec<RawRule> =
            serde_json::from_str(json).map_err(|source| Error::RulesDecode { source })?;
        let rules = raw.into_iter().map(Rule::try_from).collect::<Result<Vec<_>>>()?;
        tracing::debug!(rules = rules.len(), "decoded rule set");
        Ok(rules)
    }
}

/// Wire envelope: `{ id, type, name, description, parameters, enabled, priority }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    id: String,
    #[serde(rename = "type")]
    rule_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: Value,
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    priority: i64,
}

fn enabled_by_default() -> bool {
    true
}

impl TryFrom<RawRule> for Rule {
    type Error = Error;

    fn try_from(raw: RawRule) -> Result<Self> {
        if !RuleKind::TYPES.contains(&raw.rule_type.as_str()) {
            return Err(Error::UnknownRuleType {
                id: raw.id,
                rule_type: raw.rule_type,
            });
        }

        let parameters = match raw.parameters {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let kind = serde_json::from_value(json!({
            "type": raw.rule_type.clone(),
            "parameters": parameters,
        }))
        .map_err(|source| Error::RuleParameters {
            id: raw.id.clone(),
            rule_type: raw.rule_type.clone(),
            source,
        })?;

        Ok(Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            enabled: raw.enabled,
            priority: raw.priority,
            kind,
        })
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let parameters = serde_json::to_value(&rule.kind)
            .ok()
            .and_then(|mut v| v.get_mut("parameters").map(Value::take))
            .unwrap_or_default();
        Self {
            id: rule.id,
            rule_type: rule.kind.type_name().to_string(),
            name: rule.name,
            description: rule.description,
            parameters,
            enabled: rule.enabled,
            priority: rule.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builders() {
        let r = Rule::co_run("r1", ["T1", "T2"])
            .with_name("Pair")
            .with_description("T1 and T2 run together")
            .with_priority(3);

        assert_eq!(r.id, "r1");
        assert!(r.enabled);
        assert_eq!(r.priority, 3);
        assert_eq!(
            r.kind,
            RuleKind::CoRun {
                tasks: vec!["T1".into(), "T2".into()]
            }
        );
        assert!(!Rule::load_limit("r2", "ops", 2).with_enabled(false).enabled);
    }

    #[test]
    fn test_decode_typed_parameters() {
        let rules = Rule::from_json_list(
            r#"[
                {"id":"a","type":"coRun","name":"n","description":"d","parameters":{"tasks":["T1","T2"]},"enabled":true,"priority":1},
                {"id":"b","type":"loadLimit","parameters":{"workerGroup":"ops","maxSlots":2}},
                {"id":"c","type":"phaseWindow","parameters":{"taskId":"T1","phases":[1,2]},"enabled":false},
                {"id":"d","type":"custom","parameters":{"anything":[1,2,3]}},
                {"id":"e","type":"custom"}
            ]"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 5);
        assert_eq!(rules[0].kind.type_name(), "coRun");
        assert_eq!(
            rules[1].kind,
            RuleKind::LoadLimit {
                worker_group: "ops".into(),
                max_slots: 2
            }
        );
        assert!(rules[1].enabled);
        assert!(!rules[2].enabled);
        assert!(matches!(&rules[3].kind, RuleKind::Custom(m) if m.contains_key("anything")));
        assert!(matches!(&rules[4].kind, RuleKind::Custom(m) if m.is_empty()));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = Rule::from_json_list(r#"[{"id":"x","type":"teleport","parameters":{}}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownRuleType { ref id, ref rule_type } if id == "x" && rule_type == "teleport"));
    }

    #[test]
    fn test_empty_parameters_decode_with_defaults() {
        let rules = Rule::from_json_list(
            r#"[
                {"id":"r1","type":"coRun","parameters":{"tasks":["T1","T2"]}},
                {"id":"r2","type":"precedence","name":"VIP first","parameters":{}},
                {"id":"r3","type":"slotRestriction","parameters":{}},
                {"id":"r4","type":"patternMatch","parameters":{}},
                {"id":"r5","type":"coRun","parameters":{}}
            ]"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 5);
        assert_eq!(
            rules[1].kind,
            RuleKind::Precedence {
                condition: String::new(),
                priority: 0
            }
        );
        assert_eq!(rules[2].kind.type_name(), "slotRestriction");
        assert_eq!(rules[4].kind, RuleKind::CoRun { tasks: Vec::new() });
    }

    #[test]
    fn test_mismatched_parameters_are_rejected() {
        let err = Rule::from_json_list(r#"[{"id":"w","type":"phaseWindow","parameters":{"taskId":"T1","phases":"all"}}]"#)
            .unwrap_err();
        match err {
            Error::RuleParameters { id, rule_type, .. } => {
                assert_eq!(id, "w");
                assert_eq!(rule_type, "phaseWindow");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_document() {
        let err = Rule::from_json_list("{not json").unwrap_err();
        assert!(matches!(err, Error::RulesDecode { .. }));
    }

    #[test]
    fn test_wire_envelope_round_trip() {
        let rule = Rule::phase_window("pw", "T3", [2, 3]).with_priority(5);
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["type"], "phaseWindow");
        assert_eq!(json["parameters"]["taskId"], "T3");
        assert_eq!(json["parameters"]["phases"], json!([2, 3]));

        let back: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
    }
}
