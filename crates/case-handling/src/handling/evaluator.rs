use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::case::Case;
use super::outcome::DecisionOutcome;

/// Named outputs a rule set may report. Any other name is ignored.
pub const DECISION_PRIORITY: &str = "Priority";
pub const DECISION_WORK_BASKET: &str = "WorkBasket";
pub const DECISION_ACK_MESSAGE: &str = "AckMessage";
pub const DECISION_EMAIL_TEMPLATE: &str = "EmailTemplate";
pub const DECISION_HANDLING: &str = "Handling";

/// Identifier of an externally authored rule set (e.g. `HandlingNational`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleSetId(pub String);

impl RuleSetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability to evaluate one named rule set against a case.
pub trait RuleSetEvaluator: Send + Sync {
    fn evaluate(&self, rule_set: &RuleSetId, case: &Case)
        -> Result<DecisionOutcome, EvaluationError>;
}

impl<E: RuleSetEvaluator + ?Sized> RuleSetEvaluator for std::sync::Arc<E> {
    fn evaluate(
        &self,
        rule_set: &RuleSetId,
        case: &Case,
    ) -> Result<DecisionOutcome, EvaluationError> {
        (**self).evaluate(rule_set, case)
    }
}

/// Raw decision results keyed by decision name, in the shape evaluation engines report them.
///
/// A `None` value records that the decision was evaluated but produced no opinion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionResults {
    values: BTreeMap<String, Option<String>>,
    notes: Vec<String>,
    fired: Vec<String>,
}

impl DecisionResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, decision: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(decision.to_string(), Some(value.into()));
        self
    }

    pub fn clear(&mut self, decision: &str) -> &mut Self {
        self.values.insert(decision.to_string(), None);
        self
    }

    pub fn get(&self, decision: &str) -> Option<&str> {
        self.values.get(decision).and_then(|value| value.as_deref())
    }

    pub fn add_note(&mut self, note: impl Into<String>) -> &mut Self {
        self.notes.push(note.into());
        self
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Record that a rule matched, in evaluation order.
    pub fn record_rule(&mut self, rule: impl Into<String>) -> &mut Self {
        self.fired.push(rule.into());
        self
    }

    pub fn fired_rules(&self) -> &[String] {
        &self.fired
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

/// Failure reported while evaluating a rule set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("rule set '{0}' is not available")]
    UnknownRuleSet(RuleSetId),
    #[error("case cannot be evaluated by rule set '{rule_set}': {reason}")]
    MalformedCase { rule_set: RuleSetId, reason: String },
    #[error("rule set '{rule_set}' produced an invalid {decision} value '{value}'")]
    InvalidDecision {
        rule_set: RuleSetId,
        decision: String,
        value: String,
    },
    #[error("rule set '{rule_set}' failed during evaluation: {message}")]
    Runtime { rule_set: RuleSetId, message: String },
}

impl EvaluationError {
    pub fn rule_set(&self) -> &RuleSetId {
        match self {
            EvaluationError::UnknownRuleSet(rule_set)
            | EvaluationError::MalformedCase { rule_set, .. }
            | EvaluationError::InvalidDecision { rule_set, .. }
            | EvaluationError::Runtime { rule_set, .. } => rule_set,
        }
    }
}
