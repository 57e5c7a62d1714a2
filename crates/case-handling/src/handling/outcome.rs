use serde::{Deserialize, Serialize};

use super::evaluator::{
    DecisionResults, EvaluationError, RuleSetId, DECISION_ACK_MESSAGE, DECISION_EMAIL_TEMPLATE,
    DECISION_HANDLING, DECISION_PRIORITY, DECISION_WORK_BASKET,
};
use super::priority::Priority;

/// One rule set's opinion on how a case should be handled.
///
/// Each primary field is independently optional: `None` means the rule set expressed no
/// opinion, which lets a more general outcome fill the gap during [`DecisionOutcome::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub priority: Option<Priority>,
    pub work_basket: Option<String>,
    pub response_template_id: Option<String>,
    pub acknowledgement_message: Option<String>,
    pub handling: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    /// Rules that fired, as `<rule set>:<rule>`. Informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl DecisionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an outcome from named decision results, reading only the five known names.
    pub fn from_decisions(
        rule_set: &RuleSetId,
        results: &DecisionResults,
    ) -> Result<Self, EvaluationError> {
        let priority = results
            .get(DECISION_PRIORITY)
            .map(|value| {
                value
                    .parse::<Priority>()
                    .map_err(|_| EvaluationError::InvalidDecision {
                        rule_set: rule_set.clone(),
                        decision: DECISION_PRIORITY.to_string(),
                        value: value.to_string(),
                    })
            })
            .transpose()?;

        let text = |decision: &str| results.get(decision).map(str::to_string);

        Ok(Self {
            priority,
            work_basket: text(DECISION_WORK_BASKET),
            response_template_id: text(DECISION_EMAIL_TEMPLATE),
            acknowledgement_message: text(DECISION_ACK_MESSAGE),
            handling: text(DECISION_HANDLING),
            notes: results.notes().to_vec(),
            details: results
                .fired_rules()
                .iter()
                .map(|rule| format!("{rule_set}:{rule}"))
                .collect(),
        })
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Raise a present priority by one level. An absent priority stays absent.
    pub fn escalate_priority(&mut self) {
        self.priority = self.priority.map(Priority::escalate);
    }

    /// Combine a specific outcome over a fallback, field by field.
    ///
    /// Each primary field takes the specific value when present and the fallback value
    /// otherwise. Notes and details come from the fallback only; the specific ones are not
    /// carried.
    pub fn merge(specific: &DecisionOutcome, fallback: &DecisionOutcome) -> DecisionOutcome {
        fn pick<T: Clone>(specific: &Option<T>, fallback: &Option<T>) -> Option<T> {
            specific.as_ref().or(fallback.as_ref()).cloned()
        }

        DecisionOutcome {
            priority: specific.priority.or(fallback.priority),
            work_basket: pick(&specific.work_basket, &fallback.work_basket),
            response_template_id: pick(
                &specific.response_template_id,
                &fallback.response_template_id,
            ),
            acknowledgement_message: pick(
                &specific.acknowledgement_message,
                &fallback.acknowledgement_message,
            ),
            handling: pick(&specific.handling, &fallback.handling),
            notes: fallback.notes.clone(),
            details: fallback.details.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_none()
            && self.work_basket.is_none()
            && self.response_template_id.is_none()
            && self.acknowledgement_message.is_none()
            && self.handling.is_none()
    }
}
