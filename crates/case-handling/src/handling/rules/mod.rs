//! In-process rule sets used when no external decision service is configured.
//!
//! Each rule set is an ordered list of rules. A rule inspects the case and, when its
//! condition holds, writes named decision results; later rules overwrite earlier ones.

mod national;
mod yvelines;

use std::collections::BTreeMap;

use tracing::debug;

use super::case::Case;
use super::dates::DateCalculator;
use super::evaluator::{
    DecisionResults, EvaluationError, RuleSetEvaluator, RuleSetId, DECISION_PRIORITY,
};
use super::outcome::DecisionOutcome;
use super::priority::Priority;

pub const NATIONAL_RULE_SET: &str = "HandlingNational";
pub const YVELINES_RULE_SET: &str = "Handling78";

/// Priority every national rule assigns.
pub(crate) const NATIONAL_BASELINE_PRIORITY: Priority = Priority::Medium;

pub(crate) struct RuleContext<'a> {
    pub case: &'a Case,
    pub dates: &'a DateCalculator,
}

/// Single named rule. `apply` returns whether the rule fired.
pub(crate) struct Rule {
    pub name: &'static str,
    pub apply: fn(&RuleContext<'_>, &mut DecisionResults) -> bool,
}

/// Evaluator hosting the national and Yvelines rule sets.
pub struct BuiltinRuleSets {
    dates: DateCalculator,
    rule_sets: BTreeMap<RuleSetId, &'static [Rule]>,
}

impl BuiltinRuleSets {
    pub fn new(dates: DateCalculator) -> Self {
        let mut rule_sets: BTreeMap<RuleSetId, &'static [Rule]> = BTreeMap::new();
        rule_sets.insert(RuleSetId::new(NATIONAL_RULE_SET), national::RULES);
        rule_sets.insert(RuleSetId::new(YVELINES_RULE_SET), yvelines::RULES);
        Self { dates, rule_sets }
    }

    pub fn contains(&self, rule_set: &RuleSetId) -> bool {
        self.rule_sets.contains_key(rule_set)
    }

    pub fn rule_set_ids(&self) -> impl Iterator<Item = &RuleSetId> {
        self.rule_sets.keys()
    }

    pub fn dates(&self) -> &DateCalculator {
        &self.dates
    }
}

impl Default for BuiltinRuleSets {
    fn default() -> Self {
        Self::new(DateCalculator::system())
    }
}

impl RuleSetEvaluator for BuiltinRuleSets {
    fn evaluate(
        &self,
        rule_set: &RuleSetId,
        case: &Case,
    ) -> Result<DecisionOutcome, EvaluationError> {
        let rules = self
            .rule_sets
            .get(rule_set)
            .ok_or_else(|| EvaluationError::UnknownRuleSet(rule_set.clone()))?;

        if case.department().trim().is_empty() {
            return Err(EvaluationError::MalformedCase {
                rule_set: rule_set.clone(),
                reason: "department code is missing".to_string(),
            });
        }

        let context = RuleContext {
            case,
            dates: &self.dates,
        };
        let mut results = DecisionResults::new();
        for rule in rules.iter() {
            if (rule.apply)(&context, &mut results) {
                debug!(rule_set = %rule_set, rule = rule.name, "rule fired");
                results.record_rule(rule.name);
            }
        }

        DecisionOutcome::from_decisions(rule_set, &results)
    }
}

/// Raise the priority already written to `results`, if any.
pub(crate) fn escalate_priority(results: &mut DecisionResults) -> bool {
    let escalated = results
        .get(DECISION_PRIORITY)
        .and_then(|value| value.parse::<Priority>().ok())
        .map(Priority::escalate);

    match escalated {
        Some(priority) => {
            results.set(DECISION_PRIORITY, priority.label());
            true
        }
        None => false,
    }
}

/// `#VISIT_PAGE,<text>,<url>` acknowledgement pointing the requester to a web page.
pub(crate) fn visit_page(text: &str, url: &str) -> String {
    format!("#VISIT_PAGE,{text},{url}")
}
