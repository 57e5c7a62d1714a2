use std::collections::BTreeMap;

use tracing::info;

use super::case::Case;
use super::evaluator::{EvaluationError, RuleSetEvaluator, RuleSetId};
use super::outcome::DecisionOutcome;
use super::rules::{NATIONAL_RULE_SET, YVELINES_RULE_SET};

/// Department codes that carry their own override rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JurisdictionTable {
    entries: BTreeMap<String, RuleSetId>,
}

impl JurisdictionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The observed deployment: Yvelines ("78") overrides the national rules.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert("78", RuleSetId::new(YVELINES_RULE_SET));
        table
    }

    pub fn insert(&mut self, department: impl Into<String>, rule_set: RuleSetId) -> &mut Self {
        self.entries.insert(department.into(), rule_set);
        self
    }

    pub fn rule_set_for(&self, department: &str) -> Option<&RuleSetId> {
        self.entries.get(department)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSetId)> {
        self.entries
            .iter()
            .map(|(department, rule_set)| (department.as_str(), rule_set))
    }
}

impl FromIterator<(String, RuleSetId)> for JurisdictionTable {
    fn from_iter<I: IntoIterator<Item = (String, RuleSetId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Resolves a case into a single outcome from the national rule set and, when the
/// department has one, its jurisdiction-specific override.
pub struct OutcomeResolver<E> {
    evaluator: E,
    national: RuleSetId,
    jurisdictions: JurisdictionTable,
}

impl<E> OutcomeResolver<E>
where
    E: RuleSetEvaluator,
{
    pub fn new(evaluator: E, national: RuleSetId, jurisdictions: JurisdictionTable) -> Self {
        Self {
            evaluator,
            national,
            jurisdictions,
        }
    }

    /// Resolver wired with `HandlingNational` and the standard jurisdiction table.
    pub fn standard(evaluator: E) -> Self {
        Self::new(
            evaluator,
            RuleSetId::new(NATIONAL_RULE_SET),
            JurisdictionTable::standard(),
        )
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn national_rule_set(&self) -> &RuleSetId {
        &self.national
    }

    pub fn jurisdictions(&self) -> &JurisdictionTable {
        &self.jurisdictions
    }

    /// Evaluate the national rule set, then any jurisdiction override, and merge them.
    ///
    /// Evaluation errors from either rule set are returned as-is; a failing jurisdiction
    /// evaluation is never replaced by the national outcome. The rule trace in `details`
    /// lists national rules first, then the jurisdiction's.
    pub fn resolve(&self, case: &Case) -> Result<DecisionOutcome, EvaluationError> {
        let national = self.evaluator.evaluate(&self.national, case)?;

        let Some(jurisdiction) = self.jurisdictions.rule_set_for(case.department()) else {
            info!(
                department = case.department(),
                rule_set = %self.national,
                "resolved case with national rules only"
            );
            return Ok(national);
        };

        let specific = self.evaluator.evaluate(jurisdiction, case)?;
        info!(
            department = case.department(),
            rule_set = %self.national,
            jurisdiction = %jurisdiction,
            "resolved case with jurisdiction override"
        );
        let mut merged = DecisionOutcome::merge(&specific, &national);
        merged.details.extend(specific.details);
        Ok(merged)
    }
}
