use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::handling::{
    BuiltinRuleSets, Case, CustomerData, DateCalculator, DecisionOutcome, EvaluationError,
    Intention, OutcomeResolver, Priority, RuleSetEvaluator, RuleSetId, NATIONAL_RULE_SET,
    YVELINES_RULE_SET,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(super) fn national_id() -> RuleSetId {
    RuleSetId::new(NATIONAL_RULE_SET)
}

pub(super) fn yvelines_id() -> RuleSetId {
    RuleSetId::new(YVELINES_RULE_SET)
}

pub(super) fn case_for(intention: Intention, department: &str) -> Case {
    Case {
        intention,
        customer_data: CustomerData {
            department: department.to_string(),
            request_date: "1/3/2025".to_string(),
            api_expiration_date: "1/9/2025".to_string(),
            refugee_or_subsidiary_protection: false,
            employment_risk: false,
        },
    }
}

pub(super) fn api_case(request_date: &str, api_expiration_date: &str) -> Case {
    let mut case = case_for(Intention::ExpirationDUneApi, "78");
    case.customer_data.request_date = request_date.to_string();
    case.customer_data.api_expiration_date = api_expiration_date.to_string();
    case
}

pub(super) fn builtin_rule_sets() -> BuiltinRuleSets {
    BuiltinRuleSets::new(DateCalculator::fixed(today()))
}

pub(super) fn builtin_resolver() -> OutcomeResolver<BuiltinRuleSets> {
    OutcomeResolver::standard(builtin_rule_sets())
}

pub(super) fn outcome(
    priority: Option<Priority>,
    work_basket: Option<&str>,
    handling: Option<&str>,
) -> DecisionOutcome {
    DecisionOutcome {
        priority,
        work_basket: work_basket.map(str::to_string),
        handling: handling.map(str::to_string),
        ..DecisionOutcome::default()
    }
}

/// Evaluator returning canned outcomes per rule set and recording each call.
#[derive(Default)]
pub(super) struct ScriptedEvaluator {
    responses: HashMap<RuleSetId, Result<DecisionOutcome, EvaluationError>>,
    calls: Mutex<Vec<RuleSetId>>,
}

impl ScriptedEvaluator {
    pub(super) fn with(
        mut self,
        rule_set: RuleSetId,
        response: Result<DecisionOutcome, EvaluationError>,
    ) -> Self {
        self.responses.insert(rule_set, response);
        self
    }

    pub(super) fn calls(&self) -> Vec<RuleSetId> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

impl RuleSetEvaluator for ScriptedEvaluator {
    fn evaluate(
        &self,
        rule_set: &RuleSetId,
        _case: &Case,
    ) -> Result<DecisionOutcome, EvaluationError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(rule_set.clone());
        self.responses
            .get(rule_set)
            .cloned()
            .unwrap_or_else(|| Err(EvaluationError::UnknownRuleSet(rule_set.clone())))
    }
}

pub(super) fn scripted_resolver(
    evaluator: ScriptedEvaluator,
) -> (
    OutcomeResolver<Arc<ScriptedEvaluator>>,
    Arc<ScriptedEvaluator>,
) {
    let evaluator = Arc::new(evaluator);
    (OutcomeResolver::standard(evaluator.clone()), evaluator)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
