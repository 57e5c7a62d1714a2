use super::common::*;
use crate::handling::{EvaluationError, Intention, Priority, RuleSetEvaluator, RuleSetId};

#[test]
fn national_default_routes_to_generic_basket() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(&national_id(), &case_for(Intention::MiseAJourInfosAtda, "92"))
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::Medium));
    assert_eq!(outcome.work_basket.as_deref(), Some("generique"));
    assert_eq!(outcome.acknowledgement_message.as_deref(), Some("#ACK"));
    assert_eq!(outcome.handling.as_deref(), Some("AGENT"));
    assert_eq!(outcome.response_template_id, None);
}

#[test]
fn national_asylum_filing_is_deflected_to_public_page() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(
            &national_id(),
            &case_for(Intention::DepotDeDemandeDAsile, "92"),
        )
        .expect("evaluates");

    assert_eq!(outcome.handling.as_deref(), Some("DEFLECTION"));
    assert_eq!(outcome.work_basket.as_deref(), Some("reorientation"));
    let ack = outcome.acknowledgement_message.expect("acknowledgement set");
    assert!(ack.starts_with("#VISIT_PAGE,"));
    assert!(ack.contains("service-public.fr"));
}

#[test]
fn national_asylum_status_points_to_ofpra() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(
            &national_id(),
            &case_for(Intention::OuEnEstMaDemAsileEnCours, "78"),
        )
        .expect("evaluates");

    assert_eq!(
        outcome.acknowledgement_message.as_deref(),
        Some("#CONTACT_OFPRA")
    );
    assert_eq!(outcome.handling.as_deref(), Some("DEFLECTION"));
}

#[test]
fn yvelines_is_silent_when_no_rule_applies() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &case_for(Intention::UkrAutreDemande, "78"))
        .expect("evaluates");

    assert!(outcome.is_empty());
    assert!(outcome.notes.is_empty());
}

#[test]
fn yvelines_asylum_filing_uses_prefecture_page() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(
            &yvelines_id(),
            &case_for(Intention::DepotDeDemandeDAsile, "78"),
        )
        .expect("evaluates");

    let ack = outcome.acknowledgement_message.expect("acknowledgement set");
    assert!(ack.contains("yvelines.gouv.fr"));
    assert_eq!(outcome.priority, Some(Priority::Medium));
    assert_eq!(outcome.response_template_id, None);
}

#[test]
fn yvelines_refugee_return_requires_protection_flag() {
    let rule_sets = builtin_rule_sets();
    let mut case = case_for(Intention::DemRetourPaysMotifExcept, "78");

    let without_flag = rule_sets
        .evaluate(&yvelines_id(), &case)
        .expect("evaluates");
    assert!(without_flag.is_empty());

    case.customer_data.refugee_or_subsidiary_protection = true;
    let with_flag = rule_sets
        .evaluate(&yvelines_id(), &case)
        .expect("evaluates");
    assert_eq!(with_flag.priority, Some(Priority::High));
    assert_eq!(with_flag.work_basket.as_deref(), Some("sauf-conduits"));
    assert_eq!(
        with_flag.response_template_id.as_deref(),
        Some("sauf-conduits")
    );
}

#[test]
fn yvelines_atda_expiration_is_high_priority() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &case_for(Intention::ExpirationDUneAtda, "78"))
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::High));
    assert_eq!(outcome.work_basket.as_deref(), Some("atda"));
}

#[test]
fn expired_api_is_very_high_with_elapsed_days_note() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &api_case("10/3/2025", "1/3/2025"))
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::VeryHigh));
    assert_eq!(outcome.notes, vec!["#API_EXPIREE_DEPUIS_X_JOURS,9"]);
}

#[test]
fn api_expiring_on_request_day_counts_as_expired() {
    let rule_sets = builtin_rule_sets();

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &api_case("1/3/2025", "1/3/2025"))
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::VeryHigh));
    assert_eq!(outcome.notes, vec!["#API_EXPIREE_DEPUIS_X_JOURS,0"]);
}

#[test]
fn api_expiration_priority_follows_remaining_days() {
    let rule_sets = builtin_rule_sets();
    let cases = [
        ("1/3/2025", "31/3/2025", Priority::High, true),
        ("1/3/2025", "1/4/2025", Priority::Medium, false),
        ("1/3/2025", "30/5/2025", Priority::Medium, false),
        ("1/3/2025", "31/5/2025", Priority::Low, false),
    ];

    for (request, expiration, expected, noted) in cases {
        let outcome = rule_sets
            .evaluate(&yvelines_id(), &api_case(request, expiration))
            .expect("evaluates");
        assert_eq!(
            outcome.priority,
            Some(expected),
            "{request} -> {expiration}"
        );
        assert_eq!(!outcome.notes.is_empty(), noted, "{request} -> {expiration}");
    }
}

#[test]
fn unparsable_expiration_date_falls_back_to_today() {
    let rule_sets = builtin_rule_sets();

    // today() is 14/3/2025, thirteen days after the request.
    let outcome = rule_sets
        .evaluate(&yvelines_id(), &api_case("1/3/2025", "31/2/2025"))
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::High));
    assert_eq!(outcome.notes, vec!["#API_VA_EXPIRER_DANS_X_JOURS,13"]);
}

#[test]
fn employment_risk_escalates_the_jurisdiction_priority() {
    let rule_sets = builtin_rule_sets();
    let mut case = api_case("1/3/2025", "1/5/2025");
    case.customer_data.employment_risk = true;

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &case)
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::High));
}

#[test]
fn employment_risk_escalates_from_national_baseline_without_own_priority() {
    let rule_sets = builtin_rule_sets();
    let mut case = case_for(Intention::UkrAutreDemande, "78");
    case.customer_data.employment_risk = true;

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &case)
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::High));
    assert_eq!(outcome.work_basket, None);
}

#[test]
fn employment_risk_saturates_at_very_high() {
    let rule_sets = builtin_rule_sets();
    let mut case = api_case("10/3/2025", "1/3/2025");
    case.customer_data.employment_risk = true;

    let outcome = rule_sets
        .evaluate(&yvelines_id(), &case)
        .expect("evaluates");

    assert_eq!(outcome.priority, Some(Priority::VeryHigh));
}

#[test]
fn unknown_rule_set_is_reported() {
    let rule_sets = builtin_rule_sets();
    let missing = RuleSetId::new("Handling94");

    match rule_sets.evaluate(&missing, &case_for(Intention::Other, "94")) {
        Err(EvaluationError::UnknownRuleSet(id)) => assert_eq!(id, missing),
        other => panic!("expected unknown rule set, got {other:?}"),
    }
    assert!(rule_sets.contains(&national_id()));
    assert_eq!(rule_sets.rule_set_ids().count(), 2);
}

#[test]
fn blank_department_is_a_malformed_case() {
    let rule_sets = builtin_rule_sets();

    match rule_sets.evaluate(&national_id(), &case_for(Intention::Other, " ")) {
        Err(EvaluationError::MalformedCase { rule_set, .. }) => {
            assert_eq!(rule_set, national_id())
        }
        other => panic!("expected malformed case, got {other:?}"),
    }
}
