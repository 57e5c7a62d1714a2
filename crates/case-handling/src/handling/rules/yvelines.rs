use super::national::WORK_BASKET_REORIENTATION;
use super::{escalate_priority, visit_page, Rule, RuleContext, NATIONAL_BASELINE_PRIORITY};
use crate::handling::case::Intention;
use crate::handling::evaluator::{
    DecisionResults, DECISION_ACK_MESSAGE, DECISION_EMAIL_TEMPLATE, DECISION_HANDLING,
    DECISION_PRIORITY, DECISION_WORK_BASKET,
};
use crate::handling::priority::Priority;

const SAFE_CONDUCT: &str = "sauf-conduits";
const ATDA: &str = "atda";
const API_RENEWAL: &str = "api-a-renouveler";

const ASYLUM_PAGE_TEXT: &str =
    "**Les services de l'État dans les Yvelines** - Je demande l'asile en France";
const ASYLUM_PAGE_URL: &str = "https://www.yvelines.gouv.fr/Demarches/Accueil-des-etrangers-dans-les-Yvelines/Asile/Je-demande-l-asile-en-France";

pub(super) static RULES: &[Rule] = &[
    Rule {
        name: "asylum_filing_78",
        apply: asylum_filing,
    },
    Rule {
        name: "refugee_or_subsidiary_protection",
        apply: refugee_return,
    },
    Rule {
        name: "atda_expiration",
        apply: atda_expiration,
    },
    Rule {
        name: "api_expiration",
        apply: api_expiration,
    },
    Rule {
        name: "api_expired",
        apply: api_expired,
    },
    Rule {
        name: "api_not_yet_expired",
        apply: api_not_yet_expired,
    },
    Rule {
        name: "employment_risk",
        apply: employment_risk,
    },
];

fn agent_acknowledgement(results: &mut DecisionResults, template: &str, basket: &str) {
    results
        .set(DECISION_HANDLING, "AGENT")
        .set(DECISION_ACK_MESSAGE, "#ACK")
        .set(DECISION_EMAIL_TEMPLATE, template)
        .set(DECISION_WORK_BASKET, basket);
}

/// Days from the request until the residence permit (API) expires; negative once expired.
fn days_until_api_expiration(context: &RuleContext<'_>) -> i64 {
    let customer = &context.case.customer_data;
    context
        .dates
        .days_between(&customer.request_date, &customer.api_expiration_date)
}

fn asylum_filing(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::DepotDeDemandeDAsile {
        return false;
    }
    results
        .set(DECISION_HANDLING, "DEFLECTION")
        .set(
            DECISION_ACK_MESSAGE,
            visit_page(ASYLUM_PAGE_TEXT, ASYLUM_PAGE_URL),
        )
        .set(DECISION_WORK_BASKET, WORK_BASKET_REORIENTATION)
        .set(DECISION_PRIORITY, Priority::Medium.label());
    true
}

fn refugee_return(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::DemRetourPaysMotifExcept
        || !context.case.customer_data.refugee_or_subsidiary_protection
    {
        return false;
    }
    agent_acknowledgement(results, SAFE_CONDUCT, SAFE_CONDUCT);
    results.set(DECISION_PRIORITY, Priority::High.label());
    true
}

fn atda_expiration(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::ExpirationDUneAtda {
        return false;
    }
    agent_acknowledgement(results, ATDA, ATDA);
    results.set(DECISION_PRIORITY, Priority::High.label());
    true
}

fn api_expiration(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::ExpirationDUneApi {
        return false;
    }
    agent_acknowledgement(results, API_RENEWAL, API_RENEWAL);
    true
}

fn api_expired(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::ExpirationDUneApi {
        return false;
    }
    let days = days_until_api_expiration(context);
    if days > 0 {
        return false;
    }
    results
        .set(DECISION_PRIORITY, Priority::VeryHigh.label())
        .add_note(format!("#API_EXPIREE_DEPUIS_X_JOURS,{}", days.abs()));
    true
}

fn api_not_yet_expired(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::ExpirationDUneApi {
        return false;
    }
    let days = days_until_api_expiration(context);
    if days <= 0 {
        return false;
    }
    if days <= 30 {
        results
            .set(DECISION_PRIORITY, Priority::High.label())
            .add_note(format!("#API_VA_EXPIRER_DANS_X_JOURS,{days}"));
    } else if days <= 90 {
        results.set(DECISION_PRIORITY, Priority::Medium.label());
    } else {
        results.set(DECISION_PRIORITY, Priority::Low.label());
    }
    true
}

/// Raises the priority one level. Without a priority of its own the rule set escalates
/// from the national baseline, which the merge would otherwise keep as is.
fn employment_risk(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if !context.case.customer_data.employment_risk {
        return false;
    }
    if !escalate_priority(results) {
        results.set(
            DECISION_PRIORITY,
            NATIONAL_BASELINE_PRIORITY.escalate().label(),
        );
    }
    true
}
