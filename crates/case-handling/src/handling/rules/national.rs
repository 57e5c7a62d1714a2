use super::{visit_page, Rule, RuleContext, NATIONAL_BASELINE_PRIORITY};
use crate::handling::case::Intention;
use crate::handling::evaluator::{
    DecisionResults, DECISION_ACK_MESSAGE, DECISION_EMAIL_TEMPLATE, DECISION_HANDLING,
    DECISION_PRIORITY, DECISION_WORK_BASKET,
};

pub(super) const WORK_BASKET_GENERIC: &str = "generique";
pub(super) const WORK_BASKET_REORIENTATION: &str = "reorientation";

const ASYLUM_PAGE_TEXT: &str = "**Le site officiel de l'administration française** - Demande d'asile";
const ASYLUM_PAGE_URL: &str = "https://www.service-public.fr/particuliers/vosdroits/F2232";

pub(super) static RULES: &[Rule] = &[
    Rule {
        name: "default_decision",
        apply: default_decision,
    },
    Rule {
        name: "asylum_filing",
        apply: asylum_filing,
    },
    Rule {
        name: "asylum_status",
        apply: asylum_status,
    },
];

fn default_decision(_: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    results
        .set(DECISION_HANDLING, "AGENT")
        .set(DECISION_ACK_MESSAGE, "#ACK")
        .clear(DECISION_EMAIL_TEMPLATE)
        .set(DECISION_WORK_BASKET, WORK_BASKET_GENERIC)
        .set(DECISION_PRIORITY, NATIONAL_BASELINE_PRIORITY.label());
    true
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
        .clear(DECISION_EMAIL_TEMPLATE)
        .set(DECISION_WORK_BASKET, WORK_BASKET_REORIENTATION)
        .set(DECISION_PRIORITY, NATIONAL_BASELINE_PRIORITY.label());
    true
}

fn asylum_status(context: &RuleContext<'_>, results: &mut DecisionResults) -> bool {
    if context.case.intention != Intention::OuEnEstMaDemAsileEnCours {
        return false;
    }
    results
        .set(DECISION_HANDLING, "DEFLECTION")
        .set(DECISION_ACK_MESSAGE, "#CONTACT_OFPRA")
        .clear(DECISION_EMAIL_TEMPLATE)
        .set(DECISION_WORK_BASKET, WORK_BASKET_REORIENTATION)
        .set(DECISION_PRIORITY, NATIONAL_BASELINE_PRIORITY.label());
    true
}
