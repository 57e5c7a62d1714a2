use case_handling::config::ResolverConfig;
use case_handling::handling::{BuiltinRuleSets, DateCalculator, Intention, OutcomeResolver};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process rule sets, optionally pinned to a fixed "today" for reproducible runs.
pub(crate) fn builtin_rule_sets(today: Option<NaiveDate>) -> BuiltinRuleSets {
    let dates = match today {
        Some(date) => DateCalculator::fixed(date),
        None => DateCalculator::system(),
    };
    BuiltinRuleSets::new(dates)
}

pub(crate) fn build_resolver(
    config: &ResolverConfig,
    rule_sets: BuiltinRuleSets,
) -> OutcomeResolver<BuiltinRuleSets> {
    let configured = std::iter::once(&config.national_rule_set)
        .chain(config.jurisdictions.iter().map(|(_, rule_set)| rule_set));
    for rule_set in configured {
        if !rule_sets.contains(rule_set) {
            warn!(%rule_set, "configured rule set is not available; cases using it will fail");
        }
    }

    OutcomeResolver::new(
        rule_sets,
        config.national_rule_set.clone(),
        config.jurisdictions.clone(),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_intention(raw: &str) -> Result<Intention, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|err| format!("failed to parse '{raw}' as an intention ({err})"))
}
