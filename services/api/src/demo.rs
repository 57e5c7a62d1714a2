use crate::infra::{build_resolver, builtin_rule_sets, parse_date, parse_intention};
use case_handling::config::{AppConfig, ResolverConfig};
use case_handling::error::AppError;
use case_handling::handling::{
    BuiltinRuleSets, Case, CustomerData, DecisionOutcome, Intention, OutcomeResolver,
};
use case_handling::telemetry;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// JSON file holding the case (`intention` and `customer_data`)
    #[arg(long, conflicts_with_all = ["intention", "department"])]
    pub(crate) case_file: Option<PathBuf>,
    /// Intention tag (e.g. expiration_d_une_api)
    #[arg(long, value_parser = parse_intention, required_unless_present = "case_file")]
    pub(crate) intention: Option<Intention>,
    /// Department code of the requester (e.g. 78)
    #[arg(long, required_unless_present = "case_file")]
    pub(crate) department: Option<String>,
    /// Request date (d/M/yyyy)
    #[arg(long, default_value = "")]
    pub(crate) request_date: String,
    /// Residence permit (API) expiration date (d/M/yyyy)
    #[arg(long, default_value = "")]
    pub(crate) api_expiration_date: String,
    /// Requester is a refugee or under subsidiary protection
    #[arg(long)]
    pub(crate) refugee: bool,
    /// Request mentions a risk for the requester's employment
    #[arg(long)]
    pub(crate) employment_risk: bool,
    /// Pin the date used for unparsable dates (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the sample cases (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    let resolver = build_resolver(&config.resolver, builtin_rule_sets(args.today));

    let case = match args.case_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<Case>(&raw)?
        }
        None => Case {
            intention: args.intention.unwrap_or(Intention::Other),
            customer_data: CustomerData {
                department: args.department.unwrap_or_default(),
                request_date: args.request_date,
                api_expiration_date: args.api_expiration_date,
                refugee_or_subsidiary_protection: args.refugee,
                employment_risk: args.employment_risk,
            },
        },
    };

    let outcome = resolver.resolve(&case)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let resolver = demo_resolver(today);

    println!("Case handling demo (reference date {today})");
    for (label, case) in sample_cases(today) {
        println!(
            "\n{label}\n  intention {:?}, department {}",
            case.intention,
            case.department()
        );
        match resolver.resolve(&case) {
            Ok(outcome) => render_outcome(&outcome),
            Err(err) => println!("  Resolution failed: {err}"),
        }
    }

    Ok(())
}

fn demo_resolver(today: NaiveDate) -> OutcomeResolver<BuiltinRuleSets> {
    build_resolver(&ResolverConfig::default(), builtin_rule_sets(Some(today)))
}

fn day_month_year(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

pub(crate) fn sample_cases(today: NaiveDate) -> Vec<(&'static str, Case)> {
    let case = |intention, department: &str, expires_in_days: i64| Case {
        intention,
        customer_data: CustomerData {
            department: department.to_string(),
            request_date: day_month_year(today),
            api_expiration_date: day_month_year(today + Duration::days(expires_in_days)),
            refugee_or_subsidiary_protection: false,
            employment_risk: false,
        },
    };

    let mut refugee_return = case(Intention::DemRetourPaysMotifExcept, "78", 120);
    refugee_return.customer_data.refugee_or_subsidiary_protection = true;

    let mut at_risk = case(Intention::ExpirationDUneApi, "78", 60);
    at_risk.customer_data.employment_risk = true;

    vec![
        (
            "National request outside any jurisdiction",
            case(Intention::ExpirationDUneApi, "92", 20),
        ),
        (
            "Asylum filing in Yvelines",
            case(Intention::DepotDeDemandeDAsile, "78", 0),
        ),
        (
            "Residence permit expiring within a month",
            case(Intention::ExpirationDUneApi, "78", 20),
        ),
        (
            "Residence permit already expired",
            case(Intention::ExpirationDUneApi, "78", -5),
        ),
        ("Residence permit at risk for employment", at_risk),
        ("Refugee requesting a safe-conduct", refugee_return),
    ]
}

fn render_outcome(outcome: &DecisionOutcome) {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "  priority {} | handling {} | work basket {}",
        outcome
            .priority
            .map(|priority| priority.label())
            .unwrap_or("-"),
        show(&outcome.handling),
        show(&outcome.work_basket)
    );
    println!(
        "  response template {} | acknowledgement {}",
        show(&outcome.response_template_id),
        show(&outcome.acknowledgement_message)
    );
    if !outcome.notes.is_empty() {
        println!("  notes: {}", outcome.notes.join(", "));
    }
    if !outcome.details.is_empty() {
        println!("  rules: {}", outcome.details.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_handling::handling::Priority;

    #[test]
    fn sample_cases_resolve_with_expected_priorities() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
        let resolver = demo_resolver(today);

        let priorities: Vec<Option<Priority>> = sample_cases(today)
            .iter()
            .map(|(_, case)| resolver.resolve(case).expect("resolves").priority)
            .collect();

        assert_eq!(
            priorities,
            vec![
                Some(Priority::Medium),
                Some(Priority::Medium),
                Some(Priority::High),
                Some(Priority::VeryHigh),
                Some(Priority::High),
                Some(Priority::High),
            ]
        );
    }

    #[test]
    fn sample_dates_use_day_month_year_order() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date");
        assert_eq!(day_month_year(date), "4/3/2025");
    }
}
