//! Case handling decisions: priority, work basket, response template, acknowledgement and
//! handling category for an incoming citizen request.
//!
//! Rule sets are evaluated through [`RuleSetEvaluator`]. The [`OutcomeResolver`] always
//! consults the national rule set and merges a department's override on top of it, field
//! by field.

pub mod case;
pub mod dates;
pub mod evaluator;
pub mod outcome;
pub mod priority;
pub mod resolver;
pub mod router;
pub mod rules;

#[cfg(test)]
mod tests;

pub use case::{Case, CustomerData, Intention};
pub use dates::{Clock, DateCalculator, FixedClock, ParsedDate, SystemClock};
pub use evaluator::{DecisionResults, EvaluationError, RuleSetEvaluator, RuleSetId};
pub use outcome::DecisionOutcome;
pub use priority::{Priority, PriorityParseError};
pub use resolver::{JurisdictionTable, OutcomeResolver};
pub use router::handling_router;
pub use rules::{BuiltinRuleSets, NATIONAL_RULE_SET, YVELINES_RULE_SET};
