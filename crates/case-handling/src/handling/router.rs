use std::sync::Arc;

use axum::{extract::State, routing::post, Router};
use tracing::warn;

use super::case::Case;
use super::evaluator::RuleSetEvaluator;
use super::outcome::DecisionOutcome;
use super::resolver::OutcomeResolver;
use crate::error::AppError;

/// Router builder exposing the case handling decision endpoint.
pub fn handling_router<E>(resolver: Arc<OutcomeResolver<E>>) -> Router
where
    E: RuleSetEvaluator + 'static,
{
    Router::new()
        .route("/api/v1/case-handling/decide", post(decide_handler::<E>))
        .with_state(resolver)
}

pub(crate) async fn decide_handler<E>(
    State(resolver): State<Arc<OutcomeResolver<E>>>,
    axum::Json(case): axum::Json<Case>,
) -> Result<axum::Json<DecisionOutcome>, AppError>
where
    E: RuleSetEvaluator + 'static,
{
    let outcome = resolver.resolve(&case).map_err(|error| {
        warn!(department = case.department(), %error, "case resolution failed");
        AppError::from(error)
    })?;
    Ok(axum::Json(outcome))
}
