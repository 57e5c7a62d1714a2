use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use case_handling::handling::{handling_router, OutcomeResolver, RuleSetEvaluator};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_handling_routes<E>(resolver: Arc<OutcomeResolver<E>>) -> axum::Router
where
    E: RuleSetEvaluator + 'static,
{
    handling_router(resolver)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{build_resolver, builtin_rule_sets};
    use axum::body::Body;
    use axum::http::Request;
    use case_handling::config::ResolverConfig;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
        let resolver = build_resolver(&ResolverConfig::default(), builtin_rule_sets(Some(today)));
        with_handling_routes(Arc::new(resolver))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn decide_route_is_mounted_alongside_health() {
        let payload = json!({
            "intention": "expiration_d_une_atda",
            "customer_data": {
                "department": "78",
                "request_date": "1/3/2025",
                "api_expiration_date": "1/4/2025"
            }
        });

        let response = router()
            .oneshot(
                Request::post("/api/v1/case-handling/decide")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn decide_route_rejects_invalid_json() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/case-handling/decide")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"intention\": 42}"))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }
}
