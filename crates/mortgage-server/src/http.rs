//! HTTP Endpoints
//!
//! `/api/calc/` answers the widget's quote requests; `/api/mortgage` and
//! `/api/mortgage/schedule` expose the full engine as JSON.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, Method},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mortgage_core::amortization::schedule::{build_schedule, AmortizationSchedule, ScheduleInput};
use mortgage_core::amortization::{calculate_mortgage, LoanInputs, LoanResult};
use mortgage_core::quote;
use mortgage_core::ComputationOutput;

use crate::csrf::csrf_guard;
use crate::form::{CalcForm, QuoteResponse};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.settings.cors_origins);

    Router::new()
        .route("/api/calc", post(calc_api))
        .route("/api/calc/", post(calc_api))
        .route("/api/mortgage", post(mortgage))
        .route("/api/mortgage/schedule", post(schedule))
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(state.clone(), csrf_guard))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            })
        })
        .collect();

    if parsed.is_empty() {
        return CorsLayer::new();
    }

    tracing::info!("CORS configured with {} origins", parsed.len());
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Widget quote: form fields in, `{"monthly_payment": "1798.65"}` out.
async fn calc_api(form: CalcForm) -> Result<Json<QuoteResponse>, ServerError> {
    let request = form.parse()?;
    let quote = quote::monthly_payment(
        request.principal,
        request.annual_rate_percent,
        request.years,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Quote rejected");
        e
    })?;

    Ok(Json(QuoteResponse {
        monthly_payment: quote.monthly_payment_display(),
    }))
}

/// Full payment breakdown for JSON loan inputs.
async fn mortgage(
    State(state): State<AppState>,
    payload: Result<Json<LoanInputs>, JsonRejection>,
) -> Result<Json<ComputationOutput<LoanResult>>, ServerError> {
    let Json(inputs) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let output = calculate_mortgage(&inputs, state.settings.term_policy()).map_err(|e| {
        tracing::debug!(error = %e, "Mortgage calculation rejected");
        e
    })?;
    Ok(Json(output))
}

/// Month-by-month schedule, on request only. Requests without a
/// `term_policy` get the server's.
async fn schedule(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleInput>, JsonRejection>,
) -> Result<Json<ComputationOutput<AmortizationSchedule>>, ServerError> {
    let Json(mut input) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    if input.term_policy.is_none() {
        input.term_policy = Some(state.settings.term_policy());
    }
    let output = build_schedule(&input).map_err(|e| {
        tracing::debug!(error = %e, "Schedule rejected");
        e
    })?;
    Ok(Json(output))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
