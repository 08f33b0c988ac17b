use std::path::Path;

use axum::{Json, extract::State, response::IntoResponse};

use crate::config::{Config, EstimatorConfig};
use crate::error::ApiError;
use crate::models::feasibility::{
    FeasibilityResponse, HealthStatus, Lead, LeadResponse, SiteInput,
};
use crate::services::{estimator, evaluator, proposal};
use crate::shared_state::AppState;

/// POST /api/feasibility
/// Evaluate a rooftop and generate a proposal
///
/// Validates the site inputs, runs the feasibility evaluation and financial
/// estimation, renders the proposal document, and returns everything together
/// with a link to the generated file.
#[utoipa::path(
    post,
    path = "/api/feasibility",
    request_body = SiteInput,
    responses(
        (status = 200, description = "Feasibility verdict with financials and proposal link", body = FeasibilityResponse),
        (status = 422, description = "Out-of-range or missing input"),
        (status = 500, description = "Proposal generation failed")
    )
)]
pub async fn check_feasibility(
    State(config): State<Config>,
    State(app): State<AppState>,
    Json(site): Json<SiteInput>,
) -> Result<Json<FeasibilityResponse>, ApiError> {
    validate_site(&site)?;

    let record = evaluator::evaluate(&site, &config.estimator);
    // Metrics are computed for unsuitable sites too; the proposal shows the
    // numbers behind a negative verdict instead of hiding them.
    let savings =
        estimator::estimate_financials(record.system_size_kw, site.monthly_bill, &config.estimator)
            .into_metrics();

    let file_name = proposal::write_proposal(
        &record,
        &savings,
        &config.estimator,
        Path::new(&config.proposals.output_dir),
    )?;
    app.proposal_written();

    tracing::info!(
        customer = %record.site.customer_name,
        size_kw = record.system_size_kw,
        suitable = record.suitable,
        proposal = %file_name,
        "feasibility evaluated"
    );

    Ok(Json(FeasibilityResponse {
        feasibility: record,
        savings,
        proposal_url: format!("/proposals/{file_name}"),
    }))
}

/// POST /api/leads
/// Capture a sales lead
///
/// Leads are acknowledged and logged only; there is deliberately no database
/// behind this endpoint.
#[utoipa::path(
    post,
    path = "/api/leads",
    request_body = Lead,
    responses(
        (status = 200, description = "Lead acknowledged", body = LeadResponse)
    )
)]
pub async fn capture_lead(Json(lead): Json<Lead>) -> impl IntoResponse {
    tracing::info!(
        customer = %lead.customer_name,
        contact = %lead.contact_info,
        size_kw = lead.system_size_kw,
        "lead captured"
    );
    Json(LeadResponse {
        status: "success".to_string(),
        message: "Lead captured".to_string(),
    })
}

/// GET /api/health
/// Service liveness and counters
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(State(app): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: app.uptime_seconds(),
        proposals_generated: app.proposals_generated(),
    })
}

/// GET /api/system/config
/// Effective estimator constants
///
/// Exposes the tariff, subsidy bands and sizing constants behind every quote,
/// so a frontend can display the assumptions next to the numbers.
#[utoipa::path(
    get,
    path = "/api/system/config",
    responses(
        (status = 200, description = "Estimator configuration in effect", body = EstimatorConfig)
    )
)]
pub async fn get_estimator_config(State(config): State<Config>) -> impl IntoResponse {
    Json(config.estimator)
}

/// Range checks at the request boundary. The estimator itself never rejects
/// numeric input; anything that passes here degrades gracefully further in.
fn validate_site(site: &SiteInput) -> Result<(), ApiError> {
    if !site.latitude.is_finite() || !(-90.0..=90.0).contains(&site.latitude) {
        return Err(ApiError::Validation(
            "latitude must be within -90 and 90 degrees".to_string(),
        ));
    }
    if !site.longitude.is_finite() || !(-180.0..=180.0).contains(&site.longitude) {
        return Err(ApiError::Validation(
            "longitude must be within -180 and 180 degrees".to_string(),
        ));
    }
    if !site.rooftop_area_m2.is_finite() || site.rooftop_area_m2 <= 0.0 {
        return Err(ApiError::Validation(
            "rooftop_area_m2 must be a positive number".to_string(),
        ));
    }
    if !site.monthly_bill.is_finite() || site.monthly_bill < 0.0 {
        return Err(ApiError::Validation(
            "monthly_bill must be zero or greater".to_string(),
        ));
    }
    if site.customer_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "customer_name must not be blank".to_string(),
        ));
    }
    Ok(())
}
