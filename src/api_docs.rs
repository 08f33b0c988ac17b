use utoipa::OpenApi;

use crate::config;
use crate::controllers::feasibility_controller;
use crate::models::feasibility;

#[derive(OpenApi)]
#[openapi(
    paths(
        feasibility_controller::check_feasibility,
        feasibility_controller::capture_lead,
        feasibility_controller::get_health,
        feasibility_controller::get_estimator_config
    ),
    components(
        schemas(
            feasibility::SiteInput,
            feasibility::PanelTier,
            feasibility::ShadowRisk,
            feasibility::FeasibilityRecord,
            feasibility::FinancialMetrics,
            feasibility::FeasibilityResponse,
            feasibility::Lead,
            feasibility::LeadResponse,
            feasibility::HealthStatus,
            config::EstimatorConfig
        )
    ),
    tags(
        (name = "rooftop-solar-api", description = "Rooftop Solar Feasibility API")
    )
)]
pub struct ApiDoc;
