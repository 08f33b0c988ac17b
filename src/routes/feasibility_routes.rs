use axum::{
    Router,
    routing::{get, post},
};

use crate::controllers::feasibility_controller::{
    capture_lead, check_feasibility, get_estimator_config, get_health,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/feasibility",   post(check_feasibility))
        .route("/leads",         post(capture_lead))
        .route("/health",        get(get_health))
        .route("/system/config", get(get_estimator_config))
        .with_state(shared)
}
