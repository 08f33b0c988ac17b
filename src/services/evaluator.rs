//! Site feasibility evaluation.
//!
//! Combines the sizing result with geographic heuristics into a suitability
//! verdict. Stateless: one call per request, nothing shared across calls.

use crate::config::EstimatorConfig;
use crate::models::feasibility::{FeasibilityRecord, ShadowRisk, SiteInput};
use crate::services::estimator;

/// Shadow-risk buckets that do not veto an installation. Moderate risk is
/// advisory: it flags the proposal for a site survey but keeps the site
/// eligible. Suitability therefore gates on size, orientation and shadow
/// risk together, with only sub-minimum sizing able to fail the check today.
const ACCEPTABLE_SHADOW: [ShadowRisk; 2] = [ShadowRisk::Low, ShadowRisk::Moderate];

/// Evaluate one site. Financial metrics are computed separately (and always,
/// including for unsuitable sites) so the proposal can show the numbers
/// behind a negative verdict.
pub fn evaluate(site: &SiteInput, cfg: &EstimatorConfig) -> FeasibilityRecord {
    let system_size_kw = estimator::size_system(site.rooftop_area_m2, site.panel_type, cfg);

    // Latitude threshold as a stand-in for a real obstruction analysis.
    let shadow_risk = if site.latitude > cfg.shadow_lat_threshold_deg {
        ShadowRisk::Low
    } else {
        ShadowRisk::Moderate
    };

    // TODO: replace with a geometric check once roof azimuth is captured in
    // the request.
    let orientation_ok = true;

    let suitable = system_size_kw >= cfg.min_viable_kw
        && orientation_ok
        && ACCEPTABLE_SHADOW.contains(&shadow_risk);

    FeasibilityRecord {
        site: site.clone(),
        system_size_kw,
        shadow_risk,
        orientation_ok,
        suitable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feasibility::PanelTier;

    fn site(latitude: f64, area: f64) -> SiteInput {
        SiteInput {
            latitude,
            longitude: 77.2,
            rooftop_area_m2: area,
            monthly_bill: 4000.0,
            panel_type: PanelTier::Basic,
            customer_name: "Test Customer".to_string(),
        }
    }

    #[test]
    fn shadow_risk_splits_at_latitude_threshold() {
        let cfg = EstimatorConfig::default();
        // strictly above the threshold → Low
        assert_eq!(evaluate(&site(20.01, 50.0), &cfg).shadow_risk, ShadowRisk::Low);
        // at or below → Moderate
        assert_eq!(evaluate(&site(20.0, 50.0), &cfg).shadow_risk, ShadowRisk::Moderate);
        assert_eq!(evaluate(&site(-33.9, 50.0), &cfg).shadow_risk, ShadowRisk::Moderate);
    }

    #[test]
    fn sub_minimum_roof_is_unsuitable_but_fully_described() {
        let cfg = EstimatorConfig::default();
        let record = evaluate(&site(28.6, 12.0), &cfg);
        assert_eq!(record.system_size_kw, 0.0);
        assert!(!record.suitable);
        // qualitative flags still populated for the proposal
        assert_eq!(record.shadow_risk, ShadowRisk::Low);
        assert!(record.orientation_ok);
    }

    #[test]
    fn viable_size_is_suitable_even_with_moderate_shadow() {
        // Moderate shadow risk is advisory, not disqualifying
        let cfg = EstimatorConfig::default();
        let record = evaluate(&site(12.9, 40.0), &cfg);
        assert_eq!(record.shadow_risk, ShadowRisk::Moderate);
        assert_eq!(record.system_size_kw, 4.0);
        assert!(record.suitable);
    }

    #[test]
    fn suitability_requires_minimum_viable_size() {
        let mut cfg = EstimatorConfig::default();
        // shrink the minimum area so a sub-1.5 kW system can exist at all
        cfg.min_area_m2 = 5.0;
        let record = evaluate(&site(25.0, 10.0), &cfg);
        assert_eq!(record.system_size_kw, 1.0);
        assert!(!record.suitable);

        let record = evaluate(&site(25.0, 15.0), &cfg);
        assert_eq!(record.system_size_kw, 1.5);
        assert!(record.suitable);
    }
}
