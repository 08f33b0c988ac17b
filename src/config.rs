use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub proposals: ProposalConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. Empty list → any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProposalConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "generated_proposals".to_string()
}

/// Every tunable constant of the sizing/financial pipeline. Kept out of the
/// algorithm so a different tariff regime or subsidy scheme is a config edit,
/// not a code change. Defaults reflect the Indian residential scheme.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Rooftops below this area are not worth installing on (m²).
    pub min_area_m2: f64,
    /// Roof area consumed per kW for basic-tier panels (m²/kW).
    pub basic_m2_per_kw: f64,
    /// Roof area consumed per kW for premium-tier panels (m²/kW).
    pub premium_m2_per_kw: f64,
    /// Installed capital cost per kW (currency/kW).
    pub cost_per_kw: f64,
    /// Upper bound of the high-subsidy band (kW, inclusive).
    pub small_band_max_kw: f64,
    /// Subsidy rate inside the high-subsidy band (fraction of CAPEX).
    pub small_band_rate: f64,
    /// Upper bound of the reduced-subsidy band (kW, inclusive). No subsidy above.
    pub mid_band_max_kw: f64,
    /// Subsidy rate inside the reduced band (fraction of CAPEX).
    pub mid_band_rate: f64,
    /// Grid tariff offset by self-consumption (currency/kWh).
    pub tariff: f64,
    /// Average equivalent full-sun hours per day.
    pub sun_hours: f64,
    /// Monthly savings are clamped to this fraction of the current bill.
    pub savings_cap_ratio: f64,
    /// Annual operations & maintenance as a fraction of CAPEX.
    pub o_and_m_ratio: f64,
    /// ROI horizon in years.
    pub horizon_years: f64,
    /// Systems smaller than this are not worth proposing (kW).
    pub min_viable_kw: f64,
    /// Latitudes above this are bucketed as low shadow risk (degrees).
    pub shadow_lat_threshold_deg: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_area_m2: 20.0,
            basic_m2_per_kw: 10.0,
            premium_m2_per_kw: 7.5,
            cost_per_kw: 60_000.0,
            small_band_max_kw: 3.0,
            small_band_rate: 0.30,
            mid_band_max_kw: 10.0,
            mid_band_rate: 0.20,
            tariff: 7.0,
            sun_hours: 4.5,
            savings_cap_ratio: 0.95,
            o_and_m_ratio: 0.01,
            horizon_years: 25.0,
            min_viable_kw: 1.5,
            shadow_lat_threshold_deg: 20.0,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "server": { "port": 8080 } }"#).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.cors.allowed_origins.is_empty());
        assert_eq!(cfg.proposals.output_dir, "generated_proposals");
        assert_eq!(cfg.estimator.cost_per_kw, 60_000.0);
        assert_eq!(cfg.estimator.min_viable_kw, 1.5);
    }

    #[test]
    fn estimator_overrides_apply_per_field() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "server": { "port": 9000 },
                "estimator": { "tariff": 9.5, "sun_hours": 5.2 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.estimator.tariff, 9.5);
        assert_eq!(cfg.estimator.sun_hours, 5.2);
        // untouched fields keep scheme defaults
        assert_eq!(cfg.estimator.small_band_rate, 0.30);
        assert_eq!(cfg.estimator.shadow_lat_threshold_deg, 20.0);
    }
}
