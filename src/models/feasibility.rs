use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Request types ───────────────────────────────────────────────────────────

/// Panel technology tier. Premium modules pack more kW into the same roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PanelTier {
    #[default]
    Basic,
    Premium,
}

impl PanelTier {
    pub fn label(&self) -> &'static str {
        match self {
            PanelTier::Basic => "basic",
            PanelTier::Premium => "premium",
        }
    }
}

/// One feasibility request as received at the API boundary.
/// Immutable for the request lifetime; `customer_name` is labeling only and
/// never enters a calculation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteInput {
    pub latitude: f64,
    pub longitude: f64,
    pub rooftop_area_m2: f64,
    pub monthly_bill: f64,
    #[serde(default)]
    pub panel_type: PanelTier,
    pub customer_name: String,
}

/// Sales lead posted by the frontend once a customer opts in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    pub customer_name: String,
    pub contact_info: String,
    pub system_size_kw: f64,
}

// ─── Evaluation results ──────────────────────────────────────────────────────

/// Qualitative shadow-risk bucket derived from latitude. A crude stand-in
/// for a real obstruction analysis, kept so the proposal can flag it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ShadowRisk {
    Low,
    Moderate,
}

impl ShadowRisk {
    pub fn label(&self) -> &'static str {
        match self {
            ShadowRisk::Low => "Low",
            ShadowRisk::Moderate => "Moderate",
        }
    }
}

/// Financial outcome of one sizing. Field names are the contract with the
/// proposal renderer; values are rounded to 2 decimals when computed, so the
/// renderer formats without re-deriving anything.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct FinancialMetrics {
    pub monthly_generation_kwh: f64,
    pub monthly_savings: f64,
    pub capex: f64,
    pub subsidy: f64,
    pub net_capex: f64,
    pub o_and_m: f64,
    pub payback_years: f64,
    pub roi_percent_25yr: f64,
}

/// Combined suitability verdict for one site — the unit handed to the
/// proposal renderer together with [`FinancialMetrics`].
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeasibilityRecord {
    #[serde(flatten)]
    pub site: SiteInput,
    pub system_size_kw: f64,
    pub shadow_risk: ShadowRisk,
    pub orientation_ok: bool,
    pub suitable: bool,
}

// ─── REST API response types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct FeasibilityResponse {
    pub feasibility: FeasibilityRecord,
    pub savings: FinancialMetrics,
    /// Path of the generated proposal document, served under `/proposals`.
    pub proposal_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub proposals_generated: u64,
}
