/// ============================================================
///  Rooftop Sizing & Financial Estimation Engine
///
///  Pipeline:
///   1. System sizing      – rooftop area ÷ tier m²-per-kW, minimum-area gate
///   2. Capital cost       – linear cost per kW
///   3. Subsidy            – stepped percentage of CAPEX (residential bands)
///   4. Monthly generation – size × sun hours × 30-day month
///   5. Savings            – generation × tariff, clamped below the bill
///   6. Payback / ROI      – against net CAPEX over the configured horizon
///
///  Pure functions over scalar inputs. All tunables come from
///  `EstimatorConfig`; nothing here reads clocks, files or globals.
/// ============================================================

use crate::config::EstimatorConfig;
use crate::models::feasibility::{FinancialMetrics, PanelTier};

/// Outcome of one financial estimation.
///
/// Degenerate input (size or bill ≤ 0) is a defined state, not an error:
/// `NotViable` makes it explicit, so a caller cannot mistake a genuine
/// zero-savings scenario for a failure. [`Estimate::into_metrics`] yields an
/// all-zero record for consumers that want a complete row regardless of
/// viability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    Computed(FinancialMetrics),
    NotViable,
}

impl Estimate {
    pub fn is_viable(&self) -> bool {
        matches!(self, Estimate::Computed(_))
    }

    /// A complete, internally consistent record in every case; all-zero when
    /// not viable.
    pub fn into_metrics(self) -> FinancialMetrics {
        match self {
            Estimate::Computed(m) => m,
            Estimate::NotViable => FinancialMetrics::default(),
        }
    }
}

/// Round to two decimals at the point of computation. Repeated calls with
/// identical inputs are bit-identical; presentation never re-rounds.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Recommended system size in kW for a rooftop.
///
/// Below the minimum viable area the answer is 0 — "not worth installing",
/// not an error.
pub fn size_system(area_m2: f64, tier: PanelTier, cfg: &EstimatorConfig) -> f64 {
    if area_m2 < cfg.min_area_m2 {
        return 0.0;
    }
    let m2_per_kw = match tier {
        PanelTier::Basic => cfg.basic_m2_per_kw,
        PanelTier::Premium => cfg.premium_m2_per_kw,
    };
    round2(area_m2 / m2_per_kw)
}

/// Capital expenditure, linear in system size. Zero for size ≤ 0.
pub fn capital_cost(size_kw: f64, cfg: &EstimatorConfig) -> f64 {
    if size_kw <= 0.0 {
        return 0.0;
    }
    round2(size_kw * cfg.cost_per_kw)
}

/// Government subsidy as a stepped percentage of CAPEX.
///
/// Band boundaries decide inclusively: a system at exactly the band maximum
/// still earns the band's rate. Above the reduced band there is no subsidy.
pub fn subsidy(size_kw: f64, cfg: &EstimatorConfig) -> f64 {
    if size_kw <= 0.0 {
        return 0.0;
    }
    let rate = if size_kw <= cfg.small_band_max_kw {
        cfg.small_band_rate
    } else if size_kw <= cfg.mid_band_max_kw {
        cfg.mid_band_rate
    } else {
        return 0.0;
    };
    round2(capital_cost(size_kw, cfg) * rate)
}

/// Full financial picture for a sized system against the current bill.
///
/// Payback and ROI are defined as zero when the annualized savings or the
/// net CAPEX are non-positive — a guarded branch, never a division fault.
pub fn estimate_financials(size_kw: f64, monthly_bill: f64, cfg: &EstimatorConfig) -> Estimate {
    if size_kw <= 0.0 || monthly_bill <= 0.0 {
        return Estimate::NotViable;
    }

    // Fixed 30-day month approximation.
    let generation_kwh = size_kw * cfg.sun_hours * 30.0;
    let raw_savings = generation_kwh * cfg.tariff;
    // Self-consumption cannot erase the whole bill; clamp at the configured
    // fraction of it.
    let monthly_savings = round2(raw_savings.min(monthly_bill * cfg.savings_cap_ratio));

    let capex = capital_cost(size_kw, cfg);
    let subsidy = subsidy(size_kw, cfg);
    let net_capex = round2(capex - subsidy);
    let o_and_m = round2(cfg.o_and_m_ratio * capex);
    let annual_savings = monthly_savings * 12.0;

    let (payback_years, roi_percent) = if annual_savings > 0.0 && net_capex > 0.0 {
        (
            round2(net_capex / annual_savings),
            round2((annual_savings - o_and_m) * cfg.horizon_years / net_capex * 100.0),
        )
    } else {
        (0.0, 0.0)
    };

    Estimate::Computed(FinancialMetrics {
        monthly_generation_kwh: round2(generation_kwh),
        monthly_savings,
        capex,
        subsidy,
        net_capex,
        o_and_m,
        payback_years,
        roi_percent_25yr: roi_percent,
    })
}
