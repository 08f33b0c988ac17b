//! Proposal document rendering.
//!
//! Produces a self-contained HTML proposal (charts inlined as SVG) written
//! under the configured output directory and served statically at
//! `/proposals/{file}`. The renderer only formats — every number it shows
//! was already computed and rounded by the estimator.

use std::fs;
use std::path::Path;

use askama::Template;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::EstimatorConfig;
use crate::models::feasibility::{FeasibilityRecord, FinancialMetrics};
use crate::services::layout::{self, RoofLayout, PANEL_CAPACITY_KW};

#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
    #[error("could not write proposal file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Template)]
#[template(path = "proposal.html")]
struct ProposalTemplate {
    customer_name: String,
    generated_on: String,
    location: String,
    rooftop_area: String,
    monthly_bill: String,
    panel_type: String,
    system_size: String,
    shadow_risk: String,
    orientation: String,
    suitable: bool,
    capex: String,
    subsidy_amount: String,
    net_capex: String,
    monthly_savings: String,
    o_and_m: String,
    monthly_generation: String,
    payback_years: String,
    payback_months: i64,
    roi_percent: String,
    horizon_years: u32,
    panels_placed: usize,
    panels_required: usize,
    panel_capacity_w: u32,
    savings_chart_svg: String,
    layout_svg: String,
}

/// Render the proposal document to an HTML string.
pub fn render_html(
    record: &FeasibilityRecord,
    metrics: &FinancialMetrics,
    cfg: &EstimatorConfig,
) -> Result<String, ProposalError> {
    let horizon_years = cfg.horizon_years.round() as u32;
    let roof = layout::plan_layout(record.site.rooftop_area_m2, record.system_size_kw);

    let template = ProposalTemplate {
        customer_name: record.site.customer_name.clone(),
        generated_on: Utc::now().format("%d %b %Y").to_string(),
        location: format!("{:.4}, {:.4}", record.site.latitude, record.site.longitude),
        rooftop_area: format!("{:.1}", record.site.rooftop_area_m2),
        monthly_bill: fmt_currency(record.site.monthly_bill),
        panel_type: record.site.panel_type.label().to_string(),
        system_size: format!("{:.2}", record.system_size_kw),
        shadow_risk: record.shadow_risk.label().to_string(),
        orientation: if record.orientation_ok { "Acceptable" } else { "Needs review" }.to_string(),
        suitable: record.suitable,
        capex: fmt_currency(metrics.capex),
        subsidy_amount: fmt_currency(metrics.subsidy),
        net_capex: fmt_currency(metrics.net_capex),
        monthly_savings: fmt_currency(metrics.monthly_savings),
        o_and_m: fmt_currency(metrics.o_and_m),
        monthly_generation: format!("{:.2}", metrics.monthly_generation_kwh),
        payback_years: format!("{:.2}", metrics.payback_years),
        payback_months: (metrics.payback_years * 12.0) as i64,
        roi_percent: format!("{:.2}", metrics.roi_percent_25yr),
        horizon_years,
        panels_placed: roof.panels.len(),
        panels_required: roof.panels_required,
        panel_capacity_w: (PANEL_CAPACITY_KW * 1000.0) as u32,
        savings_chart_svg: savings_chart_svg(metrics, horizon_years),
        layout_svg: layout_svg(&roof),
    };

    Ok(template.render()?)
}

/// Render and persist the proposal; returns the generated file name.
pub fn write_proposal(
    record: &FeasibilityRecord,
    metrics: &FinancialMetrics,
    cfg: &EstimatorConfig,
    output_dir: &Path,
) -> Result<String, ProposalError> {
    let html = render_html(record, metrics, cfg)?;

    let slug = slugify(&record.site.customer_name);
    let stamp = Utc::now().format("%Y%m%d");
    let nonce = Uuid::new_v4().simple().to_string();
    let file_name = format!("{slug}_solar_proposal_{stamp}_{}.html", &nonce[..8]);

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(&file_name), html)?;
    Ok(file_name)
}

/// Customer name → filesystem-safe slug. Anything outside [A-Za-z0-9] maps
/// to an underscore; a blank name falls back to "proposal".
fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if slug.chars().all(|c| c == '_') {
        "proposal".to_string()
    } else {
        slug
    }
}

/// Whole-currency formatting with western-style thousands separators, as
/// shown on the proposal.
fn fmt_currency(v: f64) -> String {
    let whole = v.abs().round() as i64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if v < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

// ─── Inline SVG charts ───────────────────────────────────────────────────────

const CHART_LINE: &str = "#F18F01";
const CHART_TITLE: &str = "#2E86AB";
const CHART_TEXT: &str = "#2B2D42";

/// Cumulative savings projection over the ROI horizon, sampled yearly.
fn savings_chart_svg(metrics: &FinancialMetrics, horizon_years: u32) -> String {
    const W: f64 = 640.0;
    const H: f64 = 320.0;
    const LEFT: f64 = 80.0;
    const RIGHT: f64 = 20.0;
    const TOP: f64 = 40.0;
    const BOTTOM: f64 = 45.0;

    let plot_w = W - LEFT - RIGHT;
    let plot_h = H - TOP - BOTTOM;
    let horizon = horizon_years.max(1);
    let annual = metrics.monthly_savings * 12.0;
    let total = (annual * horizon as f64).max(1.0);

    let point = |year: u32| -> (f64, f64) {
        let x = LEFT + plot_w * year as f64 / horizon as f64;
        let y = TOP + plot_h * (1.0 - (annual * year as f64) / total);
        (x, y)
    };

    let mut line_points = String::new();
    for year in 0..=horizon {
        let (x, y) = point(year);
        line_points.push_str(&format!("{x:.1},{y:.1} "));
    }
    // close the area polygon down to the baseline
    let area_points = format!(
        "{}{:.1},{:.1} {:.1},{:.1}",
        line_points,
        LEFT + plot_w,
        TOP + plot_h,
        LEFT,
        TOP + plot_h
    );

    let mut svg = format!(
        r#"<svg viewBox="0 0 {W} {H}" xmlns="http://www.w3.org/2000/svg" role="img">"#
    );
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="22" text-anchor="middle" font-size="14" font-weight="bold" fill="{CHART_TITLE}">{}-Year Savings Projection</text>"#,
        LEFT + plot_w / 2.0,
        horizon
    ));

    // horizontal grid + y labels at 0 / ½ / full
    for frac in [0.0_f64, 0.5, 1.0] {
        let y = TOP + plot_h * (1.0 - frac);
        svg.push_str(&format!(
            r##"<line x1="{LEFT:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ccc" stroke-dasharray="2,3"/>"##,
            LEFT + plot_w
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10" fill="{CHART_TEXT}">{}</text>"#,
            LEFT - 6.0,
            y + 3.0,
            fmt_currency(total * frac)
        ));
    }

    // x labels every 5 years
    let mut year = 0;
    while year <= horizon {
        let (x, _) = point(year);
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="{CHART_TEXT}">{year}</text>"#,
            TOP + plot_h + 16.0
        ));
        year += 5;
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{CHART_TEXT}">Years</text>"#,
        LEFT + plot_w / 2.0,
        H - 8.0
    ));

    svg.push_str(&format!(
        r#"<polygon points="{area_points}" fill="{CHART_LINE}" fill-opacity="0.1"/>"#
    ));
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{CHART_LINE}" stroke-width="2.5"/>"#,
        line_points.trim_end()
    ));
    svg.push_str(&format!(
        r#"<line x1="{LEFT:.1}" y1="{TOP:.1}" x2="{LEFT:.1}" y2="{:.1}" stroke="{CHART_TEXT}"/>"#,
        TOP + plot_h
    ));
    svg.push_str(&format!(
        r#"<line x1="{LEFT:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{CHART_TEXT}"/>"#,
        TOP + plot_h,
        LEFT + plot_w,
        TOP + plot_h
    ));
    svg.push_str("</svg>");
    svg
}

/// Scaled top-down roof diagram with the planned panel grid.
fn layout_svg(roof: &RoofLayout) -> String {
    const VIEW_W: f64 = 480.0;
    const VIEW_H: f64 = 360.0;
    const PAD: f64 = 20.0;

    let scale = ((VIEW_W - 2.0 * PAD) / roof.width_m).min((VIEW_H - 2.0 * PAD) / roof.height_m);
    let roof_w = roof.width_m * scale;
    let roof_h = roof.height_m * scale;
    let ox = (VIEW_W - roof_w) / 2.0;
    let oy = (VIEW_H - roof_h) / 2.0;

    let mut svg = format!(
        r#"<svg viewBox="0 0 {VIEW_W} {VIEW_H}" xmlns="http://www.w3.org/2000/svg" role="img">"#
    );
    svg.push_str(&format!(
        r##"<rect x="{ox:.1}" y="{oy:.1}" width="{roof_w:.1}" height="{roof_h:.1}" fill="#f0f0f0" stroke="#333"/>"##
    ));
    for p in &roof.panels {
        svg.push_str(&format!(
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#4CAF50" stroke="#2c7e3a"/>"##,
            ox + p.x_m * scale,
            oy + p.y_m * scale,
            layout::PANEL_WIDTH_M * scale,
            layout::PANEL_HEIGHT_M * scale
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{CHART_TEXT}">{:.1} m × {:.1} m</text>"#,
        VIEW_W / 2.0,
        VIEW_H - 4.0,
        roof.width_m,
        roof.height_m
    ));
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feasibility::{PanelTier, ShadowRisk, SiteInput};
    use crate::services::{estimator, evaluator};

    fn fixtures() -> (FeasibilityRecord, FinancialMetrics, EstimatorConfig) {
        let cfg = EstimatorConfig::default();
        let site = SiteInput {
            latitude: 28.61,
            longitude: 77.21,
            rooftop_area_m2: 70.0,
            monthly_bill: 6000.0,
            panel_type: PanelTier::Basic,
            customer_name: "Asha Verma".to_string(),
        };
        let record = evaluator::evaluate(&site, &cfg);
        let metrics =
            estimator::estimate_financials(record.system_size_kw, site.monthly_bill, &cfg)
                .into_metrics();
        (record, metrics, cfg)
    }

    #[test]
    fn rendered_proposal_carries_the_contract_fields() {
        let (record, metrics, cfg) = fixtures();
        let html = render_html(&record, &metrics, &cfg).unwrap();
        assert!(html.contains("Asha Verma"));
        assert!(html.contains("7.00")); // system size
        assert!(html.contains("₹420,000")); // capex
        assert!(html.contains("₹336,000")); // net capex
        assert!(html.contains("₹5,700")); // capped monthly savings
        assert!(html.contains("477.68")); // 25-year ROI
        assert!(html.contains("<svg")); // charts inlined
        assert!(html.contains("Recommended"));
        assert_eq!(record.shadow_risk, ShadowRisk::Low);
    }

    #[test]
    fn unsuitable_site_renders_the_negative_verdict() {
        let cfg = EstimatorConfig::default();
        let site = SiteInput {
            latitude: 12.9,
            longitude: 77.6,
            rooftop_area_m2: 12.0,
            monthly_bill: 2000.0,
            panel_type: PanelTier::Basic,
            customer_name: "Tiny Roof".to_string(),
        };
        let record = evaluator::evaluate(&site, &cfg);
        let metrics =
            estimator::estimate_financials(record.system_size_kw, site.monthly_bill, &cfg)
                .into_metrics();
        let html = render_html(&record, &metrics, &cfg).unwrap();
        assert!(!record.suitable);
        assert!(html.contains("Not recommended"));
        assert!(html.contains("₹0")); // zeroed financials still shown
    }

    #[test]
    fn slugify_keeps_names_filesystem_safe() {
        assert_eq!(slugify("Asha Verma"), "Asha_Verma");
        assert_eq!(slugify("  O'Brien & Sons  "), "O_Brien___Sons");
        assert_eq!(slugify("///"), "proposal");
        assert_eq!(slugify(""), "proposal");
    }

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(fmt_currency(0.0), "₹0");
        assert_eq!(fmt_currency(420_000.0), "₹420,000");
        assert_eq!(fmt_currency(1_234_567.0), "₹1,234,567");
        assert_eq!(fmt_currency(-4200.0), "-₹4,200");
    }

    #[test]
    fn flat_chart_renders_for_zero_savings() {
        let svg = savings_chart_svg(&FinancialMetrics::default(), 25);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("polyline"));
    }
}
