//! Rooftop panel placement for the proposal diagram.
//!
//! Plans a row-major grid of standard modules on an idealized rectangular
//! roof. Purely illustrative, the installer's site survey decides the real
//! layout, but the panel count and packing give the customer an honest
//! sense of how full their roof gets.

/// Standard module footprint and rating (typical 400 W residential panel).
pub const PANEL_WIDTH_M: f64 = 1.0;
pub const PANEL_HEIGHT_M: f64 = 1.6;
pub const PANEL_CAPACITY_KW: f64 = 0.4;

/// Walkway spacing between modules and keep-out margin at the roof edge.
const PANEL_SPACING_M: f64 = 0.3;
const EDGE_MARGIN_M: f64 = 0.5;

/// Roof aspect ratio assumed when only the area is known.
const ASPECT_RATIO: f64 = 1.2;

/// Top-left corner of one placed panel, measured from the roof's top-left
/// corner in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPosition {
    pub x_m: f64,
    pub y_m: f64,
}

#[derive(Debug, Clone)]
pub struct RoofLayout {
    pub width_m: f64,
    pub height_m: f64,
    /// Panels the sized system calls for.
    pub panels_required: usize,
    /// Panels that actually fit inside the margins.
    pub panels: Vec<PanelPosition>,
}

/// Plan the panel grid for a roof of `rooftop_area_m2` hosting a
/// `system_size_kw` system. Degenerate inputs fall back to a small
/// placeholder roof so the diagram never degenerates to nothing.
pub fn plan_layout(rooftop_area_m2: f64, system_size_kw: f64) -> RoofLayout {
    let (width_m, height_m, panels_required) = if rooftop_area_m2 > 0.0 && system_size_kw > 0.0 {
        let width = rooftop_area_m2.sqrt() * ASPECT_RATIO;
        let height = rooftop_area_m2 / width;
        let required = (system_size_kw * 1000.0 / (PANEL_CAPACITY_KW * 1000.0)) as usize;
        (width, height, required)
    } else {
        (10.0, 7.0, 12)
    };

    let pitch_x = PANEL_WIDTH_M + PANEL_SPACING_M;
    let pitch_y = PANEL_HEIGHT_M + PANEL_SPACING_M;
    let panels_per_row = ((width_m / pitch_x) as usize).max(1);
    let rows = panels_required.div_ceil(panels_per_row);

    let mut panels = Vec::with_capacity(panels_required);
    'grid: for row in 0..rows {
        for col in 0..panels_per_row {
            if panels.len() >= panels_required {
                break 'grid;
            }
            let x = EDGE_MARGIN_M + col as f64 * pitch_x;
            let y = EDGE_MARGIN_M + row as f64 * pitch_y;
            // keep the whole module inside the opposite margins
            if x + PANEL_WIDTH_M < width_m && y + PANEL_HEIGHT_M < height_m {
                panels.push(PanelPosition { x_m: x, y_m: y });
            }
        }
    }

    RoofLayout {
        width_m,
        height_m,
        panels_required,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_count_follows_system_size() {
        // 7 kW ÷ 0.4 kW/panel = 17.5 → 17 whole panels requested
        let layout = plan_layout(70.0, 7.0);
        assert_eq!(layout.panels_required, 17);
        assert!(!layout.panels.is_empty());
        assert!(layout.panels.len() <= layout.panels_required);
    }

    #[test]
    fn every_panel_stays_inside_the_roof() {
        let layout = plan_layout(70.0, 7.0);
        for p in &layout.panels {
            assert!(p.x_m >= EDGE_MARGIN_M);
            assert!(p.y_m >= EDGE_MARGIN_M);
            assert!(p.x_m + PANEL_WIDTH_M < layout.width_m);
            assert!(p.y_m + PANEL_HEIGHT_M < layout.height_m);
        }
    }

    #[test]
    fn roof_rectangle_preserves_area() {
        let layout = plan_layout(70.0, 7.0);
        assert!((layout.width_m * layout.height_m - 70.0).abs() < 1e-9);
        assert!(layout.width_m > layout.height_m);
    }

    #[test]
    fn degenerate_inputs_use_placeholder_roof() {
        let layout = plan_layout(0.0, 0.0);
        assert_eq!(layout.width_m, 10.0);
        assert_eq!(layout.height_m, 7.0);
        assert_eq!(layout.panels_required, 12);
    }

    #[test]
    fn tight_roof_places_fewer_panels_than_required() {
        // 25 m² cannot physically host a 10 kW (25-panel) array
        let layout = plan_layout(25.0, 10.0);
        assert_eq!(layout.panels_required, 25);
        assert!(layout.panels.len() < layout.panels_required);
    }
}
