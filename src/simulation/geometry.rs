//! Display geometry for the incline and the horizontal segment
//!
//! Pure presentation data: evenly spaced polylines a display layer can
//! draw. Nothing in the steppers reads these back.

use super::params::{
    SimulationConfig, APPROACH_DISPLAY_MARGIN, MOTION_EPSILON, POLYLINE_POINTS,
    VERTICAL_ANGLE_TOLERANCE,
};
use super::states::NVec2;

/// `n` evenly spaced points from `start` to `end`, both included
pub fn polyline(start: NVec2, end: NVec2, n: usize) -> Vec<NVec2> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| start + (end - start) * (i as f64 / last))
                .collect()
        }
    }
}

/// Incline and horizontal polylines of one layout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub plane: Vec<NVec2>,
    pub horizontal: Vec<NVec2>,
}

/// Descent layout: incline top at x = 0, junction at (L cos, 0),
/// horizontal run to the right
pub fn descent_layout(cfg: &SimulationConfig) -> Layout {
    let junction = NVec2::new(cfg.incline_run(), 0.0);
    let top = NVec2::new(0.0, cfg.incline_height());
    let end = junction + NVec2::new(cfg.horizontal_length, 0.0);
    Layout {
        plane: polyline(top, junction, POLYLINE_POINTS),
        horizontal: polyline(junction, end, POLYLINE_POINTS),
    }
}

/// Top of the ascent incline, to the left of the base at the origin
pub fn ascent_peak(cfg: &SimulationConfig) -> NVec2 {
    let x = if cfg.angle < std::f64::consts::FRAC_PI_2 - VERTICAL_ANGLE_TOLERANCE {
        -cfg.incline_run()
    } else {
        0.0
    };
    NVec2::new(x, cfg.incline_height())
}

/// Ascent layout: incline from the peak down to the base at the origin,
/// horizontal from the base to the starting distance plus a display margin
pub fn ascent_layout(cfg: &SimulationConfig) -> Layout {
    let base = NVec2::zeros();
    let mut extent = cfg.horizontal_length + APPROACH_DISPLAY_MARGIN;
    if (extent - base.x).abs() < MOTION_EPSILON {
        extent = base.x + 1.0;
    }
    Layout {
        plane: polyline(ascent_peak(cfg), base, POLYLINE_POINTS),
        horizontal: polyline(base, NVec2::new(extent, 0.0), POLYLINE_POINTS),
    }
}
