use serde::{Deserialize, Serialize};

use crate::core::{Sample, ScreenPoint, ViewProjection};

/// Projected line segment in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Axis-aligned clip rectangle in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub width: f64,
    pub height: f64,
}

/// Projects samples through the view and returns adjacent segments clipped
/// to `clip`. Segments entirely outside the clip rectangle are skipped.
///
/// The function is deterministic and side-effect free so both rendering and
/// tests consume the same geometry.
#[must_use]
pub fn project_line_segments(
    samples: &[Sample],
    view: ViewProjection,
    clip: ClipRect,
) -> Vec<LineSegment> {
    if samples.len() < 2 {
        return Vec::new();
    }

    let mapped = project_points(samples, view);
    mapped
        .windows(2)
        .filter_map(|pair| clip_segment(pair[0], pair[1], clip))
        .collect()
}

#[cfg(not(feature = "parallel-projection"))]
fn project_points(samples: &[Sample], view: ViewProjection) -> Vec<ScreenPoint> {
    samples
        .iter()
        .map(|sample| view.to_screen(sample.time, sample.price))
        .collect()
}

#[cfg(feature = "parallel-projection")]
fn project_points(samples: &[Sample], view: ViewProjection) -> Vec<ScreenPoint> {
    use rayon::prelude::*;

    samples
        .par_iter()
        .map(|sample| view.to_screen(sample.time, sample.price))
        .collect()
}

/// Liang-Barsky clipping of one segment against `[0, width] x [0, height]`.
#[must_use]
pub fn clip_segment(from: ScreenPoint, to: ScreenPoint, clip: ClipRect) -> Option<LineSegment> {
    if !from.is_finite() || !to.is_finite() {
        return None;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, from.x),
        (dx, clip.width - from.x),
        (-dy, from.y),
        (dy, clip.height - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(LineSegment {
        x1: from.x + t0 * dx,
        y1: from.y + t0 * dy,
        x2: from.x + t1 * dx,
        y2: from.y + t1 * dy,
    })
}
