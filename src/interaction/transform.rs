use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PixelRange, ScreenPoint, Transform};
use crate::error::{ChartError, ChartResult};

/// Bounds for the transform scale factor `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 10.0,
        }
    }
}

impl ZoomLimits {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom limits must be finite".to_owned(),
            ));
        }
        if self.min_scale < 1.0 {
            return Err(ChartError::InvalidData(
                "zoom min_scale must be >= 1".to_owned(),
            ));
        }
        if self.max_scale < self.min_scale {
            return Err(ChartError::InvalidData(
                "zoom max_scale must be >= min_scale".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }
}

/// Current zoom/pan transform applied on top of both base scale ranges.
///
/// Zoom and pan only change the range mapping; scale domains stay put until
/// a brush commit or an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    transform: Transform,
    limits: ZoomLimits,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            limits: ZoomLimits::default(),
        }
    }
}

impl TransformState {
    pub fn new(limits: ZoomLimits) -> ChartResult<Self> {
        let limits = limits.validate()?;
        Ok(Self {
            transform: Transform {
                k: limits.min_scale,
                ..Transform::IDENTITY
            },
            limits,
        })
    }

    #[must_use]
    pub fn transform(self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn limits(self) -> ZoomLimits {
        self.limits
    }

    /// Multiplies `k` by `delta_scale` (clamped to the limits) keeping the
    /// value under `focal` fixed on screen.
    ///
    /// Returns `false` when clamping leaves `k` unchanged.
    pub fn apply_zoom(&mut self, delta_scale: f64, focal: ScreenPoint) -> ChartResult<bool> {
        if !delta_scale.is_finite() || delta_scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom delta scale must be finite and > 0".to_owned(),
            ));
        }
        if !focal.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom focal point must be finite".to_owned(),
            ));
        }

        let current = self.transform;
        let target_k = self.limits.clamp(current.k * delta_scale);
        if target_k == current.k {
            return Ok(false);
        }

        let base_x = current.invert_x(focal.x);
        let base_y = current.invert_y(focal.y);
        self.transform = Transform {
            k: target_k,
            translate_x: focal.x - base_x * target_k,
            translate_y: focal.y - base_y * target_k,
        };
        trace!(
            k = target_k,
            translate_x = self.transform.translate_x,
            translate_y = self.transform.translate_y,
            "apply zoom"
        );
        Ok(true)
    }

    /// Translates by screen pixels. Unrestricted.
    pub fn apply_pan(&mut self, dx: f64, dy: f64) -> ChartResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
        trace!(dx, dy, "apply pan");
        Ok(())
    }

    #[must_use]
    pub fn effective_x_range(self, base: PixelRange) -> PixelRange {
        self.transform.x_range(base)
    }

    #[must_use]
    pub fn effective_y_range(self, base: PixelRange) -> PixelRange {
        self.transform.y_range(base)
    }

    pub fn reset(&mut self) {
        self.transform = Transform {
            k: self.limits.min_scale,
            ..Transform::IDENTITY
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut state = TransformState::default();
        assert!(!state.apply_zoom(0.5, ScreenPoint::new(10.0, 10.0)).expect("zoom"));
        assert!(state.apply_zoom(100.0, ScreenPoint::new(10.0, 10.0)).expect("zoom"));
        assert_eq!(state.transform().k, 10.0);
    }

    #[test]
    fn limits_below_one_are_rejected() {
        let limits = ZoomLimits {
            min_scale: 0.5,
            max_scale: 4.0,
        };
        assert!(TransformState::new(limits).is_err());
    }

    #[test]
    fn pan_rejects_non_finite_delta() {
        let mut state = TransformState::default();
        assert!(state.apply_pan(f64::NAN, 0.0).is_err());
    }
}
