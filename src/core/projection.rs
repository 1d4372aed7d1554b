use serde::{Deserialize, Serialize};

use crate::core::{PixelRange, PriceScale, ScreenPoint, TimeScale};

/// Zoom/pan transform in plot-local pixels: `screen = base * k + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub k: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn apply_x(self, base_px: f64) -> f64 {
        base_px * self.k + self.translate_x
    }

    #[must_use]
    pub fn apply_y(self, base_px: f64) -> f64 {
        base_px * self.k + self.translate_y
    }

    #[must_use]
    pub fn invert_x(self, screen_px: f64) -> f64 {
        (screen_px - self.translate_x) / self.k
    }

    #[must_use]
    pub fn invert_y(self, screen_px: f64) -> f64 {
        (screen_px - self.translate_y) / self.k
    }

    /// Effective horizontal range for a base range.
    #[must_use]
    pub fn x_range(self, base: PixelRange) -> PixelRange {
        PixelRange::new(self.apply_x(base.start), self.apply_x(base.end))
    }

    /// Effective vertical range for a base range.
    #[must_use]
    pub fn y_range(self, base: PixelRange) -> PixelRange {
        PixelRange::new(self.apply_y(base.start), self.apply_y(base.end))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Both axis scales composed with the current transform.
///
/// This is the only place domain values become screen pixels; stored
/// domains are never touched by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewProjection {
    pub time: TimeScale,
    pub price: PriceScale,
    pub transform: Transform,
}

impl ViewProjection {
    #[must_use]
    pub fn new(time: TimeScale, price: PriceScale, transform: Transform) -> Self {
        Self {
            time,
            price,
            transform,
        }
    }

    #[must_use]
    pub fn effective_time_range(self) -> PixelRange {
        self.transform.x_range(self.time.range())
    }

    #[must_use]
    pub fn effective_price_range(self) -> PixelRange {
        self.transform.y_range(self.price.range())
    }

    #[must_use]
    pub fn time_to_x(self, time: f64) -> f64 {
        self.time.linear().with_range(self.effective_time_range()).project(time)
    }

    #[must_use]
    pub fn price_to_y(self, price: f64) -> f64 {
        self.price
            .linear()
            .with_range(self.effective_price_range())
            .project(price)
    }

    #[must_use]
    pub fn x_to_time(self, x: f64) -> f64 {
        self.time.linear().with_range(self.effective_time_range()).invert(x)
    }

    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        self.price
            .linear()
            .with_range(self.effective_price_range())
            .invert(y)
    }

    /// Domain-space `(time, price)` to plot-local screen pixels.
    #[must_use]
    pub fn to_screen(self, time: f64, price: f64) -> ScreenPoint {
        ScreenPoint::new(self.time_to_x(time), self.price_to_y(price))
    }

    /// Plot-local screen pixels to domain-space `(time, price)`.
    #[must_use]
    pub fn to_domain(self, point: ScreenPoint) -> (f64, f64) {
        (self.x_to_time(point.x), self.y_to_price(point.y))
    }
}
