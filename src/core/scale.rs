use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::error::ChartResult;

/// Value-space extent of one axis. Always ordered: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    /// Builds a domain from two bounds in any order.
    pub fn new(a: f64, b: f64) -> ChartResult<Self> {
        let a = ensure_finite(a, "domain bound")?;
        let b = ensure_finite(b, "domain bound")?;
        Ok(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// A collapsed domain maps every value to the middle of the range.
    #[must_use]
    pub fn is_collapsed(self) -> bool {
        self.span() <= 0.0
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Pixel extent an axis maps onto. `start` may be greater than `end`
/// (the price axis grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn midpoint(self) -> f64 {
        0.5 * (self.start + self.end)
    }
}

/// Linear mapping between a mutable domain and a fixed pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Domain,
    range: PixelRange,
}

impl LinearScale {
    pub fn new(domain: Domain, range: PixelRange) -> ChartResult<Self> {
        ensure_finite(range.start, "range start")?;
        ensure_finite(range.end, "range end")?;
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.range
    }

    /// Replaces the domain. Bounds are reordered so the domain never inverts.
    pub fn set_domain(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.domain = Domain::new(min, max)?;
        Ok(())
    }

    /// Copy of this scale projecting onto another pixel range.
    #[must_use]
    pub fn with_range(self, range: PixelRange) -> Self {
        Self {
            domain: self.domain,
            range,
        }
    }

    /// Maps a domain value to a pixel.
    ///
    /// A collapsed domain yields the range midpoint.
    #[must_use]
    pub fn project(self, value: f64) -> f64 {
        if self.domain.is_collapsed() {
            return self.range.midpoint();
        }
        let normalized = (value - self.domain.min) / self.domain.span();
        self.range.start + normalized * self.range.span()
    }

    /// Maps a pixel back to a domain value.
    ///
    /// A collapsed domain or zero-length range yields the domain minimum.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range.span();
        if self.domain.is_collapsed() || range_span == 0.0 {
            return self.domain.min;
        }
        let normalized = (pixel - self.range.start) / range_span;
        self.domain.min + normalized * self.domain.span()
    }
}
