use serde::{Deserialize, Serialize};

use crate::core::series::price_extent;
use crate::core::{Domain, LinearScale, PixelRange, Sample};
use crate::error::ChartResult;

/// How the price domain is fitted to data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceAutoscale {
    /// `[min(0, low), high]`: the axis always shows the zero line.
    #[default]
    ZeroBased,
    /// `[low, high]`.
    DataExtent,
}

/// Vertical axis: prices onto `[plot_height, 0]` (higher price, smaller y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    linear: LinearScale,
}

impl PriceScale {
    pub fn new(price_min: f64, price_max: f64, plot_height: f64) -> ChartResult<Self> {
        let linear = LinearScale::new(
            Domain::new(price_min, price_max)?,
            PixelRange::new(plot_height, 0.0),
        )?;
        Ok(Self { linear })
    }

    /// Fits the domain to the data's prices using `autoscale`.
    ///
    /// Returns `Ok(None)` for an empty series.
    pub fn from_samples(
        samples: &[Sample],
        plot_height: f64,
        autoscale: PriceAutoscale,
    ) -> ChartResult<Option<Self>> {
        let Some((low, high)) = price_extent(samples) else {
            return Ok(None);
        };
        let (min, max) = match autoscale {
            PriceAutoscale::ZeroBased => (low.min(0.0), high.max(0.0)),
            PriceAutoscale::DataExtent => (low, high),
        };
        Self::new(min, max, plot_height).map(Some)
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> PixelRange {
        self.linear.range()
    }

    #[must_use]
    pub fn linear(self) -> LinearScale {
        self.linear
    }

    pub fn set_domain(&mut self, min: f64, max: f64) -> ChartResult<()> {
        self.linear.set_domain(min, max)
    }

    #[must_use]
    pub fn project(self, price: f64) -> f64 {
        self.linear.project(price)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }
}
