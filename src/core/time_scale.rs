use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::series::time_extent;
use crate::core::{Domain, LinearScale, PixelRange, Sample};
use crate::error::ChartResult;

/// Horizontal axis: Unix-second times onto `[0, plot_width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(time_start: f64, time_end: f64, plot_width: f64) -> ChartResult<Self> {
        let linear = LinearScale::new(
            Domain::new(time_start, time_end)?,
            PixelRange::new(0.0, plot_width),
        )?;
        Ok(Self { linear })
    }

    /// Fits the domain to the data's time extent.
    ///
    /// Returns `Ok(None)` for an empty series: the domain is undefined.
    pub fn from_samples(samples: &[Sample], plot_width: f64) -> ChartResult<Option<Self>> {
        time_extent(samples)
            .map(|(min, max)| Self::new(min, max, plot_width))
            .transpose()
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
    pub fn project(self, time: f64) -> f64 {
        self.linear.project(time)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn project_datetime(self, time: DateTime<Utc>) -> f64 {
        self.project(datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn invert_datetime(self, pixel: f64) -> Option<DateTime<Utc>> {
        unix_seconds_to_datetime(self.invert(pixel))
    }
}
