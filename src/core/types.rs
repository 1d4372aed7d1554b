use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

/// Space reserved around the plot area for axes and labels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
            (self.left, "left"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidLayout(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 30.0, 40.0, 40.0)
    }
}

/// Plot rectangle inside the viewport, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Resolves the plot rectangle left after removing margins from the viewport.
    pub fn resolve(viewport: Viewport, margins: Margins) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let margins = margins.validate()?;
        let width = f64::from(viewport.width) - margins.left - margins.right;
        let height = f64::from(viewport.height) - margins.top - margins.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidLayout(format!(
                "margins leave no plot area (width={width}, height={height})"
            )));
        }
        Ok(Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Converts a viewport-space point into plot-local pixels.
    #[must_use]
    pub fn to_local(self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(point.x - self.left, point.y - self.top)
    }

    /// Converts a plot-local point into viewport pixels.
    #[must_use]
    pub fn to_viewport(self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(point.x + self.left, point.y + self.top)
    }

    /// Whether a plot-local point lies inside the plot rectangle (inclusive).
    #[must_use]
    pub fn contains_local(self, point: ScreenPoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn distance_to(self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A resolved price sample. `time` is Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub price: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> ChartResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            price: decimal_to_f64(price, "price")?,
        })
    }
}

/// Provider-shaped sample: either field may be missing.
///
/// A missing `price` is a gap to forward-fill; a missing `time` makes the
/// sample malformed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(default, alias = "timestamp")]
    pub time: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl RawSample {
    #[must_use]
    pub const fn new(time: Option<f64>, price: Option<f64>) -> Self {
        Self { time, price }
    }

    #[must_use]
    pub fn unix(seconds: i64, price: Option<f64>) -> Self {
        Self {
            time: Some(seconds as f64),
            price,
        }
    }

    pub fn from_datetime(time: DateTime<Utc>, price: Option<Decimal>) -> ChartResult<Self> {
        let price = price.map(|p| decimal_to_f64(p, "price")).transpose()?;
        Ok(Self {
            time: Some(datetime_to_unix_seconds(time)),
            price,
        })
    }
}

impl From<Sample> for RawSample {
    fn from(sample: Sample) -> Self {
        Self::new(Some(sample.time), Some(sample.price))
    }
}
