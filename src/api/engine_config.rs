use serde::{Deserialize, Serialize};

use crate::core::{Margins, PlotArea, PriceAutoscale, PriceLabelFormat, TimeLabelFormat, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverMode, ZoomLimits};

use super::ChartStyle;

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and reload chart setup.
/// Every field falls back to its default when missing from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    pub margins: Margins,
    pub zoom_limits: ZoomLimits,
    /// Wheel zoom factor is `2^(-delta_y * wheel_zoom_sensitivity)`.
    pub wheel_zoom_sensitivity: f64,
    /// Brush rectangles narrower or shorter than this are ignored.
    pub brush_epsilon_px: f64,
    pub hover_mode: HoverMode,
    pub price_autoscale: PriceAutoscale,
    /// Click distance to a frozen marker that dismisses it.
    pub annotation_hit_radius_px: f64,
    pub time_label_format: TimeLabelFormat,
    pub price_label_format: PriceLabelFormat,
    pub style: ChartStyle,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            margins: Margins::default(),
            zoom_limits: ZoomLimits::default(),
            wheel_zoom_sensitivity: 0.002,
            brush_epsilon_px: 1.0,
            hover_mode: HoverMode::default(),
            price_autoscale: PriceAutoscale::default(),
            annotation_hit_radius_px: 6.0,
            time_label_format: TimeLabelFormat::default(),
            price_label_format: PriceLabelFormat::default(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.zoom_limits = ZoomLimits {
            min_scale,
            max_scale,
        };
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_sensitivity(mut self, sensitivity: f64) -> Self {
        self.wheel_zoom_sensitivity = sensitivity;
        self
    }

    #[must_use]
    pub fn with_brush_epsilon_px(mut self, epsilon_px: f64) -> Self {
        self.brush_epsilon_px = epsilon_px;
        self
    }

    #[must_use]
    pub fn with_hover_mode(mut self, mode: HoverMode) -> Self {
        self.hover_mode = mode;
        self
    }

    #[must_use]
    pub fn with_price_autoscale(mut self, autoscale: PriceAutoscale) -> Self {
        self.price_autoscale = autoscale;
        self
    }

    #[must_use]
    pub fn with_annotation_hit_radius_px(mut self, radius_px: f64) -> Self {
        self.annotation_hit_radius_px = radius_px;
        self
    }

    #[must_use]
    pub fn with_time_label_format(mut self, format: TimeLabelFormat) -> Self {
        self.time_label_format = format;
        self
    }

    #[must_use]
    pub fn with_price_label_format(mut self, format: PriceLabelFormat) -> Self {
        self.price_label_format = format;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Checks every field and resolves the plot area the config describes.
    pub fn validate(&self) -> ChartResult<PlotArea> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        let plot = PlotArea::resolve(self.viewport, self.margins)?;
        self.zoom_limits.validate()?;
        for (name, value) in [
            ("wheel zoom sensitivity", self.wheel_zoom_sensitivity),
            ("brush epsilon", self.brush_epsilon_px),
            ("annotation hit radius", self.annotation_hit_radius_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        self.time_label_format.validate()?;
        self.price_label_format.validate()?;
        self.style.validate()?;
        Ok(plot)
    }

    /// Serializes config to pretty JSON for config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}
