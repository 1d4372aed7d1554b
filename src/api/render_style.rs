use serde::{Deserialize, Serialize};

use crate::core::TimeLabelFormat;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Price line drawn through the resolved samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub stroke_width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.27, 0.51, 0.71),
            stroke_width: 1.5,
        }
    }
}

/// Bottom (time) and left (price) axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub line_color: Color,
    pub stroke_width: f64,
    pub tick_length_px: f64,
    pub label_color: Color,
    pub font_size_px: f64,
    /// Pattern for time tick labels; tooltips use the engine's own format.
    pub time_tick_format: TimeLabelFormat,
    pub time_tick_spacing_px: f64,
    pub price_tick_spacing_px: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            line_color: Color::rgb(0.0, 0.0, 0.0),
            stroke_width: 1.0,
            tick_length_px: 6.0,
            label_color: Color::rgb(0.0, 0.0, 0.0),
            font_size_px: 10.0,
            time_tick_format: TimeLabelFormat::new("%Y-%m-%d"),
            time_tick_spacing_px: 90.0,
            price_tick_spacing_px: 36.0,
        }
    }
}

/// The ball drawn where the guide line meets the price line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius_px: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

/// Vertical tracker line spanning the plot height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLineStyle {
    pub color: Color,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub background_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub corner_radius: f64,
    pub text_color: Color,
    pub font_size_px: f64,
    pub padding_px: f64,
    pub width_px: f64,
    pub line_height_px: f64,
    /// Tooltip top-left corner relative to the marker.
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgba(1.0, 1.0, 1.0, 0.92),
            border_color: Color::rgb(0.6, 0.6, 0.6),
            border_width: 1.0,
            corner_radius: 4.0,
            text_color: Color::rgb(0.1, 0.1, 0.1),
            font_size_px: 11.0,
            padding_px: 6.0,
            width_px: 150.0,
            line_height_px: 14.0,
            offset_x: 8.0,
            offset_y: -44.0,
        }
    }
}

/// Visual parts of one annotation kind (hover or frozen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub marker: MarkerStyle,
    pub guide: GuideLineStyle,
    pub tooltip: TooltipStyle,
}

impl AnnotationStyle {
    #[must_use]
    pub fn hover() -> Self {
        Self {
            marker: MarkerStyle {
                radius_px: 2.0,
                fill_color: Color::rgb(0.0, 0.0, 0.0),
                stroke_color: Color::rgb(0.0, 0.0, 0.0),
                stroke_width: 1.0,
            },
            guide: GuideLineStyle {
                color: Color::rgba(0.4, 0.4, 0.4, 0.8),
                stroke_width: 1.0,
            },
            tooltip: TooltipStyle::default(),
        }
    }

    #[must_use]
    pub fn frozen() -> Self {
        let purple = Color::rgb(0.5, 0.0, 0.5);
        Self {
            marker: MarkerStyle {
                radius_px: 2.0,
                fill_color: purple,
                stroke_color: purple,
                stroke_width: 1.0,
            },
            guide: GuideLineStyle {
                color: Color::rgba(0.5, 0.0, 0.5, 0.6),
                stroke_width: 1.0,
            },
            tooltip: TooltipStyle {
                border_color: purple,
                ..TooltipStyle::default()
            },
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let marker = self.marker;
        if !marker.radius_px.is_finite() || marker.radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        validate_stroke("marker stroke width", marker.stroke_width, true)?;
        marker.fill_color.validate()?;
        marker.stroke_color.validate()?;

        validate_stroke("guide stroke width", self.guide.stroke_width, false)?;
        self.guide.color.validate()?;

        let tooltip = self.tooltip;
        for (name, value) in [
            ("tooltip font size", tooltip.font_size_px),
            ("tooltip width", tooltip.width_px),
            ("tooltip line height", tooltip.line_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("tooltip padding", tooltip.padding_px),
            ("tooltip border width", tooltip.border_width),
            ("tooltip corner radius", tooltip.corner_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !tooltip.offset_x.is_finite() || !tooltip.offset_y.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip offset must be finite".to_owned(),
            ));
        }
        tooltip.background_color.validate()?;
        tooltip.border_color.validate()?;
        tooltip.text_color.validate()
    }
}

/// Rectangle shown while a brush drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushStyle {
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::rgba(0.47, 0.47, 0.47, 0.3),
            border_color: Color::rgb(1.0, 1.0, 1.0),
            border_width: 1.0,
        }
    }
}

/// Typed visual properties for every element the engine draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub line: LineStyle,
    pub axis: AxisStyle,
    pub hover: AnnotationStyle,
    pub frozen: AnnotationStyle,
    pub brush: BrushStyle,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line: LineStyle::default(),
            axis: AxisStyle::default(),
            hover: AnnotationStyle::hover(),
            frozen: AnnotationStyle::frozen(),
            brush: BrushStyle::default(),
        }
    }
}

impl ChartStyle {
    /// Style used for an annotation's visuals.
    #[must_use]
    pub fn annotation(&self, frozen: bool) -> &AnnotationStyle {
        if frozen { &self.frozen } else { &self.hover }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_stroke("line stroke width", self.line.stroke_width, false)?;
        self.line.color.validate()?;

        let axis = &self.axis;
        validate_stroke("axis stroke width", axis.stroke_width, false)?;
        for (name, value) in [
            ("axis tick length", axis.tick_length_px),
            ("axis font size", axis.font_size_px),
            ("time tick spacing", axis.time_tick_spacing_px),
            ("price tick spacing", axis.price_tick_spacing_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        axis.line_color.validate()?;
        axis.label_color.validate()?;
        axis.time_tick_format.validate()?;

        self.hover.validate()?;
        self.frozen.validate()?;

        validate_stroke("brush border width", self.brush.border_width, true)?;
        self.brush.fill_color.validate()?;
        self.brush.border_color.validate()
    }
}

fn validate_stroke(name: &str, value: f64, allow_zero: bool) -> ChartResult<()> {
    let valid = value.is_finite() && if allow_zero { value >= 0.0 } else { value > 0.0 };
    if valid {
        return Ok(());
    }
    let bound = if allow_zero { ">= 0" } else { "> 0" };
    Err(ChartError::InvalidData(format!(
        "{name} must be finite and {bound}"
    )))
}
