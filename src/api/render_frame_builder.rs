use crate::annotation::Annotation;
use crate::core::{
    ClipRect, PriceLabelFormat, ScreenPoint, ViewProjection, project_line_segments,
};
use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::render::{
    AnnotationVisual, CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

use super::axis_ticks::{axis_tick_target_count, nice_ticks, time_ticks};
use super::{ChartEngine, TooltipStyle};

const TOOLTIP_LINES: usize = 2;
const AXIS_LABEL_GAP_PX: f64 = 2.0;
const PIXEL_EPSILON: f64 = 1e-6;

/// Tooltip rectangle for a marker at plot-local `marker`, in plot-local
/// pixels.
pub(super) fn tooltip_box(marker: ScreenPoint, style: &TooltipStyle) -> RectPrimitive {
    let height = 2.0 * style.padding_px + TOOLTIP_LINES as f64 * style.line_height_px;
    RectPrimitive::new(
        marker.x + style.offset_x,
        marker.y + style.offset_y,
        style.width_px,
        height,
        style.background_color,
    )
    .with_border(style.border_width, style.border_color)
    .with_corner_radius(style.corner_radius)
}

impl<R: Renderer> ChartEngine<R> {
    /// Draws the current state through the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    /// Materializes the frame the renderer would receive, in viewport pixels.
    ///
    /// Without a series only the axis lines are present.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.viewport);
        self.push_axis_lines(&mut frame);

        let Some(view) = self.view() else {
            frame.validate()?;
            return Ok(frame);
        };

        self.push_time_ticks(&mut frame, view);
        self.push_price_ticks(&mut frame, view);
        self.push_series_line(&mut frame, view);
        self.push_brush(&mut frame);

        for annotation in self.annotations.frozen() {
            if let Some(visual) = self.annotation_visual(annotation) {
                frame.annotations.push(visual);
            }
        }
        if let Some(visual) = self
            .annotations
            .hover()
            .and_then(|hover| self.annotation_visual(hover))
        {
            frame.annotations.push(visual);
        }

        frame.validate()?;
        Ok(frame)
    }

    fn push_axis_lines(&self, frame: &mut RenderFrame) {
        let plot = self.plot;
        let axis = &self.config.style.axis;
        frame.lines.push(LinePrimitive::new(
            plot.left,
            plot.bottom(),
            plot.right(),
            plot.bottom(),
            axis.stroke_width,
            axis.line_color,
        ));
        frame.lines.push(LinePrimitive::new(
            plot.left,
            plot.top,
            plot.left,
            plot.bottom(),
            axis.stroke_width,
            axis.line_color,
        ));
    }

    fn push_time_ticks(&self, frame: &mut RenderFrame, view: ViewProjection) {
        let plot = self.plot;
        let axis = &self.config.style.axis;
        let start = view.x_to_time(0.0);
        let end = view.x_to_time(plot.width);
        let count = axis_tick_target_count(plot.width, axis.time_tick_spacing_px);

        for time in time_ticks(start, end, count) {
            let x = view.time_to_x(time);
            if !(-PIXEL_EPSILON..=plot.width + PIXEL_EPSILON).contains(&x) {
                continue;
            }
            let x = plot.left + x;
            let tick_end = plot.bottom() + axis.tick_length_px;
            frame.lines.push(LinePrimitive::new(
                x,
                plot.bottom(),
                x,
                tick_end,
                axis.stroke_width,
                axis.line_color,
            ));
            frame.texts.push(TextPrimitive::new(
                axis.time_tick_format.format(time),
                x,
                tick_end + AXIS_LABEL_GAP_PX,
                axis.font_size_px,
                axis.label_color,
                TextHAlign::Center,
            ));
        }
    }

    fn push_price_ticks(&self, frame: &mut RenderFrame, view: ViewProjection) {
        let plot = self.plot;
        let axis = &self.config.style.axis;
        let low = view.y_to_price(plot.height);
        let high = view.y_to_price(0.0);
        let count = axis_tick_target_count(plot.height, axis.price_tick_spacing_px);
        let ticks = nice_ticks(low, high, count);
        let label_format = PriceLabelFormat {
            prefix: self.config.price_label_format.prefix.clone(),
            precision: tick_precision(&ticks),
        };

        for price in ticks {
            let y = view.price_to_y(price);
            if !(-PIXEL_EPSILON..=plot.height + PIXEL_EPSILON).contains(&y) {
                continue;
            }
            let y = plot.top + y;
            let tick_start = plot.left - axis.tick_length_px;
            frame.lines.push(LinePrimitive::new(
                tick_start,
                y,
                plot.left,
                y,
                axis.stroke_width,
                axis.line_color,
            ));
            frame.texts.push(TextPrimitive::new(
                label_format.format(price),
                tick_start - AXIS_LABEL_GAP_PX,
                y - axis.font_size_px / 2.0,
                axis.font_size_px,
                axis.label_color,
                TextHAlign::Right,
            ));
        }
    }

    fn push_series_line(&self, frame: &mut RenderFrame, view: ViewProjection) {
        let plot = self.plot;
        let style = self.config.style.line;
        let clip = ClipRect {
            width: plot.width,
            height: plot.height,
        };
        frame.lines.extend(
            project_line_segments(&self.samples, view, clip)
                .into_iter()
                .map(|segment| {
                    LinePrimitive::new(
                        plot.left + segment.x1,
                        plot.top + segment.y1,
                        plot.left + segment.x2,
                        plot.top + segment.y2,
                        style.stroke_width,
                        style.color,
                    )
                }),
        );
    }

    fn push_brush(&self, frame: &mut RenderFrame) {
        let Some(selection) = self.brush.selection() else {
            return;
        };
        let plot = self.plot;
        let rect = selection.normalized();
        let x0 = rect.x0.clamp(0.0, plot.width);
        let x1 = rect.x1.clamp(0.0, plot.width);
        let y0 = rect.y0.clamp(0.0, plot.height);
        let y1 = rect.y1.clamp(0.0, plot.height);
        let style = self.config.style.brush;
        frame.rects.push(
            RectPrimitive::new(plot.left + x0, plot.top + y0, x1 - x0, y1 - y0, style.fill_color)
                .with_border(style.border_width, style.border_color),
        );
    }

    /// Guide, marker and tooltip for one annotation. Annotations whose
    /// marker falls outside the plot are clipped away.
    fn annotation_visual(&self, annotation: &Annotation) -> Option<AnnotationVisual> {
        let plot = self.plot;
        if !plot.contains_local(annotation.screen) {
            return None;
        }
        let style = self.config.style.annotation(annotation.frozen);
        let marker = plot.to_viewport(annotation.screen);

        let local_box = tooltip_box(annotation.screen, &style.tooltip);
        let tooltip_box = RectPrimitive {
            x: plot.left + local_box.x,
            y: plot.top + local_box.y,
            ..local_box
        };
        let tooltip = style.tooltip;
        let tooltip_lines = [
            format!("Date: {}", annotation.label.date),
            format!("Price: {}", annotation.label.price),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            TextPrimitive::new(
                text,
                tooltip_box.x + tooltip.padding_px,
                tooltip_box.y + tooltip.padding_px + index as f64 * tooltip.line_height_px,
                tooltip.font_size_px,
                tooltip.text_color,
                TextHAlign::Left,
            )
        })
        .collect();

        Some(AnnotationVisual {
            id: annotation.id,
            frozen: annotation.frozen,
            guide: LinePrimitive::new(
                marker.x,
                plot.top,
                marker.x,
                plot.bottom(),
                style.guide.stroke_width,
                style.guide.color,
            ),
            marker: CirclePrimitive {
                cx: marker.x,
                cy: marker.y,
                radius: style.marker.radius_px,
                fill_color: style.marker.fill_color,
                stroke_color: style.marker.stroke_color,
                stroke_width: style.marker.stroke_width,
            },
            tooltip_box,
            tooltip_lines,
        })
    }
}

/// Decimals needed to tell adjacent ticks apart.
fn tick_precision(ticks: &[f64]) -> u8 {
    let step = match ticks {
        [first, second, ..] => (second - first).abs(),
        _ => return 0,
    };
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).clamp(0.0, 12.0) as u8
}
