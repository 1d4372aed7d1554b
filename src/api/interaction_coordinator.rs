use tracing::{debug, trace};

use crate::annotation::AnnotationId;
use crate::core::{
    Domain, ScreenPoint, ViewProjection, interpolate_price, nearest_sample_index,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PluginEvent;
use crate::interaction::{BrushSelection, ChartInput, DomainCommit, HoverMode, HoverPoint};
use crate::render::Renderer;

use super::ChartEngine;
use super::render_frame_builder::tooltip_box;

impl<R: Renderer> ChartEngine<R> {
    /// Handles one input event to completion, including its render pass.
    pub fn dispatch(&mut self, input: ChartInput) -> ChartResult<()> {
        match input {
            ChartInput::PointerMove { x, y } => self.pointer_move(x, y),
            ChartInput::PointerLeave => self.pointer_leave(),
            ChartInput::Click { x, y } => self.click(x, y).map(|_| ()),
            ChartInput::Wheel { x, y, delta_y } => self.wheel(x, y, delta_y),
            ChartInput::Pinch { x, y, scale } => self.pinch(x, y, scale),
            ChartInput::Pan { dx, dy } => self.pan(dx, dy),
            ChartInput::BrushStart { x, y } => self.brush_start(x, y),
            ChartInput::BrushMove { x, y } => self.brush_move(x, y),
            ChartInput::BrushEnd { x, y } => self.brush_end(x, y).map(|_| ()),
            ChartInput::ResetView => self.reset_view(),
        }
    }

    /// Moves the pointer (viewport pixels) and refreshes the hover annotation.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let local = self.local_point(x, y)?;
        self.interaction.on_pointer_move(local);
        self.brush.update(local);
        self.refresh_hover();
        self.render()
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.interaction.on_pointer_leave();
        self.hide_hover();
        self.render()
    }

    /// Dismisses the frozen annotation under the pointer, or freezes the
    /// current hover point when nothing is hit.
    pub fn click(&mut self, x: f64, y: f64) -> ChartResult<ClickOutcome> {
        let local = self.local_point(x, y)?;
        let outcome = if let Some(id) = self.hit_test_annotation(local) {
            self.remove_annotation(id);
            ClickOutcome::Dismissed(id)
        } else if let Some(hovered) = self.interaction.hovered() {
            let id = self.annotations.freeze(
                hovered.time,
                hovered.price,
                hovered.screen.x,
                hovered.screen.y,
            );
            self.emit_plugin_event(PluginEvent::AnnotationFrozen {
                id,
                time: hovered.time,
                price: hovered.price,
            });
            ClickOutcome::Frozen(id)
        } else {
            ClickOutcome::Ignored
        };
        self.render()?;
        Ok(outcome)
    }

    /// Removes a frozen annotation. Unknown ids are a no-op.
    pub fn dismiss_annotation(&mut self, id: AnnotationId) -> ChartResult<bool> {
        let removed = self.remove_annotation(id);
        if removed {
            self.render()?;
        }
        Ok(removed)
    }

    /// Wheel zoom around the pointer. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> ChartResult<()> {
        if !delta_y.is_finite() {
            return Err(ChartError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }
        let local = self.local_point(x, y)?;
        let factor = 2f64.powf(-delta_y * self.config.wheel_zoom_sensitivity);
        self.zoom_at(local, factor)
    }

    /// Pinch zoom by a multiplicative `scale` around the gesture center.
    pub fn pinch(&mut self, x: f64, y: f64, scale: f64) -> ChartResult<()> {
        let local = self.local_point(x, y)?;
        self.zoom_at(local, scale)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> ChartResult<()> {
        self.transform.apply_pan(dx, dy)?;
        self.after_view_change();
        self.emit_plugin_event(PluginEvent::TransformChanged {
            transform: self.transform(),
        });
        self.render()
    }

    pub fn brush_start(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let local = self.local_point(x, y)?;
        self.brush.begin(local);
        self.interaction.on_brush_start();
        self.render()
    }

    pub fn brush_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let local = self.local_point(x, y)?;
        if self.brush.update(local) {
            self.render()?;
        }
        Ok(())
    }

    /// Ends the drag. A large enough rectangle becomes the new time and price
    /// domains; the returned commit is `None` when nothing was committed.
    pub fn brush_end(&mut self, x: f64, y: f64) -> ChartResult<Option<DomainCommit>> {
        let local = self.local_point(x, y)?;
        let selection = self.brush.end(local);
        self.interaction.on_brush_end();

        let commit = match (selection, self.view()) {
            (Some(selection), Some(view)) => Some(self.commit_brush(selection, view)?),
            (Some(_), None) => {
                debug!("brush ignored without a series");
                None
            }
            (None, _) => {
                debug!(epsilon_px = self.brush.epsilon_px(), "degenerate brush ignored");
                None
            }
        };
        self.render()?;
        Ok(commit)
    }

    /// Sets both domains directly, as a brush commit would.
    pub fn set_domains(&mut self, time: (f64, f64), price: (f64, f64)) -> ChartResult<()> {
        if self.scales.is_none() {
            return Ok(());
        }
        let commit = DomainCommit {
            time: Domain::new(time.0, time.1)?,
            price: Domain::new(price.0, price.1)?,
        };
        self.commit_domains(commit)?;
        self.render()
    }

    /// Restores the identity transform and data-extent domains.
    pub fn reset_view(&mut self) -> ChartResult<()> {
        self.transform.reset();
        self.scales = self.fit_scales()?;
        self.after_view_change();
        debug!("view reset");
        self.emit_plugin_event(PluginEvent::ViewReset);
        self.render()
    }

    pub fn set_hover_mode(&mut self, mode: HoverMode) -> ChartResult<()> {
        self.interaction.set_hover_mode(mode);
        self.refresh_hover();
        self.render()
    }

    fn zoom_at(&mut self, focal: ScreenPoint, factor: f64) -> ChartResult<()> {
        if self.transform.apply_zoom(factor, focal)? {
            self.after_view_change();
            self.emit_plugin_event(PluginEvent::TransformChanged {
                transform: self.transform(),
            });
        }
        self.render()
    }

    fn commit_brush(
        &mut self,
        selection: BrushSelection,
        view: ViewProjection,
    ) -> ChartResult<DomainCommit> {
        let commit = selection.to_domains(view)?;
        self.commit_domains(commit)?;
        Ok(commit)
    }

    /// Stores new domains. The transform returns to identity since the new
    /// domains already fill the base ranges.
    fn commit_domains(&mut self, commit: DomainCommit) -> ChartResult<()> {
        let Some(scales) = &mut self.scales else {
            return Ok(());
        };
        scales.time.set_domain(commit.time.min(), commit.time.max())?;
        scales
            .price
            .set_domain(commit.price.min(), commit.price.max())?;
        self.transform.reset();
        self.after_view_change();

        debug!(
            time_min = commit.time.min(),
            time_max = commit.time.max(),
            price_min = commit.price.min(),
            price_max = commit.price.max(),
            "domain committed"
        );
        self.emit_plugin_event(PluginEvent::DomainCommitted {
            time: commit.time.as_tuple(),
            price: commit.price.as_tuple(),
        });
        Ok(())
    }

    fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        let removed = self.annotations.dismiss(id).is_some();
        if removed {
            self.emit_plugin_event(PluginEvent::AnnotationDismissed { id });
        }
        removed
    }

    /// Topmost visible frozen annotation whose marker or tooltip contains
    /// the plot-local `point`.
    fn hit_test_annotation(&self, point: ScreenPoint) -> Option<AnnotationId> {
        let radius = self.config.annotation_hit_radius_px;
        if let Some(id) = self
            .annotations
            .hit_test_marker(point, radius)
            .filter(|id| {
                self.annotations
                    .get(*id)
                    .is_some_and(|annotation| self.plot.contains_local(annotation.screen))
            })
        {
            return Some(id);
        }

        let tooltip = self.config.style.frozen.tooltip;
        self.annotations
            .frozen()
            .rev()
            .filter(|annotation| self.plot.contains_local(annotation.screen))
            .find(|annotation| tooltip_box(annotation.screen, &tooltip).contains(point.x, point.y))
            .map(|annotation| annotation.id)
    }

    fn after_view_change(&mut self) {
        self.reproject_annotations();
        self.refresh_hover();
    }

    pub(super) fn reproject_annotations(&mut self) {
        if let Some(view) = self.view() {
            self.annotations.reproject_all(&view);
        }
    }

    /// Recomputes the hover point from the last cursor position.
    pub(super) fn refresh_hover(&mut self) {
        let hover_mode = self.interaction.hover_mode();
        let target = match (self.interaction.cursor(), self.view()) {
            (Some(cursor), Some(view))
                if hover_mode != HoverMode::Hidden && self.plot.contains_local(cursor) =>
            {
                self.resolve_hover_point(view, cursor, hover_mode)
            }
            _ => None,
        };

        let Some(point) = target else {
            self.hide_hover();
            return;
        };
        self.interaction.set_hovered(Some(point));
        self.annotations.update_hover(
            point.time,
            Some(point.price),
            point.screen.x,
            point.screen.y,
        );
        trace!(time = point.time, price = point.price, "hover refreshed");
        self.emit_plugin_event(PluginEvent::HoverUpdated {
            time: point.time,
            price: point.price,
        });
    }

    pub(super) fn hide_hover(&mut self) {
        self.interaction.set_hovered(None);
        if self.annotations.clear_hover() {
            trace!("hover cleared");
            self.emit_plugin_event(PluginEvent::HoverCleared);
        }
    }

    fn resolve_hover_point(
        &self,
        view: ViewProjection,
        cursor: ScreenPoint,
        mode: HoverMode,
    ) -> Option<HoverPoint> {
        let time = view.x_to_time(cursor.x);
        let interpolated = interpolate_price(&self.samples, time)?;
        let nearest_index = nearest_sample_index(&self.samples, time)?;
        let nearest = self.samples.get(nearest_index).copied()?;
        let (time, price) = match mode {
            HoverMode::SnapToNearest => (nearest.time, nearest.price),
            HoverMode::Interpolate | HoverMode::Hidden => (interpolated.time, interpolated.price),
        };
        Some(HoverPoint {
            time,
            price,
            nearest_index,
            nearest,
            screen: view.to_screen(time, price),
        })
    }

    fn local_point(&self, x: f64, y: f64) -> ChartResult<ScreenPoint> {
        let point = ScreenPoint::new(x, y);
        if !point.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer coordinates must be finite".to_owned(),
            ));
        }
        Ok(self.plot.to_local(point))
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Frozen(AnnotationId),
    Dismissed(AnnotationId),
    /// Nothing under the pointer and no hover point to freeze.
    Ignored,
}
